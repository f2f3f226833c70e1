//! Circuit-breaking HTTP transport.

use std::time::Duration;

use async_trait::async_trait;

use crate::resilience::CircuitBreaker;
use crate::transport::{Transport, TransportError, TransportRequest, TransportResponse};

/// HTTP transport that fails fast while the identity authority is unhealthy.
///
/// Every transport-level failure feeds the breaker. A well-formed HTTP
/// response of any status counts as success here: the authority answered,
/// and what it said is the protocol layer's business.
pub struct CircuitClient {
    client: reqwest::Client,
    breaker: CircuitBreaker,
}

impl CircuitClient {
    pub fn new(failure_threshold: u32, recovery_timeout: Duration) -> Self {
        Self {
            client: reqwest::Client::new(),
            breaker: CircuitBreaker::new(failure_threshold, recovery_timeout),
        }
    }

    /// Current breaker state, for health reporting.
    pub fn circuit_state(&self) -> crate::resilience::CircuitState {
        self.breaker.state()
    }
}

#[async_trait]
impl Transport for CircuitClient {
    async fn execute(
        &self,
        request: TransportRequest,
    ) -> Result<TransportResponse, TransportError> {
        if !self.breaker.try_acquire() {
            return Err(TransportError::CircuitOpen);
        }

        let TransportRequest { url, headers, body } = request;
        let mut builder = self.client.post(&url).body(body);
        for (name, value) in headers {
            builder = builder.header(name, value);
        }

        let response = match builder.send().await {
            Ok(response) => response,
            Err(e) => {
                self.breaker.record_failure();
                return Err(TransportError::Request(e.to_string()));
            }
        };

        let status = response.status().as_u16();
        match response.bytes().await {
            Ok(bytes) => {
                self.breaker.record_success();
                Ok(TransportResponse {
                    status,
                    body: bytes.to_vec(),
                })
            }
            Err(e) => {
                self.breaker.record_failure();
                Err(TransportError::Request(e.to_string()))
            }
        }
    }
}

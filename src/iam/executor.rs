//! Bounded single-request execution.
//!
//! Wraps exactly one encode → transport → decode sequence behind a hard
//! deadline. The deadline fires even if the transport hangs: the in-flight
//! future is dropped on expiry, which cancels the call and releases its
//! connection and any partially received body. There is no background
//! completion; a timed-out call is gone.

use std::sync::Arc;
use std::time::Duration;

use tokio::time::timeout;
use uuid::Uuid;

use crate::iam::codec;
use crate::iam::types::{Query, ResolutionError, ResultPage};
use crate::transport::{Transport, TransportRequest};

/// Executes one authenticated query against the identity authority.
pub struct QueryExecutor {
    transport: Arc<dyn Transport>,
    endpoint: String,
    access_key: String,
    secret_key: String,
}

impl QueryExecutor {
    pub fn new(
        transport: Arc<dyn Transport>,
        endpoint: String,
        access_key: String,
        secret_key: String,
    ) -> Self {
        Self {
            transport,
            endpoint,
            access_key,
            secret_key,
        }
    }

    /// Run a single query with a hard deadline.
    pub async fn execute(
        &self,
        query: &Query,
        deadline: Duration,
    ) -> Result<ResultPage, ResolutionError> {
        let body = codec::encode_query(query)?;
        let request_id = Uuid::new_v4();
        let request = TransportRequest {
            url: self.endpoint.clone(),
            headers: vec![
                ("X-Le-Key", self.access_key.clone()),
                ("X-Le-Secret", self.secret_key.clone()),
                ("content-type", "application/json".to_string()),
                ("X-Request-Id", request_id.to_string()),
            ],
            body,
        };

        tracing::debug!(
            request_id = %request_id,
            action = %query.action,
            offset = query.offset,
            "sending identity query"
        );

        let response = match timeout(deadline, self.transport.execute(request)).await {
            Ok(Ok(response)) => response,
            Ok(Err(e)) => {
                tracing::warn!(request_id = %request_id, error = %e, "identity query transport failure");
                return Err(ResolutionError::TransportFailure(e));
            }
            Err(_) => {
                tracing::warn!(request_id = %request_id, deadline = ?deadline, "identity query timed out");
                return Err(ResolutionError::Timeout(deadline));
            }
        };

        if response.status != 200 {
            tracing::warn!(
                request_id = %request_id,
                status = response.status,
                "identity authority returned non-200"
            );
            return Err(ResolutionError::RemoteRejected(format!(
                "status {}",
                response.status
            )));
        }

        codec::decode_response(&response.body)
    }
}

//! Outbound transport to the identity authority.
//!
//! # Data Flow
//! ```text
//! iam::executor builds TransportRequest
//!     → Transport::execute (opaque single call)
//!     → http.rs (reqwest POST, circuit breaker admission + outcome)
//!     → TransportResponse (status + full body) or TransportError
//! ```
//!
//! # Design Decisions
//! - The core depends only on the `Transport` trait; tests inject mocks
//! - A transport call is one-shot: no retries, no policy beyond the breaker
//! - The full body is read inside the call so a caller deadline covers the
//!   entire exchange, and dropping the future releases every resource

pub mod http;

use async_trait::async_trait;
use thiserror::Error;

pub use http::CircuitClient;

/// A single outbound request, already encoded.
#[derive(Debug, Clone)]
pub struct TransportRequest {
    pub url: String,
    pub headers: Vec<(&'static str, String)>,
    pub body: Vec<u8>,
}

/// The raw answer from the authority: status line plus the full body.
#[derive(Debug, Clone)]
pub struct TransportResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

/// Errors raised below the HTTP protocol level.
#[derive(Debug, Error)]
pub enum TransportError {
    /// The circuit is open; the call was never attempted.
    #[error("circuit open, request not attempted")]
    CircuitOpen,

    /// Connection, DNS, TLS or body-read failure.
    #[error("request failed: {0}")]
    Request(String),
}

/// One-shot request execution against the identity authority.
///
/// Implementations own their resilience policy (circuit breaking); callers
/// own deadlines. Must be safe for concurrent invocation.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn execute(&self, request: TransportRequest)
        -> Result<TransportResponse, TransportError>;
}

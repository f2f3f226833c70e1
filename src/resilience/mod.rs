//! Resilience subsystem.
//!
//! # Data Flow
//! ```text
//! Request to the identity authority:
//!     → iam::executor (enforce per-call deadline)
//!     → transport asks circuit_breaker.rs for admission before dialing
//!     → transport reports the call outcome back to the breaker
//! ```
//!
//! # Design Decisions
//! - Deadlines are owned by the caller; the breaker never blocks or waits
//! - The breaker only sees transport-level outcomes, never HTTP status codes
//! - No retries anywhere in this crate; retry policy belongs to the operator

pub mod circuit_breaker;

pub use circuit_breaker::{CircuitBreaker, CircuitState};

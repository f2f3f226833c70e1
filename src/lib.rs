//! Resilient credential-resolution client for a remote identity authority.
//!
//! Resolves access keys to account credentials over an authenticated JSON
//! HTTP API, with hard per-call deadlines, transparent pagination, circuit
//! breaking in the transport, and a closed error taxonomy at the boundary.

pub mod config;
pub mod iam;
pub mod observability;
pub mod resilience;
pub mod transport;

pub use config::IamConfig;
pub use iam::resolver::IamResolver;
pub use iam::types::{Credential, ResolutionError};
pub use transport::CircuitClient;

//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → IamConfig (validated, immutable)
//!     → handed to IamResolver::new
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; there is no ambient global config
//! - All fields have defaults so a minimal config only names the endpoint
//!   and the key pair
//! - Validation separates syntactic (serde) from semantic checks and fails
//!   fast, before any resolver exists

pub mod loader;
pub mod schema;
pub mod validation;

pub use schema::CircuitBreakerConfig;
pub use schema::IamConfig;

//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Resolver and transport produce:
//!     → logging.rs (structured tracing events, request-ID correlated)
//!     → metrics.rs (resolution counters, durations, circuit transitions)
//! ```
//!
//! # Design Decisions
//! - The library only emits; subscriber/exporter installation belongs to the
//!   embedding process (the CLI installs a fmt subscriber)
//! - Metric updates are cheap and never fallible

pub mod logging;
pub mod metrics;

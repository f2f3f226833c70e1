//! Identity-authority client core.
//!
//! # Data Flow
//! ```text
//! resolver.rs (facade)
//!     → paginator.rs (bulk: walk offset cursor page by page)
//!     → executor.rs (one bounded encode → transport → decode)
//!     → codec.rs (JSON query body / response envelope)
//!     → transport (opaque circuit-breaking call)
//!
//! Single-key lookups skip the paginator and call the executor directly.
//! ```
//!
//! # Design Decisions
//! - Pages are fetched strictly sequentially; each offset depends on the
//!   previous page's reported offset + count
//! - Any page failure aborts the whole enumeration; no partial results
//! - Deadlines are enforced here, not delegated to the transport

pub mod codec;
pub mod executor;
pub mod paginator;
pub mod resolver;
pub mod types;

pub use resolver::IamResolver;
pub use types::{Credential, Query, ResolutionError, ResultPage};

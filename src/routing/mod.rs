//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Inbound request (method, path + query)
//!     → flavor.rs (active rule-set, fixed at startup)
//!     → resolver.rs (evaluate rules, first match wins)
//!     → RouteDecision { destination_url }
//! ```
//!
//! # Design Decisions
//! - One resolver parameterized by flavor, not one handler per deployment
//! - Immutable after construction (thread-safe without locks)
//! - Deterministic: same input always yields the same destination

pub mod flavor;
pub mod resolver;

pub use flavor::{Flavor, UnknownFlavor};
pub use resolver::{is_get, replace_first, RouteDecision, RouteResolver};

//! MCP Edge Proxy Library
//!
//! Relays requests from a chat-assistant platform or webhook sender to a
//! single backend origin, rewriting the destination URL per the active
//! flavor and keeping request and response bodies byte-for-byte intact.

pub mod cli;
pub mod config;
pub mod forwarding;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod routing;
pub mod security;

pub use config::schema::ProxyConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use routing::{Flavor, RouteResolver};

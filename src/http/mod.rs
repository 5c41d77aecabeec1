//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, catch-all GET/POST/OPTIONS handler)
//!     → request.rs (request ID for log correlation)
//!     → [routing resolves destination]
//!     → [forwarding performs the outbound call]
//!     → response.rs (status policy, header copy) / webhook.rs (verification)
//!     → Send to client
//! ```

pub mod request;
pub mod response;
pub mod server;
pub mod webhook;

pub use request::{RequestId, X_REQUEST_ID};
pub use response::ResponsePolicy;
pub use server::{AppState, HttpServer, ServerError};

//! Security subsystem.
//!
//! # Data Flow
//! ```text
//! Inbound headers:
//!     → headers.rs (drop content-length, transfer-encoding, host)
//!     → forwarded to the backend
//!
//! Upstream response headers:
//!     → headers.rs (drop connection framing)
//!     → sent to the caller
//! ```
//!
//! Authentication is the backend's job; credentials pass through untouched.

pub mod headers;

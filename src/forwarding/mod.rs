//! Forwarding subsystem.
//!
//! # Data Flow
//! ```text
//! RouteDecision + inbound (method, headers, raw body)
//!     → outcome.rs (OutboundRequest: sanitized headers, untouched body)
//!     → client.rs (single outbound call)
//!     → UpstreamResult::Response | UpstreamResult::Failure
//!     → http::response (status policy, headers, body)
//! ```

pub mod client;
pub mod outcome;

pub use client::Forwarder;
pub use outcome::{
    ForwardError, OutboundRequest, UpstreamFailure, UpstreamResponse, UpstreamResult,
    UPSTREAM_ERROR_BODY, UPSTREAM_ERROR_STATUS,
};

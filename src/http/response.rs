//! Response handling and transformation.
//!
//! # Responsibilities
//! - Turn an `UpstreamResult` into the response sent to the caller
//! - Apply the always-200 status override
//! - Copy upstream headers minus connection framing
//!
//! # Design Decisions
//! - Success and failure go through the same rendering step
//! - The override touches the status only; headers and body are relayed as-is
//! - Synthesized failures are 502 with a plain placeholder body

use axum::body::{Body, Bytes};
use axum::http::{HeaderMap, StatusCode};
use axum::response::Response;

use crate::forwarding::UpstreamResult;
use crate::routing::Flavor;
use crate::security::headers::strip_response_framing;

/// Status normalization applied to every relayed response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResponsePolicy {
    always_succeed: bool,
}

impl ResponsePolicy {
    /// `always_return_200` only takes effect in flavors that honor it.
    pub fn new(flavor: Flavor, always_return_200: bool) -> Self {
        Self {
            always_succeed: always_return_200 && flavor.honors_always_succeed(),
        }
    }

    pub fn always_succeed(&self) -> bool {
        self.always_succeed
    }

    /// Status the caller sees for a given upstream status.
    pub fn status_for(&self, upstream: StatusCode) -> StatusCode {
        if self.always_succeed {
            StatusCode::OK
        } else {
            upstream
        }
    }

    /// Render a relayed response (or synthesized failure).
    pub fn render(&self, result: UpstreamResult) -> Response {
        let (status, headers, body) = result.into_parts();
        build_response(self.status_for(status), &headers, body)
    }
}

/// Assemble a response from parts, dropping upstream framing headers.
pub fn build_response(status: StatusCode, headers: &HeaderMap, body: Bytes) -> Response {
    let mut response = Response::new(Body::from(body));
    *response.status_mut() = status;
    *response.headers_mut() = strip_response_framing(headers);
    response
}

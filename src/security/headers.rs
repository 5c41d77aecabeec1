//! Header sanitization.
//!
//! # Responsibilities
//! - Drop `content-length`, `transfer-encoding` and `host` before forwarding
//! - Drop framing headers (length, transfer coding, connection) from relayed responses
//!
//! # Design Decisions
//! - Everything else, including `authorization` and `cookie`, is forwarded as-is
//! - Rebuilds the map by appending so surviving headers keep their order and
//!   every value of a multi-value header

use axum::http::header::{self, HeaderMap, HeaderName};

/// Request headers the outbound transport must compute itself.
pub static FORBIDDEN_REQUEST_HEADERS: [HeaderName; 3] = [
    header::CONTENT_LENGTH,
    header::TRANSFER_ENCODING,
    header::HOST,
];

/// Response headers tied to the upstream connection's framing.
/// The relayed body is re-framed, so its length is recomputed too.
pub static RESPONSE_FRAMING_HEADERS: [HeaderName; 4] = [
    header::CONTENT_LENGTH,
    header::TRANSFER_ENCODING,
    header::CONNECTION,
    HeaderName::from_static("keep-alive"),
];

/// Copy the inbound headers minus the forbidden request set.
pub fn sanitize_request_headers(headers: &HeaderMap) -> HeaderMap {
    retain_except(headers, &FORBIDDEN_REQUEST_HEADERS)
}

/// Copy upstream response headers minus connection framing.
pub fn strip_response_framing(headers: &HeaderMap) -> HeaderMap {
    retain_except(headers, &RESPONSE_FRAMING_HEADERS)
}

fn retain_except(headers: &HeaderMap, excluded: &[HeaderName]) -> HeaderMap {
    let mut out = HeaderMap::with_capacity(headers.len());
    for (name, value) in headers.iter() {
        if !excluded.contains(name) {
            out.append(name.clone(), value.clone());
        }
    }
    out
}

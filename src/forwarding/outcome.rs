//! Per-request forwarding values.
//!
//! `OutboundRequest` is what goes to the backend; `UpstreamResult` is what
//! comes back, either a complete response or a structured failure that still
//! carries whatever the upstream managed to send.

use axum::body::Bytes;
use axum::http::{HeaderMap, Method, StatusCode};
use thiserror::Error;

use crate::security::headers::sanitize_request_headers;

/// Body sent to the caller when the upstream gave us none.
pub const UPSTREAM_ERROR_BODY: &str = "Upstream error";

/// Status sent to the caller when the upstream gave us none.
pub const UPSTREAM_ERROR_STATUS: StatusCode = StatusCode::BAD_GATEWAY;

/// A request ready to be sent to the backend.
#[derive(Debug, Clone)]
pub struct OutboundRequest {
    pub method: Method,
    pub url: String,
    pub headers: HeaderMap,
    pub body: Bytes,
}

impl OutboundRequest {
    /// Build from the inbound parts; headers are sanitized, the body is kept byte-for-byte.
    pub fn new(method: Method, url: impl Into<String>, inbound_headers: &HeaderMap, body: Bytes) -> Self {
        Self {
            method,
            url: url.into(),
            headers: sanitize_request_headers(inbound_headers),
            body,
        }
    }

    /// GET and HEAD go out without a body; everything else carries the original bytes.
    pub fn carries_body(&self) -> bool {
        !matches!(self.method, Method::GET | Method::HEAD)
    }
}

/// Transport-level failure of the outbound call.
#[derive(Debug, Error)]
pub enum ForwardError {
    #[error("connection failed: {0}")]
    Connect(String),

    #[error("upstream timed out: {0}")]
    Timeout(String),

    #[error("invalid outbound request: {0}")]
    Build(String),

    #[error("reading upstream body failed: {0}")]
    Body(String),

    #[error("upstream request failed: {0}")]
    Other(String),
}

impl ForwardError {
    /// Short label for logs and metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            ForwardError::Connect(_) => "connect",
            ForwardError::Timeout(_) => "timeout",
            ForwardError::Build(_) => "build",
            ForwardError::Body(_) => "body",
            ForwardError::Other(_) => "other",
        }
    }
}

impl From<reqwest::Error> for ForwardError {
    fn from(e: reqwest::Error) -> Self {
        let msg = e.to_string();
        if e.is_timeout() {
            ForwardError::Timeout(msg)
        } else if e.is_connect() {
            ForwardError::Connect(msg)
        } else if e.is_builder() {
            ForwardError::Build(msg)
        } else if e.is_body() || e.is_decode() {
            ForwardError::Body(msg)
        } else {
            ForwardError::Other(msg)
        }
    }
}

/// A complete upstream response.
#[derive(Debug, Clone)]
pub struct UpstreamResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Bytes,
}

/// The outbound call did not complete.
///
/// Status and headers are present when the upstream answered but its body
/// could not be read.
#[derive(Debug)]
pub struct UpstreamFailure {
    pub status: Option<StatusCode>,
    pub headers: Option<HeaderMap>,
    pub body: Option<Bytes>,
    pub error: ForwardError,
}

impl UpstreamFailure {
    /// A failure with nothing received from the upstream.
    pub fn transport(error: ForwardError) -> Self {
        Self {
            status: None,
            headers: None,
            body: None,
            error,
        }
    }

    pub fn status(&self) -> StatusCode {
        self.status.unwrap_or(UPSTREAM_ERROR_STATUS)
    }

    /// Split into the (status, headers, body) the caller will see.
    pub fn into_parts(self) -> (StatusCode, HeaderMap, Bytes) {
        let status = self.status();
        (
            status,
            self.headers.unwrap_or_default(),
            self.body.unwrap_or_else(|| Bytes::from_static(UPSTREAM_ERROR_BODY.as_bytes())),
        )
    }
}

/// Either a complete upstream response or a transport failure.
#[derive(Debug)]
pub enum UpstreamResult {
    Response(UpstreamResponse),
    Failure(UpstreamFailure),
}

impl UpstreamResult {
    /// Status the upstream reported, or 502 when there was none.
    pub fn status(&self) -> StatusCode {
        match self {
            UpstreamResult::Response(r) => r.status,
            UpstreamResult::Failure(f) => f.status(),
        }
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, UpstreamResult::Failure(_))
    }

    /// Flatten into (status, headers, body), applying failure defaults.
    pub fn into_parts(self) -> (StatusCode, HeaderMap, Bytes) {
        match self {
            UpstreamResult::Response(r) => (r.status, r.headers, r.body),
            UpstreamResult::Failure(f) => f.into_parts(),
        }
    }
}

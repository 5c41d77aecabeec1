//! Request identification.
//!
//! # Responsibilities
//! - Reuse the caller's `x-request-id` when it sent one
//! - Otherwise generate a UUID v4 for log correlation
//!
//! # Design Decisions
//! - The ID is never added to the forwarded headers; what the backend sees
//!   is exactly what the caller sent, minus the sanitized set

use std::fmt;

use axum::http::HeaderMap;
use uuid::Uuid;

/// Header carrying a caller-supplied request ID.
pub const X_REQUEST_ID: &str = "x-request-id";

/// Correlation ID for one inbound request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestId(String);

impl RequestId {
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Take the ID from the inbound headers, or mint one.
    pub fn from_headers(headers: &HeaderMap) -> Self {
        headers
            .get(X_REQUEST_ID)
            .and_then(|v| v.to_str().ok())
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .map(|v| Self(v.to_string()))
            .unwrap_or_default()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for RequestId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

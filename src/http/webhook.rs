//! Webhook verification responses.
//!
//! Webhook senders verify an endpoint with a GET and expect the challenge
//! echoed back as the raw body. The backend answers that GET with a JSON
//! document whose `content` field holds what should be echoed; only that
//! field is returned, with the true upstream status.

use axum::body::Bytes;
use axum::http::{header, HeaderMap, HeaderValue};
use axum::response::Response;
use serde_json::Value;

use crate::config::MissingContentPolicy;
use crate::forwarding::{UpstreamResult, UPSTREAM_ERROR_BODY, UPSTREAM_ERROR_STATUS};
use crate::http::response::build_response;

/// Field of the backend's JSON body that carries the verification payload.
pub const CONTENT_FIELD: &str = "content";

/// Extract the verification payload and its content type from a backend body.
///
/// Returns `None` when the body is not JSON or the field is missing or null.
pub fn extract_content(body: &[u8]) -> Option<(Bytes, HeaderValue)> {
    let document: Value = serde_json::from_slice(body).ok()?;
    match document.get(CONTENT_FIELD)? {
        Value::Null => None,
        Value::String(text) => Some((
            Bytes::from(text.clone().into_bytes()),
            HeaderValue::from_static("text/html; charset=utf-8"),
        )),
        other => {
            let encoded = serde_json::to_vec(other).ok()?;
            Some((
                Bytes::from(encoded),
                HeaderValue::from_static("application/json"),
            ))
        }
    }
}

/// Render the response to a verification GET.
pub fn verification_response(result: UpstreamResult, missing: MissingContentPolicy) -> Response {
    let upstream = match result {
        UpstreamResult::Response(upstream) => upstream,
        UpstreamResult::Failure(_) => return placeholder(),
    };

    match extract_content(&upstream.body) {
        Some((content, content_type)) => {
            let mut headers = HeaderMap::new();
            headers.insert(header::CONTENT_TYPE, content_type);
            build_response(upstream.status, &headers, content)
        }
        None => {
            tracing::warn!(
                status = %upstream.status,
                policy = ?missing,
                "Verification response has no content field"
            );
            match missing {
                MissingContentPolicy::BadGateway => placeholder(),
                MissingContentPolicy::EmptyBody => {
                    build_response(upstream.status, &HeaderMap::new(), Bytes::new())
                }
            }
        }
    }
}

fn placeholder() -> Response {
    build_response(
        UPSTREAM_ERROR_STATUS,
        &HeaderMap::new(),
        Bytes::from_static(UPSTREAM_ERROR_BODY.as_bytes()),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forwarding::{ForwardError, UpstreamFailure, UpstreamResponse};
    use axum::http::StatusCode;

    fn upstream(status: StatusCode, body: &'static str) -> UpstreamResult {
        let mut headers = HeaderMap::new();
        headers.insert("content-type", HeaderValue::from_static("application/json"));
        headers.insert("x-backend", HeaderValue::from_static("1"));
        UpstreamResult::Response(UpstreamResponse {
            status,
            headers,
            body: Bytes::from_static(body.as_bytes()),
        })
    }

    async fn body_of(response: Response) -> Bytes {
        axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap()
    }

    #[test]
    fn extracts_string_content_raw() {
        let (content, ct) = extract_content(br#"{"content":"1158201444","status":"ok"}"#).unwrap();
        assert_eq!(&content[..], b"1158201444");
        assert_eq!(ct, "text/html; charset=utf-8");
    }

    #[test]
    fn extracts_structured_content_as_json() {
        let (content, ct) = extract_content(br#"{"content":{"ok":true}}"#).unwrap();
        assert_eq!(&content[..], br#"{"ok":true}"#);
        assert_eq!(ct, "application/json");
    }

    #[test]
    fn missing_null_or_non_json_is_none() {
        assert!(extract_content(br#"{"other":1}"#).is_none());
        assert!(extract_content(br#"{"content":null}"#).is_none());
        assert!(extract_content(b"plain text").is_none());
        assert!(extract_content(b"").is_none());
    }

    #[tokio::test]
    async fn returns_content_with_true_upstream_status() {
        let response = verification_response(
            upstream(StatusCode::FORBIDDEN, r#"{"content":"Verification token mismatch"}"#),
            MissingContentPolicy::BadGateway,
        );
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
        assert!(response.headers().get("x-backend").is_none());
        assert_eq!(&body_of(response).await[..], b"Verification token mismatch");
    }

    #[tokio::test]
    async fn missing_content_bad_gateway_policy() {
        let response = verification_response(upstream(StatusCode::OK, "{}"), MissingContentPolicy::BadGateway);
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
        assert_eq!(&body_of(response).await[..], b"Upstream error");
    }

    #[tokio::test]
    async fn missing_content_empty_body_policy() {
        let response = verification_response(upstream(StatusCode::OK, "{}"), MissingContentPolicy::EmptyBody);
        assert_eq!(response.status(), StatusCode::OK);
        assert!(body_of(response).await.is_empty());
    }

    #[tokio::test]
    async fn transport_failure_is_placeholder() {
        let result = UpstreamResult::Failure(UpstreamFailure::transport(ForwardError::Connect("x".into())));
        let response = verification_response(result, MissingContentPolicy::EmptyBody);
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
        assert_eq!(&body_of(response).await[..], b"Upstream error");
    }
}

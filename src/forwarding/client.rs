//! Outbound HTTP client.
//!
//! # Responsibilities
//! - Issue the single outbound call for a request
//! - Send the original body bytes with no size ceiling
//! - Treat every upstream status as a response; only transport errors fail
//!
//! # Design Decisions
//! - One pooled client shared by all requests
//! - No retries and no backoff: one attempt, one result
//! - System proxy settings are ignored; the backend is reached directly

use std::time::Duration;

use reqwest::redirect::Policy;

use crate::config::UpstreamConfig;
use crate::forwarding::outcome::{
    ForwardError, OutboundRequest, UpstreamFailure, UpstreamResponse, UpstreamResult,
};

/// Maximum redirect hops followed when redirects are enabled.
const MAX_REDIRECTS: usize = 5;

/// Sends outbound requests to the backend.
#[derive(Debug, Clone)]
pub struct Forwarder {
    client: reqwest::Client,
}

impl Forwarder {
    /// Create a forwarder from upstream settings.
    pub fn new(config: &UpstreamConfig) -> Result<Self, ForwardError> {
        let redirect = if config.follow_redirects {
            Policy::limited(MAX_REDIRECTS)
        } else {
            Policy::none()
        };

        let mut builder = reqwest::Client::builder().redirect(redirect).no_proxy();
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }

        let client = builder.build()?;
        Ok(Self { client })
    }

    /// Perform the outbound call and buffer the upstream response.
    pub async fn forward(&self, request: OutboundRequest) -> UpstreamResult {
        let carries_body = request.carries_body();
        let OutboundRequest {
            method,
            url,
            headers,
            body,
        } = request;

        let mut builder = self.client.request(method, url.as_str()).headers(headers);
        if carries_body {
            builder = builder.body(body);
        }

        let response = match builder.send().await {
            Ok(response) => response,
            Err(e) => return UpstreamResult::Failure(UpstreamFailure::transport(e.into())),
        };

        let status = response.status();
        let headers = response.headers().clone();

        match response.bytes().await {
            Ok(body) => UpstreamResult::Response(UpstreamResponse {
                status,
                headers,
                body,
            }),
            Err(e) => UpstreamResult::Failure(UpstreamFailure {
                status: Some(status),
                headers: Some(headers),
                body: None,
                error: ForwardError::Body(e.to_string()),
            }),
        }
    }
}

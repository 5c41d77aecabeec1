//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the proxy.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

use crate::routing::Flavor;

/// Root configuration for the edge proxy.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ProxyConfig {
    /// Listener configuration (bind host, port).
    pub listener: ListenerConfig,

    /// Backend origin and forwarding behavior.
    pub upstream: UpstreamConfig,

    /// Webhook verification handling (passthrough flavor only).
    pub webhook: WebhookConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

impl ProxyConfig {
    /// Create a config targeting the given backend with all other values defaulted.
    pub fn for_backend(backend_base_url: impl Into<String>) -> Self {
        let mut config = Self::default();
        config.upstream.backend_base_url = backend_base_url.into();
        config
    }
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Host or IP to bind (e.g., "0.0.0.0").
    pub bind_host: String,

    /// Inbound listener port.
    pub port: u16,
}

impl ListenerConfig {
    /// Socket address string suitable for `TcpListener::bind`.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.bind_host, self.port)
    }
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_host: "0.0.0.0".to_string(),
            port: 3000,
        }
    }
}

/// Upstream (backend origin) configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct UpstreamConfig {
    /// Base URL every destination is built from (e.g., "https://mcp-example.com").
    /// Required; startup fails when empty.
    pub backend_base_url: String,

    /// Rewrite rule-set applied to inbound paths.
    pub flavor: Flavor,

    /// Report 200 to the caller regardless of the upstream status.
    pub always_return_200: bool,

    /// Follow upstream redirects (up to 5 hops) instead of relaying them.
    pub follow_redirects: bool,

    /// Optional total timeout for the outbound call. `None` keeps the transport default.
    pub timeout_secs: Option<u64>,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            backend_base_url: String::new(),
            flavor: Flavor::Default,
            always_return_200: false,
            follow_redirects: true,
            timeout_secs: None,
        }
    }
}

/// What to send when a verification response lacks its `content` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum MissingContentPolicy {
    /// Respond 502 with the placeholder body.
    #[default]
    BadGateway,
    /// Respond with the upstream status and an empty body.
    EmptyBody,
}

/// Webhook verification configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct WebhookConfig {
    pub missing_content: MissingContentPolicy,
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error). `RUST_LOG` takes precedence.
    pub log_level: String,

    /// Pretty for terminals, JSON for log shippers.
    pub log_format: LogFormat,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: LogFormat::Pretty,
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}

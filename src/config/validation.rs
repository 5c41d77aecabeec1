//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Backend base URL must be present and absolute http(s)
//! - Metrics address must parse when metrics are enabled
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: ProxyConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::SocketAddr;

use thiserror::Error;
use url::Url;

use crate::config::schema::ProxyConfig;

/// A single semantic problem with a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("backend base URL is not set (BACKEND_BASE_URL)")]
    MissingBackend,

    #[error("backend base URL {url:?} is invalid: {reason}")]
    InvalidBackend { url: String, reason: String },

    #[error("listener port must be non-zero")]
    ZeroPort,

    #[error("upstream timeout must be at least one second")]
    ZeroTimeout,

    #[error("metrics address {0:?} is not a socket address")]
    InvalidMetricsAddress(String),
}

/// Check a configuration for semantic errors.
pub fn validate_config(config: &ProxyConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    let backend = config.upstream.backend_base_url.trim();
    if backend.is_empty() {
        errors.push(ValidationError::MissingBackend);
    } else {
        match Url::parse(backend) {
            Ok(url) if matches!(url.scheme(), "http" | "https") && url.has_host() => {}
            Ok(url) => errors.push(ValidationError::InvalidBackend {
                url: backend.to_string(),
                reason: format!("unsupported scheme {:?} or missing host", url.scheme()),
            }),
            Err(e) => errors.push(ValidationError::InvalidBackend {
                url: backend.to_string(),
                reason: e.to_string(),
            }),
        }
    }

    if config.listener.port == 0 {
        errors.push(ValidationError::ZeroPort);
    }

    if config.upstream.timeout_secs == Some(0) {
        errors.push(ValidationError::ZeroTimeout);
    }

    if config.observability.metrics_enabled
        && config.observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::InvalidMetricsAddress(
            config.observability.metrics_address.clone(),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

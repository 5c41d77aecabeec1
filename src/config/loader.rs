//! Configuration loading from disk.

use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::config::schema::ProxyConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Read a TOML file into a configuration without validating it.
///
/// Validation is deferred so command-line and environment overrides can be
/// applied first.
pub fn read_config(path: &Path) -> Result<ProxyConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    let config: ProxyConfig = toml::from_str(&content)?;
    Ok(config)
}

/// Load and validate configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<ProxyConfig, ConfigError> {
    let config = read_config(path)?;
    validate_config(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_temp(name: &str, content: &str) -> std::path::PathBuf {
        let path = std::env::temp_dir().join(format!("{}-{}.toml", name, uuid::Uuid::new_v4()));
        let mut file = fs::File::create(&path).unwrap();
        file.write_all(content.as_bytes()).unwrap();
        path
    }

    #[test]
    fn loads_valid_file() {
        let path = write_temp(
            "edge-proxy-valid",
            "[upstream]\nbackend_base_url = \"https://mcp-x.com\"\n\n[listener]\nport = 8088\n",
        );
        let config = load_config(&path).unwrap();
        assert_eq!(config.listener.port, 8088);
        assert_eq!(config.upstream.backend_base_url, "https://mcp-x.com");
        let _ = fs::remove_file(path);
    }

    #[test]
    fn missing_backend_fails_validation() {
        let path = write_temp("edge-proxy-nobackend", "[listener]\nport = 8088\n");
        let err = load_config(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
        assert!(err.to_string().contains("BACKEND_BASE_URL"));
        let _ = fs::remove_file(path);
    }

    #[test]
    fn malformed_toml_is_parse_error() {
        let path = write_temp("edge-proxy-bad", "[upstream\n");
        assert!(matches!(load_config(&path), Err(ConfigError::Parse(_))));
        let _ = fs::remove_file(path);
    }

    #[test]
    fn missing_file_is_io_error() {
        let path = std::env::temp_dir().join("edge-proxy-does-not-exist.toml");
        assert!(matches!(read_config(&path), Err(ConfigError::Io(_))));
    }
}

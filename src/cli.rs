//! Command line and environment configuration.
//!
//! Every flag can also be given as an environment variable, matching how the
//! proxy is deployed (`BACKEND_BASE_URL`, `ALWAYS_RETURN_200`, `PORT`).
//! Values given here override the optional TOML file.

use std::convert::Infallible;
use std::path::PathBuf;

use clap::Parser;

use crate::config::{read_config, validate_config, ConfigError, ProxyConfig};
use crate::routing::Flavor;

#[derive(Debug, Parser)]
#[command(name = "mcp-edge-proxy")]
#[command(version, about = "Edge proxy that rewrites and relays requests to a single backend", long_about = None)]
pub struct Cli {
    /// Optional TOML configuration file
    #[arg(short, long, env = "PROXY_CONFIG")]
    pub config: Option<PathBuf>,

    /// Backend base URL every destination is built from
    #[arg(long, env = "BACKEND_BASE_URL")]
    pub backend_base_url: Option<String>,

    /// Report 200 regardless of upstream status (only the literal "true" enables it)
    #[arg(long, env = "ALWAYS_RETURN_200", value_parser = parse_flag)]
    pub always_return_200: Option<bool>,

    /// Inbound listener port
    #[arg(short, long, env = "PORT")]
    pub port: Option<u16>,

    /// Rewrite rule-set: generic, default or passthrough
    #[arg(long, env = "PROXY_FLAVOR")]
    pub flavor: Option<Flavor>,
}

/// `"true"` enables, anything else disables.
fn parse_flag(value: &str) -> Result<bool, Infallible> {
    Ok(value == "true")
}

impl Cli {
    /// Apply flag/environment overrides on top of `config`.
    pub fn apply(&self, config: &mut ProxyConfig) {
        if let Some(url) = &self.backend_base_url {
            config.upstream.backend_base_url = url.clone();
        }
        if let Some(always) = self.always_return_200 {
            config.upstream.always_return_200 = always;
        }
        if let Some(port) = self.port {
            config.listener.port = port;
        }
        if let Some(flavor) = self.flavor {
            config.upstream.flavor = flavor;
        }
    }

    /// Build the final validated configuration.
    pub fn load(&self) -> Result<ProxyConfig, ConfigError> {
        let mut config = match &self.config {
            Some(path) => read_config(path)?,
            None => ProxyConfig::default(),
        };
        self.apply(&mut config);
        validate_config(&config).map_err(ConfigError::Validation)?;
        Ok(config)
    }
}

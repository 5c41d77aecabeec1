//! MCP Edge Proxy
//!
//! A request-forwarding edge proxy built with Tokio and Axum.
//!
//! # Architecture Overview
//!
//! ```text
//!                          ┌──────────────────────────────────────────────────┐
//!                          │                   EDGE PROXY                     │
//!                          │                                                  │
//!     Caller Request       │  ┌─────────┐    ┌──────────┐    ┌────────────┐   │
//!     ─────────────────────┼─▶│  http   │───▶│ routing  │───▶│ forwarding │───┼──▶ Backend
//!                          │  │ server  │    │ resolver │    │   client   │   │    Origin
//!                          │  └─────────┘    └──────────┘    └─────┬──────┘   │
//!                          │                                       │          │
//!     Caller Response      │  ┌──────────────────────────┐         │          │
//!     ◀────────────────────┼──│ response policy/webhook  │◀────────┘          │
//!                          │  └──────────────────────────┘                    │
//!                          │                                                  │
//!                          │  config · security/headers · observability ·     │
//!                          │  lifecycle                                       │
//!                          └──────────────────────────────────────────────────┘
//! ```

use clap::Parser;

use mcp_edge_proxy::cli::Cli;
use mcp_edge_proxy::config::ObservabilityConfig;
use mcp_edge_proxy::lifecycle::{signals, startup, Shutdown};
use mcp_edge_proxy::observability::init_logging;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = match cli.load() {
        Ok(config) => config,
        Err(e) => {
            init_logging(&ObservabilityConfig::default());
            tracing::error!(error = %e, "Configuration error");
            std::process::exit(1);
        }
    };

    init_logging(&config.observability);
    tracing::info!("mcp-edge-proxy v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        bind_address = %config.listener.bind_address(),
        backend = %config.upstream.backend_base_url,
        flavor = %config.upstream.flavor,
        always_return_200 = config.upstream.always_return_200,
        "Configuration loaded"
    );

    let shutdown = Shutdown::new();
    signals::spawn_signal_listener(&shutdown);

    startup::start(config, &shutdown).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}

//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with the catch-all proxy handler
//! - Wire up middleware (tracing, unlimited request bodies)
//! - Bind server to listener with graceful shutdown
//! - Resolve, forward and render each request

use std::sync::Arc;
use std::time::Instant;

use axum::{
    body::Bytes,
    extract::{DefaultBodyLimit, State},
    http::{HeaderMap, Method, Uri},
    response::Response,
    routing::{get, MethodRouter},
    Router,
};
use thiserror::Error;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use crate::config::{MissingContentPolicy, ProxyConfig};
use crate::forwarding::{ForwardError, Forwarder, OutboundRequest, UpstreamResult};
use crate::http::request::RequestId;
use crate::http::response::ResponsePolicy;
use crate::http::webhook::verification_response;
use crate::observability::metrics;
use crate::routing::{is_get, RouteResolver};

/// Errors raised while constructing or running the server.
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("failed to build upstream client: {0}")]
    Client(#[from] ForwardError),

    #[error("server I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub resolver: Arc<RouteResolver>,
    pub forwarder: Forwarder,
    pub policy: ResponsePolicy,
    pub missing_content: MissingContentPolicy,
}

impl AppState {
    pub fn from_config(config: &ProxyConfig) -> Result<Self, ServerError> {
        let upstream = &config.upstream;
        Ok(Self {
            resolver: Arc::new(RouteResolver::new(
                upstream.backend_base_url.clone(),
                upstream.flavor,
            )),
            forwarder: Forwarder::new(upstream)?,
            policy: ResponsePolicy::new(upstream.flavor, upstream.always_return_200),
            missing_content: config.webhook.missing_content,
        })
    }
}

/// HTTP server for the edge proxy.
pub struct HttpServer {
    router: Router,
    config: ProxyConfig,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: ProxyConfig) -> Result<Self, ServerError> {
        let state = AppState::from_config(&config)?;
        let router = Self::build_router(state);
        Ok(Self { router, config })
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(state: AppState) -> Router {
        Router::new()
            .route("/", proxy_routes())
            .route("/{*path}", proxy_routes())
            .with_state(state)
            .layer(
                ServiceBuilder::new()
                    .layer(TraceLayer::new_for_http())
                    .layer(DefaultBodyLimit::disable()),
            )
    }

    /// The configured router, for embedding or driving without a listener.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Run the server until the shutdown signal fires.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), ServerError> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            backend = %self.config.upstream.backend_base_url,
            flavor = %self.config.upstream.flavor,
            always_return_200 = self.config.upstream.always_return_200,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &ProxyConfig {
        &self.config
    }
}

/// GET (and HEAD), POST and OPTIONS all go to the same handler.
fn proxy_routes() -> MethodRouter<AppState> {
    get(proxy_handler).post(proxy_handler).options(proxy_handler)
}

/// Main proxy handler.
/// Resolves the destination, forwards once, and renders the result.
async fn proxy_handler(
    State(state): State<AppState>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let start_time = Instant::now();
    let request_id = RequestId::from_headers(&headers);
    let flavor = state.resolver.flavor();
    let original_path = uri
        .path_and_query()
        .map(|pq| pq.as_str())
        .unwrap_or("/")
        .to_string();

    let decision = state.resolver.resolve(&method, &original_path);
    if decision.oauth {
        tracing::info!(
            request_id = %request_id,
            original_path = %original_path,
            destination = %decision.destination_url,
            "Routing to oauth2 backend"
        );
    }

    tracing::debug!(
        request_id = %request_id,
        method = %method,
        flavor = %flavor,
        original_path = %original_path,
        destination = %decision.destination_url,
        body_bytes = body.len(),
        "Forwarding request"
    );

    // HEAD is served by the GET route and fetched upstream as a GET
    let outbound_method = if is_get(&method) { Method::GET } else { method.clone() };
    let outbound = OutboundRequest::new(outbound_method, decision.destination_url.clone(), &headers, body);
    let result = state.forwarder.forward(outbound).await;

    if let UpstreamResult::Failure(failure) = &result {
        tracing::warn!(
            request_id = %request_id,
            destination = %decision.destination_url,
            kind = failure.error.kind(),
            error = %failure.error,
            "Upstream error"
        );
        metrics::record_upstream_failure(failure.error.kind());
    }

    let upstream_status = result.status();
    let response = if is_get(&method) && flavor.verifies_webhooks() {
        verification_response(result, state.missing_content)
    } else {
        state.policy.render(result)
    };

    let status = response.status();
    tracing::info!(
        request_id = %request_id,
        method = %method,
        original_path = %original_path,
        destination = %decision.destination_url,
        status = status.as_u16(),
        upstream_status = upstream_status.as_u16(),
        elapsed_ms = start_time.elapsed().as_millis() as u64,
        "Request completed"
    );
    metrics::record_request(method.as_str(), status.as_u16(), flavor.as_str(), start_time);

    response
}

//! HTTP server setup.
//!
//! # Responsibilities
//! - Build the application router from the route table
//! - Wire up outer middleware (request ID, tracing)
//! - Serve on a bound listener until shutdown

use std::sync::Arc;

use axum::{body::Body, http::Request, Router};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower::ServiceBuilder;
use tower_http::{
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};
use tracing::Span;

use crate::config::Configuration;
use crate::http::middleware::SharedSessionValidator;
use crate::routing::app_router;
use crate::security::OriginPolicy;

const X_REQUEST_ID: &str = "x-request-id";

/// HTTP server for the application.
pub struct HttpServer {
    router: Router,
    config: Configuration,
}

impl HttpServer {
    /// Create a server from the resolved configuration and origin policy.
    pub fn new(config: Configuration, policy: OriginPolicy, sessions: SharedSessionValidator) -> Self {
        let routes = app_router(Arc::new(policy), sessions);
        Self {
            router: Self::build_router(routes),
            config,
        }
    }

    /// Wrap the application routes with the outer layers.
    ///
    /// The request ID is assigned before tracing so the request span records it.
    fn build_router(routes: Router) -> Router {
        routes.layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
                .layer(TraceLayer::new_for_http().make_span_with(request_span))
                .layer(PropagateRequestIdLayer::x_request_id()),
        )
    }

    /// Run the server until `shutdown` fires, then drain in-flight requests.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

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
    pub fn config(&self) -> &Configuration {
        &self.config
    }

    /// The fully layered router, for driving the server without a socket.
    pub fn router(&self) -> Router {
        self.router.clone()
    }
}

/// Span for one request, carrying its `x-request-id`.
fn request_span(request: &Request<Body>) -> Span {
    let request_id = request
        .headers()
        .get(X_REQUEST_ID)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("unknown");

    tracing::info_span!(
        "request",
        method = %request.method(),
        uri = %request.uri(),
        request_id = %request_id,
    )
}

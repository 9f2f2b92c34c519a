//! HTTP server for the Prometheus metrics endpoint.

use crate::metrics::{MetricsRegistry, OPENMETRICS_CONTENT_TYPE};
use axum::{
    Router,
    extract::State,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::get,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

/// HTTP server for metrics endpoint
pub struct MetricsServer {
    registry: Arc<MetricsRegistry>,
    listener: TcpListener,
}

impl MetricsServer {
    /// Bind the listen address.
    ///
    /// Binding happens up front so a bad address fails startup instead of
    /// surfacing later from a background task.
    pub async fn bind(registry: Arc<MetricsRegistry>, listen_addr: &str) -> common::Result<Self> {
        let listener = TcpListener::bind(listen_addr).await?;
        info!(listen_addr = %listen_addr, "Metrics server listening");
        Ok(Self { registry, listener })
    }

    pub fn local_addr(&self) -> common::Result<SocketAddr> {
        Ok(self.listener.local_addr()?)
    }

    /// Serve until the task is dropped
    pub async fn run(self) -> common::Result<()> {
        axum::serve(self.listener, router(self.registry))
            .await
            .map_err(common::Error::http)
    }
}

/// Router exposing `GET /metrics`
pub fn router(registry: Arc<MetricsRegistry>) -> Router {
    Router::new()
        .route("/metrics", get(metrics_handler))
        .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()))
        .with_state(registry)
}

async fn metrics_handler(State(registry): State<Arc<MetricsRegistry>>) -> Response {
    match registry.encode() {
        Ok(text) => ([(header::CONTENT_TYPE, OPENMETRICS_CONTENT_TYPE)], text).into_response(),
        Err(e) => {
            warn!(error = %e, "Failed to encode metrics");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

//! HTTP surface for the brute-force protection service.
//! This module maps the service operations onto a JSON API and applies
//! the admission gate to every inbound request.

mod handlers;
mod middleware;

use std::sync::Arc;
use std::time::Duration;

use axum::routing::{get, post};
use axum::Router;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::service::ProtectionService;

/// Build the application router with the admission middleware and the
/// tracing, timeout, and CORS layers applied.
pub fn router(service: Arc<ProtectionService>) -> Router {
    Router::new()
        .route("/api/scan-logs", post(handlers::scan_logs))
        .route("/api/block-ip", post(handlers::block_ip))
        .route("/api/unblock-ip", post(handlers::unblock_ip))
        .route("/api/blocklist", get(handlers::get_blocklist))
        .route("/api/status", get(handlers::status))
        .layer(axum::middleware::from_fn_with_state(
            service.clone(),
            middleware::admission,
        ))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(TimeoutLayer::new(Duration::from_secs(30)))
                .layer(CorsLayer::permissive()),
        )
        .with_state(service)
}

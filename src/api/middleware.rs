use std::net::SocketAddr;
use std::sync::Arc;

use axum::extract::{ConnectInfo, State};
use axum::http::{Request, StatusCode};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use tracing::Instrument;
use uuid::Uuid;

use crate::error::ServiceError;
use crate::service::ProtectionService;
use crate::utils::create_request_span;

/// Admission middleware applied to every request: the blocklist is
/// consulted first, then the rate limiter, before the request is
/// dispatched to its handler.
pub async fn admission<B>(
    State(service): State<Arc<ProtectionService>>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    request: Request<B>,
    next: Next<B>,
) -> Response {
    let ip = addr.ip().to_string();
    let span = create_request_span(&Uuid::new_v4().to_string());

    async move {
        match service.admit(&ip).await {
            Ok(()) => next.run(request).await,
            Err(ServiceError::IpBlocked(_)) => (
                StatusCode::FORBIDDEN,
                Json(json!({ "error": "Your IP is blocked." })),
            )
                .into_response(),
            Err(_) => (
                StatusCode::TOO_MANY_REQUESTS,
                Json(json!({ "error": "Rate limit exceeded. Try later." })),
            )
                .into_response(),
        }
    }
    .instrument(span)
    .await
}

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Deserialize;
use serde_json::json;

use crate::error::ServiceError;
use crate::service::{ProtectionService, StatusReport};

/// Request body for the scan endpoint
#[derive(Debug, Deserialize)]
pub struct ScanRequest {
    /// Raw log text to scan
    #[serde(default)]
    pub log: String,
}

/// Request body for the block endpoint
#[derive(Debug, Deserialize)]
pub struct BlockRequest {
    /// IP to block; required
    pub ip: Option<String>,
    /// Reason recorded with the block
    #[serde(default = "default_reason")]
    pub reason: String,
}

/// Request body for the unblock endpoint
#[derive(Debug, Deserialize)]
pub struct UnblockRequest {
    /// IP to unblock; required
    pub ip: Option<String>,
}

fn default_reason() -> String {
    "manual".to_string()
}

/// POST /api/scan-logs
///
/// Accepts raw log text in the `log` field and returns the suspicious IPs
/// with their failure counts and example lines.
pub async fn scan_logs(
    State(service): State<Arc<ProtectionService>>,
    Json(request): Json<ScanRequest>,
) -> Json<serde_json::Value> {
    let results = service.scan_logs(&request.log);
    Json(json!({ "suspicious_ips": results }))
}

/// POST /api/block-ip
pub async fn block_ip(
    State(service): State<Arc<ProtectionService>>,
    Json(request): Json<BlockRequest>,
) -> Response {
    let ip = match request.ip {
        Some(ip) => ip,
        None => return error_response(StatusCode::BAD_REQUEST, "ip required"),
    };

    match service.block_ip(&ip, &request.reason).await {
        Ok(()) => Json(json!({ "blocked": ip })).into_response(),
        Err(e) => service_error_response(e),
    }
}

/// POST /api/unblock-ip
pub async fn unblock_ip(
    State(service): State<Arc<ProtectionService>>,
    Json(request): Json<UnblockRequest>,
) -> Response {
    let ip = match request.ip {
        Some(ip) => ip,
        None => return error_response(StatusCode::BAD_REQUEST, "ip required"),
    };

    match service.unblock_ip(&ip).await {
        Ok(()) => Json(json!({ "unblocked": ip })).into_response(),
        Err(e) => service_error_response(e),
    }
}

/// GET /api/blocklist
pub async fn get_blocklist(State(service): State<Arc<ProtectionService>>) -> Response {
    Json(service.list_blocked().await).into_response()
}

/// GET /api/status
pub async fn status(State(service): State<Arc<ProtectionService>>) -> Json<StatusReport> {
    Json(service.status().await)
}

fn error_response(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({ "error": message }))).into_response()
}

fn service_error_response(error: ServiceError) -> Response {
    let status = match &error {
        ServiceError::IpBlocked(_) => StatusCode::FORBIDDEN,
        ServiceError::RateLimitExceeded(_) => StatusCode::TOO_MANY_REQUESTS,
        ServiceError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
        ServiceError::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (status, Json(json!({ "error": error.to_string() }))).into_response()
}

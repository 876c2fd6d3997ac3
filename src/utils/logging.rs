use std::env;
use tracing_subscriber::{fmt::format::FmtSpan, EnvFilter};

/// Initialize the logging system with the specified log level
pub fn init_logging() {
    // Get the log level from environment variable or default to INFO
    let log_level = env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());

    // Create a custom environment filter
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    // Initialize the subscriber with custom formatting; repeated calls
    // (e.g. from tests) keep the first subscriber
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_level(true)
        .with_span_events(FmtSpan::CLOSE)
        .try_init();
}

/// Create a new span for tracking request context
pub fn create_request_span(request_id: &str) -> tracing::Span {
    tracing::info_span!(
        "request",
        request_id = %request_id,
        timestamp = %chrono::Utc::now()
    )
}

/// Log a rate limit event
pub fn log_rate_limit(ip: &str, exceeded: bool) {
    if exceeded {
        tracing::warn!(
            ip = %ip,
            event = "rate_limit_exceeded",
            timestamp = %chrono::Utc::now()
        );
    } else {
        tracing::debug!(
            ip = %ip,
            event = "rate_limit_check",
            timestamp = %chrono::Utc::now()
        );
    }
}

/// Log a suspicious IP detected during a log scan
pub fn log_scan_detection(ip: &str, failure_count: u64, threshold: u64) {
    tracing::warn!(
        ip = %ip,
        failure_count = %failure_count,
        threshold = %threshold,
        event = "suspicious_ip_detected",
        timestamp = %chrono::Utc::now()
    );
}

/// Log a blocklist mutation
pub fn log_blocklist_event(event_type: &str, ip: &str, details: Option<&str>) {
    tracing::info!(
        ip = %ip,
        event = %event_type,
        details = ?details,
        timestamp = %chrono::Utc::now()
    );
}

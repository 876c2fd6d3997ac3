//! Utility modules for the brute-force protection service.
//! This module contains common utilities used across the application.

mod error;
mod logging;

pub use logging::{
    create_request_span,
    init_logging,
    log_blocklist_event,
    log_rate_limit,
    log_scan_detection,
};

pub use error::{GuardError, GuardResult};

use std::fmt;

use crate::utils::GuardError;

/// Represents errors that can occur in the brute-force protection service
#[derive(Debug)]
pub enum ServiceError {
    /// IP address has been blocked
    IpBlocked(String),
    /// Request rate limit has been exceeded
    RateLimitExceeded(String),
    /// Caller supplied an invalid or incomplete request
    InvalidRequest(String),
    /// Internal service error
    InternalError(String),
}

impl fmt::Display for ServiceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ServiceError::IpBlocked(msg) => write!(f, "IP blocked: {}", msg),
            ServiceError::RateLimitExceeded(msg) => write!(f, "Rate limit exceeded: {}", msg),
            ServiceError::InvalidRequest(msg) => write!(f, "Invalid request: {}", msg),
            ServiceError::InternalError(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for ServiceError {}

/// Converts a guard error into a service error
impl From<GuardError> for ServiceError {
    fn from(error: GuardError) -> Self {
        match error {
            GuardError::RateLimitExceeded(ip) => ServiceError::RateLimitExceeded(ip),
            GuardError::InvalidRequest(msg) => ServiceError::InvalidRequest(msg),
            other => ServiceError::InternalError(other.to_string()),
        }
    }
}

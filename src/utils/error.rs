use thiserror::Error;

/// Custom error types for the brute-force protection service
#[derive(Error, Debug)]
pub enum GuardError {
    /// Configuration related errors
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    /// Blocklist persistence errors (file I/O)
    #[error("Blocklist persistence error: {0}")]
    Persist(#[from] std::io::Error),

    /// Blocklist serialization errors
    #[error("Blocklist serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    /// Rate limiting errors
    #[error("Rate limit exceeded for IP: {0}")]
    RateLimitExceeded(String),

    /// Invalid request errors
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Internal server errors
    #[error("Internal server error: {0}")]
    Internal(String),
}

/// Result type for brute-force protection service operations
pub type GuardResult<T> = Result<T, GuardError>;

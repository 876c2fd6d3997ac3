use serde::Deserialize;

/// Configuration settings for the brute-force protection service
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// Log scanner configuration
    pub scanner: ScannerConfig,
    /// Rate limiting configuration
    pub rate_limit: RateLimitConfig,
    /// Blocklist persistence configuration
    pub blocklist: BlocklistConfig,
    /// Server configuration
    pub server: ServerConfig,
}

/// Log scanner configuration settings
#[derive(Debug, Clone, Deserialize)]
pub struct ScannerConfig {
    /// Minimum failure count for an IP to be reported as suspicious
    pub threshold: u64,
}

/// Rate limiting configuration settings
#[derive(Debug, Clone, Deserialize)]
pub struct RateLimitConfig {
    /// Maximum number of requests allowed per window
    pub max_requests: u32,
    /// Window length in seconds for rate limiting
    pub window_seconds: u64,
}

/// Blocklist persistence configuration settings
#[derive(Debug, Clone, Deserialize)]
pub struct BlocklistConfig {
    /// Path of the JSON file backing the blocklist
    pub path: String,
}

/// Server configuration settings
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host address to bind the server to
    pub host: String,
    /// Port number to listen on
    pub port: u16,
}

impl Settings {
    /// Load configuration from environment variables, falling back to the
    /// built-in defaults for anything not overridden.
    ///
    /// Environment variables use the `APP_` prefix with `__` as the section
    /// separator, e.g. `APP_RATE_LIMIT__MAX_REQUESTS=100`.
    pub fn load() -> Result<Self, config::ConfigError> {
        let config = config::Config::builder()
            .set_default("scanner.threshold", 5)?
            .set_default("rate_limit.max_requests", 30)?
            .set_default("rate_limit.window_seconds", 60)?
            .set_default("blocklist.path", "data/blocklist.json")?
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 3000)?
            .add_source(config::Environment::with_prefix("APP").separator("__"))
            .build()?;

        // Deserialize into our Settings struct
        config.try_deserialize()
    }
}

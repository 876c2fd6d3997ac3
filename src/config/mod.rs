//! Configuration management for the brute-force protection service.
//! This module handles loading and managing configuration settings
//! from environment variables with code-level defaults.

mod settings;

pub use settings::{BlocklistConfig, RateLimitConfig, ScannerConfig, ServerConfig, Settings};

/// Result type for configuration operations
pub type ConfigResult<T> = Result<T, config::ConfigError>;

/// Load the application configuration
pub fn load_config() -> ConfigResult<Settings> {
    Settings::load()
}

//! Configuration management for Atelier
//!
//! Environment-based configuration with defaults, optional TOML file loading,
//! and validation.

use serde::{Deserialize, Serialize};
use std::env;
use std::net::SocketAddr;
use std::time::Duration;

mod error;

pub use error::ConfigError;

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Server configuration
    pub server: ServerConfig,

    /// Bearer-token configuration
    pub auth: AuthConfig,

    /// Room broadcaster configuration
    pub rooms: RoomConfig,

    /// Logging configuration
    pub logging: LoggingConfig,
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Server bind address
    pub bind_address: SocketAddr,

    /// Graceful shutdown timeout
    #[serde(with = "humantime_serde")]
    pub shutdown_timeout: Duration,
}

/// Bearer-token configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Server-held signing secret
    pub token_secret: String,

    /// Token lifetime
    #[serde(with = "humantime_serde")]
    pub token_ttl: Duration,
}

/// Room broadcaster configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoomConfig {
    /// Bounded outbound queue depth per viewer session
    pub session_queue_depth: usize,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,

    /// Enable JSON formatting
    pub json_format: bool,

    /// Include timestamps
    pub with_timestamp: bool,

    /// Include target module
    pub with_target: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            auth: AuthConfig::default(),
            rooms: RoomConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: "127.0.0.1:8080".parse().unwrap(),
            shutdown_timeout: Duration::from_secs(30),
        }
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            token_secret: "atelier-dev-secret".to_string(),
            token_ttl: Duration::from_secs(24 * 3600),
        }
    }
}

impl Default for RoomConfig {
    fn default() -> Self {
        Self {
            session_queue_depth: 64,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json_format: false,
            with_timestamp: true,
            with_target: true,
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    ///
    /// Environment variables follow the pattern: ATELIER_<SECTION>_<KEY>
    /// Example: ATELIER_SERVER_BIND_ADDRESS=0.0.0.0:8080
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::default();

        // Server config
        if let Ok(addr) = env::var("ATELIER_SERVER_BIND_ADDRESS") {
            config.server.bind_address = addr
                .parse()
                .map_err(|e| ConfigError::InvalidValue(format!("Invalid bind address: {}", e)))?;
        }

        // Auth config
        if let Ok(secret) = env::var("ATELIER_AUTH_TOKEN_SECRET") {
            config.auth.token_secret = secret;
        }
        if let Ok(ttl) = env::var("ATELIER_AUTH_TOKEN_TTL_SECS") {
            let secs: u64 = ttl
                .parse()
                .map_err(|e| ConfigError::InvalidValue(format!("Invalid token ttl: {}", e)))?;
            config.auth.token_ttl = Duration::from_secs(secs);
        }

        // Room config
        if let Ok(depth) = env::var("ATELIER_ROOMS_SESSION_QUEUE_DEPTH") {
            config.rooms.session_queue_depth = depth
                .parse()
                .map_err(|e| ConfigError::InvalidValue(format!("Invalid queue depth: {}", e)))?;
        }

        // Logging config
        if let Ok(level) = env::var("ATELIER_LOG_LEVEL") {
            config.logging.level = level;
        }
        if let Ok(json) = env::var("ATELIER_LOG_JSON") {
            config.logging.json_format = json
                .parse()
                .map_err(|e| ConfigError::InvalidValue(format!("Invalid JSON flag: {}", e)))?;
        }

        config.validate()?;
        Ok(config)
    }

    /// Load configuration from file
    pub fn from_file(path: impl AsRef<std::path::Path>) -> Result<Self, ConfigError> {
        let contents =
            std::fs::read_to_string(path).map_err(|e| ConfigError::FileReadError(e.to_string()))?;

        let config: Self =
            toml::from_str(&contents).map_err(|e| ConfigError::ParseError(e.to_string()))?;

        config.validate()?;
        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.auth.token_secret.is_empty() {
            return Err(ConfigError::ValidationFailed(
                "auth.token_secret must not be empty".to_string(),
            ));
        }
        if self.auth.token_ttl.is_zero() {
            return Err(ConfigError::ValidationFailed(
                "auth.token_ttl must be positive".to_string(),
            ));
        }
        if self.rooms.session_queue_depth == 0 {
            return Err(ConfigError::ValidationFailed(
                "rooms.session_queue_depth must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.rooms.session_queue_depth, 64);
        assert_eq!(config.auth.token_ttl, Duration::from_secs(24 * 3600));
    }

    #[test]
    fn test_zero_queue_depth_rejected() {
        let mut config = Config::default();
        config.rooms.session_queue_depth = 0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::ValidationFailed(_))
        ));
    }

    #[test]
    fn test_empty_secret_rejected() {
        let mut config = Config::default();
        config.auth.token_secret = String::new();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_toml_round_trip() {
        let config = Config::default();
        let toml_str = toml::to_string(&config).unwrap();
        let parsed: Config = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed.server.bind_address, config.server.bind_address);
        assert_eq!(parsed.auth.token_ttl, config.auth.token_ttl);
    }
}

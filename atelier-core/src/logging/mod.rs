//! Logging subsystem
//!
//! Unified logging interface over the `tracing` crate, driven by the
//! `logging` section of the application config. `RUST_LOG` still wins when
//! set, so operators can raise verbosity per module without a config change.

use crate::config::LoggingConfig;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod error;
mod level;

pub use error::LoggingError;
pub use level::LogLevel;

/// Initialize the logging subsystem from the application config
pub fn init_logging(config: &LoggingConfig) -> Result<(), LoggingError> {
    let level = LogLevel::from_str(&config.level).ok_or_else(|| {
        LoggingError::InvalidConfiguration(format!("unknown log level: {}", config.level))
    })?;

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level.as_str()));

    let fmt_layer = fmt::layer().with_target(config.with_target);

    if config.json_format {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer.json())
            .try_init()
            .map_err(|e| LoggingError::InitializationFailed(e.to_string()))?;
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer)
            .try_init()
            .map_err(|e| LoggingError::InitializationFailed(e.to_string()))?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_level_rejected() {
        let config = LoggingConfig {
            level: "shout".to_string(),
            ..LoggingConfig::default()
        };
        assert!(matches!(
            init_logging(&config),
            Err(LoggingError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn test_default_config_level_parses() {
        let config = LoggingConfig::default();
        assert_eq!(LogLevel::from_str(&config.level), Some(LogLevel::Info));
    }
}

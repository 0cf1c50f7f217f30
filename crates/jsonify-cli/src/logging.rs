//! Logging setup for the JSONify CLI
//!
//! Structured logging via tracing-subscriber, with the filter level derived
//! from the CLI verbosity flags and overridable through the environment.

use std::io::IsTerminal;

use tracing_subscriber::EnvFilter;

use crate::error::{Error, Result};

/// Logging configuration
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Log level filter
    pub level: String,
    /// Emit JSON-structured log lines instead of the compact format
    pub json: bool,
    /// Include file and line numbers
    pub source_location: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            json: false,
            source_location: false,
        }
    }
}

impl LoggingConfig {
    /// Create logging config from verbosity level
    pub fn from_verbosity(verbosity: u8) -> Self {
        let mut config = Self::default();
        match verbosity {
            0 => config.level = "warn".to_string(),
            1 => config.level = "info".to_string(),
            2 => {
                config.level = "debug".to_string();
                config.source_location = true;
            }
            _ => {
                config.level = "trace".to_string();
                config.source_location = true;
            }
        }
        config
    }

    /// Apply environment overrides
    pub fn merge_with_env(&mut self) {
        // RUST_LOG takes precedence over verbosity-derived levels
        if let Ok(rust_log) = std::env::var("RUST_LOG") {
            self.level = rust_log;
        }
        if let Ok(format) = std::env::var("JSONIFY_LOG_FORMAT") {
            match format.to_lowercase().as_str() {
                "compact" => self.json = false,
                "json" => self.json = true,
                _ => tracing::warn!("Invalid log format: {}, using default", format),
            }
        }
    }
}

/// Initialize the global logging system
pub fn init_logging(config: LoggingConfig) -> Result<()> {
    let env_filter = EnvFilter::try_new(&config.level)
        .map_err(|e| Error::other(format!("Invalid log filter '{}': {}", config.level, e)))?;

    if config.json {
        let subscriber = tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_target(true)
            .with_ansi(false)
            .with_writer(std::io::stderr)
            .with_file(config.source_location)
            .with_line_number(config.source_location)
            .json()
            .finish();
        tracing::subscriber::set_global_default(subscriber)
            .map_err(|e| Error::other(format!("Failed to initialize logging: {}", e)))?;
    } else {
        let subscriber = tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_target(true)
            .with_ansi(std::io::stderr().is_terminal())
            .with_writer(std::io::stderr)
            .with_file(config.source_location)
            .with_line_number(config.source_location)
            .compact()
            .finish();
        tracing::subscriber::set_global_default(subscriber)
            .map_err(|e| Error::other(format!("Failed to initialize logging: {}", e)))?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verbosity_mapping() {
        assert_eq!(LoggingConfig::from_verbosity(0).level, "warn");
        assert_eq!(LoggingConfig::from_verbosity(1).level, "info");

        let debug = LoggingConfig::from_verbosity(2);
        assert_eq!(debug.level, "debug");
        assert!(debug.source_location);

        assert_eq!(LoggingConfig::from_verbosity(9).level, "trace");
    }
}

//! Configuration loading for the CLI
//!
//! Configuration is layered: built-in defaults, then an optional TOML file
//! (explicit `--config` path or the default location), then `JSONIFY_*`
//! environment variable overrides. The API key itself never lives in the
//! config file; it comes from the environment.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Error, Result};
use jsonify_core::{RetryPolicy, ServiceConfig};

/// Top-level configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Model service settings
    #[serde(default)]
    pub service: ServiceSettings,
}

/// Model service settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServiceSettings {
    /// Base URL of the model service
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Model identifier to request
    #[serde(default = "default_model")]
    pub model: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Maximum retries for failed requests
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
}

fn default_base_url() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_model() -> String {
    "gpt-4o-mini".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_max_retries() -> u32 {
    3
}

impl Default for ServiceSettings {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            model: default_model(),
            timeout_secs: default_timeout_secs(),
            max_retries: default_max_retries(),
        }
    }
}

impl Config {
    /// Load configuration, optionally from an explicit file path.
    ///
    /// An explicit path must exist; the default path is used only when
    /// present. Environment overrides are applied last.
    pub fn load_with_file(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(explicit) => {
                if !explicit.exists() {
                    return Err(Error::FileNotFound {
                        path: explicit.to_path_buf(),
                    });
                }
                Self::from_file(explicit)?
            }
            None => match Self::default_path() {
                Some(default) if default.exists() => Self::from_file(&default)?,
                _ => Self::default(),
            },
        };
        config.apply_env_overrides();
        Ok(config)
    }

    /// Parse a TOML configuration file
    pub fn from_file(path: &Path) -> Result<Self> {
        debug!(file = %path.display(), "Loading configuration file");
        let content = fs::read_to_string(path)?;
        toml::from_str(&content)
            .map_err(|e| Error::config(format!("Invalid config file {}: {}", path.display(), e)))
    }

    /// Default configuration file location
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("jsonify").join("config.toml"))
    }

    /// Apply `JSONIFY_*` environment overrides
    fn apply_env_overrides(&mut self) {
        if let Ok(base_url) = std::env::var("JSONIFY_BASE_URL") {
            self.service.base_url = base_url;
        }
        if let Ok(model) = std::env::var("JSONIFY_MODEL") {
            self.service.model = model;
        }
        if let Ok(timeout) = std::env::var("JSONIFY_TIMEOUT_SECS") {
            match timeout.parse() {
                Ok(secs) => self.service.timeout_secs = secs,
                Err(_) => tracing::warn!("Ignoring invalid JSONIFY_TIMEOUT_SECS: {}", timeout),
            }
        }
        if let Ok(retries) = std::env::var("JSONIFY_MAX_RETRIES") {
            match retries.parse() {
                Ok(count) => self.service.max_retries = count,
                Err(_) => tracing::warn!("Ignoring invalid JSONIFY_MAX_RETRIES: {}", retries),
            }
        }
    }

    /// Build the core service configuration from these settings
    pub fn service_config(&self) -> ServiceConfig {
        ServiceConfig {
            base_url: self.service.base_url.clone(),
            model: self.service.model.clone(),
            api_key: None, // resolved from the environment by the client
            timeout_secs: self.service.timeout_secs,
            retry: RetryPolicy::new(self.service.max_retries),
        }
    }

    /// Serialize the configuration as TOML
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| Error::Toml(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.service.base_url, "https://api.openai.com/v1");
        assert_eq!(config.service.max_retries, 3);
    }

    #[test]
    fn test_parse_partial_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "[service]\nmodel = \"gpt-4o\"").unwrap();

        let config = Config::from_file(file.path()).unwrap();
        assert_eq!(config.service.model, "gpt-4o");
        // Unspecified fields keep their defaults
        assert_eq!(config.service.timeout_secs, 30);
    }

    #[test]
    fn test_unknown_fields_rejected() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "[service]\nmodle = \"typo\"").unwrap();

        assert!(Config::from_file(file.path()).is_err());
    }

    #[test]
    fn test_explicit_missing_file_is_an_error() {
        let err = Config::load_with_file(Some(Path::new("/no/such/config.toml"))).unwrap_err();
        assert!(matches!(err, Error::FileNotFound { .. }));
    }

    #[test]
    fn test_service_config_mapping() {
        let mut config = Config::default();
        config.service.max_retries = 5;
        config.service.timeout_secs = 10;

        let service = config.service_config();
        assert_eq!(service.timeout_secs, 10);
        assert_eq!(service.retry.max_attempts, 5);
        assert!(service.api_key.is_none());
    }

    #[test]
    fn test_toml_round_trip() {
        let config = Config::default();
        let toml = config.to_toml().unwrap();
        let parsed: Config = toml::from_str(&toml).unwrap();
        assert_eq!(parsed.service.model, config.service.model);
    }
}

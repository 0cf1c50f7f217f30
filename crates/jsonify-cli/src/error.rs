//! Error types and handling for the CLI
//!
//! This module provides error types and utilities for handling
//! various failure modes in the CLI application.

use std::io;
use std::path::PathBuf;

use jsonify_core::ErrorCategory;

/// Result type alias for CLI operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for CLI operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// IO error (file operations, etc.)
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// Error from the jsonify-core library
    #[error("{0}")]
    Core(#[from] jsonify_core::Error),

    /// File not found
    #[error("File not found: {}", path.display())]
    FileNotFound { path: PathBuf },

    /// The document failed validation and the command requires a verdict
    #[error("Invalid JSON: {message}")]
    InvalidDocument { message: String },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML serialization error
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// TOML serialization/deserialization error
    #[error("TOML error: {0}")]
    Toml(String),

    /// Generic error with context
    #[error("{message}")]
    Other { message: String },
}

impl Error {
    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create a generic error with message
    pub fn other(message: impl Into<String>) -> Self {
        Self::Other {
            message: message.into(),
        }
    }

    /// Get the exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Io(_) => 1,
            Self::Core(core) => match core.category() {
                ErrorCategory::Parse => 2,
                ErrorCategory::Input => 3,
                ErrorCategory::Service => 4,
                ErrorCategory::Internal => 5,
            },
            Self::InvalidDocument { .. } => 2,
            Self::FileNotFound { .. } => 6,
            Self::Config(_) => 7,
            Self::Json(_) => 12,
            Self::Yaml(_) => 13,
            Self::Toml(_) => 14,
            Self::Other { .. } => 99,
        }
    }
}

/// Format an error for display to the user
pub fn format_error(error: &Error, use_color: bool) -> String {
    if use_color {
        use colored::Colorize;
        format!("{} {}", "Error:".red().bold(), error)
    } else {
        format!("Error: {}", error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes_by_category() {
        let parse = Error::Core(jsonify_core::Error::Parse {
            message: "bad".to_string(),
            line: 1,
            column: 2,
        });
        assert_eq!(parse.exit_code(), 2);

        let input = Error::Core(jsonify_core::Error::input("wrong extension"));
        assert_eq!(input.exit_code(), 3);

        let service = Error::Core(jsonify_core::Error::service("down"));
        assert_eq!(service.exit_code(), 4);
    }

    #[test]
    fn test_invalid_document_matches_parse_code() {
        let err = Error::InvalidDocument {
            message: "expected value".to_string(),
        };
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn test_format_error_plain() {
        let err = Error::other("boom");
        assert_eq!(format_error(&err, false), "Error: boom");
    }
}

//! Error types for the JSONify core library
//!
//! This module defines the error handling system for JSONify, using thiserror
//! for ergonomic error definitions and anyhow for flexible error contexts.

use std::fmt;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Main error type for JSONify operations
#[derive(Error, Debug)]
pub enum Error {
    /// Malformed JSON document text. Recovered locally into the Invalid
    /// document state, never fatal.
    #[error("JSON parse error: {message}")]
    Parse {
        message: String,
        line: usize,
        column: usize,
    },

    /// Rejected input before any parse was attempted (empty text, wrong
    /// file extension). No document state is mutated.
    #[error("Input error: {message}")]
    Input { message: String },

    /// Model service transport failure. The operation yields no result;
    /// the document keeps its last good state.
    #[error("Service error: {message}")]
    Service {
        message: String,
        status_code: Option<u16>,
        #[source]
        source: Option<anyhow::Error>,
    },

    /// Model service response did not match the flow's expected schema
    #[error("Schema validation failed: {message}")]
    SchemaValidation {
        message: String,
        #[source]
        source: Option<anyhow::Error>,
    },

    /// Configuration errors
    #[error("Configuration error: {message}")]
    Configuration {
        message: String,
        #[source]
        source: Option<anyhow::Error>,
    },

    /// JSON serialization plumbing errors (not document syntax errors)
    #[error("JSON error: {message}")]
    Json {
        message: String,
        #[source]
        source: serde_json::Error,
    },

    /// IO errors
    #[error("IO error: {message}")]
    Io {
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Generic internal error with context
    #[error("Internal error: {message}")]
    Internal {
        message: String,
        #[source]
        source: anyhow::Error,
    },
}

/// Convenience type alias for Results using our Error type
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Build a Parse error from serde_json's native syntax error,
    /// preserving its line/column information.
    pub fn parse(err: &serde_json::Error) -> Self {
        Error::Parse {
            message: err.to_string(),
            line: err.line(),
            column: err.column(),
        }
    }

    /// Create an input error
    pub fn input(message: impl Into<String>) -> Self {
        Error::Input {
            message: message.into(),
        }
    }

    /// Create a service error without an underlying source
    pub fn service(message: impl Into<String>) -> Self {
        Error::Service {
            message: message.into(),
            status_code: None,
            source: None,
        }
    }

    /// Create a schema validation error
    pub fn schema(message: impl Into<String>) -> Self {
        Error::SchemaValidation {
            message: message.into(),
            source: None,
        }
    }

    /// Error category, used by callers to map failures to a user-facing
    /// status without matching on every variant.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Error::Parse { .. } => ErrorCategory::Parse,
            Error::Input { .. } => ErrorCategory::Input,
            Error::Service { .. } | Error::SchemaValidation { .. } => ErrorCategory::Service,
            _ => ErrorCategory::Internal,
        }
    }
}

/// Coarse failure taxonomy: every failure in this crate degrades to one of
/// these, and none is fatal to the process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorCategory {
    /// Malformed JSON text, recovered into the Invalid state
    Parse,
    /// Rejected input, no state mutation
    Input,
    /// Model call transport/schema failure, operation yields no result
    Service,
    /// Everything else
    Internal,
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorCategory::Parse => write!(f, "parse"),
            ErrorCategory::Input => write!(f, "input"),
            ErrorCategory::Service => write!(f, "service"),
            ErrorCategory::Internal => write!(f, "internal"),
        }
    }
}

// Conversion implementations
impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Json {
            message: err.to_string(),
            source: err,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io {
            message: err.to_string(),
            source: err,
        }
    }
}

impl From<anyhow::Error> for Error {
    fn from(err: anyhow::Error) -> Self {
        Error::Internal {
            message: err.to_string(),
            source: err,
        }
    }
}

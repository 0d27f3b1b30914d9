//! Error types for Solidafy Paginator
//!
//! This module defines the error hierarchy for the crate.
//! All public APIs return `Result<T, Error>` where Error is defined here.
//!
//! A malformed page value in a query string is never an error: it is read
//! as "absent" and the configured default page is used instead.

use std::fmt;
use thiserror::Error;

/// Query source operation that failed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QueryOperation {
    /// Counting all matching records
    Count,
    /// Fetching a bounded window of records
    Fetch,
}

impl fmt::Display for QueryOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Count => write!(f, "count"),
            Self::Fetch => write!(f, "fetch"),
        }
    }
}

/// The main error type for Solidafy Paginator
#[derive(Error, Debug)]
pub enum Error {
    // ============================================================================
    // Query Errors
    // ============================================================================
    #[error("Query {operation} failed: {message}")]
    Query {
        operation: QueryOperation,
        message: String,
    },

    #[error("Database error: {0}")]
    Database(#[from] duckdb::Error),

    // ============================================================================
    // Serialization Errors
    // ============================================================================
    #[error("Failed to serialize paginator: {0}")]
    Serialization(#[from] serde_json::Error),

    // ============================================================================
    // Configuration Errors
    // ============================================================================
    #[error("Invalid config value for '{field}': {message}")]
    InvalidConfigValue { field: String, message: String },

    #[error("Failed to parse YAML: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    // ============================================================================
    // I/O Errors
    // ============================================================================
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // ============================================================================
    // Generic Errors
    // ============================================================================
    #[error("{0}")]
    Other(String),

    #[error(transparent)]
    Anyhow(#[from] anyhow::Error),
}

impl Error {
    /// Create a query error for a failed count
    pub fn count(message: impl Into<String>) -> Self {
        Self::Query {
            operation: QueryOperation::Count,
            message: message.into(),
        }
    }

    /// Create a query error for a failed fetch
    pub fn fetch(message: impl Into<String>) -> Self {
        Self::Query {
            operation: QueryOperation::Fetch,
            message: message.into(),
        }
    }

    /// Create an invalid config value error
    pub fn invalid_config(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidConfigValue {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Check if this error came from the underlying data source
    pub fn is_query_error(&self) -> bool {
        matches!(self, Error::Query { .. } | Error::Database(_))
    }

    /// Check if this error is a configuration problem on the caller's side
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            Error::InvalidConfigValue { .. } | Error::YamlParse(_) | Error::InvalidUrl(_)
        )
    }
}

/// Result type alias for Solidafy Paginator
pub type Result<T> = std::result::Result<T, Error>;

/// Extension trait for adding context to errors
pub trait ResultExt<T> {
    /// Add context to an error
    fn context(self, message: impl Into<String>) -> Result<T>;

    /// Add context with a closure (lazy evaluation)
    fn with_context<F: FnOnce() -> String>(self, f: F) -> Result<T>;
}

impl<T, E: Into<Error>> ResultExt<T> for std::result::Result<T, E> {
    fn context(self, message: impl Into<String>) -> Result<T> {
        self.map_err(|e| {
            let inner = e.into();
            Error::Other(format!("{}: {}", message.into(), inner))
        })
    }

    fn with_context<F: FnOnce() -> String>(self, f: F) -> Result<T> {
        self.map_err(|e| {
            let inner = e.into();
            Error::Other(format!("{}: {}", f(), inner))
        })
    }
}

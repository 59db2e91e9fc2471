//! Error types for the tweet-archive-graphml library.
//!
//! This module provides custom error types using `thiserror` so that malformed
//! archive records, unreadable inputs and bad configuration are reported with
//! enough context to find the offending file and line.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while converting a tweet archive to GraphML.
#[derive(Error, Debug)]
pub enum GraphmlError {
    /// A user or tweet payload is missing a required field
    #[error("Malformed {entity} record: missing field `{field}`")]
    MissingField {
        /// Kind of record that was malformed ("user" or "tweet")
        entity: &'static str,
        /// Name of the missing field
        field: &'static str,
    },

    /// A line of an input file is not valid JSON
    #[error("Invalid JSON in {} at line {line}: {source}", path.display())]
    InvalidJson {
        /// Input file containing the line
        path: PathBuf,
        /// One-based line number
        line: usize,
        /// Underlying parse error
        #[source]
        source: serde_json::Error,
    },

    /// A line of an input file is JSON but not an object
    #[error("Expected a JSON object in {} at line {line}", path.display())]
    NotAnObject {
        /// Input file containing the line
        path: PathBuf,
        /// One-based line number
        line: usize,
    },

    /// A line of an input file is not valid UTF-8
    #[error("Invalid UTF-8 in {} at line {line}: {source}", path.display())]
    InvalidUtf8 {
        /// Input file containing the line
        path: PathBuf,
        /// One-based line number
        line: usize,
        /// Underlying decoding error
        #[source]
        source: std::str::Utf8Error,
    },

    /// File I/O errors
    #[error("File I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Rejected user input (paths, graph name)
    #[error("Validation failed: {0}")]
    Validation(String),
}

impl GraphmlError {
    /// Whether the error describes bad input data rather than an environment failure.
    ///
    /// Only these errors may be skipped in keep-going mode.
    #[must_use]
    pub const fn is_malformed_input(&self) -> bool {
        matches!(
            self,
            Self::MissingField { .. }
                | Self::InvalidJson { .. }
                | Self::InvalidUtf8 { .. }
                | Self::NotAnObject { .. }
        )
    }
}

/// Convenience type alias for Result with GraphmlError
pub type Result<T> = std::result::Result<T, GraphmlError>;

impl From<config::ConfigError> for GraphmlError {
    fn from(err: config::ConfigError) -> Self {
        Self::InvalidConfig(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_field_message() {
        let err = GraphmlError::MissingField {
            entity: "user",
            field: "id_str",
        };
        assert_eq!(err.to_string(), "Malformed user record: missing field `id_str`");
        assert!(err.is_malformed_input());
    }

    #[test]
    fn test_invalid_utf8_is_malformed_input() {
        let source = std::str::from_utf8(b"\xff").unwrap_err();
        let err = GraphmlError::InvalidUtf8 {
            path: PathBuf::from("tweets.json"),
            line: 3,
            source,
        };
        assert!(err.to_string().starts_with("Invalid UTF-8 in tweets.json at line 3"));
        assert!(err.is_malformed_input());
    }

    #[test]
    fn test_io_error_is_not_malformed_input() {
        let err = GraphmlError::from(std::io::Error::new(std::io::ErrorKind::NotFound, "gone"));
        assert!(!err.is_malformed_input());
    }
}

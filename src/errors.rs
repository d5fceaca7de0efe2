//! Custom error types for the Sentinel scanner.
//!
//! The simulation core never fails; these errors come from the edges:
//! state files, user supplied identifiers and the terminal UI.

use std::path::PathBuf;

/// The main error type for Sentinel operations.
#[derive(Debug, thiserror::Error)]
pub enum SentinelError {
    /// I/O error (state file read/write, file metadata, etc.)
    #[error("I/O error at {path:?}: {source}")]
    Io {
        path: Option<PathBuf>,
        #[source]
        source: std::io::Error,
    },

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Report formatting error
    #[error("Formatting error: {0}")]
    Format(#[from] std::fmt::Error),

    /// Regex compilation error
    #[error("Invalid regex pattern '{pattern}': {source}")]
    Regex {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    /// Protection feature id not present in the store
    #[error("Unknown protection feature: {0}")]
    UnknownFeature(String),

    /// Scan id not present in the history
    #[error("Unknown scan: {0}")]
    UnknownScan(String),

    /// Invalid path error
    #[error("Invalid path: {0}")]
    InvalidPath(String),

    /// UI channel error
    #[error("UI communication error: {0}")]
    UiChannel(String),

    /// Tokio task join error
    #[error("Async task failed: {0}")]
    TaskJoin(#[from] tokio::task::JoinError),

    /// Generic error for external library errors
    #[error("{context}: {message}")]
    External { context: String, message: String },
}

/// Result type alias using SentinelError
pub type SentinelResult<T> = Result<T, SentinelError>;

impl SentinelError {
    /// Create an I/O error with path context
    pub fn io(source: std::io::Error, path: impl Into<Option<PathBuf>>) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Create a regex error with pattern context
    pub fn regex(source: regex::Error, pattern: impl Into<String>) -> Self {
        Self::Regex {
            pattern: pattern.into(),
            source,
        }
    }

    /// Create an external error with context
    pub fn external(context: impl Into<String>, message: impl Into<String>) -> Self {
        Self::External {
            context: context.into(),
            message: message.into(),
        }
    }
}

/// Convert from raw I/O errors (without path context)
impl From<std::io::Error> for SentinelError {
    fn from(source: std::io::Error) -> Self {
        Self::Io { path: None, source }
    }
}

impl From<indicatif::style::TemplateError> for SentinelError {
    fn from(err: indicatif::style::TemplateError) -> Self {
        Self::external("progress template", err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_display() {
        let err = SentinelError::io(
            std::io::Error::new(std::io::ErrorKind::NotFound, "file not found"),
            Some(PathBuf::from("/state/history.json")),
        );
        assert!(err.to_string().contains("/state/history.json"));
    }

    #[test]
    fn test_unknown_feature_error() {
        let err = SentinelError::UnknownFeature("firewall".to_string());
        assert_eq!(err.to_string(), "Unknown protection feature: firewall");
    }

    #[test]
    fn test_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: SentinelError = io_err.into();
        assert!(matches!(err, SentinelError::Io { path: None, .. }));
    }
}

//! Error types for bloomhash
//!
//! The hash core itself is total (every byte sequence and seed is valid),
//! so errors only arise from filter construction and filter-state
//! persistence.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for filter operations.
#[derive(Error, Debug)]
pub enum BloomHashError {
    /// Rejected filter geometry or sizing input
    #[error("invalid filter parameter: {0}")]
    InvalidParameter(String),

    /// Filter state could not be encoded to bytes
    #[error("failed to encode filter state: {0}")]
    Encode(String),

    /// Filter state could not be decoded from bytes
    #[error("failed to decode filter state: {0}")]
    Decode(String),

    /// Decoded filter state failed validation
    #[error("corrupt filter state: {0}")]
    CorruptState(String),

    /// I/O error while reading or writing a filter snapshot
    #[error("snapshot error at '{}': {source}", path.display())]
    Snapshot {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl BloomHashError {
    /// Create an invalid-parameter error.
    pub fn invalid_parameter(message: impl Into<String>) -> Self {
        Self::InvalidParameter(message.into())
    }

    /// Create a corrupt-state error.
    pub fn corrupt(message: impl Into<String>) -> Self {
        Self::CorruptState(message.into())
    }

    /// Create a snapshot I/O error with path context.
    pub fn snapshot(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Snapshot {
            path: path.into(),
            source,
        }
    }

    /// Get the path associated with this error, if any.
    pub fn path(&self) -> Option<&PathBuf> {
        match self {
            Self::Snapshot { path, .. } => Some(path),
            _ => None,
        }
    }
}

/// Result type alias for bloomhash operations.
pub type Result<T> = std::result::Result<T, BloomHashError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snapshot_error_carries_path() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err = BloomHashError::snapshot("/test/filter.json", io_err);
        assert_eq!(err.path().unwrap(), &PathBuf::from("/test/filter.json"));
        assert!(err.to_string().contains("/test/filter.json"));
    }

    #[test]
    fn test_parameter_error_message() {
        let err = BloomHashError::invalid_parameter("filter must have at least one bit");
        assert!(err.to_string().contains("at least one bit"));
        assert!(err.path().is_none());
    }
}

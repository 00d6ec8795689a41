//! Timestamp store error types.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while reading or writing the timestamp store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The store file could not be read or written.
    #[error("failed to access store file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The store file exists but is not valid JSON.
    #[error("store file {path} is corrupt: {source}")]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// No default location could be determined for the store.
    #[error("no data directory available for the store")]
    NoDataDir,
}

impl StoreError {
    /// Returns true if the stored data itself is unreadable.
    #[must_use]
    pub fn is_corrupt(&self) -> bool {
        matches!(self, Self::Corrupt { .. })
    }

    /// Returns a user-friendly suggestion for resolving this error.
    #[must_use]
    pub fn suggestion(&self) -> &'static str {
        match self {
            Self::Io { .. } => "check the permissions of the store directory",
            Self::Corrupt { .. } => "run `easy-timer clear` to discard the saved state",
            Self::NoDataDir => "pass --store <PATH> or --ephemeral",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = StoreError::Io {
            path: PathBuf::from("/tmp/store.json"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        let message = err.to_string();
        assert!(message.contains("/tmp/store.json"));
        assert!(message.contains("denied"));
    }

    #[test]
    fn test_is_corrupt() {
        let source = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err = StoreError::Corrupt {
            path: PathBuf::from("store.json"),
            source,
        };
        assert!(err.is_corrupt());
        assert!(!StoreError::NoDataDir.is_corrupt());
    }

    #[test]
    fn test_suggestion() {
        assert!(StoreError::NoDataDir.suggestion().contains("--store"));
    }
}

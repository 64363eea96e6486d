//! Persistence error handling
//!
//! Typed errors for reading and writing the contact list, with
//! recovery suggestions for the cases a user can act on.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading or saving contacts
#[derive(Error, Debug)]
pub enum PersistenceError {
    /// Stored value exists but is not a valid contact list
    #[error("Can't read from local storage. {details}")]
    Parse { key: String, details: String },

    /// Contact list could not be serialized
    #[error("Failed to serialize contacts: {0}")]
    Serialize(#[source] serde_json::Error),

    /// Failed to create the storage directory
    #[error("Failed to create storage directory '{path}': {source}")]
    CreateDirectory {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Permission denied accessing path
    #[error("Permission denied: cannot access '{path}'. Check file permissions.")]
    PermissionDenied {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Failed to read a stored value
    #[error("Failed to read '{path}': {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Failed to write a stored value
    #[error("Failed to write '{path}': {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl PersistenceError {
    /// Create a parse error for the value stored under `key`
    pub fn parse(key: &str, details: impl std::fmt::Display) -> Self {
        PersistenceError::Parse {
            key: key.to_string(),
            details: details.to_string(),
        }
    }

    /// Classify a read failure by its kind
    pub fn from_read(error: io::Error, path: PathBuf) -> Self {
        match error.kind() {
            io::ErrorKind::PermissionDenied => PersistenceError::PermissionDenied {
                path,
                source: error,
            },
            _ => PersistenceError::Read {
                path,
                source: error,
            },
        }
    }

    /// Classify a write failure by its kind
    pub fn from_write(error: io::Error, path: PathBuf) -> Self {
        match error.kind() {
            io::ErrorKind::PermissionDenied => PersistenceError::PermissionDenied {
                path,
                source: error,
            },
            _ => PersistenceError::Write {
                path,
                source: error,
            },
        }
    }

    /// Get a recovery suggestion for this error
    pub fn recovery_suggestion(&self) -> Option<&'static str> {
        match self {
            PersistenceError::Parse { .. } => {
                Some("The stored contact list is unreadable. Adding a contact will overwrite it.")
            }
            PersistenceError::PermissionDenied { .. } => {
                Some("Check file and directory permissions for the data directory.")
            }
            PersistenceError::CreateDirectory { .. } => {
                Some("Check that the parent directory exists and you have write permissions.")
            }
            _ => None,
        }
    }
}

/// Result type for persistence operations
pub type PersistenceResult<T> = Result<T, PersistenceError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_error_message_includes_details() {
        let err = PersistenceError::parse("contacts", "expected value at line 1 column 1");
        let msg = err.to_string();
        assert_eq!(
            msg,
            "Can't read from local storage. expected value at line 1 column 1"
        );
        assert!(err.recovery_suggestion().is_some());
    }

    #[test]
    fn test_permission_denied_classification() {
        let io_err = io::Error::new(io::ErrorKind::PermissionDenied, "access denied");
        let err = PersistenceError::from_write(io_err, PathBuf::from("/test/contacts"));

        assert!(matches!(err, PersistenceError::PermissionDenied { .. }));
        assert!(err.to_string().contains("/test/contacts"));
    }

    #[test]
    fn test_other_read_error_classification() {
        let io_err = io::Error::new(io::ErrorKind::InvalidData, "bad utf-8");
        let err = PersistenceError::from_read(io_err, PathBuf::from("/test/contacts"));

        assert!(matches!(err, PersistenceError::Read { .. }));
        assert!(err.recovery_suggestion().is_none());
    }
}

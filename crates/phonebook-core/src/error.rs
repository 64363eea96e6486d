//! Contact store errors

use thiserror::Error;

use crate::storage::PersistenceError;

/// Errors returned by contact store mutations
#[derive(Error, Debug)]
pub enum ContactError {
    /// A contact with the same name (ignoring case) already exists
    #[error("{name} is already in contacts")]
    DuplicateName { name: String },

    /// Name is empty after trimming
    #[error("Contact name must not be empty")]
    EmptyName,

    /// Number is empty after trimming
    #[error("Contact number must not be empty")]
    EmptyNumber,

    /// The mutation was applied in memory but could not be persisted
    #[error(transparent)]
    Storage(#[from] PersistenceError),
}

impl ContactError {
    /// Whether the store was left unchanged by the failed operation
    pub fn is_rejection(&self) -> bool {
        !matches!(self, ContactError::Storage(_))
    }
}

/// Result type for contact store operations
pub type ContactResult<T> = Result<T, ContactError>;

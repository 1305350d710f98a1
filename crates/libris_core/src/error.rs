//! Error types for Libris core.

use thiserror::Error;

/// Result type for core operations.
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors that can occur in Libris core operations.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Malformed or empty input.
    #[error("invalid argument: {message}")]
    InvalidArgument {
        /// Description of what was wrong with the input.
        message: String,
    },

    /// Identity collision on insert.
    #[error("duplicate key: a record with key {key} already exists in {collection}")]
    DuplicateKey {
        /// Collection the insert targeted.
        collection: String,
        /// The colliding key.
        key: String,
    },

    /// Lookup or removal miss.
    #[error("{entity} not found: {key}")]
    NotFound {
        /// Kind of entity searched for.
        entity: &'static str,
        /// The key that was not found.
        key: String,
    },

    /// The book already has an active checkout.
    #[error("book {isbn} is already checked out")]
    AlreadyCheckedOut {
        /// The isbn of the checked-out book.
        isbn: String,
    },

    /// The stored snapshot could not be interpreted.
    #[error("corrupt data: {message}")]
    CorruptData {
        /// Description of the corruption.
        message: String,
    },

    /// The snapshot could not be read or written.
    #[error("I/O failure: {0}")]
    Storage(#[from] libris_storage::StorageError),
}

impl CoreError {
    /// Creates an invalid argument error.
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    /// Creates a duplicate key error.
    pub fn duplicate_key(collection: impl Into<String>, key: impl Into<String>) -> Self {
        Self::DuplicateKey {
            collection: collection.into(),
            key: key.into(),
        }
    }

    /// Creates a not found error.
    pub fn not_found(entity: &'static str, key: impl Into<String>) -> Self {
        Self::NotFound {
            entity,
            key: key.into(),
        }
    }

    /// Creates a corrupt data error.
    pub fn corrupt_data(message: impl Into<String>) -> Self {
        Self::CorruptData {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_key() {
        let err = CoreError::not_found("book", "9999999999");
        assert_eq!(err.to_string(), "book not found: 9999999999");

        let err = CoreError::AlreadyCheckedOut {
            isbn: "9783161484100".into(),
        };
        assert_eq!(err.to_string(), "book 9783161484100 is already checked out");
    }

    #[test]
    fn storage_errors_convert() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only");
        let err: CoreError = libris_storage::StorageError::from(io).into();
        assert!(matches!(err, CoreError::Storage(_)));
        assert!(err.to_string().starts_with("I/O failure"));
    }
}

use thiserror::Error;

use crate::domain::access::errors::AccessError;
use crate::domain::ids::LegalCaseId;

/// Error for FileName validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FileNameError {
    #[error("File name is empty")]
    Empty,

    #[error("File name too long: maximum {max} characters, got {actual}")]
    TooLong { max: usize, actual: usize },

    #[error("File name must not contain path separators or be a relative path component")]
    InvalidCharacters,
}

/// Failure reported by the blob storage backend.
#[derive(Debug, Clone, Error)]
pub enum StorageError {
    #[error("Storage unavailable: {0}")]
    Unavailable(String),

    #[error("Invalid object name: {0}")]
    InvalidObjectName(String),
}

/// Top-level error for all file operations
#[derive(Debug, Clone, Error)]
pub enum FileError {
    #[error("Invalid file name: {0}")]
    InvalidName(#[from] FileNameError),

    #[error(transparent)]
    Access(#[from] AccessError),

    #[error("A file named {file_name} already exists in legal case {case_id}")]
    NameTaken {
        case_id: LegalCaseId,
        file_name: String,
    },

    #[error("Storage quota exceeded: {used_bytes} of {limit_bytes} bytes used, {requested_bytes} requested")]
    QuotaExceeded {
        used_bytes: i64,
        limit_bytes: i64,
        requested_bytes: i64,
    },

    #[error("File is too large")]
    TooLarge,

    #[error("File content is missing from storage: {0}")]
    BlobMissing(String),

    #[error("Storage unavailable: {0}")]
    StorageUnavailable(String),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Unknown error: {0}")]
    Unknown(String),
}

impl From<StorageError> for FileError {
    fn from(err: StorageError) -> Self {
        FileError::StorageUnavailable(err.to_string())
    }
}

impl From<anyhow::Error> for FileError {
    fn from(err: anyhow::Error) -> Self {
        FileError::Unknown(err.to_string())
    }
}

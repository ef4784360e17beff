use thiserror::Error;

use crate::domain::access::errors::AccessError;
use crate::domain::client::errors::ClientError;
use crate::domain::ids::ClientId;
use crate::domain::ids::IdError;
use crate::domain::ids::LegalCaseId;

/// Error for CaseTitle validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CaseTitleError {
    #[error("Title is empty")]
    Empty,

    #[error("Title too long: maximum {max} characters, got {actual}")]
    TooLong { max: usize, actual: usize },
}

/// Error for unknown enumerated case attributes
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CaseAttributeError {
    #[error("Unknown case type: {0}")]
    UnknownCaseType(String),

    #[error("Unknown priority level: {0}")]
    UnknownPriority(String),

    #[error("Unknown case status: {0}")]
    UnknownStatus(String),
}

/// Top-level error for all legal case operations
#[derive(Debug, Clone, Error)]
pub enum LegalCaseError {
    #[error("Invalid case ID: {0}")]
    InvalidId(#[from] IdError),

    #[error("Invalid title: {0}")]
    InvalidTitle(#[from] CaseTitleError),

    #[error("{0}")]
    InvalidAttribute(#[from] CaseAttributeError),

    #[error("End date precedes start date")]
    InvalidDateRange,

    #[error("Update contains no fields")]
    EmptyUpdate,

    #[error(transparent)]
    Access(#[from] AccessError),

    #[error("Client not found in account: {0}")]
    ClientNotFound(ClientId),

    #[error("Invalid client: {0}")]
    InvalidClient(#[from] ClientError),

    #[error("Exactly one of client_id or client must be given")]
    ClientUnspecified,

    #[error("Client already registered: {0}")]
    ClientAlreadyExists(String),

    #[error("Legal case {0} still has files attached")]
    HasFiles(LegalCaseId),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Unknown error: {0}")]
    Unknown(String),
}

impl From<anyhow::Error> for LegalCaseError {
    fn from(err: anyhow::Error) -> Self {
        LegalCaseError::Unknown(err.to_string())
    }
}

use thiserror::Error;

use crate::domain::access::errors::AccessError;
use crate::domain::user::errors::EmailError;
use crate::domain::user::errors::NationalIdError;
use crate::domain::user::errors::PersonNameError;
use crate::domain::user::errors::PhoneError;

/// Top-level error for all client operations
#[derive(Debug, Clone, Error)]
pub enum ClientError {
    #[error("Invalid national id: {0}")]
    InvalidNationalId(#[from] NationalIdError),

    #[error("Invalid name: {0}")]
    InvalidName(#[from] PersonNameError),

    #[error("Invalid email: {0}")]
    InvalidEmail(#[from] EmailError),

    #[error("Invalid phone: {0}")]
    InvalidPhone(#[from] PhoneError),

    #[error("Client not found: {0}")]
    NotFound(String),

    #[error(transparent)]
    Access(#[from] AccessError),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Unknown error: {0}")]
    Unknown(String),
}

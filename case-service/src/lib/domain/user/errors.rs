use thiserror::Error;

use crate::domain::ids::IdError;
use crate::domain::ids::RoleId;
use crate::domain::ids::UserId;

/// Error for Username validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum UsernameError {
    #[error("Username too short: minimum {min} characters, got {actual}")]
    TooShort { min: usize, actual: usize },

    #[error("Username too long: maximum {max} characters, got {actual}")]
    TooLong { max: usize, actual: usize },

    #[error(
        "Username contains invalid characters (only alphanumeric, underscore, and hyphen allowed)"
    )]
    InvalidCharacters,
}

/// Error for NationalId validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum NationalIdError {
    #[error("National id is empty")]
    Empty,

    #[error("National id too long: maximum {max} characters, got {actual}")]
    TooLong { max: usize, actual: usize },

    #[error("National id contains invalid characters")]
    InvalidCharacters,
}

/// Error for PersonName validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PersonNameError {
    #[error("Name is empty")]
    Empty,

    #[error("Name too long: maximum {max} characters, got {actual}")]
    TooLong { max: usize, actual: usize },
}

/// Error for EmailAddress validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EmailError {
    #[error("Invalid email format: {0}")]
    InvalidFormat(String),
}

/// Error for PhoneNumber validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PhoneError {
    #[error("Phone number is empty")]
    Empty,

    #[error("Phone number too long: maximum {max} characters, got {actual}")]
    TooLong { max: usize, actual: usize },

    #[error("Phone number contains invalid characters")]
    InvalidCharacters,
}

/// Error for City validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CityError {
    #[error("City is empty")]
    Empty,

    #[error("City too long: maximum {max} characters, got {actual}")]
    TooLong { max: usize, actual: usize },
}

/// Error for UserStatus parsing failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum UserStatusError {
    #[error("Unknown user status: {0}")]
    Unknown(String),
}

/// Top-level error for all user-related operations
#[derive(Debug, Clone, Error)]
pub enum UserError {
    // Value object validation errors (automatically converted via #[from])
    #[error("Invalid user ID: {0}")]
    InvalidUserId(#[from] IdError),

    #[error("Invalid username: {0}")]
    InvalidUsername(#[from] UsernameError),

    #[error("Invalid national id: {0}")]
    InvalidNationalId(#[from] NationalIdError),

    #[error("Invalid name: {0}")]
    InvalidName(#[from] PersonNameError),

    #[error("Invalid email: {0}")]
    InvalidEmail(#[from] EmailError),

    #[error("Invalid phone: {0}")]
    InvalidPhone(#[from] PhoneError),

    #[error("Invalid city: {0}")]
    InvalidCity(#[from] CityError),

    // Domain-level errors
    #[error("User not found: {0}")]
    NotFound(UserId),

    #[error("Role not found: {0}")]
    RoleNotFound(RoleId),

    #[error("Username already exists: {0}")]
    UsernameAlreadyExists(String),

    #[error("National id already exists: {0}")]
    NationalIdAlreadyExists(String),

    #[error("Email already exists: {0}")]
    EmailAlreadyExists(String),

    #[error("Current password is incorrect")]
    IncorrectPassword,

    #[error("New password must differ from the current one")]
    PasswordUnchanged,

    #[error("Update contains no fields")]
    EmptyUpdate,

    #[error("Account does not permit this operation")]
    AccountInactive,

    // Infrastructure errors
    #[error("Password hashing failed: {0}")]
    PasswordHashing(String),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Unknown error: {0}")]
    Unknown(String),
}

impl From<anyhow::Error> for UserError {
    fn from(err: anyhow::Error) -> Self {
        UserError::Unknown(err.to_string())
    }
}

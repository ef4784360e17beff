use thiserror::Error;

/// Login failures.
///
/// Unknown user, wrong password and malformed login name all surface as
/// `InvalidCredentials` so that callers cannot enumerate accounts.
#[derive(Debug, Clone, Error)]
pub enum SessionError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Internal error: {0}")]
    Internal(String),
}

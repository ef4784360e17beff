use thiserror::Error;

/// Error type for password operations.
///
/// Only hashing can fail. Verification reports a mismatch or an unreadable
/// digest as `false` instead of an error.
#[derive(Debug, Clone, Error)]
pub enum PasswordError {
    #[error("Password hashing failed: {0}")]
    HashingFailed(String),
}

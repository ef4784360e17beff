use thiserror::Error;

/// Error type for token issuance.
#[derive(Debug, Clone, Error)]
pub enum TokenError {
    #[error("Failed to issue token: {0}")]
    IssueFailed(String),

    #[error("Token lifetime must be positive")]
    NonPositiveTtl,
}

/// Opaque decode failure.
///
/// Bad signatures, malformed tokens, missing claims and expired tokens all
/// produce this same value so callers cannot tell them apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("Invalid session token")]
pub struct InvalidToken;

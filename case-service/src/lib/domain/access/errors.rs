use thiserror::Error;

use crate::domain::access::models::ResourceKind;
use crate::domain::ids::AccountId;

/// Outcome of a failed scoped access.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AccessError {
    #[error("{kind} not found: {id}")]
    NotFound { kind: ResourceKind, id: String },

    #[error("Access to {kind} {id} is forbidden")]
    Forbidden { kind: ResourceKind, id: String },

    #[error("Account {0} is not permitted to access resources")]
    AccountInactive(AccountId),

    #[error("Database error: {0}")]
    DatabaseError(String),
}

impl AccessError {
    pub fn not_found(kind: ResourceKind, id: impl ToString) -> Self {
        AccessError::NotFound {
            kind,
            id: id.to_string(),
        }
    }

    pub fn forbidden(kind: ResourceKind, id: impl ToString) -> Self {
        AccessError::Forbidden {
            kind,
            id: id.to_string(),
        }
    }
}

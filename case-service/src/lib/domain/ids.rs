use std::fmt;

use thiserror::Error;

/// Error for identifier parsing failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum IdError {
    #[error("Invalid identifier: {0}")]
    InvalidFormat(String),
}

/// Declares a positive integer identifier backed by a `BIGSERIAL` column.
macro_rules! entity_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord,
            serde::Serialize, serde::Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(pub i64);

        impl $name {
            /// Parse an identifier from its decimal representation.
            ///
            /// # Errors
            /// * `InvalidFormat` - Not a positive integer
            pub fn from_string(s: &str) -> Result<Self, IdError> {
                s.parse::<i64>()
                    .ok()
                    .filter(|v| *v > 0)
                    .map(Self)
                    .ok_or_else(|| IdError::InvalidFormat(s.to_string()))
            }

            pub fn as_i64(&self) -> i64 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                self.0.fmt(f)
            }
        }
    };
}

entity_id!(
    /// Tenant identifier.
    AccountId
);
entity_id!(
    /// User (principal) identifier.
    UserId
);
entity_id!(RoleId);
entity_id!(ClientId);
entity_id!(LegalCaseId);
entity_id!(FileId);
entity_id!(InvoiceId);
entity_id!(AgendaId);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_id() {
        assert_eq!(LegalCaseId::from_string("42"), Ok(LegalCaseId(42)));
    }

    #[test]
    fn test_parse_rejects_non_positive_and_garbage() {
        assert!(UserId::from_string("0").is_err());
        assert!(UserId::from_string("-3").is_err());
        assert!(UserId::from_string("abc").is_err());
        assert!(UserId::from_string("").is_err());
    }

    #[test]
    fn test_display() {
        assert_eq!(InvoiceId(1001).to_string(), "1001");
    }
}

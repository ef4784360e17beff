use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

/// Session token payload.
///
/// Only the claims a session needs: who the token speaks for and until when.
/// Fields are optional on the wire so that tokens missing them can be
/// deserialized and then rejected explicitly.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct Claims {
    /// Subject (principal identifier)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub: Option<String>,

    /// Expiration time (Unix timestamp, seconds)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exp: Option<i64>,

    /// Issued at (Unix timestamp, seconds)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iat: Option<i64>,
}

impl Claims {
    /// Create claims for a principal valid from `issued_at` for `ttl`.
    ///
    /// # Arguments
    /// * `subject` - Principal identifier
    /// * `issued_at` - Issuance instant
    /// * `ttl` - Token lifetime
    ///
    /// # Returns
    /// Claims with sub, iat and exp set
    pub fn for_subject(subject: impl ToString, issued_at: DateTime<Utc>, ttl: Duration) -> Self {
        let expiration = issued_at + ttl;

        Self {
            sub: Some(subject.to_string()),
            exp: Some(expiration.timestamp()),
            iat: Some(issued_at.timestamp()),
        }
    }

    /// Check whether the token is no longer usable at `current_timestamp`.
    ///
    /// A token expires at its `exp` instant, not after it. A token without
    /// an `exp` claim is always treated as expired.
    pub fn is_expired(&self, current_timestamp: i64) -> bool {
        self.exp.map_or(true, |exp| exp <= current_timestamp)
    }

    /// Subject if present and non-empty.
    pub fn subject(&self) -> Option<&str> {
        self.sub.as_deref().filter(|s| !s.is_empty())
    }
}

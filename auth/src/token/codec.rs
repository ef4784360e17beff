use std::collections::HashSet;
use std::fmt;

use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use jsonwebtoken::decode;
use jsonwebtoken::encode;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;

use super::claims::Claims;
use super::errors::InvalidToken;
use super::errors::TokenError;

/// Signed session token.
///
/// The token string is a bearer credential, so `Debug` never prints it.
#[derive(Clone, PartialEq, Eq)]
pub struct SessionToken {
    value: String,
    expires_at: DateTime<Utc>,
}

impl SessionToken {
    /// Get the encoded token.
    pub fn as_str(&self) -> &str {
        &self.value
    }

    /// Absolute expiry instant embedded in the token.
    pub fn expires_at(&self) -> DateTime<Utc> {
        self.expires_at
    }

    /// Consume self and return the encoded token.
    pub fn into_string(self) -> String {
        self.value
    }
}

impl fmt::Debug for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionToken")
            .field("value", &"<redacted>")
            .field("expires_at", &self.expires_at)
            .finish()
    }
}

/// Session token codec.
///
/// Issues and validates self-contained HS256 tokens carrying a principal
/// identifier and an absolute expiry. There is no server-side session state:
/// expiry is the only way a token stops being valid.
pub struct TokenCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    algorithm: Algorithm,
    default_ttl: Duration,
}

impl TokenCodec {
    /// Lifetime applied when `issue` is called without an explicit ttl.
    pub const DEFAULT_TTL_MINUTES: i64 = 15;

    /// Create a codec with a signing secret and the default ttl.
    ///
    /// # Arguments
    /// * `secret` - Secret key for signing tokens (at least 32 bytes for HS256)
    ///
    /// # Returns
    /// TokenCodec configured with HS256
    pub fn new(secret: &[u8]) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            algorithm: Algorithm::HS256,
            default_ttl: Duration::minutes(Self::DEFAULT_TTL_MINUTES),
        }
    }

    /// Replace the default ttl.
    pub fn with_default_ttl(mut self, ttl: Duration) -> Self {
        self.default_ttl = ttl;
        self
    }

    /// Default token lifetime.
    pub fn default_ttl(&self) -> Duration {
        self.default_ttl
    }

    /// Issue a token for `subject` valid from now.
    ///
    /// # Arguments
    /// * `subject` - Principal identifier embedded as `sub`
    /// * `ttl` - Lifetime, or `None` for the default ttl
    ///
    /// # Errors
    /// * `NonPositiveTtl` - ttl is zero or negative
    /// * `IssueFailed` - Token encoding failed
    pub fn issue(
        &self,
        subject: impl ToString,
        ttl: Option<Duration>,
    ) -> Result<SessionToken, TokenError> {
        self.issue_at(subject, ttl, Utc::now())
    }

    /// Issue a token as if the current instant were `now`.
    pub fn issue_at(
        &self,
        subject: impl ToString,
        ttl: Option<Duration>,
        now: DateTime<Utc>,
    ) -> Result<SessionToken, TokenError> {
        let ttl = ttl.unwrap_or(self.default_ttl);
        if ttl <= Duration::zero() {
            return Err(TokenError::NonPositiveTtl);
        }

        let claims = Claims::for_subject(subject, now, ttl);
        let expires_at = claims
            .exp
            .and_then(|exp| DateTime::from_timestamp(exp, 0))
            .ok_or_else(|| TokenError::IssueFailed("expiry out of range".to_string()))?;

        let value = encode(&Header::new(self.algorithm), &claims, &self.encoding_key)
            .map_err(|e| TokenError::IssueFailed(e.to_string()))?;

        Ok(SessionToken { value, expires_at })
    }

    /// Validate a token and return its principal identifier.
    ///
    /// # Errors
    /// * `InvalidToken` - Signature, shape, claims or expiry check failed
    pub fn decode(&self, token: &str) -> Result<String, InvalidToken> {
        self.decode_at(token, Utc::now())
    }

    /// Validate a token as if the current instant were `now`.
    pub fn decode_at(&self, token: &str, now: DateTime<Utc>) -> Result<String, InvalidToken> {
        let mut validation = Validation::new(self.algorithm);
        // Expiry is checked below against the caller's clock with zero leeway.
        validation.validate_exp = false;
        validation.leeway = 0;
        validation.required_spec_claims = ["exp", "sub"]
            .into_iter()
            .map(String::from)
            .collect::<HashSet<_>>();

        let claims = decode::<Claims>(token, &self.decoding_key, &validation)
            .map_err(|_| InvalidToken)?
            .claims;

        if claims.is_expired(now.timestamp()) {
            return Err(InvalidToken);
        }

        claims.subject().map(str::to_string).ok_or(InvalidToken)
    }
}

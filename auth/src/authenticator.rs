use chrono::Duration;

use crate::password::Argon2Hasher;
use crate::password::CredentialHasher;
use crate::password::PasswordError;
use crate::token::SessionToken;
use crate::token::TokenCodec;
use crate::token::TokenError;

/// Secret hashed once at construction so that unknown-user logins still pay
/// for a full verification.
const DUMMY_SECRET: &str = "dummy-secret-for-unknown-principals";

/// Authentication coordinator combining credential verification and session
/// token handling.
pub struct Authenticator<H = Argon2Hasher>
where
    H: CredentialHasher,
{
    hasher: H,
    codec: TokenCodec,
    dummy_digest: Option<String>,
}

/// Authentication operation errors.
#[derive(Debug, thiserror::Error)]
pub enum AuthenticationError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Token error: {0}")]
    Token(#[from] TokenError),
}

impl Authenticator<Argon2Hasher> {
    /// Create an authenticator using Argon2id and the given codec.
    pub fn new(codec: TokenCodec) -> Self {
        Self::with_hasher(Argon2Hasher::new(), codec)
    }
}

impl<H> Authenticator<H>
where
    H: CredentialHasher,
{
    /// Create an authenticator with a custom credential hasher.
    ///
    /// # Arguments
    /// * `hasher` - Credential hashing implementation
    /// * `codec` - Session token codec holding the signing secret
    pub fn with_hasher(hasher: H, codec: TokenCodec) -> Self {
        let dummy_digest = hasher.hash(DUMMY_SECRET).ok();

        Self {
            hasher,
            codec,
            dummy_digest,
        }
    }

    /// Hash a password for storage.
    ///
    /// # Errors
    /// * `PasswordError` - Hashing operation failed
    pub fn hash_password(&self, password: &str) -> Result<String, PasswordError> {
        self.hasher.hash(password)
    }

    /// Check a password against a stored digest without issuing a token.
    pub fn verify_password(&self, password: &str, stored_hash: &str) -> bool {
        self.hasher.verify(password, stored_hash)
    }

    /// Verify credentials and issue a session token for `subject`.
    ///
    /// `stored_hash` is `None` when no principal matched the login name. The
    /// password is then checked against a throwaway digest and rejected, so
    /// the caller observes the same error and roughly the same latency as
    /// for a wrong password.
    ///
    /// # Errors
    /// * `InvalidCredentials` - Unknown principal or password mismatch
    /// * `Token` - Token issuance failed
    pub fn authenticate(
        &self,
        password: &str,
        stored_hash: Option<&str>,
        subject: impl ToString,
    ) -> Result<SessionToken, AuthenticationError> {
        let matched = match stored_hash {
            Some(hash) => self.hasher.verify(password, hash),
            None => {
                if let Some(dummy) = &self.dummy_digest {
                    let _ = self.hasher.verify(password, dummy);
                }
                false
            }
        };

        if !matched {
            return Err(AuthenticationError::InvalidCredentials);
        }

        Ok(self.codec.issue(subject, None)?)
    }

    /// Issue a token without password verification.
    ///
    /// # Errors
    /// * `TokenError` - Token issuance failed
    pub fn issue_token(
        &self,
        subject: impl ToString,
        ttl: Option<Duration>,
    ) -> Result<SessionToken, TokenError> {
        self.codec.issue(subject, ttl)
    }

    /// Resolve a token to the subject it was issued for.
    ///
    /// Returns `None` for any invalid, tampered or expired token.
    pub fn resolve_subject(&self, token: &str) -> Option<String> {
        self.codec.decode(token).ok()
    }

    /// Default token lifetime of the underlying codec.
    pub fn token_ttl(&self) -> Duration {
        self.codec.default_ttl()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &[u8] = b"test_secret_key_at_least_32_bytes!";

    fn authenticator() -> Authenticator {
        Authenticator::new(TokenCodec::new(SECRET))
    }

    #[test]
    fn test_authenticate_success() {
        let authenticator = authenticator();

        let hash = authenticator
            .hash_password("my_password")
            .expect("Failed to hash password");

        let token = authenticator
            .authenticate("my_password", Some(&hash), 123)
            .expect("Authentication failed");

        assert_eq!(
            authenticator.resolve_subject(token.as_str()),
            Some("123".to_string())
        );
    }

    #[test]
    fn test_authenticate_invalid_password() {
        let authenticator = authenticator();

        let hash = authenticator
            .hash_password("my_password")
            .expect("Failed to hash password");

        let result = authenticator.authenticate("wrong_password", Some(&hash), 123);
        assert!(matches!(
            result,
            Err(AuthenticationError::InvalidCredentials)
        ));
    }

    #[test]
    fn test_unknown_principal_matches_wrong_password() {
        let authenticator = authenticator();
        let hash = authenticator.hash_password("my_password").unwrap();

        let unknown = authenticator.authenticate("my_password", None, 0);
        let wrong = authenticator.authenticate("nope", Some(&hash), 123);

        assert_eq!(
            unknown.unwrap_err().to_string(),
            wrong.unwrap_err().to_string()
        );
    }

    #[test]
    fn test_malformed_stored_hash_rejects() {
        let authenticator = authenticator();

        let result = authenticator.authenticate("password", Some("not-a-phc-string"), 1);
        assert!(matches!(
            result,
            Err(AuthenticationError::InvalidCredentials)
        ));
    }

    #[test]
    fn test_resolve_invalid_token() {
        let authenticator = authenticator();

        assert_eq!(authenticator.resolve_subject("invalid.token.here"), None);
    }

    #[test]
    fn test_issue_token_with_ttl() {
        let authenticator = authenticator();

        let token = authenticator
            .issue_token(7, Some(Duration::hours(1)))
            .expect("Failed to issue token");

        assert_eq!(
            authenticator.resolve_subject(token.as_str()),
            Some("7".to_string())
        );
    }
}

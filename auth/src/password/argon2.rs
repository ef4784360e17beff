use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::PasswordHash;
use argon2::password_hash::PasswordHasher as _;
use argon2::password_hash::PasswordVerifier;
use argon2::password_hash::SaltString;
use argon2::Argon2;

use super::errors::PasswordError;
use super::CredentialHasher;

/// Argon2id credential hasher.
///
/// Produces PHC strings (`$argon2id$v=19$...`) that carry the algorithm,
/// parameters and salt alongside the digest.
#[derive(Debug, Clone, Copy, Default)]
pub struct Argon2Hasher;

impl Argon2Hasher {
    /// Create a new hasher with the crate's default Argon2id parameters.
    pub fn new() -> Self {
        Self
    }
}

impl CredentialHasher for Argon2Hasher {
    /// Hash a plaintext secret with a fresh random salt.
    ///
    /// # Errors
    /// * `HashingFailed` - Password hashing operation failed
    fn hash(&self, secret: &str) -> Result<String, PasswordError> {
        let salt = SaltString::generate(&mut OsRng);

        Argon2::default()
            .hash_password(secret.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| PasswordError::HashingFailed(e.to_string()))
    }

    /// Verify a secret against a PHC digest.
    ///
    /// Returns false for a wrong secret and for digests that do not parse.
    fn verify(&self, secret: &str, digest: &str) -> bool {
        let Ok(parsed_hash) = PasswordHash::new(digest) else {
            return false;
        };

        Argon2::default()
            .verify_password(secret.as_bytes(), &parsed_hash)
            .is_ok()
    }
}

pub mod argon2;
pub mod errors;

pub use self::argon2::Argon2Hasher;
pub use errors::PasswordError;

/// One-way credential hashing capability.
///
/// Implementations must salt every digest and delegate comparison to the
/// underlying primitive. `verify` never fails: a malformed digest is simply
/// not a match.
pub trait CredentialHasher: Send + Sync + 'static {
    /// Hash a plaintext secret for storage.
    ///
    /// # Errors
    /// * `HashingFailed` - The primitive rejected its input or parameters
    fn hash(&self, secret: &str) -> Result<String, PasswordError>;

    /// Check a plaintext secret against a stored digest.
    fn verify(&self, secret: &str, digest: &str) -> bool;
}

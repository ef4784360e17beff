//! Authentication utilities library
//!
//! Provides reusable authentication infrastructure for services:
//! - Credential hashing behind the `CredentialHasher` trait (Argon2id)
//! - Signed, expiring session tokens (HS256)
//! - Authentication coordination
//!
//! The library knows nothing about users or storage. Services look up their
//! principals and hand the stored digest and identifier to `Authenticator`.
//!
//! # Examples
//!
//! ## Credential Hashing
//! ```
//! use auth::{Argon2Hasher, CredentialHasher};
//!
//! let hasher = Argon2Hasher::new();
//! let hash = hasher.hash("my_password").unwrap();
//! assert!(hasher.verify("my_password", &hash));
//! assert!(!hasher.verify("my_password", "garbage"));
//! ```
//!
//! ## Session Tokens
//! ```
//! use auth::TokenCodec;
//!
//! let codec = TokenCodec::new(b"secret_key_at_least_32_bytes_long!");
//! let token = codec.issue(42, None).unwrap();
//! assert_eq!(codec.decode(token.as_str()).unwrap(), "42");
//! ```
//!
//! ## Complete Authentication Flow
//! ```
//! use auth::{Authenticator, TokenCodec};
//!
//! let auth = Authenticator::new(TokenCodec::new(b"secret_key_at_least_32_bytes_long!"));
//!
//! // Register: hash password
//! let hash = auth.hash_password("password123").unwrap();
//!
//! // Login: verify and issue token
//! let token = auth.authenticate("password123", Some(&hash), 42).unwrap();
//!
//! // Resolve token
//! assert_eq!(auth.resolve_subject(token.as_str()), Some("42".to_string()));
//! ```

pub mod authenticator;
pub mod password;
pub mod token;

// Re-export commonly used items
pub use authenticator::AuthenticationError;
pub use authenticator::Authenticator;
pub use password::Argon2Hasher;
pub use password::CredentialHasher;
pub use password::PasswordError;
pub use token::Claims;
pub use token::InvalidToken;
pub use token::SessionToken;
pub use token::TokenCodec;
pub use token::TokenError;

//! Password hashing with Argon2id.
//!
//! Each hash embeds a fresh random salt; verification is one-way and never
//! errors on a simple mismatch, only when the stored hash is malformed.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PasswordError {
    #[error("failed to hash password")]
    Hash(argon2::password_hash::Error),
    #[error("invalid password hash format")]
    InvalidHashFormat,
}

/// Hash a plaintext password.
///
/// The cost parameters are the crate defaults, fixed so hashing latency
/// stays bounded.
///
/// # Errors
/// Returns `PasswordError::Hash` if the hasher rejects its input.
pub fn hash(password: &str) -> Result<String, PasswordError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(PasswordError::Hash)
}

/// Verify a plaintext password against a stored hash.
///
/// Returns `Ok(false)` on mismatch.
///
/// # Errors
/// Returns `PasswordError::InvalidHashFormat` when the stored hash cannot
/// be parsed.
pub fn verify(password: &str, hash: &str) -> Result<bool, PasswordError> {
    let parsed = PasswordHash::new(hash).map_err(|_| PasswordError::InvalidHashFormat)?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_and_verify() {
        let password = "my-secure-password-123!";
        let hashed = hash(password).unwrap();

        assert!(verify(password, &hashed).unwrap());
        assert!(!verify("wrong-password", &hashed).unwrap());
    }

    #[test]
    fn same_password_different_salts() {
        let password = "same-password";
        let first = hash(password).unwrap();
        let second = hash(password).unwrap();

        assert_ne!(first, second);
        assert!(verify(password, &first).unwrap());
        assert!(verify(password, &second).unwrap());
    }

    #[test]
    fn hash_format_is_argon2id() {
        let hashed = hash("test").unwrap();
        assert!(hashed.starts_with("$argon2id$"));
    }

    #[test]
    fn malformed_hash_is_an_error_not_a_mismatch() {
        let err = verify("anything", "not-a-phc-string").unwrap_err();
        assert!(matches!(err, PasswordError::InvalidHashFormat));
    }
}

//! Argon2id password hashing (PHC string format).

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;

use super::error::DomainError;

/// Hash `password` with a fresh random salt.
pub fn hash_password(password: &str) -> Result<String, DomainError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| DomainError::internal(format!("failed to hash password: {e}")))
}

/// `Ok(false)` on mismatch; `Err` only when the stored hash is unreadable.
pub fn verify_password(password: &str, stored: &str) -> Result<bool, DomainError> {
    let parsed = PasswordHash::new(stored)
        .map_err(|e| DomainError::internal(format!("stored password hash is invalid: {e}")))?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_then_verify() {
        let hash = hash_password("correct horse").unwrap();
        assert!(hash.starts_with("$argon2id$"));
        assert!(verify_password("correct horse", &hash).unwrap());
        assert!(!verify_password("battery staple", &hash).unwrap());
    }

    #[test]
    fn salts_differ() {
        assert_ne!(hash_password("pw123456").unwrap(), hash_password("pw123456").unwrap());
    }

    #[test]
    fn garbage_hash_is_an_error() {
        assert!(verify_password("x", "not-a-phc-string").is_err());
    }
}

//! Password storage for Waymark accounts.
//!
//! Hashes are Argon2id PHC strings, so the salt and cost parameters travel
//! with each stored hash.

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{
    Error as HashError, PasswordHash, PasswordHasher, PasswordVerifier, SaltString,
};
use argon2::Argon2;
use waymark_core::error::CoreError;

/// Shortest password accepted at registration, in characters.
pub const MIN_PASSWORD_LENGTH: usize = 6;

/// Reject passwords shorter than [`MIN_PASSWORD_LENGTH`].
pub fn check_password_length(password: &str) -> Result<(), CoreError> {
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(CoreError::Validation(format!(
            "Password must be at least {MIN_PASSWORD_LENGTH} characters long"
        )));
    }
    Ok(())
}

pub fn hash_password(password: &str) -> Result<String, HashError> {
    let salt = SaltString::generate(&mut OsRng);
    Ok(Argon2::default()
        .hash_password(password.as_bytes(), &salt)?
        .to_string())
}

/// `Ok(false)` on a mismatch; `Err` only when `stored` is not a usable hash.
pub fn verify_password(password: &str, stored: &str) -> Result<bool, HashError> {
    let stored = PasswordHash::new(stored)?;
    match Argon2::default().verify_password(password.as_bytes(), &stored) {
        Ok(()) => Ok(true),
        Err(HashError::Password) => Ok(false),
        Err(other) => Err(other),
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn stored_hash_is_argon2id_and_salted() {
        let first = hash_password("istanbul").unwrap();
        let second = hash_password("istanbul").unwrap();

        assert!(first.starts_with("$argon2id$"));
        assert_ne!(first, second);
        assert!(verify_password("istanbul", &first).unwrap());
        assert!(verify_password("istanbul", &second).unwrap());
    }

    #[test]
    fn mismatch_is_false_not_error() {
        let stored = hash_password("istanbul").unwrap();
        assert!(!verify_password("Istanbul", &stored).unwrap());
    }

    #[test]
    fn malformed_stored_hash_is_error() {
        assert!(verify_password("istanbul", "plaintext").is_err());
    }

    #[test]
    fn five_characters_is_too_short() {
        assert_matches!(
            check_password_length("abcde"),
            Err(CoreError::Validation(msg)) if msg == "Password must be at least 6 characters long"
        );
    }

    #[test]
    fn length_counts_characters_not_bytes() {
        assert!(check_password_length("şğüçöı").is_ok());
        assert!(check_password_length("şğüçö").is_err());
    }
}

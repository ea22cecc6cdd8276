//! Argon2id password hashing and reset-password generation.

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use rand::Rng;

use crate::errors::{AppError, AppResult};

const RESET_PASSWORD_LEN: usize = 6;

/// Well-formed hash with the default parameters that no password matches.
/// Verified against on unknown-user logins so both paths cost one Argon2 run.
pub(crate) const UNMATCHABLE_HASH: &str =
    "$argon2id$v=19$m=19456,t=2,p=1$bGVhcm5odWItZHVtbXktcw$AAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAA";

pub fn hash_password(password: &str) -> AppResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AppError::InternalError(format!("Failed to hash password: {}", e)))
}

/// `Ok(false)` on a wrong password; `Err` only when the stored hash is unreadable.
pub fn verify_password(password: &str, hash: &str) -> AppResult<bool> {
    let parsed_hash = PasswordHash::new(hash)
        .map_err(|e| AppError::InternalError(format!("Stored password hash is invalid: {}", e)))?;
    match Argon2::default().verify_password(password.as_bytes(), &parsed_hash) {
        Ok(()) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(e) => Err(AppError::InternalError(e.to_string())),
    }
}

/// Six random letters drawn from `a..=z`, upper-cased.
pub fn generate_reset_password() -> String {
    let mut rng = rand::rng();
    (0..RESET_PASSWORD_LEN)
        .map(|_| rng.random_range(b'a'..=b'z') as char)
        .collect::<String>()
        .to_uppercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unmatchable_hash_parses_and_rejects() {
        assert!(!verify_password("anything", UNMATCHABLE_HASH).unwrap());
        assert!(!verify_password("", UNMATCHABLE_HASH).unwrap());
    }

    #[test]
    fn test_hash_and_verify() {
        let hash = hash_password("correct-horse-battery-staple").unwrap();
        assert!(hash.starts_with("$argon2id$"));
        assert!(verify_password("correct-horse-battery-staple", &hash).unwrap());
        assert!(!verify_password("wrong", &hash).unwrap());
    }

    #[test]
    fn test_garbage_hash_is_an_error() {
        assert!(verify_password("anything", "not-a-phc-string").is_err());
    }

    #[test]
    fn test_reset_password_shape() {
        for _ in 0..20 {
            let password = generate_reset_password();
            assert_eq!(password.len(), 6);
            assert!(password.chars().all(|c| c.is_ascii_uppercase()));
        }
    }
}

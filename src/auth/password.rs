use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Algorithm, Argon2, Params, Version,
};
use lazy_static::lazy_static;
use rand::Rng;

use crate::errors::AppError;

lazy_static! {
    /// Argon2id, memory=19456 KiB, iterations=2, parallelism=1
    static ref ARGON2: Argon2<'static> = Argon2::new(
        Algorithm::Argon2id,
        Version::V0x13,
        Params::new(19456, 2, 1, None).expect("Invalid Argon2 params")
    );

    /// Verified against when the username is unknown, so both login failures cost one hash
    static ref DUMMY_HASH: Option<String> = hash_password(&random_password()).ok();
}

fn random_password() -> String {
    rand::thread_rng()
        .sample_iter(&rand::distributions::Alphanumeric)
        .take(32)
        .map(char::from)
        .collect()
}

/// Salted Argon2id hash in PHC string format
pub fn hash_password(password: &str) -> Result<String, AppError> {
    let salt = SaltString::generate(&mut OsRng);
    ARGON2
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AppError::InternalError(format!("Failed to hash password: {e}")))
}

/// Verify a password against a stored hash
pub fn verify_password(password: &str, hash: &str) -> Result<bool, AppError> {
    let parsed_hash = PasswordHash::new(hash)
        .map_err(|e| AppError::InternalError(format!("Invalid password hash: {e}")))?;
    Ok(ARGON2
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}

/// Burn one verification for a login attempt against a missing user
pub fn verify_dummy(password: &str) {
    if let Some(hash) = DUMMY_HASH.as_deref() {
        let _ = verify_password(password, hash);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_is_argon2id_phc_string() {
        let hash = hash_password("s3cret").expect("Should hash password");
        assert!(hash.starts_with("$argon2id$"), "Hash should be Argon2id PHC format");
    }

    #[test]
    fn test_hash_is_salted() {
        let hash1 = hash_password("s3cret").expect("Should hash password");
        let hash2 = hash_password("s3cret").expect("Should hash password");
        assert_ne!(hash1, hash2, "Hashes should differ due to random salt");
    }

    #[test]
    fn test_verify_round_trip() {
        let hash = hash_password("s3cret").expect("Should hash password");
        assert!(verify_password("s3cret", &hash).expect("Should verify"));
        assert!(!verify_password("wrong", &hash).expect("Should verify"));
    }

    #[test]
    fn test_verify_rejects_malformed_hash() {
        let result = verify_password("s3cret", "pbkdf2:sha256:not-a-phc-string");
        assert!(matches!(result, Err(AppError::InternalError(_))));
    }

    #[test]
    fn test_random_password_is_alphanumeric() {
        let password = random_password();
        assert_eq!(password.len(), 32);
        assert!(password.chars().all(|c| c.is_ascii_alphanumeric()));
        assert_ne!(password, random_password());
    }

    #[test]
    fn test_verify_dummy_does_not_panic() {
        verify_dummy("anything");
    }
}

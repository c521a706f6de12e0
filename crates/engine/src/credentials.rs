//! Password hashing and verification (argon2id).

use argon2::password_hash::{SaltString, rand_core::OsRng};
use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier};

use crate::{EngineError, ResultEngine};

/// Hashes a plaintext password with a fresh random salt.
pub(crate) fn hash_password(plaintext: &str) -> ResultEngine<String> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(plaintext.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|err| EngineError::Credential(err.to_string()))
}

/// Verifies a plaintext password against a stored hash.
///
/// Fails closed: an unparseable stored hash counts as a mismatch, it
/// never errors out into an accepting path.
pub(crate) fn verify_password(stored_hash: &str, plaintext: &str) -> bool {
    let Ok(parsed) = PasswordHash::new(stored_hash) else {
        return false;
    };
    Argon2::default()
        .verify_password(plaintext.as_bytes(), &parsed)
        .is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_then_verify_roundtrip() {
        let hash = hash_password("s3cret-pw").unwrap();
        assert!(hash.starts_with("$argon2"));
        assert!(verify_password(&hash, "s3cret-pw"));
        assert!(!verify_password(&hash, "wrong-pw"));
    }

    #[test]
    fn garbage_hash_fails_closed() {
        assert!(!verify_password("not-a-hash", "anything"));
        assert!(!verify_password("", ""));
    }
}

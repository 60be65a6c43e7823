use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};

use crate::errors::{AppError, AppResult};

/// Outcome of checking a supplied password against a stored credential.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialMatch {
    Hashed,
    /// The stored value is an unhashed legacy password equal to the supplied one.
    /// The caller must replace it with a hash.
    LegacyPlaintext,
    Mismatch,
}

impl CredentialMatch {
    pub fn is_match(self) -> bool {
        !matches!(self, CredentialMatch::Mismatch)
    }
}

pub fn hash_password(password: &str) -> AppResult<String> {
    let salt = SaltString::generate(&mut OsRng);

    let password_hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| AppError::InternalError(format!("Failed to hash password: {}", e)))?
        .to_string();

    Ok(password_hash)
}

/// A stored value that does not parse as a PHC hash string is treated as a mismatch,
/// not an error.
pub fn verify_password(password: &str, password_hash: &str) -> bool {
    match PasswordHash::new(password_hash) {
        Ok(parsed) => Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok(),
        Err(_) => false,
    }
}

/// Hash first, then legacy plaintext equality.
///
/// The plaintext path is a backward-compatibility policy for accounts created before
/// passwords were hashed. It is not a security feature. It only applies when the
/// stored value is not a hash, so a stolen hash string cannot be replayed as a password.
pub fn check_credential(supplied: &str, stored: &str) -> CredentialMatch {
    if verify_password(supplied, stored) {
        return CredentialMatch::Hashed;
    }

    let stored_is_hash = PasswordHash::new(stored).is_ok();
    if !stored_is_hash && !stored.is_empty() && stored == supplied {
        return CredentialMatch::LegacyPlaintext;
    }

    CredentialMatch::Mismatch
}

//! Password hashing and session token signing
//!
//! # Architecture
//!
//! - Passwords are stored as argon2id PHC strings (`$argon2id$v=19$...`)
//!   with a random salt per hash.
//! - Session tokens are `<user id>.<signature>`; the signature is SHA-256 over
//!   the decimal user id followed by the server secret, as 64 hex characters.
//!
//! This module contains ONLY pure functions. Cookie handling lives in the web
//! crate.

use argon2::password_hash::{rand_core::OsRng, PasswordHasher, SaltString};
use argon2::Argon2;
use sha2::{Digest, Sha256};

use crate::{Error, Result};

// ========================================
// Password Hashing
// ========================================

/// Hash a password with argon2id and a fresh random salt
///
/// # Examples
///
/// ```
/// use horizons_common::auth::hash_password;
///
/// let stored = hash_password("guest").unwrap();
/// assert!(stored.starts_with("$argon2id$"));
/// ```
pub fn hash_password(password: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| Error::Internal(format!("Password hashing failed: {}", e)))
}

// ========================================
// Session Tokens
// ========================================

/// Calculate the signature for a session token
pub fn session_signature(user_id: i64, secret: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(format!("{}{}", user_id, secret).as_bytes());
    format!("{:x}", hasher.finalize())
}

/// Build a signed session token for a user
///
/// # Examples
///
/// ```
/// use horizons_common::auth::{sign_session, verify_session};
///
/// let token = sign_session(42, "secret");
/// assert_eq!(verify_session(&token, "secret"), Some(42));
/// assert_eq!(verify_session(&token, "other"), None);
/// ```
pub fn sign_session(user_id: i64, secret: &str) -> String {
    format!("{}.{}", user_id, session_signature(user_id, secret))
}

/// Validate a session token, returning the user id it carries
pub fn verify_session(token: &str, secret: &str) -> Option<i64> {
    let (id_part, signature) = token.split_once('.')?;
    let user_id: i64 = id_part.parse().ok()?;
    let expected = session_signature(user_id, secret);

    if constant_time_eq(expected.as_bytes(), signature.as_bytes()) {
        Some(user_id)
    } else {
        None
    }
}

fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    use argon2::password_hash::{PasswordHash, PasswordVerifier};

    fn matches(password: &str, stored: &str) -> bool {
        let parsed = PasswordHash::new(stored).unwrap();
        Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok()
    }

    #[test]
    fn test_password_hash_is_salted() {
        let first = hash_password("guest").unwrap();
        let second = hash_password("guest").unwrap();
        assert_ne!(first, second, "Two hashes of the same password must differ");
        assert!(matches("guest", &first));
        assert!(matches("guest", &second));
        assert!(!matches("Guest", &first));
    }

    #[test]
    fn test_password_hash_is_argon2id_phc() {
        let stored = hash_password("pw").unwrap();
        let parsed = PasswordHash::new(&stored).unwrap();
        assert_eq!(parsed.algorithm.as_str(), "argon2id");
        assert!(parsed.salt.is_some());
        assert!(!stored.contains("pw$"));
    }

    #[test]
    fn test_session_signature_is_deterministic() {
        assert_eq!(session_signature(7, "s"), session_signature(7, "s"));
        assert_ne!(session_signature(7, "s"), session_signature(8, "s"));
        assert_eq!(session_signature(7, "s").len(), 64);
    }

    #[test]
    fn test_verify_session_rejects_tampering() {
        let token = sign_session(5, "secret");
        let forged = token.replacen('5', "6", 1);
        assert_eq!(verify_session(&forged, "secret"), None);
        assert_eq!(verify_session("5", "secret"), None);
        assert_eq!(verify_session("abc.def", "secret"), None);
        assert_eq!(verify_session("", "secret"), None);
    }
}

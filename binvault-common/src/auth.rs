//! Admin credential hashing and verification
//!
//! The service authenticates a single administrator credential pair. The
//! password is never stored or compiled in; configuration carries a salted
//! SHA-256 hash, and verification compares digests with a constant-time
//! byte comparison.
//!
//! This module contains only pure functions and plain data. No HTTP
//! framework dependencies - those live in the service crate.

use rand::Rng;
use serde::Deserialize;
use sha2::{Digest, Sha256};

// ========================================
// Credential Configuration
// ========================================

/// Injected administrator credential pair
///
/// `password_hash` is the lowercase hex SHA-256 of `salt || password`
/// (see [`hash_password`]).
#[derive(Debug, Clone, Deserialize)]
pub struct AdminCredentials {
    pub username: String,
    pub password_hash: String,
    pub password_salt: String,
}

// ========================================
// Hashing
// ========================================

/// Calculate the salted password hash stored in configuration.
///
/// # Examples
///
/// ```
/// use binvault_common::auth::hash_password;
///
/// let hash = hash_password("Admin@000", "a1b2c3");
/// assert_eq!(hash.len(), 64); // SHA-256 is 64 hex chars
/// assert_eq!(hash, hash_password("Admin@000", "a1b2c3"));
/// assert_ne!(hash, hash_password("Admin@000", "other-salt"));
/// ```
pub fn hash_password(password: &str, salt: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(salt.as_bytes());
    hasher.update(password.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// Generate a random hex salt for provisioning a new credential pair.
pub fn generate_salt() -> String {
    let bytes: [u8; 16] = rand::thread_rng().gen();
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}

// ========================================
// Verification
// ========================================

/// Constant-time byte comparison.
///
/// Examines every byte regardless of where the first mismatch occurs, so
/// comparison time does not reveal how much of a guess was correct.
pub fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.iter().zip(b.iter()).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}

/// Verify a presented username/password pair against the configured
/// credentials.
///
/// Both fields are compared as SHA-256 digests so neither comparison
/// short-circuits on length, and the two checks are combined without
/// short-circuit evaluation.
pub fn verify_login(credentials: &AdminCredentials, username: &str, password: &str) -> bool {
    let user_ok = constant_time_eq(
        &digest(username.as_bytes()),
        &digest(credentials.username.as_bytes()),
    );

    let presented = hash_password(password, &credentials.password_salt);
    let pass_ok = constant_time_eq(
        presented.as_bytes(),
        credentials.password_hash.as_bytes(),
    );

    user_ok & pass_ok
}

fn digest(data: &[u8]) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hasher.finalize().into()
}

// ========================================
// Tests
// ========================================

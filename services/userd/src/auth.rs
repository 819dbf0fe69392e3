//! Password hashing helpers for the HTTP boundary.
//!
//! Credentials are stored as hex-encoded salted SHA-256 digests. The core
//! never inspects these values; it only carries them through events and
//! projections.

use rand::distr::{Alphanumeric, SampleString};
use rand::RngCore;
use sha2::{Digest, Sha256};

const SALT_LEN: usize = 32;
const GENERATED_PASSWORD_LEN: usize = 26;

/// A salted password digest, both parts hex-encoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HashedPassword {
    pub hash: String,
    pub salt: String,
}

/// Digest `salt || password` with SHA-256.
pub fn hash_password(password: &str, salt: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(salt);
    hasher.update(password.as_bytes());
    hex::encode(hasher.finalize())
}

/// Hash a password under a fresh random salt.
pub fn hash_password_with_random_salt(password: &str) -> HashedPassword {
    let mut salt = [0u8; SALT_LEN];
    rand::rng().fill_bytes(&mut salt);

    HashedPassword {
        hash: hash_password(password, &salt),
        salt: hex::encode(salt),
    }
}

/// Check a password against a stored hex hash and salt.
///
/// A salt that does not decode as hex can never match.
pub fn verify_password(password: &str, hash: &str, salt: &str) -> bool {
    match hex::decode(salt) {
        Ok(salt) => hash_password(password, &salt) == hash,
        Err(_) => false,
    }
}

/// Generate a random alphanumeric password.
pub fn generate_password() -> String {
    Alphanumeric.sample_string(&mut rand::rng(), GENERATED_PASSWORD_LEN)
}

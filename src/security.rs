//! Password hashing and token generation.

use sha2::{Digest, Sha256};
use uuid::Uuid;

// =============================================================================
// Random identifiers
// =============================================================================

/// Generate a random per-user salt (32 hex characters).
pub fn generate_salt() -> String {
    Uuid::new_v4().simple().to_string()
}

/// Generate an opaque session token.
///
/// Tokens are v4 UUIDs rendered without hyphens: 122 bits of
/// randomness, which is enough to make guessing infeasible.
pub fn generate_token() -> String {
    Uuid::new_v4().simple().to_string()
}

/// Generate a unique user id.
pub fn generate_user_id() -> String {
    Uuid::new_v4().simple().to_string()
}

// =============================================================================
// Password Hashing (Salt + Pepper)
// =============================================================================

/// Hash a password with a per-user salt and the server-side pepper.
///
/// Passwords are never stored in plain text. The salt is stored next
/// to the hash and defeats precomputed tables across users; the pepper
/// lives only in an environment variable, so a database breach alone
/// is not enough to mount an offline dictionary attack.
///
/// # Arguments
/// * `password` - The plain text password
/// * `salt` - The user's random salt (stored with the user record)
/// * `pepper` - The server-side secret (from environment)
///
/// # Algorithm
/// `hash = hex(SHA-256(salt || password || pepper))`
pub fn hash_password(password: &str, salt: &str, pepper: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(salt.as_bytes());
    hasher.update(password.as_bytes());
    hasher.update(pepper.as_bytes());
    hex::encode(hasher.finalize())
}

/// Check a candidate password against a stored hash by recomputing it
/// with the same salt and pepper.
pub fn verify_password(password: &str, salt: &str, pepper: &str, stored_hash: &str) -> bool {
    hash_password(password, salt, pepper) == stored_hash
}

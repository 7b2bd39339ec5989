use serde::{Deserialize, Serialize};

use crate::constants::{
    ERR_INVALID_USERNAME, ERR_PASSWORD_TOO_SHORT, MAX_USERNAME_LEN, MIN_PASSWORD_LEN,
    MIN_USERNAME_LEN,
};
use crate::error::{AppError, Result};

/// A registered user, stored under their username.
///
/// The password is kept as a salted, peppered SHA-256 digest. The salt
/// is stored alongside the hash; the pepper never leaves the server
/// environment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserRecord {
    pub id: String,
    pub password_hash: String,
    pub salt: String,
    pub created_at: i64,
}

impl UserRecord {
    /// Check that a username is acceptable: 3-32 characters drawn from
    /// letters, digits, '.', '_' and '-'.
    pub fn validate_username(username: &str) -> Result<()> {
        let len = username.chars().count();
        if len < MIN_USERNAME_LEN || len > MAX_USERNAME_LEN {
            return Err(AppError::InvalidInput(ERR_INVALID_USERNAME.to_string()));
        }
        if !username
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-'))
        {
            return Err(AppError::InvalidInput(ERR_INVALID_USERNAME.to_string()));
        }
        Ok(())
    }

    /// Check that a password meets the minimum length.
    pub fn validate_password(password: &str) -> Result<()> {
        if password.chars().count() < MIN_PASSWORD_LEN {
            return Err(AppError::InvalidInput(ERR_PASSWORD_TOO_SHORT.to_string()));
        }
        Ok(())
    }
}

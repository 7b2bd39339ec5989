use serde::{Deserialize, Serialize};

/// An authenticated session, stored under its opaque token.
///
/// Sessions expire after a configurable TTL. Expired entries are
/// removed lazily the next time the token is presented.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionRecord {
    pub user_id: String,
    pub username: String,
    pub created_at: i64,
    pub expires_at: i64,
}

impl SessionRecord {
    pub fn new(user_id: String, username: String, now: i64, ttl_secs: i64) -> Self {
        SessionRecord {
            user_id,
            username,
            created_at: now,
            expires_at: now + ttl_secs,
        }
    }

    /// Whether the session is still usable at the given time.
    pub fn is_valid(&self, now: i64) -> bool {
        now < self.expires_at
    }
}

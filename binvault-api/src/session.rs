//! Session store
//!
//! Per-token administrator sessions. Each successful login issues an opaque
//! UUID token with an absolute expiry 30 minutes out; every request that
//! validates the token renews it (sliding expiry). Expiry is checked
//! passively on access, not by a timer, and expired tokens are cleared as
//! they are seen. Nothing here is persisted across restarts.
//!
//! Tokens replace a process-wide authenticated flag so concurrent clients
//! never share session state.

use chrono::{DateTime, Duration, Utc};
use std::collections::HashMap;
use tokio::sync::RwLock;
use uuid::Uuid;

/// Session lifetime from issuance or last renewal
pub const SESSION_LIFETIME_MINUTES: i64 = 30;

/// In-memory store of active session tokens
pub struct SessionStore {
    /// Token → absolute expiry
    sessions: RwLock<HashMap<Uuid, DateTime<Utc>>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
        }
    }

    fn lifetime() -> Duration {
        Duration::minutes(SESSION_LIFETIME_MINUTES)
    }

    /// Issue a fresh token expiring one lifetime from `now`.
    pub async fn issue(&self, now: DateTime<Utc>) -> Uuid {
        let token = Uuid::new_v4();
        self.sessions.write().await.insert(token, now + Self::lifetime());
        token
    }

    /// Validate a token, renewing its expiry on success.
    ///
    /// Unknown tokens are denied; expired tokens are denied and removed
    /// (an expired session is indistinguishable from no session).
    pub async fn validate(&self, token: Uuid, now: DateTime<Utc>) -> bool {
        let mut sessions = self.sessions.write().await;
        match sessions.get(&token) {
            Some(expiry) if *expiry > now => {
                sessions.insert(token, now + Self::lifetime());
                true
            }
            Some(_) => {
                sessions.remove(&token);
                false
            }
            None => false,
        }
    }

    /// Remove a token unconditionally (logout).
    pub async fn revoke(&self, token: Uuid) {
        self.sessions.write().await.remove(&token);
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}

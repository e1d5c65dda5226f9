//! Session context: bearer token and cached user in durable storage.
//!
//! The session is handed to the HTTP client explicitly. It is written by the
//! login/logout flows and by the client's 401 handling; every other caller
//! only reads it.

pub mod storage;

pub use storage::{FileStorage, MemoryStorage, SessionStorage, StorageError};

use masjid_records::UserInfo;
use std::sync::Arc;
use tracing::{error, warn};

/// Storage key of the bearer token
pub const TOKEN_KEY: &str = "auth_token";
/// Storage key of the cached user descriptor (serialized JSON)
pub const USER_KEY: &str = "user";

#[derive(Clone)]
pub struct Session {
    storage: Arc<dyn SessionStorage>,
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("authenticated", &self.is_authenticated())
            .finish()
    }
}

impl Session {
    pub fn new(storage: Arc<dyn SessionStorage>) -> Self {
        Self { storage }
    }

    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryStorage::new()))
    }

    /// Current bearer token. Unreadable storage counts as "no token".
    pub fn token(&self) -> Option<String> {
        match self.storage.get(TOKEN_KEY) {
            Ok(token) => token.filter(|t| !t.is_empty()),
            Err(e) => {
                warn!("Session storage unavailable, sending unauthenticated: {}", e);
                None
            }
        }
    }

    /// Cached user descriptor, if one is stored and parses.
    pub fn user(&self) -> Option<UserInfo> {
        let raw = match self.storage.get(USER_KEY) {
            Ok(raw) => raw?,
            Err(e) => {
                warn!("Failed to read cached user: {}", e);
                return None;
            }
        };
        match serde_json::from_str(&raw) {
            Ok(user) => Some(user),
            Err(e) => {
                warn!("Cached user is not valid JSON: {}", e);
                None
            }
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.token().is_some()
    }

    /// Role check for hiding admin-only actions. The backend still enforces it.
    pub fn is_admin(&self) -> bool {
        self.user().map(|u| u.is_admin()).unwrap_or(false)
    }

    /// Persist a freshly issued credential.
    pub fn store(&self, token: &str, user: &UserInfo) -> Result<(), StorageError> {
        self.storage.set(TOKEN_KEY, token)?;
        self.update_user(user)
    }

    /// Replace the cached user without touching the token.
    pub fn update_user(&self, user: &UserInfo) -> Result<(), StorageError> {
        let json = serde_json::to_string(user)?;
        self.storage.set(USER_KEY, &json)
    }

    /// Remove token and cached user. Failures are logged, never raised:
    /// eviction runs on error paths that must still reach the caller.
    pub fn evict(&self) {
        for key in [TOKEN_KEY, USER_KEY] {
            if let Err(e) = self.storage.clear(key) {
                error!("Failed to clear {} from session storage: {}", key, e);
            }
        }
    }
}

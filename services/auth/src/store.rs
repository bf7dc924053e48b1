//! Credential store: users, sessions and the seed flag
//!
//! Everything is persisted as JSON under three keys of the injected
//! [`KeyValueStorage`]:
//!
//! ```text
//! auth:users     → [User]
//! auth:sessions  → { token: { email, createdAt } }
//! auth:seeded    → "true" | absent
//! ```
//!
//! Storage failures never reach the caller; they are logged at `warn`. A
//! lookup whose read failed sees an empty collection. An update whose read
//! failed is abandoned without writing, so stored data is never replaced by
//! a partial view of it. A failed write is a no-op.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;
use common::KeyValueStorage;
use serde::{Serialize, de::DeserializeOwned};
use tokio::sync::Mutex;
use tracing::{info, warn};

use crate::models::{Session, User};

pub const USERS_KEY: &str = "auth:users";
pub const SESSIONS_KEY: &str = "auth:sessions";
pub const SEEDED_KEY: &str = "auth:seeded";

/// Account inserted by seeding
pub const DEFAULT_USER_EMAIL: &str = "teste@teste.com";
pub const DEFAULT_USER_PASSWORD: &str = "1234";

/// Users and sessions behind a storage-agnostic backend
pub struct CredentialStore {
    storage: Arc<dyn KeyValueStorage>,
    /// Serializes every read-modify-write of the stored collections
    write_lock: Mutex<()>,
}

impl CredentialStore {
    /// Create a new credential store over the given backend
    pub fn new(storage: Arc<dyn KeyValueStorage>) -> Self {
        Self {
            storage,
            write_lock: Mutex::new(()),
        }
    }

    /// Insert the default account unless this store was already seeded
    ///
    /// The account is only added when no user with that email exists. The
    /// seed flag is set afterwards, so repeated calls leave the store exactly
    /// as a single call did. If the users cannot be read nothing is written
    /// and the next call tries again.
    pub async fn seed_default_user_once(&self) {
        let _guard = self.write_lock.lock().await;

        if self.is_seeded().await {
            return;
        }

        let Some(mut users) = self.load::<Vec<User>>(USERS_KEY).await else {
            warn!("Seeding postponed; {} could not be read", USERS_KEY);
            return;
        };
        if !users.iter().any(|user| user.email == DEFAULT_USER_EMAIL) {
            users.push(User::new(DEFAULT_USER_EMAIL, DEFAULT_USER_PASSWORD));
            self.write_json(USERS_KEY, &users).await;
            info!("Seeded default user: {}", DEFAULT_USER_EMAIL);
        }

        self.write_raw(SEEDED_KEY, "true").await;
    }

    /// Whether seeding already ran for this store lifetime
    pub async fn is_seeded(&self) -> bool {
        match self.storage.get(SEEDED_KEY).await {
            Ok(flag) => flag.as_deref() == Some("true"),
            Err(e) => {
                warn!("Failed to read {}: {}", SEEDED_KEY, e);
                false
            }
        }
    }

    /// All stored users, in insertion order
    pub async fn users(&self) -> Vec<User> {
        self.load(USERS_KEY).await.unwrap_or_default()
    }

    /// Find a user by its stored (already normalized) email
    pub async fn find_user_by_email(&self, email: &str) -> Option<User> {
        self.users()
            .await
            .into_iter()
            .find(|user| user.email == email)
    }

    /// Append a user
    ///
    /// Uniqueness is not checked here; callers must look the email up first.
    pub async fn add_user(&self, user: User) {
        let _guard = self.write_lock.lock().await;

        let Some(mut users) = self.load::<Vec<User>>(USERS_KEY).await else {
            warn!("User {} not stored; {} could not be read", user.email, USERS_KEY);
            return;
        };
        users.push(user);
        self.write_json(USERS_KEY, &users).await;
    }

    /// Store a session for `token`, replacing any existing entry
    pub async fn put_session(&self, token: &str, email: &str) {
        let _guard = self.write_lock.lock().await;

        let Some(mut sessions) = self.load::<HashMap<String, Session>>(SESSIONS_KEY).await else {
            warn!("Session for {} not stored; {} could not be read", email, SESSIONS_KEY);
            return;
        };
        sessions.insert(
            token.to_string(),
            Session {
                email: email.to_string(),
                created_at: Utc::now(),
            },
        );
        self.write_json(SESSIONS_KEY, &sessions).await;
    }

    /// Look a session up by token; an empty token never matches
    pub async fn get_session(&self, token: &str) -> Option<Session> {
        if token.is_empty() {
            return None;
        }

        self.sessions().await.remove(token)
    }

    /// Number of live sessions
    #[cfg(test)]
    pub(crate) async fn session_count(&self) -> usize {
        self.sessions().await.len()
    }

    /// Drop users, sessions and the seed flag
    pub async fn clear_all_auth_data(&self) {
        let _guard = self.write_lock.lock().await;

        for key in [USERS_KEY, SESSIONS_KEY, SEEDED_KEY] {
            if let Err(e) = self.storage.remove(key).await {
                warn!("Failed to remove {}: {}", key, e);
            }
        }
    }

    async fn sessions(&self) -> HashMap<String, Session> {
        self.load(SESSIONS_KEY).await.unwrap_or_default()
    }

    /// Decode the JSON stored under `key`
    ///
    /// `None` means the backend read failed. An absent key, or a value that
    /// no longer decodes, yields the empty collection.
    async fn load<T>(&self, key: &str) -> Option<T>
    where
        T: DeserializeOwned + Default,
    {
        let raw = match self.storage.get(key).await {
            Ok(Some(raw)) => raw,
            Ok(None) => return Some(T::default()),
            Err(e) => {
                warn!("Failed to read {}: {}", key, e);
                return None;
            }
        };

        Some(serde_json::from_str(&raw).unwrap_or_else(|e| {
            warn!("Discarding unreadable value under {}: {}", key, e);
            T::default()
        }))
    }

    async fn write_json<T: Serialize>(&self, key: &str, value: &T) {
        match serde_json::to_string(value) {
            Ok(raw) => self.write_raw(key, &raw).await,
            Err(e) => warn!("Failed to encode {}: {}", key, e),
        }
    }

    async fn write_raw(&self, key: &str, value: &str) {
        if let Err(e) = self.storage.set(key, value).await {
            warn!("Failed to write {}: {}", key, e);
        }
    }
}

//! Explicit auth session: bearer token and user profile.
//!
//! Both live in a [`KeyValueStore`] under fixed keys. Login sets them,
//! logout clears them, and the HTTP backend reads the token on every call.

pub mod store;

pub use store::{FileStore, KeyValueStore, MemoryStore, StoreError};

use crate::models::User;
use secrecy::Secret;
use std::sync::Arc;

pub const AUTH_TOKEN_KEY: &str = "authToken";
pub const USER_KEY: &str = "user";

#[derive(Clone)]
pub struct Session {
    store: Arc<dyn KeyValueStore>,
}

impl Session {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryStore::new()))
    }

    /// Restore a previous login. A stored user that no longer parses wipes
    /// the whole session.
    pub async fn restore(&self) -> Option<User> {
        let token = self.read(AUTH_TOKEN_KEY).await?;
        let raw_user = self.read(USER_KEY).await?;
        if token.is_empty() {
            return None;
        }

        match serde_json::from_str::<User>(&raw_user) {
            Ok(user) => Some(user),
            Err(e) => {
                tracing::error!(error = %e, "Auth check failed, clearing stored session");
                if let Err(e) = self.logout().await {
                    tracing::error!(error = %e, "Failed to clear session");
                }
                None
            }
        }
    }

    /// Store both keys or neither.
    pub async fn login(&self, token: &str, user: &User) -> Result<(), StoreError> {
        let encoded = serde_json::to_string(user)?;
        self.store.set(AUTH_TOKEN_KEY, token).await?;
        if let Err(e) = self.store.set(USER_KEY, &encoded).await {
            if let Err(cleanup) = self.store.remove(AUTH_TOKEN_KEY).await {
                tracing::error!(error = %cleanup, "Failed to roll back session token");
            }
            return Err(e);
        }
        tracing::info!(user_id = %user.id, "Session started");
        Ok(())
    }

    pub async fn logout(&self) -> Result<(), StoreError> {
        self.store.remove(AUTH_TOKEN_KEY).await?;
        self.store.remove(USER_KEY).await?;
        tracing::info!("Session cleared");
        Ok(())
    }

    /// Current bearer token. Store failures count as "logged out".
    pub async fn token(&self) -> Option<Secret<String>> {
        self.read(AUTH_TOKEN_KEY)
            .await
            .filter(|t| !t.is_empty())
            .map(Secret::new)
    }

    pub async fn has_token(&self) -> bool {
        self.token().await.is_some()
    }

    pub async fn is_authenticated(&self) -> bool {
        self.restore().await.is_some()
    }

    async fn read(&self, key: &str) -> Option<String> {
        match self.store.get(key).await {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!(key = key, error = %e, "Failed to read session store");
                None
            }
        }
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session").finish_non_exhaustive()
    }
}

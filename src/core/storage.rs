//! Persisted credentials.
//!
//! The browser keeps tokens in `localStorage`; the server and tests use an
//! in-memory map. Only the session store and the API client write to it.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::core::models::{AuthSession, User};

pub const ACCESS_TOKEN_KEY: &str = "accessToken";
pub const REFRESH_TOKEN_KEY: &str = "refreshToken";
pub const USER_KEY: &str = "user";

/// String key/value storage. Writes never fail from the caller's view;
/// implementations log and drop errors such as a full quota.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
    fn remove(&self, key: &str);
}

/// Process-local store
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: RwLock<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .get(key)
            .cloned()
    }

    fn set(&self, key: &str, value: &str) {
        self.values
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .insert(key.to_string(), value.to_string());
    }

    fn remove(&self, key: &str) {
        self.values
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .remove(key);
    }
}

/// `window.localStorage`
#[cfg(feature = "hydrate")]
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalStorageStore;

#[cfg(feature = "hydrate")]
impl LocalStorageStore {
    fn storage() -> Option<web_sys::Storage> {
        web_sys::window().and_then(|w| w.local_storage().ok().flatten())
    }
}

#[cfg(feature = "hydrate")]
impl KeyValueStore for LocalStorageStore {
    fn get(&self, key: &str) -> Option<String> {
        Self::storage().and_then(|s| s.get_item(key).ok().flatten())
    }

    fn set(&self, key: &str, value: &str) {
        match Self::storage() {
            Some(storage) => {
                if let Err(e) = storage.set_item(key, value) {
                    tracing::warn!(key, "failed to write localStorage: {:?}", e);
                }
            }
            None => tracing::warn!(key, "localStorage unavailable"),
        }
    }

    fn remove(&self, key: &str) {
        if let Some(storage) = Self::storage()
            && let Err(e) = storage.remove_item(key)
        {
            tracing::warn!(key, "failed to remove localStorage item: {:?}", e);
        }
    }
}

/// Typed view over the three credential entries
#[derive(Clone)]
pub struct CredentialStore {
    backend: Arc<dyn KeyValueStore>,
}

impl CredentialStore {
    pub fn new(backend: Arc<dyn KeyValueStore>) -> Self {
        Self { backend }
    }

    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryStore::new()))
    }

    /// Browser `localStorage` in the client build, memory otherwise
    pub fn platform_default() -> Self {
        #[cfg(feature = "hydrate")]
        {
            Self::new(Arc::new(LocalStorageStore))
        }
        #[cfg(not(feature = "hydrate"))]
        {
            Self::in_memory()
        }
    }

    pub fn access_token(&self) -> Option<String> {
        self.backend.get(ACCESS_TOKEN_KEY).filter(|t| !t.is_empty())
    }

    pub fn refresh_token(&self) -> Option<String> {
        self.backend.get(REFRESH_TOKEN_KEY).filter(|t| !t.is_empty())
    }

    /// Persisted user; a corrupt entry reads as absent
    pub fn user(&self) -> Option<User> {
        let raw = self.backend.get(USER_KEY)?;
        match serde_json::from_str(&raw) {
            Ok(user) => Some(user),
            Err(e) => {
                tracing::warn!("ignoring unreadable persisted user: {}", e);
                None
            }
        }
    }

    pub(crate) fn save_session(&self, session: &AuthSession) {
        self.set_access_token(&session.access_token);
        self.set_refresh_token(&session.refresh_token);
        match serde_json::to_string(&session.user) {
            Ok(json) => self.backend.set(USER_KEY, &json),
            Err(e) => tracing::warn!("failed to persist user: {}", e),
        }
    }

    pub(crate) fn set_access_token(&self, token: &str) {
        self.backend.set(ACCESS_TOKEN_KEY, token);
    }

    pub(crate) fn set_refresh_token(&self, token: &str) {
        self.backend.set(REFRESH_TOKEN_KEY, token);
    }

    pub(crate) fn clear(&self) {
        self.backend.remove(ACCESS_TOKEN_KEY);
        self.backend.remove(REFRESH_TOKEN_KEY);
        self.backend.remove(USER_KEY);
    }
}

impl std::fmt::Debug for CredentialStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialStore")
            .field("has_access_token", &self.access_token().is_some())
            .field("has_refresh_token", &self.refresh_token().is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::Role;

    fn session() -> AuthSession {
        AuthSession {
            access_token: "access-1".into(),
            refresh_token: "refresh-1".into(),
            user: User {
                id: "u-1".into(),
                email: "ada@example.com".into(),
                first_name: "Ada".into(),
                last_name: "Lovelace".into(),
                role: Role::Admin,
                is_active: true,
                profile_image: None,
            },
        }
    }

    #[test]
    fn test_save_and_read_session() {
        let store = CredentialStore::in_memory();
        store.save_session(&session());

        assert_eq!(store.access_token().as_deref(), Some("access-1"));
        assert_eq!(store.refresh_token().as_deref(), Some("refresh-1"));
        assert_eq!(store.user().map(|u| u.email), Some("ada@example.com".into()));
    }

    #[test]
    fn test_clear_removes_all_three_entries() {
        let backend = Arc::new(MemoryStore::new());
        let store = CredentialStore::new(backend.clone());
        store.save_session(&session());

        store.clear();

        assert!(backend.get(ACCESS_TOKEN_KEY).is_none());
        assert!(backend.get(REFRESH_TOKEN_KEY).is_none());
        assert!(backend.get(USER_KEY).is_none());
    }

    #[test]
    fn test_corrupt_user_reads_as_absent() {
        let backend = Arc::new(MemoryStore::new());
        backend.set(USER_KEY, "{not json");
        let store = CredentialStore::new(backend);
        assert!(store.user().is_none());
    }

    #[test]
    fn test_empty_token_reads_as_absent() {
        let backend = Arc::new(MemoryStore::new());
        backend.set(ACCESS_TOKEN_KEY, "");
        let store = CredentialStore::new(backend);
        assert!(store.access_token().is_none());
    }

    #[test]
    fn test_clones_share_backend() {
        let store = CredentialStore::in_memory();
        let other = store.clone();
        store.set_access_token("t");
        assert_eq!(other.access_token().as_deref(), Some("t"));
    }
}

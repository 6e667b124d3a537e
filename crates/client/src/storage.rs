//! Credential persistence
//!
//! The token and the serialized user live in browser local storage under
//! `<prefix>token` and `<prefix>user`. Pages written against the same prefix
//! share the session.

use crate::error::ClientError;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Key/value storage backing the session
pub trait CredentialStore: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str) -> Result<(), ClientError>;
    fn remove(&self, key: &str);
}

/// In-process store, used outside the browser and in tests
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    entries: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn entries(&self) -> std::sync::MutexGuard<'_, HashMap<String, String>> {
        // A poisoned map still holds consistent strings.
        self.entries.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl CredentialStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), ClientError> {
        self.entries().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) {
        self.entries().remove(key);
    }
}

/// Browser `localStorage`
///
/// Values are stored raw rather than JSON-encoded so other pages can read the
/// token directly.
#[cfg(target_arch = "wasm32")]
#[derive(Debug, Default, Clone, Copy)]
pub struct LocalStore;

#[cfg(target_arch = "wasm32")]
impl CredentialStore for LocalStore {
    fn get(&self, key: &str) -> Option<String> {
        use gloo::storage::{LocalStorage, Storage};

        LocalStorage::raw().get_item(key).ok().flatten()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), ClientError> {
        use gloo::storage::{LocalStorage, Storage};

        LocalStorage::raw()
            .set_item(key, value)
            .map_err(|e| ClientError::Storage(format!("failed to write {key}: {e:?}")))
    }

    fn remove(&self, key: &str) {
        use gloo::storage::{LocalStorage, Storage};

        LocalStorage::delete(key);
    }
}

/// Session credentials namespaced under the storage prefix
#[derive(Clone)]
pub struct SessionStore {
    store: Arc<dyn CredentialStore>,
    token_key: String,
    user_key: String,
}

impl SessionStore {
    pub fn new(store: Arc<dyn CredentialStore>, prefix: &str) -> Self {
        Self {
            store,
            token_key: format!("{prefix}token"),
            user_key: format!("{prefix}user"),
        }
    }

    /// Storage key holding the bearer token
    pub fn token_key(&self) -> &str {
        &self.token_key
    }

    /// Storage key holding the serialized user
    pub fn user_key(&self) -> &str {
        &self.user_key
    }

    /// Stored bearer token; empty values count as absent
    pub fn token(&self) -> Option<String> {
        self.store.get(&self.token_key).filter(|t| !t.is_empty())
    }

    pub fn set_token(&self, token: &str) -> Result<(), ClientError> {
        self.store.set(&self.token_key, token)
    }

    /// Stored user object, if present and parseable
    pub fn user(&self) -> Option<serde_json::Value> {
        let raw = self.store.get(&self.user_key)?;
        serde_json::from_str(&raw).ok()
    }

    pub fn set_user(&self, user: &serde_json::Value) -> Result<(), ClientError> {
        let serialized = serde_json::to_string(user)?;
        self.store.set(&self.user_key, &serialized)
    }

    /// Remove both the token and the user
    pub fn clear(&self) {
        self.store.remove(&self.token_key);
        self.store.remove(&self.user_key);
    }

    pub fn is_authenticated(&self) -> bool {
        self.token().is_some()
    }
}

impl std::fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionStore")
            .field("token_key", &self.token_key)
            .field("user_key", &self.user_key)
            .field("authenticated", &self.is_authenticated())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn session() -> (MemoryStore, SessionStore) {
        let store = MemoryStore::new();
        let session = SessionStore::new(Arc::new(store.clone()), "taskgrid_");
        (store, session)
    }

    #[test]
    fn keys_use_prefix() {
        let (store, session) = session();
        session.set_token("abc").unwrap();
        session.set_user(&json!({"id": 1, "username": "ana"})).unwrap();

        assert_eq!(store.get("taskgrid_token").as_deref(), Some("abc"));
        assert_eq!(
            store.get("taskgrid_user").as_deref(),
            Some(r#"{"id":1,"username":"ana"}"#)
        );
    }

    #[test]
    fn token_presence_drives_authentication() {
        let (store, session) = session();
        assert!(!session.is_authenticated());

        store.set("taskgrid_token", "").unwrap();
        assert!(!session.is_authenticated());

        session.set_token("abc").unwrap();
        assert!(session.is_authenticated());
        assert_eq!(session.token().as_deref(), Some("abc"));
    }

    #[test]
    fn clear_removes_token_and_user() {
        let (store, session) = session();
        session.set_token("abc").unwrap();
        session.set_user(&json!({"id": 1})).unwrap();
        store.set("unrelated", "kept").unwrap();

        session.clear();

        assert_eq!(store.get("taskgrid_token"), None);
        assert_eq!(store.get("taskgrid_user"), None);
        assert_eq!(store.get("unrelated").as_deref(), Some("kept"));
        assert!(session.user().is_none());
    }

    #[test]
    fn unparseable_user_reads_as_none() {
        let (store, session) = session();
        store.set("taskgrid_user", "not json").unwrap();
        assert!(session.user().is_none());
    }
}

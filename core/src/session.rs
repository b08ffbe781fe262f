//! Session provider injected into the API client.
//!
//! # Design
//! The host owns persistence and implements `SessionStore` over its
//! key/value storage (two string keys, `token` and `user`). `SessionProvider`
//! caches the loaded session behind an `RwLock` so every request reads the
//! token without touching storage. Writes go through to the store; the last
//! write wins.

use std::collections::HashMap;
use std::sync::{Mutex, RwLock};

use tracing::{debug, warn};

use crate::types::User;

pub const TOKEN_KEY: &str = "token";
pub const USER_KEY: &str = "user";

/// Host-provided key/value storage.
pub trait SessionStore: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
    fn remove(&self, key: &str);
}

impl<S: SessionStore + ?Sized> SessionStore for std::sync::Arc<S> {
    fn get(&self, key: &str) -> Option<String> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) {
        (**self).remove(key)
    }
}

/// Volatile store for tests and hosts without persistence.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.lock().ok()?.get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.insert(key.to_string(), value.to_string());
        }
    }

    fn remove(&self, key: &str) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.remove(key);
        }
    }
}

/// The signed-in state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    pub token: Option<String>,
    pub user: Option<User>,
}

impl Session {
    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }
}

pub struct SessionProvider {
    store: Box<dyn SessionStore>,
    current: RwLock<Session>,
}

impl std::fmt::Debug for SessionProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionProvider")
            .field("authenticated", &self.snapshot().is_authenticated())
            .finish()
    }
}

impl SessionProvider {
    /// Wrap `store`. Nothing is read until `load`.
    pub fn new(store: impl SessionStore + 'static) -> Self {
        Self {
            store: Box::new(store),
            current: RwLock::new(Session::default()),
        }
    }

    /// A provider over a fresh `MemoryStore`.
    pub fn in_memory() -> Self {
        Self::new(MemoryStore::new())
    }

    /// Read both keys from the store into the cache.
    ///
    /// A `user` blob that does not parse is dropped from the store; the
    /// token is kept.
    pub fn load(&self) -> Session {
        let token = self.store.get(TOKEN_KEY).filter(|t| !t.trim().is_empty());
        let user = match self.store.get(USER_KEY) {
            Some(blob) => match serde_json::from_str::<User>(&blob) {
                Ok(user) => Some(user),
                Err(e) => {
                    warn!(error = %e, "dropping unreadable stored user profile");
                    self.store.remove(USER_KEY);
                    None
                }
            },
            None => None,
        };
        let session = Session { token, user };
        debug!(authenticated = session.is_authenticated(), "session loaded");
        self.replace(session.clone());
        session
    }

    /// Persist a freshly issued token and profile (login / register).
    pub fn establish(&self, token: &str, user: &User) {
        self.store.set(TOKEN_KEY, token);
        self.write_user(user);
        self.replace(Session {
            token: Some(token.to_string()),
            user: Some(user.clone()),
        });
        debug!(user_id = %user.id, "session established");
    }

    /// Replace the cached profile, keeping the token.
    pub fn refresh(&self, user: &User) {
        self.write_user(user);
        if let Ok(mut current) = self.current.write() {
            current.user = Some(user.clone());
        }
    }

    /// Remove both keys (logout).
    pub fn clear(&self) {
        self.store.remove(TOKEN_KEY);
        self.store.remove(USER_KEY);
        self.replace(Session::default());
        debug!("session cleared");
    }

    pub fn token(&self) -> Option<String> {
        self.current.read().ok().and_then(|s| s.token.clone())
    }

    pub fn user(&self) -> Option<User> {
        self.current.read().ok().and_then(|s| s.user.clone())
    }

    pub fn snapshot(&self) -> Session {
        self.current
            .read()
            .map(|s| s.clone())
            .unwrap_or_default()
    }

    fn write_user(&self, user: &User) {
        match serde_json::to_string(user) {
            Ok(blob) => self.store.set(USER_KEY, &blob),
            Err(e) => warn!(error = %e, "could not serialize user profile"),
        }
    }

    fn replace(&self, session: Session) {
        if let Ok(mut current) = self.current.write() {
            *current = session;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Role;

    fn user() -> User {
        User {
            id: "u1".to_string(),
            email: "deniz@example.com".to_string(),
            first_name: "Deniz".to_string(),
            last_name: "Kaya".to_string(),
            role: Role::User,
        }
    }

    #[test]
    fn load_from_empty_store() {
        let provider = SessionProvider::in_memory();
        let session = provider.load();
        assert!(!session.is_authenticated());
        assert!(session.user.is_none());
    }

    #[test]
    fn establish_then_reload_round_trips_through_store() {
        let store = std::sync::Arc::new(MemoryStore::new());
        let provider = SessionProvider::new(store.clone());
        provider.establish("tok-1", &user());

        let other = SessionProvider::new(store);
        let session = other.load();
        assert_eq!(session.token.as_deref(), Some("tok-1"));
        assert_eq!(session.user, Some(user()));
    }

    #[test]
    fn corrupt_user_blob_is_dropped_token_kept() {
        let store = MemoryStore::new();
        store.set(TOKEN_KEY, "tok-2");
        store.set(USER_KEY, "{not json");
        let provider = SessionProvider::new(store);
        let session = provider.load();
        assert_eq!(session.token.as_deref(), Some("tok-2"));
        assert!(session.user.is_none());
    }

    #[test]
    fn refresh_keeps_token() {
        let provider = SessionProvider::in_memory();
        provider.establish("tok-3", &user());
        let mut updated = user();
        updated.first_name = "Ada".to_string();
        provider.refresh(&updated);
        assert_eq!(provider.token().as_deref(), Some("tok-3"));
        assert_eq!(provider.user().unwrap().first_name, "Ada");
    }

    #[test]
    fn clear_removes_everything() {
        let provider = SessionProvider::in_memory();
        provider.establish("tok-4", &user());
        provider.clear();
        assert!(provider.token().is_none());
        assert_eq!(provider.load(), Session::default());
    }
}

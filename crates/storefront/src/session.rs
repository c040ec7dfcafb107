//! Persisted session state.
//!
//! The browser build of this storefront kept the bearer token and the user
//! record in local storage. [`SessionStorage`] is that seam made explicit:
//! a string key-value store, with a JSON-file implementation for the CLI
//! and an in-memory one for tests.
//!
//! Single-writer discipline: only the auth service writes through
//! [`SessionStore`]; everything else reads session state via the auth
//! service's snapshot.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use thiserror::Error;
use tracing::warn;

use myshop_core::SessionUser;

/// Session keys for persisted auth data.
pub mod keys {
    /// Key for the opaque bearer token.
    pub const TOKEN: &str = "token";

    /// Key for the serialized session user record.
    pub const USER: &str = "user";

    /// Key for locally cached cart data, cleared on logout.
    pub const CART: &str = "cart";
}

/// Errors from persisted session storage.
#[derive(Debug, Error)]
pub enum SessionError {
    /// Reading or writing the backing file failed.
    #[error("session storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The session record could not be serialized.
    #[error("session serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// String key-value storage, the stand-in for browser local storage.
pub trait SessionStorage: Send + Sync {
    /// Read a value; absent and unreadable both yield `None`.
    fn get(&self, key: &str) -> Option<String>;

    /// Write a value.
    ///
    /// # Errors
    ///
    /// Returns an error if the value cannot be persisted.
    fn set(&self, key: &str, value: &str) -> Result<(), SessionError>;

    /// Remove a value. Removing an absent key is not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the removal cannot be persisted.
    fn remove(&self, key: &str) -> Result<(), SessionError>;
}

/// In-memory storage for tests.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    values: Mutex<HashMap<String, String>>,
}

impl MemoryStorage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, String>> {
        self.values.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl SessionStorage for MemoryStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.lock().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), SessionError> {
        self.lock().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), SessionError> {
        self.lock().remove(key);
        Ok(())
    }
}

/// JSON-file storage at `<state_dir>/session.json`.
///
/// The whole map is rewritten on every mutation; session state is a
/// handful of small strings, so simplicity wins over cleverness here.
#[derive(Debug)]
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    /// Create storage backed by the given file path.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn read_map(&self) -> HashMap<String, String> {
        let Ok(text) = std::fs::read_to_string(&self.path) else {
            return HashMap::new();
        };
        serde_json::from_str(&text).unwrap_or_else(|e| {
            warn!(path = %self.path.display(), error = %e, "session file unreadable, starting fresh");
            HashMap::new()
        })
    }

    fn write_map(&self, map: &HashMap<String, String>) -> Result<(), SessionError> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }
        let text = serde_json::to_string_pretty(map)?;
        std::fs::write(&self.path, text)?;
        Ok(())
    }

    /// The backing file path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SessionStorage for FileStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.read_map().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), SessionError> {
        let mut map = self.read_map();
        map.insert(key.to_string(), value.to_string());
        self.write_map(&map)
    }

    fn remove(&self, key: &str) -> Result<(), SessionError> {
        let mut map = self.read_map();
        if map.remove(key).is_some() {
            self.write_map(&map)?;
        }
        Ok(())
    }
}

/// Outcome of loading the persisted session.
#[derive(Debug)]
pub enum SessionLoad {
    /// No session persisted (token or user record missing).
    Absent,
    /// Both keys present but the user record failed to parse. The caller
    /// should clear storage; the end state is logged-out either way.
    Corrupted,
    /// A complete, parsable session.
    Present { token: String, user: SessionUser },
}

/// Typed access to the persisted token + user pair.
///
/// The two keys are always written together and cleared together.
pub struct SessionStore {
    storage: Box<dyn SessionStorage>,
}

impl SessionStore {
    #[must_use]
    pub fn new(storage: Box<dyn SessionStorage>) -> Self {
        Self { storage }
    }

    /// Load the persisted session, distinguishing broken from missing.
    #[must_use]
    pub fn load(&self) -> SessionLoad {
        let (Some(token), Some(user_text)) = (
            self.storage.get(keys::TOKEN),
            self.storage.get(keys::USER),
        ) else {
            return SessionLoad::Absent;
        };

        match serde_json::from_str::<SessionUser>(&user_text) {
            Ok(user) => SessionLoad::Present { token, user },
            Err(e) => {
                warn!(error = %e, "persisted user record is corrupted");
                SessionLoad::Corrupted
            }
        }
    }

    /// Persist a token and user record together.
    ///
    /// # Errors
    ///
    /// Returns an error if either write fails.
    pub fn persist(&self, token: &str, user: &SessionUser) -> Result<(), SessionError> {
        self.storage.set(keys::TOKEN, token)?;
        self.storage.set(keys::USER, &serde_json::to_string(user)?)?;
        Ok(())
    }

    /// Clear the token, user record, and any cached cart data.
    pub fn clear(&self) {
        for key in [keys::TOKEN, keys::USER, keys::CART] {
            if let Err(e) = self.storage.remove(key) {
                warn!(key, error = %e, "failed to clear session key");
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn store() -> SessionStore {
        SessionStore::new(Box::new(MemoryStorage::new()))
    }

    fn user() -> SessionUser {
        serde_json::from_str(r#"{"username": "alice", "role": "USER"}"#).unwrap()
    }

    #[test]
    fn test_load_absent_when_empty() {
        assert!(matches!(store().load(), SessionLoad::Absent));
    }

    #[test]
    fn test_load_absent_when_only_token() {
        let store = store();
        store.storage.set(keys::TOKEN, "tok").unwrap();
        assert!(matches!(store.load(), SessionLoad::Absent));
    }

    #[test]
    fn test_persist_then_load() {
        let store = store();
        store.persist("tok-123", &user()).unwrap();
        match store.load() {
            SessionLoad::Present { token, user } => {
                assert_eq!(token, "tok-123");
                assert_eq!(user.username, "alice");
            }
            other => panic!("expected Present, got {other:?}"),
        }
    }

    #[test]
    fn test_load_corrupted_user_record() {
        let store = store();
        store.storage.set(keys::TOKEN, "tok").unwrap();
        store.storage.set(keys::USER, "{not json").unwrap();
        assert!(matches!(store.load(), SessionLoad::Corrupted));
    }

    #[test]
    fn test_clear_removes_all_keys() {
        let store = store();
        store.persist("tok", &user()).unwrap();
        store.storage.set(keys::CART, "[]").unwrap();
        store.clear();
        assert!(store.storage.get(keys::TOKEN).is_none());
        assert!(store.storage.get(keys::USER).is_none());
        assert!(store.storage.get(keys::CART).is_none());
    }

    #[test]
    fn test_file_storage_roundtrip() {
        let dir = std::env::temp_dir().join(format!("myshop-session-{}", std::process::id()));
        let storage = FileStorage::new(dir.join("session.json"));
        storage.set("token", "abc").unwrap();
        assert_eq!(storage.get("token").as_deref(), Some("abc"));
        storage.remove("token").unwrap();
        assert!(storage.get("token").is_none());
        let _ = std::fs::remove_dir_all(&dir);
    }
}

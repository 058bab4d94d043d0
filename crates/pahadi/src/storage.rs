//! Durable client-side storage for the session.
//!
//! The store never talks to `localStorage` directly. It goes through [`SessionStorage`], which
//! the browser build implements on top of `gloo-storage` and tests implement with
//! [`MemoryStorage`].

use std::cell::RefCell;
use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::data::User;
use crate::errors::StorageError;
use crate::session::{AuthToken, Session};

/// The single key the session envelope lives under.
pub const SESSION_KEY: &str = "auth-storage";

/// Schema version written into the envelope.
pub const SESSION_VERSION: u32 = 0;

/// A string key-value store.
pub trait SessionStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

/// In-memory [`SessionStorage`], for tests and for environments without `localStorage`.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: RefCell<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts with `value` already stored under `key`.
    pub fn with_entry(key: &str, value: impl Into<String>) -> Self {
        let storage = Self::new();
        storage
            .entries
            .borrow_mut()
            .insert(key.to_string(), value.into());
        storage
    }

    /// Raw stored value, bypassing the trait.
    pub fn raw(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }
}

impl SessionStorage for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.entries.borrow_mut().remove(key);
        Ok(())
    }
}

/// The on-storage shape of a session: `{ state: { user, token, isAuthenticated }, version }`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct PersistedSession {
    pub state: PersistedState,
    #[serde(default)]
    pub version: u32,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct PersistedState {
    #[serde(default)]
    pub user: Option<User>,
    #[serde(default)]
    pub token: Option<AuthToken>,
    #[serde(default)]
    pub is_authenticated: bool,
}

impl From<&Session> for PersistedSession {
    fn from(session: &Session) -> Self {
        Self {
            state: PersistedState {
                user: session.user().cloned(),
                token: session.token().cloned(),
                is_authenticated: session.is_authenticated(),
            },
            version: SESSION_VERSION,
        }
    }
}

impl TryFrom<PersistedSession> for Session {
    type Error = StorageError;

    /// Only a state that satisfies "authenticated iff both user and token" is accepted.
    fn try_from(persisted: PersistedSession) -> Result<Self, Self::Error> {
        let PersistedState {
            user,
            token,
            is_authenticated,
        } = persisted.state;

        match (user, token, is_authenticated) {
            (Some(user), Some(token), true) => Ok(Session::Authenticated { user, token }),
            (None, None, false) => Ok(Session::Anonymous),
            (user, token, flag) => Err(StorageError::Malformed(format!(
                "inconsistent state: user={}, token={}, isAuthenticated={flag}",
                user.is_some(),
                token.is_some(),
            ))),
        }
    }
}

/// Reads and parses the envelope. `Ok(None)` means nothing has been persisted yet.
pub fn read_session(storage: &dyn SessionStorage) -> Result<Option<PersistedSession>, StorageError> {
    match storage.get(SESSION_KEY)? {
        Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
        None => Ok(None),
    }
}

pub fn write_session(storage: &dyn SessionStorage, session: &Session) -> Result<(), StorageError> {
    let raw = serde_json::to_string(&PersistedSession::from(session))?;
    storage.set(SESSION_KEY, &raw)
}

pub fn remove_session(storage: &dyn SessionStorage) -> Result<(), StorageError> {
    storage.remove(SESSION_KEY)
}

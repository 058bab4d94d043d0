//! Who is logged in.
//!
//! [`SessionStore`] is the single owner of the current [`Session`]. It is created once at
//! startup, handed to the HTTP client and to the views, and persists every mutation through
//! its [`SessionStorage`] port so a reload picks up where the user left off.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::{Rc, Weak};

use serde::{Deserialize, Deserializer, Serialize};

use crate::data::{User, UserPatch};
use crate::errors::ValidationError;
use crate::log::{debug, error, info, warn};
use crate::storage::{self, SessionStorage};

/// Opaque bearer credential issued by the backend.
///
/// Deserializing rejects a blank token, so neither the backend nor stale storage can produce
/// a session that would send `Authorization: Bearer ` with nothing after it.
#[derive(Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct AuthToken(String);

impl<'de> Deserialize<'de> for AuthToken {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let token = String::deserialize(deserializer)?;
        if token.trim().is_empty() {
            return Err(serde::de::Error::custom(ValidationError::EmptyToken));
        }
        Ok(Self(token))
    }
}

impl AuthToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Value for the `Authorization` header.
    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.0)
    }
}

// Tokens must never end up in logs.
impl fmt::Debug for AuthToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AuthToken(***)")
    }
}

/// The client-held record of the current user and credential.
///
/// A token without a user (or the reverse) cannot be represented.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Session {
    #[default]
    Anonymous,
    Authenticated { user: User, token: AuthToken },
}

impl Session {
    pub fn user(&self) -> Option<&User> {
        match self {
            Session::Authenticated { user, .. } => Some(user),
            Session::Anonymous => None,
        }
    }

    pub fn token(&self) -> Option<&AuthToken> {
        match self {
            Session::Authenticated { token, .. } => Some(token),
            Session::Anonymous => None,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self, Session::Authenticated { .. })
    }
}

type Listener = Rc<dyn Fn(&Session)>;

pub struct SessionStore {
    storage: Rc<dyn SessionStorage>,
    session: RefCell<Session>,
    listeners: RefCell<Vec<(usize, Listener)>>,
    next_listener: Cell<usize>,
}

impl SessionStore {
    /// Creates the store, rehydrating from storage when a valid session was persisted.
    pub fn new(storage: Rc<dyn SessionStorage>) -> Rc<Self> {
        let session = Self::rehydrate(storage.as_ref());
        Rc::new(Self {
            storage,
            session: RefCell::new(session),
            listeners: RefCell::new(Vec::new()),
            next_listener: Cell::new(0),
        })
    }

    fn rehydrate(storage: &dyn SessionStorage) -> Session {
        match storage::read_session(storage) {
            Ok(Some(persisted)) => match Session::try_from(persisted) {
                Ok(session) => {
                    debug!(authenticated = session.is_authenticated(), "Rehydrated session");
                    session
                }
                Err(err) => {
                    warn!("Discarding persisted session: {err}");
                    Session::Anonymous
                }
            },
            Ok(None) => Session::Anonymous,
            Err(err) => {
                warn!("Could not rehydrate session: {err}");
                Session::Anonymous
            }
        }
    }

    /// Snapshot of the current session.
    pub fn session(&self) -> Session {
        self.session.borrow().clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.borrow().is_authenticated()
    }

    pub fn user(&self) -> Option<User> {
        self.session.borrow().user().cloned()
    }

    /// Replaces the whole session after a successful OTP verification.
    pub fn set_session(&self, user: User, token: AuthToken) {
        info!(user = %user.id, "Session established");
        self.replace(Session::Authenticated { user, token });
    }

    /// Resets to anonymous and drops the persisted envelope. Safe to call repeatedly.
    pub fn clear_session(&self) {
        if let Err(err) = storage::remove_session(self.storage.as_ref()) {
            error!("Failed to remove persisted session: {err}");
        }

        let previous = self.session.replace(Session::Anonymous);
        if previous.is_authenticated() {
            info!("Session cleared");
            self.notify();
        }
    }

    /// Merges `patch` into the current user. Without a user this does nothing.
    pub fn patch_user(&self, patch: UserPatch) {
        let next = match &*self.session.borrow() {
            Session::Authenticated { user, token } => {
                let mut user = user.clone();
                user.apply(patch);
                Session::Authenticated {
                    user,
                    token: token.clone(),
                }
            }
            Session::Anonymous => {
                debug!("Ignoring user patch without a session");
                return;
            }
        };
        self.replace(next);
    }

    /// Token as currently persisted, read fresh from storage.
    ///
    /// Unreadable or malformed data is logged and treated as "no token".
    pub fn persisted_token(&self) -> Option<AuthToken> {
        match storage::read_session(self.storage.as_ref()) {
            Ok(persisted) => persisted.and_then(|persisted| persisted.state.token),
            Err(err) => {
                warn!("Ignoring persisted session while authorizing request: {err}");
                None
            }
        }
    }

    /// Calls `listener` after every change. Dropping the returned handle unsubscribes.
    pub fn subscribe(self: &Rc<Self>, listener: impl Fn(&Session) + 'static) -> Subscription {
        let id = self.next_listener.get();
        self.next_listener.set(id + 1);
        self.listeners.borrow_mut().push((id, Rc::new(listener)));

        Subscription {
            store: Rc::downgrade(self),
            id,
        }
    }

    fn replace(&self, next: Session) {
        if let Err(err) = storage::write_session(self.storage.as_ref(), &next) {
            error!("Failed to persist session: {err}");
        }
        *self.session.borrow_mut() = next;
        self.notify();
    }

    fn notify(&self) {
        // Listeners may subscribe or unsubscribe while being called.
        let listeners: Vec<Listener> = self
            .listeners
            .borrow()
            .iter()
            .map(|(_, listener)| listener.clone())
            .collect();
        let session = self.session();
        for listener in listeners {
            listener(&session);
        }
    }
}

impl fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionStore")
            .field("session", &*self.session.borrow())
            .field("listeners", &self.listeners.borrow().len())
            .finish()
    }
}

/// Keeps a [`SessionStore::subscribe`] listener registered while alive.
#[must_use = "the listener is removed when the subscription is dropped"]
pub struct Subscription {
    store: Weak<SessionStore>,
    id: usize,
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(store) = self.store.upgrade() {
            store
                .listeners
                .borrow_mut()
                .retain(|(id, _)| *id != self.id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{MemoryStorage, SESSION_KEY};
    use serde_json::json;

    fn user() -> User {
        let mut user = User::new("u1", "9876543210");
        user.name = Some("Asha".to_string());
        user.extra.insert("city".to_string(), json!("Almora"));
        user
    }

    fn store() -> (Rc<MemoryStorage>, Rc<SessionStore>) {
        let storage = Rc::new(MemoryStorage::new());
        let store = SessionStore::new(storage.clone());
        (storage, store)
    }

    #[test]
    fn test_starts_anonymous() {
        let (_, store) = store();
        assert_eq!(store.session(), Session::Anonymous);
        assert!(!store.is_authenticated());
    }

    #[test]
    fn test_set_session() {
        let (_, store) = store();
        store.set_session(user(), AuthToken::new("abc"));

        let session = store.session();
        assert!(session.is_authenticated());
        assert_eq!(session.user(), Some(&user()));
        assert_eq!(session.token().map(AuthToken::as_str), Some("abc"));
    }

    #[test]
    fn test_clear_session_from_any_state() {
        let (storage, store) = store();
        store.clear_session();
        assert_eq!(store.session(), Session::Anonymous);

        store.set_session(user(), AuthToken::new("abc"));
        store.clear_session();
        assert_eq!(store.session(), Session::Anonymous);
        assert!(store.session().user().is_none());
        assert!(store.session().token().is_none());
        assert!(storage.raw(SESSION_KEY).is_none());

        store.clear_session();
        assert_eq!(store.session(), Session::Anonymous);
    }

    #[test]
    fn test_patch_user_updates_only_given_field() {
        let (_, store) = store();
        store.set_session(user(), AuthToken::new("abc"));

        store.patch_user(UserPatch::profile_complete());

        let patched = store.user().unwrap();
        assert!(patched.profile_complete);
        assert_eq!(patched.name.as_deref(), Some("Asha"));
        assert_eq!(patched.extra["city"], json!("Almora"));
        assert_eq!(store.session().token().map(AuthToken::as_str), Some("abc"));
    }

    #[test]
    fn test_patch_user_without_user_is_noop() {
        let (storage, store) = store();
        store.patch_user(UserPatch::profile_complete());

        assert_eq!(store.session(), Session::Anonymous);
        assert!(storage.raw(SESSION_KEY).is_none());
    }

    #[test]
    fn test_round_trip_through_storage() {
        let (storage, store) = store();
        store.set_session(user(), AuthToken::new("abc"));

        let rehydrated = SessionStore::new(storage);
        assert_eq!(
            rehydrated.session(),
            Session::Authenticated {
                user: user(),
                token: AuthToken::new("abc"),
            }
        );
    }

    #[test]
    fn test_patch_is_persisted() {
        let (storage, store) = store();
        store.set_session(user(), AuthToken::new("abc"));
        store.patch_user(UserPatch::profile_complete());

        let rehydrated = SessionStore::new(storage);
        assert!(rehydrated.user().unwrap().profile_complete);
    }

    #[test]
    fn test_rehydrates_user_with_null_flag() {
        let storage = Rc::new(MemoryStorage::with_entry(
            SESSION_KEY,
            r#"{"state":{"user":{"id":"u1","phone":"9876543210","profileComplete":null},"token":"abc","isAuthenticated":true},"version":0}"#,
        ));
        let store = SessionStore::new(storage);

        assert!(store.is_authenticated());
        assert!(!store.user().unwrap().profile_complete);
        assert_eq!(store.persisted_token(), Some(AuthToken::new("abc")));
    }

    #[test]
    fn test_blank_persisted_token_starts_anonymous() {
        let storage = Rc::new(MemoryStorage::with_entry(
            SESSION_KEY,
            r#"{"state":{"user":{"id":"u1","phone":"9876543210"},"token":"","isAuthenticated":true},"version":0}"#,
        ));
        let store = SessionStore::new(storage);

        assert_eq!(store.session(), Session::Anonymous);
        assert!(store.persisted_token().is_none());
    }

    #[test]
    fn test_malformed_storage_starts_anonymous() {
        let storage = Rc::new(MemoryStorage::with_entry(SESSION_KEY, "][ definitely not json"));
        let store = SessionStore::new(storage);

        assert_eq!(store.session(), Session::Anonymous);
        assert!(store.persisted_token().is_none());
    }

    #[test]
    fn test_inconsistent_storage_starts_anonymous() {
        let storage = Rc::new(MemoryStorage::with_entry(
            SESSION_KEY,
            r#"{"state":{"user":null,"token":"abc","isAuthenticated":true},"version":0}"#,
        ));
        let store = SessionStore::new(storage);
        assert_eq!(store.session(), Session::Anonymous);
    }

    #[test]
    fn test_persisted_token_reads_storage() {
        let (storage, store) = store();
        assert!(store.persisted_token().is_none());

        store.set_session(user(), AuthToken::new("abc"));
        assert_eq!(store.persisted_token(), Some(AuthToken::new("abc")));

        storage.remove(SESSION_KEY).unwrap();
        assert!(store.persisted_token().is_none());
    }

    #[test]
    fn test_subscribers_see_changes_until_dropped() {
        let (_, store) = store();
        let seen = Rc::new(RefCell::new(Vec::new()));

        let subscription = {
            let seen = seen.clone();
            store.subscribe(move |session| seen.borrow_mut().push(session.is_authenticated()))
        };

        store.set_session(user(), AuthToken::new("abc"));
        store.clear_session();
        // Already anonymous, nothing changes
        store.clear_session();
        assert_eq!(*seen.borrow(), vec![true, false]);

        drop(subscription);
        store.set_session(user(), AuthToken::new("abc"));
        assert_eq!(seen.borrow().len(), 2);
    }

    #[test]
    fn test_token_debug_is_redacted() {
        let token = AuthToken::new("super-secret");
        assert_eq!(format!("{token:?}"), "AuthToken(***)");
        assert_eq!(token.bearer(), "Bearer super-secret");
    }
}

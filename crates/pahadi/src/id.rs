//! Typed identifiers for the entities the client deals with.
//!
//! Users and profiles are identified by the backend, so their ids are only ever parsed.
//! Chat messages composed locally get a short generated id until the backend assigns one.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::LazyLock;
use std::sync::Mutex;
use tiny_id::{ExhaustionStrategy, ShortCodeGenerator};

type LazyShortCodeGenerator = LazyLock<Mutex<ShortCodeGenerator<char>>>;

/// Length of generated message ids.
pub const MESSAGE_ID_LENGTH: usize = 8;

// tiny_id steps a u64 LCG modulo alphabet^length. With 62 symbols anything past 9
// characters overflows, so the length is pinned instead of growing on exhaustion.
static MESSAGE_ID_GENERATOR: LazyShortCodeGenerator = LazyLock::new(|| {
    let alphabet: Vec<char> = "ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789"
        .chars()
        .collect();
    Mutex::new(
        ShortCodeGenerator::with_alphabet(alphabet, MESSAGE_ID_LENGTH)
            .exhaustion_strategy(ExhaustionStrategy::Cycle),
    )
});

/// A type-safe wrapper around string IDs.
///
/// The marker type keeps a [`UserId`] from being passed where a [`ProfileId`] is expected,
/// while the wire format stays a plain string.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Id<T> {
    value: String,
    _phantom: std::marker::PhantomData<T>,
}

// Serialize as just a string
impl<T> Serialize for Id<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.value.serialize(serializer)
    }
}

impl<'de, T> Deserialize<'de> for Id<T> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        Ok(Self::from_string(value))
    }
}

impl<T> Id<T> {
    /// Creates a new ID with the given value.
    ///
    /// # Example
    /// ```
    /// use pahadi::id::UserId;
    ///
    /// let user_id = UserId::from_string("u-42".to_string());
    /// assert_eq!(user_id.as_str(), "u-42");
    /// ```
    pub fn from_string(value: String) -> Self {
        Self {
            value,
            _phantom: std::marker::PhantomData,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.value
    }

    pub fn into_string(self) -> String {
        self.value
    }
}

impl<T> fmt::Debug for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Id({})", self.value)
    }
}

impl<T> fmt::Display for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

impl<T> From<String> for Id<T> {
    fn from(value: String) -> Self {
        Self::from_string(value)
    }
}

impl<T> From<&str> for Id<T> {
    fn from(value: &str) -> Self {
        Self::from_string(value.to_string())
    }
}

impl<T> AsRef<str> for Id<T> {
    fn as_ref(&self) -> &str {
        &self.value
    }
}

// Type markers for different entity types
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct UserMarker;

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ProfileMarker;

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MessageMarker;

/// Type alias for User IDs
pub type UserId = Id<UserMarker>;

/// Type alias for Profile IDs
pub type ProfileId = Id<ProfileMarker>;

/// Type alias for chat Message IDs
pub type MessageId = Id<MessageMarker>;

impl MessageId {
    /// Generates a local message id (8 alphanumeric characters).
    ///
    /// # Example
    /// ```
    /// use pahadi::id::MessageId;
    ///
    /// let id = MessageId::generate();
    /// assert_eq!(id.as_str().len(), 8);
    /// ```
    pub fn generate() -> Self {
        let mut generator = MESSAGE_ID_GENERATOR
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        Self::from_string(generator.next_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_id_generation() {
        let id1 = MessageId::generate();
        let id2 = MessageId::generate();

        assert_ne!(id1, id2);
        assert_eq!(id1.as_str().len(), MESSAGE_ID_LENGTH);
        assert!(id1.as_str().chars().all(|c| c.is_ascii_alphanumeric()));
    }

    #[test]
    fn test_message_ids_stay_unique_over_many_calls() {
        let ids: std::collections::HashSet<MessageId> =
            (0..500).map(|_| MessageId::generate()).collect();

        assert_eq!(ids.len(), 500);
        assert!(ids.iter().all(|id| id.as_str().len() == MESSAGE_ID_LENGTH));
    }

    #[test]
    fn test_id_from_str() {
        let id: ProfileId = "p-7".into();
        assert_eq!(id.as_str(), "p-7");
        assert_eq!(id.to_string(), "p-7");
        assert_eq!(format!("{id:?}"), "Id(p-7)");
    }

    #[test]
    fn test_serde_as_plain_string() {
        let original = UserId::from_string("user-1".to_string());

        let serialized = serde_json::to_string(&original).unwrap();
        assert_eq!(serialized, "\"user-1\"");

        let deserialized: UserId = serde_json::from_str(&serialized).unwrap();
        assert_eq!(original, deserialized);
    }
}

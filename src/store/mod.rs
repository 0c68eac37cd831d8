//! State Store port.
//!
//! The engine persists settings, trigger bindings, game state, and the
//! action catalog as JSON blobs through the [`StateStore`] trait. The store
//! behind it is an external collaborator; nothing in the core names a
//! concrete storage medium.
//!
//! ## Durability Model
//!
//! Persistence is best-effort write-after-mutate. The [`load`] and [`save`]
//! helpers downgrade every storage failure to a `tracing` warning: a broken
//! store degrades the session to in-memory operation, it never breaks game
//! logic.

mod memory;

pub use memory::MemoryStore;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::triggers::Variant;

/// What a storage key holds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StoreKind {
    /// Variant rule parameters.
    Settings,
    /// Configured trigger bindings.
    TriggerBindings,
    /// A persisted game snapshot.
    GameState,
    /// The cached available-actions catalog.
    ActionCatalog,
}

impl StoreKind {
    /// Stable identifier used in key names.
    #[must_use]
    pub const fn slug(self) -> &'static str {
        match self {
            Self::Settings => "settings",
            Self::TriggerBindings => "trigger-bindings",
            Self::GameState => "game-state",
            Self::ActionCatalog => "action-catalog",
        }
    }
}

/// Namespaced storage key: `(variant?, kind)`.
///
/// Every kind is stored per variant except the action catalog, which the
/// variants share.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StorageKey {
    /// Owning variant; `None` for shared blobs.
    pub variant: Option<Variant>,

    /// What the key holds.
    pub kind: StoreKind,
}

impl StorageKey {
    /// Settings key for a variant.
    #[must_use]
    pub const fn settings(variant: Variant) -> Self {
        Self {
            variant: Some(variant),
            kind: StoreKind::Settings,
        }
    }

    /// Trigger-bindings key for a variant.
    #[must_use]
    pub const fn bindings(variant: Variant) -> Self {
        Self {
            variant: Some(variant),
            kind: StoreKind::TriggerBindings,
        }
    }

    /// Game-state key for a variant.
    #[must_use]
    pub const fn game_state(variant: Variant) -> Self {
        Self {
            variant: Some(variant),
            kind: StoreKind::GameState,
        }
    }

    /// The shared action-catalog key.
    #[must_use]
    pub const fn action_catalog() -> Self {
        Self {
            variant: None,
            kind: StoreKind::ActionCatalog,
        }
    }
}

impl std::fmt::Display for StorageKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.variant {
            Some(variant) => write!(f, "{}/{}", variant.slug(), self.kind.slug()),
            None => f.write_str(self.kind.slug()),
        }
    }
}

/// Error from a storage backend.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The backend could not be reached or refused the operation.
    #[error("storage backend unavailable: {0}")]
    Unavailable(String),

    /// A stored blob was not valid JSON for the expected shape.
    #[error("stored value could not be decoded: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Keyed JSON blob storage.
///
/// Implementations are handles: cloning one yields another view of the same
/// underlying storage.
pub trait StateStore {
    /// Fetch the blob stored under a key, if any.
    fn get(&self, key: &StorageKey) -> Result<Option<serde_json::Value>, StoreError>;

    /// Store a blob under a key, replacing any previous value.
    fn set(&self, key: &StorageKey, value: serde_json::Value) -> Result<(), StoreError>;
}

/// Load and decode a typed value from the store.
///
/// Returns `None` when the key is absent, the backend fails, or the blob
/// does not decode; the last two are logged.
pub fn load<T, S>(store: &S, key: &StorageKey) -> Option<T>
where
    T: DeserializeOwned,
    S: StateStore + ?Sized,
{
    let value = match store.get(key) {
        Ok(Some(value)) => value,
        Ok(None) => return None,
        Err(error) => {
            tracing::warn!(%key, %error, "state store read failed");
            return None;
        }
    };
    match serde_json::from_value(value) {
        Ok(decoded) => Some(decoded),
        Err(error) => {
            tracing::warn!(%key, %error, "stored value failed to decode");
            None
        }
    }
}

/// Encode and store a typed value, best-effort.
///
/// A failed write is logged and dropped; the in-memory state it was meant to
/// persist stands.
pub fn save<T, S>(store: &S, key: &StorageKey, value: &T)
where
    T: Serialize,
    S: StateStore + ?Sized,
{
    let json = match serde_json::to_value(value) {
        Ok(json) => json,
        Err(error) => {
            tracing::warn!(%key, %error, "value failed to encode; not persisted");
            return;
        }
    };
    if let Err(error) = store.set(key, json) {
        tracing::warn!(%key, %error, "state store write failed; continuing in memory");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_names() {
        assert_eq!(
            StorageKey::settings(Variant::Generic).to_string(),
            "generic/settings"
        );
        assert_eq!(
            StorageKey::bindings(Variant::Farkle).to_string(),
            "farkle/trigger-bindings"
        );
        assert_eq!(
            StorageKey::game_state(Variant::SkullKing).to_string(),
            "skull-king/game-state"
        );
        assert_eq!(StorageKey::action_catalog().to_string(), "action-catalog");
    }

    #[test]
    fn test_load_save_round_trip() {
        let store = MemoryStore::new();
        let key = StorageKey::settings(Variant::Generic);

        assert_eq!(load::<Vec<i64>, _>(&store, &key), None);

        save(&store, &key, &vec![1i64, 2, 3]);
        assert_eq!(load::<Vec<i64>, _>(&store, &key), Some(vec![1, 2, 3]));
    }

    #[test]
    fn test_load_undecodable_blob_is_none() {
        let store = MemoryStore::new();
        let key = StorageKey::settings(Variant::Generic);

        store.set(&key, serde_json::json!("not a list")).unwrap();
        assert_eq!(load::<Vec<i64>, _>(&store, &key), None);
    }

    struct BrokenStore;

    impl StateStore for BrokenStore {
        fn get(&self, _key: &StorageKey) -> Result<Option<serde_json::Value>, StoreError> {
            Err(StoreError::Unavailable("offline".into()))
        }

        fn set(&self, _key: &StorageKey, _value: serde_json::Value) -> Result<(), StoreError> {
            Err(StoreError::Unavailable("offline".into()))
        }
    }

    #[test]
    fn test_broken_store_is_swallowed() {
        let store = BrokenStore;
        let key = StorageKey::game_state(Variant::Farkle);

        save(&store, &key, &42i64);
        assert_eq!(load::<i64, _>(&store, &key), None);
    }
}

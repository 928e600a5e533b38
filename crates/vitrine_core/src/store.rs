//! Keyed widget state
//!
//! Component state (one-shot flags, key-sequence progress, pending form
//! submissions) lives in a store owned by the page, addressed by a string key
//! and the value type, instead of in ambient globals.
//!
//! ```rust
//! use vitrine_core::store::StateStore;
//!
//! let mut store = StateStore::new();
//! *store.use_state_keyed("konami", || 0usize) += 1;
//! assert_eq!(store.get::<usize>("konami"), Some(&1));
//! ```

use rustc_hash::FxHashMap;
use std::any::{Any, TypeId};
use std::hash::{Hash, Hasher};

/// Key for identifying a value in the store
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct StateKey {
    /// Hash of the user-provided key
    key_hash: u64,
    /// Type ID of the stored value
    type_id: TypeId,
}

impl StateKey {
    /// Create a new StateKey from a hashable key and type
    pub fn new<T: 'static, K: Hash + ?Sized>(key: &K) -> Self {
        let mut hasher = rustc_hash::FxHasher::default();
        key.hash(&mut hasher);
        Self {
            key_hash: hasher.finish(),
            type_id: TypeId::of::<T>(),
        }
    }

    /// Create a StateKey from a string key and type
    pub fn from_string<T: 'static>(key: &str) -> Self {
        Self::new::<T, _>(key)
    }
}

/// Stores keyed state for the lifetime of a page
#[derive(Default)]
pub struct StateStore {
    values: FxHashMap<StateKey, Box<dyn Any>>,
}

impl StateStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the value for `key`, creating it with `init` on first use
    pub fn use_state_keyed<T: 'static>(&mut self, key: &str, init: impl FnOnce() -> T) -> &mut T {
        let slot = self
            .values
            .entry(StateKey::from_string::<T>(key))
            .or_insert_with(|| Box::new(init()));
        match slot.downcast_mut::<T>() {
            Some(value) => value,
            // The key embeds the TypeId, so the downcast always matches
            None => unreachable!("state key type mismatch"),
        }
    }

    pub fn get<T: 'static>(&self, key: &str) -> Option<&T> {
        self.values
            .get(&StateKey::from_string::<T>(key))
            .and_then(|value| value.downcast_ref::<T>())
    }

    pub fn get_mut<T: 'static>(&mut self, key: &str) -> Option<&mut T> {
        self.values
            .get_mut(&StateKey::from_string::<T>(key))
            .and_then(|value| value.downcast_mut::<T>())
    }

    /// Store a value, returning the previous one
    pub fn insert<T: 'static>(&mut self, key: &str, value: T) -> Option<T> {
        self.values
            .insert(StateKey::from_string::<T>(key), Box::new(value))
            .and_then(|old| old.downcast::<T>().ok())
            .map(|old| *old)
    }

    pub fn remove<T: 'static>(&mut self, key: &str) -> Option<T> {
        self.values
            .remove(&StateKey::from_string::<T>(key))
            .and_then(|old| old.downcast::<T>().ok())
            .map(|old| *old)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

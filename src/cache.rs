//! Read-through caches for tables and the species list
//!
//! Entries are populated once and never invalidated. Each entry has its own
//! initialisation lock, so only one caller ever loads a given key; callers
//! asking for other keys are not blocked. A populated entry is read without
//! taking any lock.

use rustc_hash::FxHashMap;
use std::hash::Hash;
use std::sync::{Arc, Mutex, OnceLock, PoisonError};

/// A lazily populated value with single-writer initialisation
#[derive(Debug)]
pub struct Memo<V> {
    value: OnceLock<Arc<V>>,
    init_lock: Mutex<()>,
}

impl<V> Default for Memo<V> {
    fn default() -> Self {
        Self {
            value: OnceLock::new(),
            init_lock: Mutex::new(()),
        }
    }
}

impl<V> Memo<V> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Populated value, if any
    pub fn get(&self) -> Option<Arc<V>> {
        self.value.get().cloned()
    }

    /// Return the cached value, running `init` if this is the first access
    ///
    /// A failed `init` leaves the memo empty; the next caller retries.
    pub fn get_or_try_init<E>(&self, init: impl FnOnce() -> Result<V, E>) -> Result<Arc<V>, E> {
        if let Some(value) = self.value.get() {
            return Ok(Arc::clone(value));
        }

        // Entries are immutable once set, so a poisoned lock carries no torn state
        let _guard = self.init_lock.lock().unwrap_or_else(PoisonError::into_inner);

        // Another writer may have finished while we waited
        if let Some(value) = self.value.get() {
            return Ok(Arc::clone(value));
        }

        let value = Arc::new(init()?);
        let _ = self.value.set(Arc::clone(&value));
        Ok(value)
    }
}

/// Map of memo cells, one per key
#[derive(Debug)]
pub struct KeyedCache<K, V> {
    slots: Mutex<FxHashMap<K, Arc<Memo<V>>>>,
}

impl<K, V> Default for KeyedCache<K, V> {
    fn default() -> Self {
        Self {
            slots: Mutex::new(FxHashMap::default()),
        }
    }
}

impl<K: Eq + Hash, V> KeyedCache<K, V> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cached value for `key`, loading it with `init` on first access
    ///
    /// The slot map lock is only held to find the key's memo cell; loading
    /// happens under that cell's own lock.
    pub fn get_or_try_init<E>(
        &self,
        key: K,
        init: impl FnOnce() -> Result<V, E>,
    ) -> Result<Arc<V>, E> {
        let slot = {
            let mut slots = self.slots.lock().unwrap_or_else(PoisonError::into_inner);
            Arc::clone(slots.entry(key).or_default())
        };

        slot.get_or_try_init(init)
    }

    pub fn get(&self, key: &K) -> Option<Arc<V>> {
        let slots = self.slots.lock().unwrap_or_else(PoisonError::into_inner);
        slots.get(key).and_then(|slot| slot.get())
    }

    /// Number of populated entries
    pub fn len(&self) -> usize {
        let slots = self.slots.lock().unwrap_or_else(PoisonError::into_inner);
        slots.values().filter(|slot| slot.get().is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

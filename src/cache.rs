//! Bounded in-memory caches
//!
//! The optimizer keeps two caches: rendered conversation summaries and
//! warmed system prompts. Both are LRU-bounded at construction, so a
//! long-running process holds a fixed ceiling of entries no matter how many
//! customers pass through.

use std::hash::Hash;
use std::num::NonZeroUsize;

use lru::LruCache;

/// Entry counts of the optimizer's caches
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheStats {
    /// Entries in the conversation-summary cache
    pub summaries: usize,
    /// Entries in the system-prompt cache
    pub prompts: usize,
}

/// A bounded LRU cache.
///
/// Thin wrapper over [`lru::LruCache`] with the insert-and-read surface the
/// optimizer needs. A zero capacity is coerced to one entry.
pub(crate) struct BoundedCache<K: Hash + Eq, V> {
    entries: LruCache<K, V>,
}

impl<K: Hash + Eq, V> BoundedCache<K, V> {
    pub fn new(capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            entries: LruCache::new(capacity),
        }
    }

    /// Look up a key, marking the entry most recently used on a hit.
    pub fn get(&mut self, key: &K) -> Option<&V> {
        self.entries.get(key)
    }

    /// Insert a value, evicting the least recently used entry when full.
    pub fn insert(&mut self, key: K, value: V) {
        self.entries.put(key, value);
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn capacity(&self) -> usize {
        self.entries.cap().get()
    }
}

impl<K: Hash + Eq, V> std::fmt::Debug for BoundedCache<K, V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BoundedCache")
            .field("len", &self.len())
            .field("capacity", &self.capacity())
            .finish_non_exhaustive()
    }
}

//! Bounded least-recently-used memoization cache.

use std::hash::Hash;
use std::num::NonZeroUsize;

use lru::LruCache;

/// A bounded key-value cache evicting the least-recently-used entry.
///
/// Both [`get`](Self::get) and [`set`](Self::set) count as a use. Stored
/// values are returned unchanged, so a cache hit is indistinguishable from
/// recomputing the value.
pub struct MemoCache<K: Hash + Eq, V> {
    entries: LruCache<K, V>,
    hits: u64,
    misses: u64,
}

impl<K: Hash + Eq, V: Clone> MemoCache<K, V> {
    /// Create a cache holding at most `capacity` entries (minimum 1).
    pub fn new(capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            entries: LruCache::new(capacity),
            hits: 0,
            misses: 0,
        }
    }

    /// Look up `key`, marking it as recently used.
    pub fn get(&mut self, key: &K) -> Option<V> {
        match self.entries.get(key) {
            Some(v) => {
                self.hits += 1;
                Some(v.clone())
            }
            None => {
                self.misses += 1;
                None
            }
        }
    }

    /// Look up `key` without touching recency or the hit counters.
    pub fn peek(&self, key: &K) -> Option<&V> {
        self.entries.peek(key)
    }

    /// Whether `key` is cached.
    pub fn contains(&self, key: &K) -> bool {
        self.entries.contains(key)
    }

    /// Store `value` under `key`.
    ///
    /// Returns the evicted entry if the cache was full and `key` was new.
    pub fn set(&mut self, key: K, value: V) -> Option<(K, V)> {
        if self.entries.contains(&key) {
            self.entries.put(key, value);
            return None;
        }
        self.entries.push(key, value)
    }

    /// Remove every entry. Hit and miss counters are kept.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Number of cached entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Maximum number of entries.
    pub fn capacity(&self) -> usize {
        self.entries.cap().get()
    }

    /// Number of successful lookups so far.
    pub fn hits(&self) -> u64 {
        self.hits
    }

    /// Number of failed lookups so far.
    pub fn misses(&self) -> u64 {
        self.misses
    }
}

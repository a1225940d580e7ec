//! Memoization of legality answers.
//!
//! Every legality query is a pure function of the board, the history and the
//! queried side or square. Sessions keep one `MemoCache` per query kind and
//! clear it whenever the history changes, so an answer is recomputed only
//! after the last move or the queried key changes.

use std::cell::RefCell;
use std::hash::Hash;

use rustc_hash::FxHashMap;
use tracing::trace;

/// Interior-mutable memo table.
///
/// Lookups take `&self` so read-only session queries can fill the cache.
#[derive(Debug)]
pub struct MemoCache<K, V> {
    entries: RefCell<FxHashMap<K, V>>,
    enabled: bool,
}

impl<K, V> Default for MemoCache<K, V> {
    fn default() -> Self {
        Self::new(true)
    }
}

impl<K, V> Clone for MemoCache<K, V> {
    /// Clones start cold.
    fn clone(&self) -> Self {
        Self::new(self.enabled)
    }
}

impl<K, V> MemoCache<K, V> {
    /// Create a cache. A disabled cache computes every answer afresh.
    #[must_use]
    pub fn new(enabled: bool) -> Self {
        Self {
            entries: RefCell::new(FxHashMap::default()),
            enabled,
        }
    }

    /// Forget every stored answer.
    pub fn clear(&self) {
        self.entries.borrow_mut().clear();
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }
}

impl<K: Eq + Hash + std::fmt::Debug, V: Clone> MemoCache<K, V> {
    /// Return the stored answer for `key`, computing and storing it on a miss.
    pub fn get_or_compute(&self, key: K, compute: impl FnOnce() -> V) -> V {
        if !self.enabled {
            return compute();
        }
        if let Some(value) = self.entries.borrow().get(&key) {
            return value.clone();
        }
        trace!(?key, "legality cache miss");
        let value = compute();
        self.entries.borrow_mut().insert(key, value.clone());
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn test_computes_once() {
        let cache: MemoCache<u8, u32> = MemoCache::default();
        let calls = Cell::new(0);

        let compute = || {
            calls.set(calls.get() + 1);
            42
        };
        assert_eq!(cache.get_or_compute(1, compute), 42);
        assert_eq!(cache.get_or_compute(1, compute), 42);
        assert_eq!(calls.get(), 1);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_clear_forces_recompute() {
        let cache: MemoCache<u8, u32> = MemoCache::default();
        cache.get_or_compute(1, || 1);
        cache.clear();
        assert!(cache.is_empty());
        assert_eq!(cache.get_or_compute(1, || 2), 2);
    }

    #[test]
    fn test_disabled_never_stores() {
        let cache: MemoCache<u8, u32> = MemoCache::new(false);
        assert_eq!(cache.get_or_compute(1, || 1), 1);
        assert_eq!(cache.get_or_compute(1, || 2), 2);
        assert!(cache.is_empty());
    }
}

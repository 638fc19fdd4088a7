/*!
 * Per-Alias Locking
 * One exclusive section per sandbox root
 */

use ahash::RandomState;
use dashmap::DashMap;
use parking_lot::Mutex;
use std::sync::Arc;

/// Serializes operations on the same alias
///
/// Requests for different aliases never contend. When disabled, operations
/// race at the filesystem the way independent processes would.
#[derive(Debug, Clone)]
pub struct AliasLocks {
    enabled: bool,
    locks: Arc<DashMap<String, Arc<Mutex<()>>, RandomState>>,
}

impl AliasLocks {
    pub fn new(enabled: bool) -> Self {
        Self {
            enabled,
            locks: Arc::new(DashMap::with_hasher(RandomState::new())),
        }
    }

    /// Run `f` inside the exclusive section for `alias`
    pub fn with_alias<R>(&self, alias: &str, f: impl FnOnce() -> R) -> R {
        if !self.enabled {
            return f();
        }

        // Clone out of the map so the shard lock is not held while waiting
        let lock = self
            .locks
            .entry(alias.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone();
        let result = {
            let _guard = lock.lock();
            f()
        };
        drop(lock);

        // Only the map's own reference left: nobody holds or waits on it
        self.locks
            .remove_if(alias, |_, entry| Arc::strong_count(entry) == 1);
        result
    }

    /// Number of aliases with a lock currently held or awaited
    pub fn tracked(&self) -> usize {
        self.locks.len()
    }
}

impl Default for AliasLocks {
    fn default() -> Self {
        Self::new(true)
    }
}

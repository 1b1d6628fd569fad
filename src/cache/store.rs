//! TTL Cache Store
//!
//! HashMap-backed store where every entry expires a fixed duration after it
//! was set. Expiry is checked lazily on read; nothing sweeps in the background.

use std::collections::HashMap;
use std::time::Duration;

use tracing::debug;

use crate::cache::{CacheEntry, CacheStats, DEFAULT_TTL_MINUTES};

// == TTL Cache ==
/// Key-value cache with one global TTL fixed at construction.
///
/// The map is unbounded in count. Keys are compared verbatim, so callers
/// normalize them (trim, hash) before use.
#[derive(Debug)]
pub struct TtlCache<T> {
    /// Key-value storage
    entries: HashMap<String, CacheEntry<T>>,
    /// Lifetime of every entry, measured from its last `set`
    ttl: Duration,
    /// Lookup statistics
    stats: CacheStats,
}

impl<T: Clone> TtlCache<T> {
    // == Constructor ==
    /// Creates an empty cache whose entries live for `ttl`.
    ///
    /// # Arguments
    /// * `ttl` - Lifetime of every entry, measured from its last `set`
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: HashMap::new(),
            ttl,
            stats: CacheStats::new(),
        }
    }

    /// Creates an empty cache with a TTL expressed in whole minutes.
    pub fn with_ttl_minutes(minutes: u64) -> Self {
        Self::new(Duration::from_secs(minutes.saturating_mul(60)))
    }

    // == Set ==
    /// Stores `value` under `key`, stamped with the current time.
    ///
    /// Any previous entry for the key is discarded and the TTL restarts.
    ///
    /// # Arguments
    /// * `key` - The key to store, compared verbatim
    /// * `value` - The value to store
    pub fn set(&mut self, key: impl Into<String>, value: T) {
        self.entries.insert(key.into(), CacheEntry::new(value));
        self.stats.set_total_entries(self.entries.len());
    }

    // == Get ==
    /// Returns the value for `key` if present and not older than the TTL.
    ///
    /// An expired entry is removed as a side effect and reported as absent.
    pub fn get(&mut self, key: &str) -> Option<T> {
        let expired = match self.entries.get(key) {
            Some(entry) if !entry.is_expired(self.ttl) => {
                self.stats.record_hit();
                return Some(entry.value.clone());
            }
            Some(_) => true,
            None => false,
        };

        if expired {
            self.entries.remove(key);
            self.stats.record_expiration();
            self.stats.set_total_entries(self.entries.len());
            debug!(key, "evicted expired cache entry");
        }
        self.stats.record_miss();
        None
    }

    // == Clear ==
    /// Removes every entry unconditionally.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.stats.set_total_entries(0);
    }

    // == Stats ==
    /// Returns current cache statistics.
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.set_total_entries(self.entries.len());
        stats
    }

    /// The TTL applied to every entry.
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Number of stored entries, including expired ones not yet read.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    // == Is Empty ==
    /// Returns true if the cache holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<T: Clone> Default for TtlCache<T> {
    fn default() -> Self {
        Self::with_ttl_minutes(DEFAULT_TTL_MINUTES)
    }
}

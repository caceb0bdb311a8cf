//! In-memory cache implementation.
//!
//! [`MemoryCache`] keeps every entry in one process-wide map guarded by a
//! `RwLock`. Buckets are views onto that map with namespaced keys, so clones
//! of a cache (and every bucket opened from them) see the same entries.
//!
//! An expired entry is dropped when it is read, and every
//! `SWEEP_INTERVAL`th write sweeps the whole map, so keys that are never
//! read again do not pile up. A zero TTL stores nothing.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, RwLock};
use std::time::{Duration, Instant};

use crate::{Cache, CacheBucket};

/// Stand-in expiry for TTLs too large to add to an `Instant`.
const FAR_FUTURE: Duration = Duration::from_secs(100 * 365 * 24 * 60 * 60);

/// Writes between full sweeps of expired entries.
const SWEEP_INTERVAL: usize = 256;

/// A stored value and the instant it stops being valid.
#[derive(Debug)]
struct Entry {
    value: Vec<u8>,
    expires_at: Instant,
}

impl Entry {
    fn is_fresh(&self, now: Instant) -> bool {
        self.expires_at > now
    }
}

type Entries = HashMap<String, Entry>;

#[derive(Debug, Default)]
struct Shared {
    entries: RwLock<Entries>,
    writes: AtomicUsize,
}

/// Drop expired entries, returning how many went.
fn sweep(entries: &mut Entries, now: Instant) -> usize {
    let before = entries.len();
    entries.retain(|_, entry| entry.is_fresh(now));
    before - entries.len()
}

/// Process-wide in-memory [`Cache`].
#[derive(Clone, Debug, Default)]
pub struct MemoryCache {
    shared: Arc<Shared>,
}

impl MemoryCache {
    /// Create an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored entries, including expired ones not yet swept.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn len(&self) -> usize {
        self.shared.entries.read().unwrap().len()
    }

    /// Whether the cache holds no entries at all.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop every expired entry now.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    pub fn purge_expired(&self) {
        let mut entries = self.shared.entries.write().unwrap();
        let purged = sweep(&mut entries, Instant::now());
        tracing::debug!(purged, remaining = entries.len(), "Purged expired cache entries");
    }
}

impl Cache for MemoryCache {
    fn bucket(&self, name: &str) -> Box<dyn CacheBucket> {
        Box::new(MemoryCacheBucket {
            prefix: format!("{name}/"),
            shared: Arc::clone(&self.shared),
        })
    }
}

/// A namespaced view onto a [`MemoryCache`].
struct MemoryCacheBucket {
    prefix: String,
    shared: Arc<Shared>,
}

impl MemoryCacheBucket {
    fn full_key(&self, key: &str) -> String {
        format!("{}{key}", self.prefix)
    }
}

impl CacheBucket for MemoryCacheBucket {
    fn get(&self, key: &str) -> Option<Vec<u8>> {
        let full_key = self.full_key(key);
        let now = Instant::now();

        {
            let entries = self.shared.entries.read().unwrap();
            match entries.get(&full_key) {
                Some(entry) if entry.is_fresh(now) => return Some(entry.value.clone()),
                Some(_) => {}
                None => return None,
            }
        }

        // Expired: drop it unless another writer replaced it meanwhile
        let mut entries = self.shared.entries.write().unwrap();
        if entries.get(&full_key).is_some_and(|e| !e.is_fresh(now)) {
            entries.remove(&full_key);
        }
        None
    }

    fn set(&self, key: &str, value: &[u8], ttl: Duration) {
        let now = Instant::now();
        let full_key = self.full_key(key);
        let writes = self.shared.writes.fetch_add(1, Ordering::Relaxed) + 1;
        let mut entries = self.shared.entries.write().unwrap();

        if writes % SWEEP_INTERVAL == 0 {
            let purged = sweep(&mut entries, now);
            tracing::debug!(purged, remaining = entries.len(), "Swept expired cache entries");
        }

        if ttl.is_zero() {
            entries.remove(&full_key);
            return;
        }
        let expires_at = now.checked_add(ttl).unwrap_or(now + FAR_FUTURE);
        entries.insert(
            full_key,
            Entry {
                value: value.to_vec(),
                expires_at,
            },
        );
    }
}

//! Short-lived caching of rendered documentation.
//!
//! A [`Cache`] hands out named [`CacheBucket`]s; a bucket maps string keys to
//! byte payloads that expire after a per-entry time-to-live.
//! [`CacheBucketExt::remember`] adds typed get-or-compute on top.
//!
//! Backends: [`MemoryCache`] (process-wide map), [`FileCache`] (one file per
//! entry, survives restarts) and [`NullCache`] (caching off).
//!
//! ```
//! use std::time::Duration;
//! use vdoc_cache::{Cache, CacheBucketExt, MemoryCache};
//!
//! let cache = MemoryCache::new();
//! let bucket = cache.bucket("pages");
//! let html: Result<Option<String>, ()> =
//!     bucket.remember("docs.5.4.index", Duration::from_secs(5), || {
//!         Ok(Some("<ul></ul>".to_owned()))
//!     });
//! assert_eq!(html, Ok(Some("<ul></ul>".to_owned())));
//! ```

mod ext;
mod file;
mod memory;

use std::time::Duration;

pub use ext::CacheBucketExt;
pub use file::FileCache;
pub use memory::MemoryCache;

/// Expiring key-value store. An expired entry is indistinguishable from a
/// missing one.
pub trait CacheBucket: Send + Sync {
    /// Payload stored under `key`, unless absent or expired.
    fn get(&self, key: &str) -> Option<Vec<u8>>;

    /// Store `value` under `key` for `ttl`, replacing any previous entry.
    /// With a zero `ttl` the entry is expired immediately.
    fn set(&self, key: &str, value: &[u8], ttl: Duration);
}

/// Source of isolated [`CacheBucket`]s.
pub trait Cache: Send + Sync {
    /// Bucket called `name`. Handles for the same name see the same entries.
    fn bucket(&self, name: &str) -> Box<dyn CacheBucket>;
}

/// Bucket that stores nothing.
pub struct NullCacheBucket;

impl CacheBucket for NullCacheBucket {
    fn get(&self, _key: &str) -> Option<Vec<u8>> {
        None
    }

    fn set(&self, _key: &str, _value: &[u8], _ttl: Duration) {}
}

/// Disabled cache: every lookup misses.
pub struct NullCache;

impl Cache for NullCache {
    fn bucket(&self, _name: &str) -> Box<dyn CacheBucket> {
        Box::new(NullCacheBucket)
    }
}

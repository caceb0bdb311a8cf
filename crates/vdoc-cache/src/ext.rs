//! Extension trait for [`CacheBucket`] with typed convenience methods.

use std::time::Duration;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::CacheBucket;

/// Typed convenience methods for [`CacheBucket`].
///
/// Provides `get_json`/`set_json` for serde-serializable types and
/// [`remember`] for get-or-compute. These are default methods on an extension trait so that:
///
/// - [`CacheBucket`] stays object-safe with no serde dependency
/// - Implementors only need to handle raw bytes
/// - Callers get ergonomic typed access via a blanket impl
///
/// [`remember`]: CacheBucketExt::remember
pub trait CacheBucketExt: CacheBucket {
    /// Retrieve a JSON-deserialized value from the cache.
    ///
    /// Returns `None` on cache miss, expiry, or deserialization failure.
    fn get_json<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let bytes = self.get(key)?;
        serde_json::from_slice(&bytes).ok()
    }

    /// Store a value as JSON in the cache.
    ///
    /// Silently does nothing if serialization fails.
    fn set_json<T: Serialize>(&self, key: &str, value: &T, ttl: Duration) {
        if let Ok(bytes) = serde_json::to_vec(value) {
            self.set(key, &bytes, ttl);
        }
    }

    /// Return the cached value for `key`, computing and storing it on a miss.
    ///
    /// On a hit `compute` is not called. On a miss it is called exactly once
    /// and its value is stored for `ttl`. Values round-trip through JSON, so
    /// `Option::None` is cached like any other value and later lookups return
    /// it without recomputing. Errors from `compute` are returned as-is and
    /// nothing is stored.
    ///
    /// There is no de-duplication: two callers missing the same key at the
    /// same time both compute.
    fn remember<T, E, F>(&self, key: &str, ttl: Duration, compute: F) -> Result<T, E>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce() -> Result<T, E>,
    {
        if let Some(value) = self.get_json(key) {
            tracing::debug!(key, "Cache hit");
            return Ok(value);
        }

        tracing::debug!(key, "Cache miss");
        let value = compute()?;
        self.set_json(key, &value, ttl);
        Ok(value)
    }
}

impl<B: CacheBucket + ?Sized> CacheBucketExt for B {}

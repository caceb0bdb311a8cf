//! `[cache]` table.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use serde::Deserialize;

const DEFAULT_TTL_SECS: u64 = 5;

/// Where rendered pages are kept between requests.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CacheBackend {
    #[default]
    Memory,
    /// Entry files under `.vdoc/cache/`.
    File,
    /// Render on every lookup.
    None,
}

impl CacheBackend {
    const ALL: [Self; 3] = [Self::Memory, Self::File, Self::None];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Memory => "memory",
            Self::File => "file",
            Self::None => "none",
        }
    }
}

impl fmt::Display for CacheBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CacheBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|backend| backend.as_str() == s)
            .ok_or_else(|| format!("unknown cache backend '{s}' (expected memory, file or none)"))
    }
}

/// Page cache settings.
#[derive(Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    pub backend: CacheBackend,
    /// Lifetime of a cached page in seconds. Zero disables reuse.
    pub ttl_secs: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            backend: CacheBackend::default(),
            ttl_secs: DEFAULT_TTL_SECS,
        }
    }
}

impl CacheConfig {
    #[must_use]
    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_secs)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_backend_names_round_trip() {
        for backend in CacheBackend::ALL {
            assert_eq!(backend.to_string().parse::<CacheBackend>(), Ok(backend));
        }
    }

    #[test]
    fn test_unknown_backend_lists_choices() {
        let err = "redis".parse::<CacheBackend>().unwrap_err();
        assert!(err.contains("'redis'"), "{err}");
        assert!(err.contains("memory, file or none"), "{err}");
    }

    #[test]
    fn test_defaults() {
        let cache = CacheConfig::default();
        assert_eq!(cache.backend, CacheBackend::Memory);
        assert_eq!(cache.ttl(), Duration::from_secs(5));
    }
}

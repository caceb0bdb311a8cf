//! On-disk cache that survives process restarts.
//!
//! Entry files are `[expires_at_ms: u64 LE][payload]`, where `expires_at_ms`
//! is a Unix timestamp in milliseconds. The header is checked before the
//! payload is read, and stale files are deleted on sight.
//!
//! The cache root holds a `VERSION` stamp. A root stamped by a different
//! build, or not stamped at all, is emptied before use.

use std::fs::{self, File};
use std::io::{self, Read};
use std::path::{Component, Path, PathBuf};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use crate::{Cache, CacheBucket};

const STAMP_FILE: &str = "VERSION";
const HEADER_LEN: usize = 8;

/// [`Cache`] storing one file per entry under `{root}/{bucket}/{key}`.
///
/// ```text
/// .vdoc/cache/
/// +-- VERSION
/// +-- pages/docs.5.4.installation
/// +-- index/docs.5.4.index
/// ```
///
/// I/O failures never surface to callers: a failed write is a future miss.
#[derive(Debug)]
pub struct FileCache {
    root: PathBuf,
}

impl FileCache {
    /// Open the cache at `root` for build `version`, emptying it if it was
    /// written by another version.
    #[must_use]
    pub fn new(root: PathBuf, version: &str) -> Self {
        if let Err(e) = prepare_root(&root, version) {
            tracing::warn!(root = %root.display(), error = %e, "Cache directory unusable");
        }
        Self { root }
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl Cache for FileCache {
    fn bucket(&self, name: &str) -> Box<dyn CacheBucket> {
        Box::new(FileBucket {
            dir: self.root.join(name),
        })
    }
}

/// Make sure `root` exists and carries the `version` stamp.
fn prepare_root(root: &Path, version: &str) -> io::Result<()> {
    let stamp = root.join(STAMP_FILE);
    match fs::read_to_string(&stamp) {
        Ok(found) if found == version => return Ok(()),
        Ok(found) => {
            tracing::info!(%found, expected = version, "Cache built by another version, clearing");
        }
        Err(_) => tracing::info!(root = %root.display(), "Initialising cache"),
    }

    match fs::remove_dir_all(root) {
        Ok(()) => {}
        Err(e) if e.kind() == io::ErrorKind::NotFound => {}
        Err(e) => return Err(e),
    }
    fs::create_dir_all(root)?;
    fs::write(stamp, version)
}

struct FileBucket {
    dir: PathBuf,
}

impl FileBucket {
    /// Entry file for `key`, or `None` if the key would resolve outside the
    /// bucket directory.
    fn path_for(&self, key: &str) -> Option<PathBuf> {
        let relative = Path::new(key);
        let mut components = relative.components().peekable();
        components.peek()?;
        if components.all(|c| matches!(c, Component::Normal(_))) {
            Some(self.dir.join(relative))
        } else {
            tracing::debug!(key, "Rejected cache key");
            None
        }
    }
}

impl CacheBucket for FileBucket {
    fn get(&self, key: &str) -> Option<Vec<u8>> {
        let path = self.path_for(key)?;
        let mut file = File::open(&path).ok()?;

        let mut header = [0u8; HEADER_LEN];
        file.read_exact(&mut header).ok()?;
        if u64::from_le_bytes(header) <= unix_millis(SystemTime::now()) {
            drop(file);
            let _ = fs::remove_file(&path);
            return None;
        }

        let mut payload = Vec::new();
        file.read_to_end(&mut payload).ok()?;
        Some(payload)
    }

    fn set(&self, key: &str, value: &[u8], ttl: Duration) {
        let Some(path) = self.path_for(key) else {
            return;
        };
        let expires_at = SystemTime::now()
            .checked_add(ttl)
            .map_or(u64::MAX, unix_millis);

        let mut contents = Vec::with_capacity(HEADER_LEN + value.len());
        contents.extend_from_slice(&expires_at.to_le_bytes());
        contents.extend_from_slice(value);

        let written = path
            .parent()
            .map_or(Ok(()), fs::create_dir_all)
            .and_then(|()| fs::write(&path, &contents));
        if let Err(e) = written {
            tracing::debug!(path = %path.display(), error = %e, "Cache write failed");
        }
    }
}

fn unix_millis(at: SystemTime) -> u64 {
    at.duration_since(UNIX_EPOCH)
        .map_or(0, |d| u64::try_from(d.as_millis()).unwrap_or(u64::MAX))
}

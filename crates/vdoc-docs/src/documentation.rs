//! Documentation service.
//!
//! [`Documentation`] resolves a (version, page) pair to a Markdown file,
//! renders it, rewrites version links, annotates icons, and caches the
//! result for a short time-to-live.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use vdoc_cache::{Cache, CacheBucket, CacheBucketExt};
use vdoc_renderer::{BuiltinIcons, IconSet, MarkdownRenderer, annotate_icons, rewrite_links};
use vdoc_storage::Storage;

use crate::error::DocsError;
use crate::versions::DocVersions;

/// File name of a version's index page.
const INDEX_FILE: &str = "documentation.md";

/// Default time-to-live for rendered pages.
const DEFAULT_TTL: Duration = Duration::from_secs(5);

/// Cache key for a rendered page.
///
/// Versions and pages may both contain dots, so `%` and `.` in the page are
/// percent-encoded. The last `.` of a key then always separates the version
/// from the page, and distinct pairs never share a key.
#[must_use]
pub fn cache_key(version: &str, page: &str) -> String {
    let mut key = String::with_capacity(version.len() + page.len() + 8);
    key.push_str("docs.");
    key.push_str(version);
    key.push('.');
    for c in page.chars() {
        match c {
            '%' => key.push_str("%25"),
            '.' => key.push_str("%2E"),
            c => key.push(c),
        }
    }
    key
}

/// Cache key for a rendered version index.
///
/// Index entries live in their own bucket, so a page literally named `index`
/// does not share an entry with the version's index.
#[must_use]
pub fn index_cache_key(version: &str) -> String {
    format!("docs.{version}.index")
}

/// Construction options for [`Documentation`].
pub struct DocsOptions {
    /// How long rendered pages (and absences) are reused.
    pub ttl: Duration,
    /// Published versions.
    pub versions: DocVersions,
    /// Icons substituted for `{note}`-style markers.
    pub icons: Arc<dyn IconSet>,
}

impl Default for DocsOptions {
    fn default() -> Self {
        Self {
            ttl: DEFAULT_TTL,
            versions: DocVersions::default(),
            icons: Arc::new(BuiltinIcons),
        }
    }
}

/// Rendered documentation pages for every published version.
///
/// Safe to share across threads. Concurrent misses on the same page may
/// render it more than once; the results are identical.
pub struct Documentation {
    storage: Arc<dyn Storage>,
    pages: Box<dyn CacheBucket>,
    indexes: Box<dyn CacheBucket>,
    ttl: Duration,
    versions: DocVersions,
    icons: Arc<dyn IconSet>,
}

impl Documentation {
    /// Create a documentation service reading from `storage` and caching in `cache`.
    pub fn new(storage: Arc<dyn Storage>, cache: &dyn Cache, options: DocsOptions) -> Self {
        Self {
            storage,
            pages: cache.bucket("pages"),
            indexes: cache.bucket("index"),
            ttl: options.ttl,
            versions: options.versions,
            icons: options.icons,
        }
    }

    /// Rendered index page of `version`.
    ///
    /// Returns `Ok(None)` when the version has no `documentation.md`. Icon
    /// markers are left as written on the index.
    ///
    /// # Errors
    ///
    /// Returns [`DocsError::Storage`] if the index exists but cannot be read.
    /// Errors are not cached.
    pub fn index(&self, version: &str) -> Result<Option<String>, DocsError> {
        let path = Path::new(version).join(INDEX_FILE);
        self.indexes.remember(&index_cache_key(version), self.ttl, || {
            let Some(markdown) = self.read_if_exists(&path)? else {
                return Ok(None);
            };
            Ok(Some(rewrite_links(version, &render(&markdown))))
        })
    }

    /// Rendered `page` of `version`.
    ///
    /// Returns `Ok(None)` when `<version>/<page>.md` does not exist. The
    /// absence is cached like a rendered page.
    ///
    /// # Errors
    ///
    /// Returns [`DocsError::Storage`] if the page exists but cannot be read.
    /// Errors are not cached.
    pub fn get(&self, version: &str, page: &str) -> Result<Option<String>, DocsError> {
        let path = page_path(version, page);
        self.pages.remember(&cache_key(version, page), self.ttl, || {
            let Some(markdown) = self.read_if_exists(&path)? else {
                return Ok(None);
            };
            let html = rewrite_links(version, &render(&markdown));
            Ok(Some(annotate_icons(&html, self.icons.as_ref())))
        })
    }

    /// Whether `<version>/<page>.md` exists right now.
    ///
    /// Always asks storage; cached pages and cached absences are ignored.
    pub fn section_exists(&self, version: &str, page: &str) -> bool {
        self.storage.exists(&page_path(version, page))
    }

    /// Published versions in display order.
    pub fn doc_versions(&self) -> &DocVersions {
        &self.versions
    }

    /// Read a document, mapping absence to `None`.
    ///
    /// A file removed between the existence check and the read is absent too.
    fn read_if_exists(&self, path: &Path) -> Result<Option<String>, DocsError> {
        if !self.storage.exists(path) {
            tracing::debug!(path = %path.display(), "Document not found");
            return Ok(None);
        }
        match self.storage.read(path) {
            Ok(markdown) => Ok(Some(markdown)),
            Err(e) if e.is_not_found() => {
                tracing::debug!(path = %path.display(), "Document removed before read");
                Ok(None)
            }
            Err(e) => Err(e.into()),
        }
    }
}

fn page_path(version: &str, page: &str) -> PathBuf {
    Path::new(version).join(format!("{page}.md"))
}

fn render(markdown: &str) -> String {
    let html = MarkdownRenderer::new().render(markdown);
    tracing::debug!(bytes = html.len(), "Rendered document");
    html
}

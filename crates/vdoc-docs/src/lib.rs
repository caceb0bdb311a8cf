//! Versioned documentation service.
//!
//! [`Documentation`] is the entry point callers use: it maps a version and
//! page name to `<root>/<version>/<page>.md`, runs the rendering pipeline from
//! `vdoc-renderer`, and keeps the result in a short-lived cache.
//!
//! Missing pages are data, not errors: [`Documentation::get`] and
//! [`Documentation::index`] return `Ok(None)` for them.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//!
//! use vdoc_cache::MemoryCache;
//! use vdoc_docs::{DocsOptions, Documentation};
//! use vdoc_storage::MockStorage;
//!
//! let storage = MockStorage::new()
//!     .with_file("5.4/installation.md", "See [routing](/docs/{{version}}/routing).");
//! let cache = MemoryCache::new();
//! let docs = Documentation::new(Arc::new(storage), &cache, DocsOptions::default());
//!
//! let html = docs.get("5.4", "installation").unwrap().unwrap();
//! assert!(html.contains(r#"href="/docs/5.4/routing""#));
//! assert_eq!(docs.get("5.4", "billing").unwrap(), None);
//! ```

mod documentation;
mod error;
mod versions;

pub use documentation::{DocsOptions, Documentation, cache_key, index_cache_key};
pub use error::DocsError;
pub use versions::DocVersions;

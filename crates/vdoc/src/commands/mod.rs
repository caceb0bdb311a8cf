//! CLI command implementations.

pub(crate) mod exists;
pub(crate) mod render;
pub(crate) mod versions;

use std::path::Path;
use std::sync::Arc;

use vdoc_cache::{Cache, FileCache, MemoryCache, NullCache};
use vdoc_config::{CacheBackend, Config};
use vdoc_docs::{DocVersions, DocsOptions, Documentation};
use vdoc_renderer::{BuiltinIcons, DirectoryIcons, IconSet};
use vdoc_storage::FsStorage;

use crate::error::CliError;

pub(crate) use exists::ExistsArgs;
pub(crate) use render::RenderArgs;
pub(crate) use versions::list_versions;

/// Application version, stamped into the file cache.
const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build the documentation service described by `config`.
pub(crate) fn open_docs(config: &Config) -> Result<Documentation, CliError> {
    let storage = Arc::new(FsStorage::new(config.docs.root_dir.clone()));
    let cache = open_cache(config)?;

    let icons: Arc<dyn IconSet> = match &config.docs.icons_dir {
        Some(dir) => {
            let icons = DirectoryIcons::load(dir);
            tracing::info!(dir = %dir.display(), loaded = icons.loaded(), "Loaded icons");
            Arc::new(icons)
        }
        None => Arc::new(BuiltinIcons),
    };

    let versions = config.versions.as_ref().map_or_else(DocVersions::default, |entries| {
        DocVersions::new(entries.iter().map(|v| (v.id.as_str(), v.label.as_str())))
    });

    Ok(Documentation::new(
        storage,
        cache.as_ref(),
        DocsOptions {
            ttl: config.cache.ttl(),
            versions,
            icons,
        },
    ))
}

fn open_cache(config: &Config) -> Result<Box<dyn Cache>, CliError> {
    let cache: Box<dyn Cache> = match config.cache.backend {
        CacheBackend::Memory => Box::new(MemoryCache::new()),
        CacheBackend::File => {
            ensure_project_dir(&config.docs.project_dir)?;
            Box::new(FileCache::new(config.docs.cache_dir(), VERSION))
        }
        CacheBackend::None => Box::new(NullCache),
    };
    tracing::info!(
        backend = %config.cache.backend,
        ttl_secs = config.cache.ttl_secs,
        "Page cache initialised"
    );
    Ok(cache)
}

/// Ensure the `.vdoc/` project directory exists with a `.gitignore`.
fn ensure_project_dir(project_dir: &Path) -> Result<(), CliError> {
    std::fs::create_dir_all(project_dir)?;

    let gitignore_path = project_dir.join(".gitignore");
    if !gitignore_path.exists() {
        let _ = std::fs::write(&gitignore_path, "# Automatically created by vdoc\n*\n");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use std::fs;

    use pretty_assertions::assert_eq;
    use vdoc_config::CliSettings;

    use super::*;

    fn write_project(dir: &Path, toml: &str) {
        fs::write(dir.join("vdoc.toml"), toml).unwrap();
        let version_dir = dir.join("docs/5.4");
        fs::create_dir_all(&version_dir).unwrap();
        fs::write(version_dir.join("installation.md"), "> {tip} Hi").unwrap();
    }

    #[test]
    fn test_open_docs_with_file_cache() {
        let dir = tempfile::tempdir().unwrap();
        write_project(
            dir.path(),
            "[docs]\nroot_dir = \"docs\"\n\n[cache]\nbackend = \"file\"\n\n\
             [[versions]]\nid = \"5.4\"\nlabel = \"5.4 LTS\"\n",
        );

        let config = Config::load(Some(&dir.path().join("vdoc.toml")), None).unwrap();
        let docs = open_docs(&config).unwrap();

        let html = docs.get("5.4", "installation").unwrap().unwrap();
        assert!(html.starts_with(r#"<blockquote class="has-icon tip">"#));
        assert_eq!(docs.doc_versions().label("5.4"), Some("5.4 LTS"));
        assert!(config.docs.cache_dir().join("VERSION").exists());
        assert!(config.docs.project_dir.join(".gitignore").exists());
    }

    #[test]
    fn test_open_docs_defaults_versions_and_icons() {
        let dir = tempfile::tempdir().unwrap();
        write_project(dir.path(), "[docs]\nroot_dir = \"docs\"\n");
        let settings = CliSettings {
            cache_backend: Some(CacheBackend::None),
            ..CliSettings::default()
        };

        let config = Config::load(Some(&dir.path().join("vdoc.toml")), Some(&settings)).unwrap();
        let docs = open_docs(&config).unwrap();

        assert_eq!(docs.doc_versions(), &DocVersions::default());
        assert!(docs.section_exists("5.4", "installation"));
        assert!(!config.docs.project_dir.exists());
    }
}

//! Configuration for vdoc.
//!
//! Settings come from `vdoc.toml`, found in the working directory or one of
//! its parents, or given explicitly. Relative paths resolve against the
//! directory holding the file. [`CliSettings`] override file values.
//!
//! ```toml
//! [docs]
//! root_dir = "${DOCS_ROOT:-resources/docs}"
//! icons_dir = "resources/svg"
//!
//! [cache]
//! backend = "memory"   # memory | file | none
//! ttl_secs = 5
//!
//! [[versions]]
//! id = "master"
//! label = "Master"
//!
//! [[versions]]
//! id = "5.4"
//! label = "5.4"
//! ```
//!
//! `docs.root_dir` and `docs.icons_dir` expand `${VAR}` (which must be set)
//! and `${VAR:-default}`.

mod cache;
mod error;
mod expand;

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use serde::Deserialize;

pub use cache::{CacheBackend, CacheConfig};
pub use error::ConfigError;

use expand::expand_env;

const CONFIG_FILENAME: &str = "vdoc.toml";
const DEFAULT_ROOT_DIR: &str = "resources/docs";
const PROJECT_DIR: &str = ".vdoc";

/// Command-line overrides. `None` keeps the configured value.
#[derive(Debug, Default)]
pub struct CliSettings {
    pub root_dir: Option<PathBuf>,
    pub cache_backend: Option<CacheBackend>,
    pub ttl_secs: Option<u64>,
}

/// `vdoc.toml` as written, before expansion and path resolution.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ConfigFile {
    docs: DocsTable,
    cache: CacheConfig,
    versions: Option<Vec<VersionEntry>>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct DocsTable {
    root_dir: Option<String>,
    icons_dir: Option<String>,
}

impl DocsTable {
    fn resolve(self, base: &Path) -> Result<DocsConfig, ConfigError> {
        let root_dir = match self.root_dir {
            Some(dir) => expand_env(&dir, "docs.root_dir")?,
            None => DEFAULT_ROOT_DIR.to_owned(),
        };
        if root_dir.is_empty() {
            return Err(ConfigError::invalid("docs.root_dir cannot be empty"));
        }
        let icons_dir = self
            .icons_dir
            .map(|dir| expand_env(&dir, "docs.icons_dir"))
            .transpose()?;

        Ok(DocsConfig {
            root_dir: base.join(root_dir),
            icons_dir: icons_dir.map(|dir| base.join(dir)),
            project_dir: base.join(PROJECT_DIR),
        })
    }
}

/// Documentation locations, resolved to usable paths.
#[derive(Debug)]
pub struct DocsConfig {
    /// Markdown tree laid out as `<root>/<version>/<page>.md`.
    pub root_dir: PathBuf,
    /// `<icon>.svg` overrides.
    pub icons_dir: Option<PathBuf>,
    /// vdoc's own data directory (`.vdoc/`).
    pub project_dir: PathBuf,
}

impl DocsConfig {
    #[must_use]
    pub fn cache_dir(&self) -> PathBuf {
        self.project_dir.join("cache")
    }
}

/// A published documentation version.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct VersionEntry {
    /// Directory under the docs root, e.g. `5.4` or `master`.
    pub id: String,
    pub label: String,
}

impl VersionEntry {
    #[must_use]
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
        }
    }
}

/// Resolved configuration.
#[derive(Debug)]
pub struct Config {
    pub docs: DocsConfig,
    pub cache: CacheConfig,
    /// Published versions in display order. `None` means the built-in list.
    pub versions: Option<Vec<VersionEntry>>,
    /// File the configuration was read from, if any.
    pub config_path: Option<PathBuf>,
}

impl Config {
    /// Load `config_path`, or the nearest `vdoc.toml` above the working
    /// directory, or built-in defaults when there is none. `cli_settings`
    /// are applied last.
    ///
    /// # Errors
    ///
    /// Fails when an explicit `config_path` is missing, or when the file
    /// cannot be read, parsed, expanded or validated.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let cwd = std::env::current_dir()?;
        let path = match config_path {
            Some(path) if !path.exists() => return Err(ConfigError::NotFound(path.to_path_buf())),
            Some(path) => Some(path.to_path_buf()),
            None => discover(&cwd),
        };

        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::with_base(&cwd),
        };
        if let Some(settings) = cli_settings {
            config.apply(settings);
        }
        Ok(config)
    }

    /// Defaults, with paths relative to `base`.
    #[must_use]
    pub fn with_base(base: &Path) -> Self {
        Self {
            docs: DocsConfig {
                root_dir: base.join(DEFAULT_ROOT_DIR),
                icons_dir: None,
                project_dir: base.join(PROJECT_DIR),
            },
            cache: CacheConfig::default(),
            versions: None,
            config_path: None,
        }
    }

    /// Parse TOML whose relative paths are relative to `base`.
    ///
    /// # Errors
    ///
    /// Fails on malformed TOML, unset `${VAR}` references, or values that
    /// do not pass [`Config::validate`].
    pub fn from_toml(content: &str, base: &Path) -> Result<Self, ConfigError> {
        let file: ConfigFile = toml::from_str(content)?;
        let config = Self {
            docs: file.docs.resolve(base)?,
            cache: file.cache,
            versions: file.versions,
            config_path: None,
        };
        config.validate()?;
        Ok(config)
    }

    fn from_file(path: PathBuf) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(&path)?;
        let base = path.parent().unwrap_or(Path::new("."));
        let mut config = Self::from_toml(&content, base)?;
        config.config_path = Some(path);
        Ok(config)
    }

    fn apply(&mut self, settings: &CliSettings) {
        if let Some(root_dir) = &settings.root_dir {
            self.docs.root_dir.clone_from(root_dir);
        }
        if let Some(backend) = settings.cache_backend {
            self.cache.backend = backend;
        }
        if let Some(ttl_secs) = settings.ttl_secs {
            self.cache.ttl_secs = ttl_secs;
        }
    }

    /// Check the version list, when one is configured: it must be
    /// non-empty, and ids must be unique, non-empty directory names with
    /// non-empty labels.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Validation`] naming the first offending entry.
    pub fn validate(&self) -> Result<(), ConfigError> {
        match &self.versions {
            Some(versions) => validate_versions(versions),
            None => Ok(()),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::with_base(Path::new("."))
    }
}

/// Nearest `vdoc.toml` in `start` or one of its ancestors.
fn discover(start: &Path) -> Option<PathBuf> {
    start
        .ancestors()
        .map(|dir| dir.join(CONFIG_FILENAME))
        .find(|candidate| candidate.is_file())
}

fn validate_versions(versions: &[VersionEntry]) -> Result<(), ConfigError> {
    if versions.is_empty() {
        return Err(ConfigError::invalid("versions cannot be empty"));
    }

    let mut seen = HashSet::new();
    for (i, version) in versions.iter().enumerate() {
        let id = version.id.as_str();
        if id.is_empty() {
            return Err(ConfigError::invalid(format!("versions[{i}].id cannot be empty")));
        }
        if id == "." || id == ".." || id.contains(['/', '\\']) {
            return Err(ConfigError::invalid(format!(
                "versions[{i}].id must be a single directory name, got '{id}'"
            )));
        }
        if version.label.is_empty() {
            return Err(ConfigError::invalid(format!(
                "versions[{i}].label cannot be empty"
            )));
        }
        if !seen.insert(id) {
            return Err(ConfigError::invalid(format!(
                "versions[{i}].id '{id}' is listed more than once"
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    use super::*;

    fn versions(ids: &[&str]) -> Vec<VersionEntry> {
        ids.iter().map(|id| VersionEntry::new(*id, *id)).collect()
    }

    fn validation_message(result: Result<Config, ConfigError>) -> String {
        match result {
            Err(err @ ConfigError::Validation(_)) => err.to_string(),
            other => panic!("expected a validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_defaults_relative_to_base() {
        let config = Config::with_base(Path::new("/srv/site"));

        assert_eq!(config.docs.root_dir, PathBuf::from("/srv/site/resources/docs"));
        assert_eq!(config.docs.icons_dir, None);
        assert_eq!(config.docs.cache_dir(), PathBuf::from("/srv/site/.vdoc/cache"));
        assert_eq!(config.cache, CacheConfig::default());
        assert_eq!(config.versions, None);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_file_means_defaults() {
        let config = Config::from_toml("", Path::new("/srv/site")).unwrap();

        assert_eq!(config.docs.root_dir, PathBuf::from("/srv/site/resources/docs"));
        assert_eq!(config.cache.ttl(), Duration::from_secs(5));
        assert_eq!(config.versions, None);
    }

    #[test]
    fn test_full_file() {
        let toml = r#"
[docs]
root_dir = "docs"
icons_dir = "svg"

[cache]
backend = "file"
ttl_secs = 60

[[versions]]
id = "6.x"
label = "6.x"

[[versions]]
id = "master"
label = "Master"
"#;
        let config = Config::from_toml(toml, Path::new("/project")).unwrap();

        assert_eq!(config.docs.root_dir, PathBuf::from("/project/docs"));
        assert_eq!(config.docs.icons_dir, Some(PathBuf::from("/project/svg")));
        assert_eq!(config.docs.project_dir, PathBuf::from("/project/.vdoc"));
        assert_eq!(config.cache.backend, CacheBackend::File);
        assert_eq!(config.cache.ttl(), Duration::from_secs(60));
        assert_eq!(
            config.versions,
            Some(vec![
                VersionEntry::new("6.x", "6.x"),
                VersionEntry::new("master", "Master"),
            ])
        );
    }

    #[test]
    fn test_unknown_backend_is_parse_error() {
        let err = Config::from_toml("[cache]\nbackend = \"redis\"\n", Path::new("/")).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_empty_root_dir() {
        let message =
            validation_message(Config::from_toml("[docs]\nroot_dir = \"\"\n", Path::new("/")));
        assert!(message.contains("docs.root_dir"), "{message}");
    }

    #[test]
    fn test_env_expanded_before_resolution() {
        // SAFETY: variable is unique to this test
        unsafe { std::env::set_var("VDOC_CONFIG_TEST_ROOT", "/srv/laravel-docs") };

        let config = Config::from_toml(
            "[docs]\nroot_dir = \"${VDOC_CONFIG_TEST_ROOT}\"\nicons_dir = \"${VDOC_CONFIG_TEST_ICONS:-svg}\"\n",
            Path::new("/project"),
        )
        .unwrap();

        // An absolute expansion replaces the base directory
        assert_eq!(config.docs.root_dir, PathBuf::from("/srv/laravel-docs"));
        assert_eq!(config.docs.icons_dir, Some(PathBuf::from("/project/svg")));

        // SAFETY: see above
        unsafe { std::env::remove_var("VDOC_CONFIG_TEST_ROOT") };
    }

    #[test]
    fn test_unset_env_var() {
        let err = Config::from_toml(
            "[docs]\nicons_dir = \"${VDOC_CONFIG_TEST_UNSET}\"\n",
            Path::new("/project"),
        )
        .unwrap_err();

        assert!(matches!(err, ConfigError::EnvVar { .. }));
        assert!(err.to_string().contains("docs.icons_dir"));
    }

    #[test]
    fn test_cli_settings_override() {
        let mut config = Config::with_base(Path::new("/srv/site"));

        config.apply(&CliSettings {
            root_dir: Some(PathBuf::from("/custom/docs")),
            cache_backend: Some(CacheBackend::None),
            ttl_secs: Some(0),
        });

        assert_eq!(config.docs.root_dir, PathBuf::from("/custom/docs"));
        assert_eq!(config.docs.project_dir, PathBuf::from("/srv/site/.vdoc"));
        assert_eq!(config.cache.backend, CacheBackend::None);
        assert_eq!(config.cache.ttl(), Duration::ZERO);
    }

    #[test]
    fn test_empty_cli_settings_change_nothing() {
        let mut config = Config::with_base(Path::new("/srv/site"));

        config.apply(&CliSettings::default());

        assert_eq!(config.docs.root_dir, PathBuf::from("/srv/site/resources/docs"));
        assert_eq!(config.cache, CacheConfig::default());
    }

    #[test]
    fn test_discover_walks_up() {
        let tmp = TempDir::new().unwrap();
        let nested = tmp.path().join("app/http/controllers");
        std::fs::create_dir_all(&nested).unwrap();
        std::fs::write(tmp.path().join("app/vdoc.toml"), "").unwrap();

        assert_eq!(discover(&nested), Some(tmp.path().join("app/vdoc.toml")));
        assert_eq!(discover(tmp.path()), None);
    }

    #[test]
    fn test_discover_ignores_directories() {
        let tmp = TempDir::new().unwrap();
        std::fs::create_dir(tmp.path().join(CONFIG_FILENAME)).unwrap();

        assert_eq!(discover(tmp.path()), None);
    }

    #[test]
    fn test_load_explicit_path() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("vdoc.toml");
        std::fs::write(
            &path,
            "[cache]\nbackend = \"none\"\n\n[[versions]]\nid = \"5.4\"\nlabel = \"5.4\"\n",
        )
        .unwrap();

        let settings = CliSettings {
            ttl_secs: Some(30),
            ..CliSettings::default()
        };
        let config = Config::load(Some(&path), Some(&settings)).unwrap();

        assert_eq!(config.config_path, Some(path));
        assert_eq!(config.cache.backend, CacheBackend::None);
        assert_eq!(config.cache.ttl_secs, 30);
        assert_eq!(config.versions, Some(versions(&["5.4"])));
        assert_eq!(config.docs.root_dir, tmp.path().join("resources/docs"));
    }

    #[test]
    fn test_load_missing_explicit_path() {
        let tmp = TempDir::new().unwrap();

        let err = Config::load(Some(&tmp.path().join("missing.toml")), None).unwrap_err();

        assert!(matches!(err, ConfigError::NotFound(_)));
    }

    #[test]
    fn test_load_malformed_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("vdoc.toml");
        std::fs::write(&path, "[cache\n").unwrap();

        let err = Config::load(Some(&path), None).unwrap_err();

        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_load_runs_validation() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("vdoc.toml");
        std::fs::write(&path, "versions = []\n").unwrap();

        let message = validation_message(Config::load(Some(&path), None));
        assert!(message.contains("versions cannot be empty"), "{message}");
    }

    #[test]
    fn test_valid_version_lists() {
        assert!(validate_versions(&versions(&["master"])).is_ok());
        assert!(validate_versions(&versions(&["6.x", "master", "5.4"])).is_ok());
    }

    #[test]
    fn test_invalid_version_lists() {
        let mut unlabeled = versions(&["5.4"]);
        unlabeled[0].label = String::new();

        let cases = [
            (versions(&[]), "versions cannot be empty"),
            (versions(&["5.4", ""]), "versions[1].id cannot be empty"),
            (unlabeled, "versions[0].label cannot be empty"),
            (
                versions(&["master", "5.4", "5.3/../secrets"]),
                "versions[2].id must be a single directory name",
            ),
            (versions(&[".."]), "versions[0].id must be a single directory name"),
            (versions(&["5.4", "master", "5.4"]), "'5.4' is listed more than once"),
        ];

        for (list, expected) in cases {
            let message = validate_versions(&list).unwrap_err().to_string();
            assert!(message.contains(expected), "{expected:?} not in {message:?}");
        }
    }
}

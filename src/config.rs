//! # Configuration
//!
//! Two configuration files are involved in a run.
//!
//! - **Project configuration** (`.cocos-components.yaml`) lives in the root of
//!   the consumer project. It records which component library the project
//!   uses and where its asset root is.
//! - **Library configuration** (`cocos-components.config.json`) lives at the
//!   root of the component library. It is optional and describes the library
//!   itself, including where its registry is stored.
//!
//! ## Project configuration example
//!
//! ```yaml
//! repository: https://example.com/team/ui-kit.git
//! assets_dir: assets
//! components_path: assets/components
//! last_update: 2024-05-01T10:00:00+00:00
//! ```
//!
//! `library_path` may be set instead of (or in addition to) `repository` to
//! point at a local library checkout. When set, it always wins over the
//! cache location derived from the repository URL.

use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::defaults::{
    self, DEFAULT_ASSETS_DIR, DEFAULT_COMPONENTS_DIR, DEFAULT_COMPONENTS_PATH,
    DEFAULT_CONFIG_FILENAME, LIBRARY_CONFIG_FILENAME, REGISTRY_FILENAME,
};
use crate::error::{Error, Result};

fn default_assets_dir() -> String {
    DEFAULT_ASSETS_DIR.to_string()
}

/// Per-project settings, stored in `.cocos-components.yaml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectConfig {
    /// Git URL of the component library
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repository: Option<String>,

    /// Local library directory, used instead of the cached checkout
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub library_path: Option<PathBuf>,

    /// Asset root of the project, relative to the project root
    #[serde(default = "default_assets_dir")]
    pub assets_dir: String,

    /// Suggested install location, relative to the project root
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub components_path: Option<String>,

    /// Time of the last library fetch (RFC 3339)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_update: Option<String>,
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            repository: None,
            library_path: None,
            assets_dir: default_assets_dir(),
            components_path: Some(DEFAULT_COMPONENTS_PATH.to_string()),
            last_update: None,
        }
    }
}

impl ProjectConfig {
    /// Configuration for a project backed by a remote library.
    pub fn for_repository(url: impl Into<String>) -> Self {
        Self {
            repository: Some(url.into()),
            ..Self::default()
        }
    }

    /// Configuration for a project backed by a local library directory.
    pub fn for_library_path(path: impl Into<PathBuf>) -> Self {
        Self {
            library_path: Some(path.into()),
            ..Self::default()
        }
    }

    /// Path of the configuration file inside `project_dir`.
    pub fn path_in(project_dir: &Path) -> PathBuf {
        project_dir.join(DEFAULT_CONFIG_FILENAME)
    }

    /// Parse configuration from YAML text.
    pub fn parse(yaml_content: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml_content).map_err(|e| Error::ConfigParse {
            message: e.to_string(),
            hint: Some(format!(
                "Check the syntax of {} or recreate it with 'cocos-components init'",
                DEFAULT_CONFIG_FILENAME
            )),
        })?;
        Ok(config)
    }

    /// Load the configuration of the project at `project_dir`.
    ///
    /// Returns `Ok(None)` when the project has not been initialized.
    pub fn load(project_dir: &Path) -> Result<Option<Self>> {
        let path = Self::path_in(project_dir);
        if !path.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(&path)?;
        Self::parse(&content).map(Some)
    }

    /// Write the configuration into `project_dir`.
    pub fn save(&self, project_dir: &Path) -> Result<()> {
        let content = format!(
            "# cocos-components project configuration\n{}",
            serde_yaml::to_string(self)?
        );
        fs::write(Self::path_in(project_dir), content)?;
        Ok(())
    }

    /// Whether a library source is configured at all.
    pub fn has_library(&self) -> bool {
        self.repository.is_some() || self.library_path.is_some()
    }

    /// Local directory holding the component library.
    ///
    /// Relative `library_path` values are resolved against `project_dir`.
    pub fn library_root(&self, project_dir: &Path, cache_root: &Path) -> Option<PathBuf> {
        if let Some(path) = &self.library_path {
            return Some(project_dir.join(path));
        }
        self.repository
            .as_deref()
            .map(|url| defaults::repository_cache_path(cache_root, url))
    }

    /// Asset root of the project, the base of every declared target path.
    pub fn assets_root(&self, project_dir: &Path) -> PathBuf {
        project_dir.join(&self.assets_dir)
    }

    /// Record that the library was just fetched.
    pub fn touch_last_update(&mut self) {
        self.last_update = Some(chrono::Utc::now().to_rfc3339());
    }
}

/// `repository` block of the library configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LibraryRepository {
    #[serde(default, rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub url: String,
}

/// `components` block of the library configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LibraryLayout {
    /// Directory holding `registry.json`, relative to the library root
    #[serde(default)]
    pub directory: Option<String>,
    #[serde(default)]
    pub assets_directory: Option<String>,
}

/// Description of a component library, stored in `cocos-components.config.json`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LibraryConfig {
    pub name: String,
    #[serde(default)]
    pub version: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub repository: Option<LibraryRepository>,
    #[serde(default)]
    pub components: LibraryLayout,
}

impl LibraryConfig {
    /// Load the library configuration, if present and well-formed.
    pub fn load(library_root: &Path) -> Option<Self> {
        let path = library_root.join(LIBRARY_CONFIG_FILENAME);
        if !path.exists() {
            return None;
        }

        let parsed = fs::read_to_string(&path)
            .map_err(Error::from)
            .and_then(|content| serde_json::from_str::<Self>(&content).map_err(Error::from));

        match parsed {
            Ok(config) => {
                debug!("Loaded library config '{}' from {}", config.name, path.display());
                Some(config)
            }
            Err(e) => {
                warn!("Ignoring library config {}: {}", path.display(), e);
                None
            }
        }
    }

    /// Registry location when there is no library configuration.
    pub fn default_registry_path(library_root: &Path) -> PathBuf {
        library_root
            .join(DEFAULT_COMPONENTS_DIR)
            .join(REGISTRY_FILENAME)
    }

    /// Registry location for this library.
    pub fn registry_path(&self, library_root: &Path) -> PathBuf {
        match self.components.directory.as_deref() {
            Some(dir) if !dir.is_empty() => library_root.join(dir).join(REGISTRY_FILENAME),
            _ => Self::default_registry_path(library_root),
        }
    }
}

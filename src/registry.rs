//! # Component Registry
//!
//! The registry is the catalog of installable components: a list of
//! `{ name, path, displayName?, type? }` entries stored as
//! `components/registry.json` inside the component library. A run loads one
//! immutable [`Registry`] snapshot and passes it by reference to every
//! resolver call.
//!
//! ## Lookup
//!
//! [`Registry::find`] is an exact, case-sensitive match on `name`. Component
//! names double as the identifiers used in dependency lists, so no trimming or
//! case folding is applied. [`Registry::search`] is the only lenient lookup and
//! exists for listing.
//!
//! ## Missing or malformed registries
//!
//! [`Registry::load`] never fails. A missing registry file yields an empty
//! registry silently, a malformed one yields an empty registry and a logged
//! warning. Callers that need the parse error use [`Registry::try_load`].

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::config::LibraryConfig;
use crate::error::{Error, Result};

/// A single entry of the registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistryEntry {
    /// Unique component name
    pub name: String,
    /// Component directory, relative to the library root
    #[serde(rename = "path")]
    pub storage_path: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    /// Free-form kind (`ui`, `logic`, ...), used for grouping and filtering
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
}

impl RegistryEntry {
    pub fn new(name: impl Into<String>, storage_path: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            storage_path: storage_path.into(),
            display_name: None,
            kind: None,
        }
    }

    pub fn with_display_name(mut self, display_name: impl Into<String>) -> Self {
        self.display_name = Some(display_name.into());
        self
    }

    pub fn with_kind(mut self, kind: impl Into<String>) -> Self {
        self.kind = Some(kind.into());
        self
    }

    /// Display name, falling back to the component name.
    pub fn label(&self) -> &str {
        self.display_name.as_deref().unwrap_or(&self.name)
    }
}

/// On-disk shape of `registry.json`.
#[derive(Debug, Default, Serialize, Deserialize)]
struct RegistryFile {
    #[serde(default)]
    components: Vec<RegistryEntry>,
}

/// Immutable snapshot of the component catalog.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    root: PathBuf,
    entries: Vec<RegistryEntry>,
    index: HashMap<String, usize>,
}

impl Registry {
    /// Build a registry from entries whose storage paths are relative to `root`.
    ///
    /// If a name appears more than once, the first entry wins.
    pub fn new(root: impl Into<PathBuf>, entries: Vec<RegistryEntry>) -> Self {
        let mut kept = Vec::with_capacity(entries.len());
        let mut index = HashMap::with_capacity(entries.len());

        for entry in entries {
            if index.contains_key(&entry.name) {
                warn!(
                    "Duplicate registry entry '{}' ignored (first declaration wins)",
                    entry.name
                );
                continue;
            }
            index.insert(entry.name.clone(), kept.len());
            kept.push(entry);
        }

        Self {
            root: root.into(),
            entries: kept,
            index,
        }
    }

    /// An empty registry rooted at `root`.
    pub fn empty(root: impl Into<PathBuf>) -> Self {
        Self::new(root, Vec::new())
    }

    /// Load the registry of the library at `library_root`.
    ///
    /// Returns an empty registry when the registry file is missing or cannot
    /// be parsed.
    pub fn load(library_root: &Path) -> Self {
        match Self::try_load(library_root) {
            Ok(registry) => registry,
            Err(e) => {
                warn!("{}", e);
                Self::empty(library_root)
            }
        }
    }

    /// Load the registry, reporting parse failures.
    ///
    /// A missing file is still not an error and yields an empty registry.
    pub fn try_load(library_root: &Path) -> Result<Self> {
        let registry_path = LibraryConfig::load(library_root)
            .map(|config| config.registry_path(library_root))
            .unwrap_or_else(|| LibraryConfig::default_registry_path(library_root));

        Self::from_file(&registry_path, library_root)
    }

    /// Load a registry file whose entries are relative to `library_root`.
    pub fn from_file(registry_path: &Path, library_root: &Path) -> Result<Self> {
        if !registry_path.exists() {
            debug!("No registry at {}", registry_path.display());
            return Ok(Self::empty(library_root));
        }

        let content = fs::read_to_string(registry_path).map_err(|e| Error::RegistryLoad {
            path: registry_path.to_path_buf(),
            message: e.to_string(),
        })?;
        let file: RegistryFile =
            serde_json::from_str(&content).map_err(|e| Error::RegistryLoad {
                path: registry_path.to_path_buf(),
                message: e.to_string(),
            })?;

        debug!(
            "Loaded {} registry entries from {}",
            file.components.len(),
            registry_path.display()
        );
        Ok(Self::new(library_root, file.components))
    }

    /// Exact-match lookup by name.
    pub fn find(&self, name: &str) -> Option<&RegistryEntry> {
        self.index.get(name).map(|&i| &self.entries[i])
    }

    /// Library root the storage paths are relative to.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Absolute directory of a component in the library.
    pub fn component_dir(&self, entry: &RegistryEntry) -> PathBuf {
        self.root.join(&entry.storage_path)
    }

    pub fn entries(&self) -> &[RegistryEntry] {
        &self.entries
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Filter entries by exact kind, then by keyword.
    ///
    /// The keyword matches case-insensitively as a substring of either the
    /// name or the display name.
    pub fn search(&self, keyword: Option<&str>, kind: Option<&str>) -> Vec<&RegistryEntry> {
        let keyword = keyword.map(str::to_lowercase);

        self.entries
            .iter()
            .filter(|e| kind.is_none_or(|k| e.kind.as_deref() == Some(k)))
            .filter(|e| match &keyword {
                None => true,
                Some(kw) => {
                    e.name.to_lowercase().contains(kw.as_str())
                        || e
                            .display_name
                            .as_ref()
                            .is_some_and(|d| d.to_lowercase().contains(kw.as_str()))
                }
            })
            .collect()
    }

    /// Group entries by kind in first-seen order. Entries without a kind
    /// are grouped under `other`.
    pub fn group_by_kind<'a>(
        entries: &[&'a RegistryEntry],
    ) -> Vec<(String, Vec<&'a RegistryEntry>)> {
        let mut groups: Vec<(String, Vec<&'a RegistryEntry>)> = Vec::new();

        for &entry in entries {
            let kind = entry.kind.as_deref().unwrap_or("other");
            match groups.iter_mut().find(|(k, _)| k == kind) {
                Some((_, members)) => members.push(entry),
                None => groups.push((kind.to_string(), vec![entry])),
            }
        }

        groups
    }
}

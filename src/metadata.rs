//! # Component Metadata
//!
//! Every component directory in the library carries a `component.json`
//! declaration listing the files the component ships and the components it
//! depends on:
//!
//! ```json
//! {
//!   "name": "toast",
//!   "displayName": "Toast",
//!   "type": "ui",
//!   "version": "1.0.0",
//!   "files": [
//!     { "source": "Toast.ts", "target": "scripts/ui/Toast.ts", "type": "script" }
//!   ],
//!   "dependencies": ["event-bus"]
//! }
//! ```
//!
//! [`MetadataResolver`] loads declarations lazily and caches successful loads
//! by name for the duration of one run. The registry snapshot is immutable,
//! so the cache is never invalidated.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::defaults::COMPONENT_DECLARATION_FILENAME;
use crate::error::{Error, Result};
use crate::registry::Registry;

/// Broad category of a component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ComponentKind {
    Ui,
    Logic,
    Effect,
    Utility,
}

/// What kind of asset a declared file is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileKind {
    Script,
    Prefab,
    Scene,
    Texture,
    Material,
    Animation,
    #[default]
    #[serde(other)]
    Other,
}

/// One file shipped by a component.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileEntry {
    /// Path relative to the component directory
    #[serde(rename = "source")]
    pub source_relative_path: String,
    /// Path relative to the target asset root
    #[serde(rename = "target")]
    pub target_relative_path: String,
    #[serde(rename = "type", default)]
    pub file_kind: FileKind,
}

impl FileEntry {
    pub fn new(source: impl Into<String>, target: impl Into<String>, kind: FileKind) -> Self {
        Self {
            source_relative_path: source.into(),
            target_relative_path: target.into(),
            file_kind: kind,
        }
    }
}

/// A component's own declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentMetadata {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(rename = "type")]
    pub kind: ComponentKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(default)]
    pub files: Vec<FileEntry>,
    /// Names of required components, in declared order
    #[serde(default)]
    pub dependencies: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
}

impl ComponentMetadata {
    pub fn new(name: impl Into<String>, kind: ComponentKind) -> Self {
        Self {
            name: name.into(),
            display_name: None,
            kind,
            description: None,
            version: None,
            files: Vec::new(),
            dependencies: Vec::new(),
            tags: None,
        }
    }

    /// Parse a declaration from JSON text.
    pub fn parse(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read a declaration from a component directory.
    pub fn from_dir(component_dir: &Path, component: &str) -> Result<Self> {
        let path = declaration_path(component_dir);
        let metadata_error = |message: String| Error::Metadata {
            component: component.to_string(),
            path: path.clone(),
            message,
        };

        if !path.exists() {
            return Err(metadata_error(format!(
                "{} not found",
                COMPONENT_DECLARATION_FILENAME
            )));
        }

        let content = fs::read_to_string(&path).map_err(|e| metadata_error(e.to_string()))?;
        Self::parse(&content).map_err(|e| metadata_error(e.to_string()))
    }
}

/// Location of the declaration file inside a component directory.
pub fn declaration_path(component_dir: &Path) -> PathBuf {
    component_dir.join(COMPONENT_DECLARATION_FILENAME)
}

/// Loads component declarations on demand, caching them per run.
#[derive(Debug, Default)]
pub struct MetadataResolver {
    cache: HashMap<String, Arc<ComponentMetadata>>,
}

impl MetadataResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load the declaration of `name`.
    ///
    /// Fails with [`Error::UnknownComponent`] when the registry has no such
    /// entry and with [`Error::Metadata`] when the declaration is missing or
    /// malformed. Failures are not cached.
    pub fn load(&mut self, registry: &Registry, name: &str) -> Result<Arc<ComponentMetadata>> {
        if let Some(cached) = self.cache.get(name) {
            return Ok(Arc::clone(cached));
        }

        let entry = registry.find(name).ok_or_else(|| Error::UnknownComponent {
            name: name.to_string(),
        })?;
        let metadata = Arc::new(ComponentMetadata::from_dir(
            &registry.component_dir(entry),
            name,
        )?);

        if metadata.name != name {
            debug!(
                "Declaration of '{}' names itself '{}'; registry name is used",
                name, metadata.name
            );
        }

        self.cache.insert(name.to_string(), Arc::clone(&metadata));
        Ok(metadata)
    }

    /// Resolve the declaration of `name`, or `None` if it cannot be loaded.
    ///
    /// Callers treat `None` as "skip this component and report it".
    pub fn resolve(&mut self, registry: &Registry, name: &str) -> Option<Arc<ComponentMetadata>> {
        match self.load(registry, name) {
            Ok(metadata) => Some(metadata),
            Err(e) => {
                warn!("{}", e);
                None
            }
        }
    }

    /// Number of cached declarations.
    pub fn cached(&self) -> usize {
        self.cache.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::RegistryEntry;
    use tempfile::TempDir;

    fn write_component(root: &Path, dir: &str, json: &str) {
        let component_dir = root.join(dir);
        fs::create_dir_all(&component_dir).unwrap();
        fs::write(component_dir.join("component.json"), json).unwrap();
    }

    #[test]
    fn test_parse_full_declaration() {
        let json = r#"{
            "name": "toast",
            "displayName": "Toast",
            "type": "ui",
            "description": "Transient notifications",
            "version": "1.0.0",
            "files": [
                { "source": "Toast.ts", "target": "scripts/ui/Toast.ts", "type": "script" },
                { "source": "Toast.prefab", "target": "prefabs/Toast.prefab", "type": "prefab" },
                { "source": "notes.txt", "target": "docs/notes.txt", "type": "readme" }
            ],
            "dependencies": ["event-bus"],
            "tags": ["feedback"]
        }"#;

        let metadata = ComponentMetadata::parse(json).unwrap();
        assert_eq!(metadata.name, "toast");
        assert_eq!(metadata.kind, ComponentKind::Ui);
        assert_eq!(metadata.files.len(), 3);
        assert_eq!(metadata.files[0].file_kind, FileKind::Script);
        assert_eq!(metadata.files[1].file_kind, FileKind::Prefab);
        assert_eq!(metadata.files[2].file_kind, FileKind::Other);
        assert_eq!(metadata.dependencies, vec!["event-bus"]);
        assert_eq!(metadata.tags, Some(vec!["feedback".to_string()]));
    }

    #[test]
    fn test_parse_minimal_declaration() {
        let metadata = ComponentMetadata::parse(r#"{ "name": "bus", "type": "logic" }"#).unwrap();
        assert!(metadata.files.is_empty());
        assert!(metadata.dependencies.is_empty());
        assert_eq!(metadata.version, None);
    }

    #[test]
    fn test_parse_rejects_unknown_component_kind() {
        assert!(ComponentMetadata::parse(r#"{ "name": "x", "type": "widget" }"#).is_err());
    }

    #[test]
    fn test_resolver_loads_and_caches() {
        let temp = TempDir::new().unwrap();
        write_component(temp.path(), "lib/button", r#"{ "name": "button", "type": "ui" }"#);
        let registry = Registry::new(temp.path(), vec![RegistryEntry::new("button", "lib/button")]);

        let mut resolver = MetadataResolver::new();
        let first = resolver.load(&registry, "button").unwrap();
        assert_eq!(resolver.cached(), 1);

        // Removing the file does not affect the cached snapshot
        fs::remove_file(temp.path().join("lib/button/component.json")).unwrap();
        let second = resolver.load(&registry, "button").unwrap();
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn test_resolver_unknown_component() {
        let temp = TempDir::new().unwrap();
        let registry = Registry::empty(temp.path());
        let mut resolver = MetadataResolver::new();

        assert!(matches!(
            resolver.load(&registry, "ghost"),
            Err(Error::UnknownComponent { name }) if name == "ghost"
        ));
        assert!(resolver.resolve(&registry, "ghost").is_none());
    }

    #[test]
    fn test_resolver_missing_declaration() {
        let temp = TempDir::new().unwrap();
        fs::create_dir_all(temp.path().join("lib/empty")).unwrap();
        let registry = Registry::new(temp.path(), vec![RegistryEntry::new("empty", "lib/empty")]);
        let mut resolver = MetadataResolver::new();

        assert!(matches!(
            resolver.load(&registry, "empty"),
            Err(Error::Metadata { .. })
        ));
        assert!(resolver.resolve(&registry, "empty").is_none());
        assert_eq!(resolver.cached(), 0);
    }

    #[test]
    fn test_resolver_malformed_declaration_is_absent() {
        let temp = TempDir::new().unwrap();
        write_component(temp.path(), "lib/broken", "{ \"name\": ");
        let registry = Registry::new(temp.path(), vec![RegistryEntry::new("broken", "lib/broken")]);
        let mut resolver = MetadataResolver::new();

        match resolver.load(&registry, "broken") {
            Err(Error::Metadata { component, path, .. }) => {
                assert_eq!(component, "broken");
                assert!(path.ends_with("lib/broken/component.json"));
            }
            other => panic!("expected Metadata error, got {:?}", other),
        }
        assert!(resolver.resolve(&registry, "broken").is_none());
    }
}

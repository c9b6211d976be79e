//! Default values for cocos-components.
//!
//! This module provides centralized default values for file names and
//! locations, ensuring consistency between the library and the CLI.

use std::path::{Path, PathBuf};

/// Project configuration file, stored in the consumer project root.
pub const DEFAULT_CONFIG_FILENAME: &str = ".cocos-components.yaml";

/// Library configuration file, stored at the root of the component library.
pub const LIBRARY_CONFIG_FILENAME: &str = "cocos-components.config.json";

/// Directory of the registry, relative to the library root.
pub const DEFAULT_COMPONENTS_DIR: &str = "components";

/// Registry file name inside the components directory.
pub const REGISTRY_FILENAME: &str = "registry.json";

/// Component declaration file name inside each component directory.
pub const COMPONENT_DECLARATION_FILENAME: &str = "component.json";

/// Suffix of sidecar files that travel with their primary file.
pub const SIDECAR_SUFFIX: &str = ".meta";

/// Asset root of a consumer project, relative to the project root.
pub const DEFAULT_ASSETS_DIR: &str = "assets";

/// Informational install location recorded in new project configs.
pub const DEFAULT_COMPONENTS_PATH: &str = "assets/components";

/// Returns the default cache root directory.
///
/// Uses the platform-appropriate cache directory:
/// - Linux: `~/.cache/cocos-components` (XDG Base Directory)
/// - macOS: `~/Library/Caches/cocos-components`
/// - Windows: `{FOLDERID_LocalAppData}\cocos-components`
///
/// Falls back to `.cocos-components-cache` in the current directory if the
/// platform cache directory cannot be determined.
///
/// This can be overridden by the `--cache-root` CLI flag or the
/// `COCOS_COMPONENTS_CACHE` environment variable.
pub fn default_cache_root() -> PathBuf {
    dirs::cache_dir()
        .unwrap_or_else(|| PathBuf::from(".cocos-components-cache"))
        .join("cocos-components")
}

/// Local checkout location for a library repository URL.
///
/// The directory is named after the last URL segment with any `.git`
/// suffix removed, so `git@host:team/ui-kit.git` lands in `<cache_root>/ui-kit`.
pub fn repository_cache_path(cache_root: &Path, url: &str) -> PathBuf {
    let trimmed = url.trim_end_matches('/');
    let last = trimmed
        .rsplit(&['/', ':'][..])
        .next()
        .unwrap_or(trimmed);
    let name = last.strip_suffix(".git").unwrap_or(last);
    let name = if name.is_empty() { "library" } else { name };
    cache_root.join(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_cache_root_returns_path() {
        let cache_root = default_cache_root();
        assert!(cache_root.ends_with("cocos-components"));
    }

    #[test]
    fn test_repository_cache_path_strips_git_suffix() {
        let root = PathBuf::from("/tmp/cache");
        assert_eq!(
            repository_cache_path(&root, "https://example.com/team/ui-kit.git"),
            root.join("ui-kit")
        );
    }

    #[test]
    fn test_repository_cache_path_ssh_url() {
        let root = PathBuf::from("/tmp/cache");
        assert_eq!(
            repository_cache_path(&root, "git@example.com:ui-kit.git"),
            root.join("ui-kit")
        );
    }

    #[test]
    fn test_repository_cache_path_trailing_slash() {
        let root = PathBuf::from("/tmp/cache");
        assert_eq!(
            repository_cache_path(&root, "https://example.com/team/widgets/"),
            root.join("widgets")
        );
    }
}

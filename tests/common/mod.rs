//! Shared test utilities for integration and E2E tests.
//!
//! This module provides a fixture that lays out a Cocos Creator project next
//! to a local component library, so commands can run without network access.
//!
//! ## Usage
//!
//! Add `mod common;` to your test file, then use the helpers:
//!
//! ```rust,ignore
//! mod common;
//! use common::prelude::*;
//!
//! #[test]
//! fn test_example() {
//!     let fixture = TestFixture::new().with_sample_library().initialized();
//!     fixture.command().args(["add", "button"]).assert().success();
//! }
//! ```

use assert_fs::prelude::*;
use std::path::{Path, PathBuf};

/// Re-export commonly used test dependencies for convenience.
pub mod prelude {
    pub use assert_cmd::cargo::cargo_bin_cmd;
    pub use assert_fs::prelude::*;
    #[allow(unused_imports)]
    pub use assert_fs::TempDir;
    pub use predicates::prelude::*;

    #[allow(unused_imports)]
    pub use super::library;
    pub use super::TestFixture;
}

/// Component library snippets for testing.
#[allow(dead_code)]
pub mod library {
    /// Registry with a UI component depending on two utilities, which share
    /// a third.
    pub const REGISTRY: &str = r#"{
  "version": "1.0.0",
  "components": [
    { "name": "button", "displayName": "Button", "path": "ui/button", "type": "ui" },
    { "name": "tween", "path": "utility/tween", "type": "utility" },
    { "name": "audio", "path": "utility/audio", "type": "utility" },
    { "name": "core", "path": "utility/core", "type": "utility" }
  ]
}"#;

    pub const BUTTON: &str = r#"{
  "name": "button",
  "type": "ui",
  "files": [
    { "source": "Button.ts", "target": "scripts/ui/Button.ts", "type": "script" },
    { "source": "Button.prefab", "target": "prefabs/Button.prefab", "type": "prefab" }
  ],
  "dependencies": ["tween", "audio"]
}"#;

    pub const TWEEN: &str = r#"{
  "name": "tween",
  "type": "utility",
  "files": [ { "source": "Tween.ts", "target": "scripts/util/Tween.ts", "type": "script" } ],
  "dependencies": ["core"]
}"#;

    pub const AUDIO: &str = r#"{
  "name": "audio",
  "type": "utility",
  "files": [ { "source": "Audio.ts", "target": "scripts/util/Audio.ts", "type": "script" } ],
  "dependencies": ["core"]
}"#;

    pub const CORE: &str = r#"{
  "name": "core",
  "type": "utility",
  "files": [ { "source": "Core.ts", "target": "scripts/util/Core.ts", "type": "script" } ]
}"#;
}

/// A temporary Cocos Creator project with an optional local library at
/// `library/` inside it.
pub struct TestFixture {
    temp_dir: assert_fs::TempDir,
}

impl TestFixture {
    /// Create a project directory with `assets/`, `settings/` and `package.json`.
    pub fn new() -> Self {
        let fixture = Self::bare();
        fixture.child("assets").create_dir_all().unwrap();
        fixture.child("settings").create_dir_all().unwrap();
        fixture
            .child("package.json")
            .write_str(r#"{ "name": "game" }"#)
            .unwrap();
        fixture
    }

    /// Create an empty directory that is not a Cocos Creator project.
    #[allow(dead_code)]
    pub fn bare() -> Self {
        Self {
            temp_dir: assert_fs::TempDir::new().expect("Failed to create temp directory"),
        }
    }

    /// Write the sample library (button, tween, audio, core) under `library/`.
    pub fn with_sample_library(self) -> Self {
        self.with_file("library/components/registry.json", library::REGISTRY)
            .with_component("ui/button", library::BUTTON, &["Button.ts", "Button.prefab"])
            .with_component("utility/tween", library::TWEEN, &["Tween.ts"])
            .with_component("utility/audio", library::AUDIO, &["Audio.ts"])
            .with_component("utility/core", library::CORE, &["Core.ts"])
    }

    /// Write a component directory with its declaration and one `.meta`
    /// sidecar per file.
    #[allow(dead_code)]
    pub fn with_component(self, storage_path: &str, declaration: &str, files: &[&str]) -> Self {
        let dir = format!("library/{}", storage_path);
        let mut fixture = self.with_file(&format!("{}/component.json", dir), declaration);
        for file in files {
            fixture = fixture
                .with_file(&format!("{}/{}", dir, file), &format!("// {}", file))
                .with_file(&format!("{}/{}.meta", dir, file), "{}");
        }
        fixture
    }

    /// Point the project at the local library.
    pub fn initialized(self) -> Self {
        self.with_file(".cocos-components.yaml", "library_path: library\n")
    }

    /// Add a file with the given path and content.
    pub fn with_file(self, path: &str, content: &str) -> Self {
        self.temp_dir
            .child(path)
            .write_str(content)
            .expect("Failed to write file");
        self
    }

    /// Get the path to the project directory.
    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Path of `relative` inside the project's asset root.
    #[allow(dead_code)]
    pub fn asset(&self, relative: &str) -> PathBuf {
        self.path().join("assets").join(relative)
    }

    /// Create a child path in the temp directory.
    #[allow(dead_code)]
    pub fn child(&self, path: &str) -> assert_fs::fixture::ChildPath {
        self.temp_dir.child(path)
    }

    /// Create a command configured to run in this fixture's directory, with
    /// an isolated library cache.
    pub fn command(&self) -> assert_cmd::Command {
        let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("cocos-components");
        cmd.current_dir(self.path())
            .env("COCOS_COMPONENTS_CACHE", self.path().join(".cache"))
            .env_remove("RUST_LOG");
        cmd
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixture_is_cocos_project() {
        let fixture = TestFixture::new();
        assert!(fixture.path().join("assets").is_dir());
        assert!(fixture.path().join("package.json").exists());
    }

    #[test]
    fn test_sample_library_layout() {
        let fixture = TestFixture::new().with_sample_library();
        assert!(fixture
            .path()
            .join("library/ui/button/Button.prefab.meta")
            .exists());
    }

    #[test]
    fn test_library_snippets_are_valid_json() {
        for snippet in [
            library::REGISTRY,
            library::BUTTON,
            library::TWEEN,
            library::AUDIO,
            library::CORE,
        ] {
            serde_json::from_str::<serde_json::Value>(snippet).expect("Snippet should be valid JSON");
        }
    }
}

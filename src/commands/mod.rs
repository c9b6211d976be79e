//! # CLI Command Implementations
//!
//! This module contains the implementation for each subcommand of the
//! `cocos-components` command-line tool. Each subcommand is defined in its
//! own file.
//!
//! ## Structure
//!
//! Each command module typically contains:
//! - An `Args` struct that defines the command-specific arguments and options,
//!   derived using `clap`.
//! - An `execute` function that takes the parsed `Args` and performs the
//!   command's logic.
//!
//! Commands that operate on an initialized project share [`ProjectArgs`] and
//! load everything they need through [`ProjectContext`].

use anyhow::Result;
use clap::Args;
use std::path::{Path, PathBuf};

use cocos_components::config::ProjectConfig;
use cocos_components::registry::Registry;
use cocos_components::suggestions;

pub mod add;
pub mod completions;
pub mod init;
pub mod list;
pub mod tree;
pub mod update;

/// Options shared by every command that works on a project.
#[derive(Args, Debug, Clone, Default)]
pub struct ProjectArgs {
    /// The project root directory.
    ///
    /// If not provided, it defaults to the current working directory.
    #[arg(long, value_name = "DIR")]
    pub project: Option<PathBuf>,

    /// The root directory for cached library checkouts.
    ///
    /// Defaults to the system cache directory (`~/.cache/cocos-components` on
    /// Linux). Can also be set with the `COCOS_COMPONENTS_CACHE` environment
    /// variable.
    #[arg(long, value_name = "DIR", env = "COCOS_COMPONENTS_CACHE")]
    pub cache_root: Option<PathBuf>,
}

impl ProjectArgs {
    pub fn project_dir(&self) -> Result<PathBuf> {
        match &self.project {
            Some(dir) => Ok(dir.clone()),
            None => Ok(std::env::current_dir()?),
        }
    }

    pub fn cache_root(&self) -> PathBuf {
        self.cache_root
            .clone()
            .unwrap_or_else(cocos_components::defaults::default_cache_root)
    }
}

/// An initialized project with its library loaded.
pub struct ProjectContext {
    pub project_dir: PathBuf,
    pub config: ProjectConfig,
    pub library_root: PathBuf,
    pub registry: Registry,
}

impl ProjectContext {
    /// Load the project config, locate the library and load its registry.
    pub fn load(args: &ProjectArgs) -> Result<Self> {
        let project_dir = args.project_dir()?;
        let config = ProjectConfig::load(&project_dir)?
            .ok_or_else(|| suggestions::project_not_initialized(&project_dir))?;
        let library_root = config
            .library_root(&project_dir, &args.cache_root())
            .ok_or_else(suggestions::library_not_configured)?;

        if !library_root.is_dir() {
            return Err(suggestions::library_missing(&library_root));
        }

        let registry = Registry::load(&library_root);
        Ok(Self {
            project_dir,
            config,
            library_root,
            registry,
        })
    }

    pub fn assets_root(&self) -> PathBuf {
        self.config.assets_root(&self.project_dir)
    }
}

/// Whether `dir` looks like a Cocos Creator project.
pub fn is_cocos_project(dir: &Path) -> bool {
    ["assets", "settings", "package.json"]
        .iter()
        .all(|indicator| dir.join(indicator).exists())
}

/// Whether prompts can be shown.
pub fn is_interactive() -> bool {
    console::Term::stdout().is_term()
}

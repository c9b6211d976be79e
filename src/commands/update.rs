//! # Update Command Implementation
//!
//! This module implements the `update` subcommand, which fetches the latest
//! version of the project's component library.
//!
//! ## Functionality
//!
//! - **Fetch**: Pulls the cached checkout, or clones it if it is missing
//! - **Timestamp**: Records the fetch time as `last_update` in the project
//!   configuration
//! - **Summary**: Prints the checked-out branch and latest commit
//!
//! Projects that use a local `library_path` are left alone; that directory
//! is managed by the user.

use anyhow::Result;
use clap::Args;

use cocos_components::config::ProjectConfig;
use cocos_components::git;
use cocos_components::output::{emoji, OutputConfig};
use cocos_components::suggestions;

use super::init::fetch_library;
use super::ProjectArgs;

/// Fetch the latest version of the component library
#[derive(Args, Debug)]
pub struct UpdateArgs {
    #[command(flatten)]
    pub project: ProjectArgs,
}

/// Execute the `update` command.
pub fn execute(args: UpdateArgs, output: &OutputConfig) -> Result<()> {
    let project_dir = args.project.project_dir()?;
    let mut config = ProjectConfig::load(&project_dir)?
        .ok_or_else(|| suggestions::project_not_initialized(&project_dir))?;

    let Some(url) = config.repository.clone() else {
        if let Some(path) = &config.library_path {
            println!(
                "{} Using local library {}; nothing to fetch",
                emoji(output, "ℹ️", "[INFO]"),
                path.display()
            );
            return Ok(());
        }
        return Err(suggestions::library_not_configured());
    };

    let library_root = cocos_components::defaults::repository_cache_path(
        &args.project.cache_root(),
        &url,
    );
    fetch_library(&url, &library_root, output)?;

    config.touch_last_update();
    config.save(&project_dir)?;

    if let Some(info) = git::repository_info(&library_root) {
        println!("  Branch: {}", info.branch);
        println!(
            "  Latest commit: {} ({})",
            info.latest_commit, info.latest_commit_date
        );
    }
    println!("{} Library updated", emoji(output, "✅", "[OK]"));

    Ok(())
}

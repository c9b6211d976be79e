//! # Init Command Implementation
//!
//! This module implements the `init` subcommand, which connects a Cocos
//! Creator project to a component library by writing `.cocos-components.yaml`.
//!
//! ## Functionality
//!
//! - **Project Check**: Refuses to run outside a Cocos Creator project unless
//!   `--skip-project-check` is given
//! - **Remote Library**: `--repository` clones the library into the cache
//! - **Local Library**: `--library` points at a checked-out directory instead
//! - **Interactive Setup**: Prompts for the repository URL when neither is given
//! - **Force Mode**: Overwrites an existing configuration when specified

use anyhow::Result;
use clap::Args;
use dialoguer::{theme::ColorfulTheme, Confirm, Input};
use indicatif::{ProgressBar, ProgressStyle};
use log::debug;
use std::path::{Path, PathBuf};
use std::time::Duration;

use cocos_components::config::ProjectConfig;
use cocos_components::defaults::DEFAULT_CONFIG_FILENAME;
use cocos_components::git;
use cocos_components::output::{emoji, OutputConfig};
use cocos_components::registry::Registry;
use cocos_components::suggestions;

use super::{is_cocos_project, is_interactive, ProjectArgs};

/// Configure the component library for a project
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Git URL of the component library (`org/repo` expands to GitHub)
    #[arg(short, long, value_name = "URL", conflicts_with = "library")]
    pub repository: Option<String>,

    /// Use a local library directory instead of a git repository
    #[arg(long, value_name = "DIR")]
    pub library: Option<PathBuf>,

    /// Overwrite an existing configuration file
    #[arg(short, long)]
    pub force: bool,

    /// Do not prompt; fail instead of asking for missing values
    #[arg(short, long)]
    pub yes: bool,

    /// Initialize even if the directory is not a Cocos Creator project
    #[arg(long)]
    pub skip_project_check: bool,

    #[command(flatten)]
    pub project: ProjectArgs,
}

/// Execute the `init` command.
pub fn execute(args: InitArgs, output: &OutputConfig) -> Result<()> {
    let project_dir = args.project.project_dir()?;

    if !args.skip_project_check && !is_cocos_project(&project_dir) {
        return Err(suggestions::not_a_cocos_project(&project_dir));
    }

    let prompts = !args.yes && is_interactive();
    let config_path = ProjectConfig::path_in(&project_dir);
    if config_path.exists() && !args.force {
        let overwrite = prompts
            && Confirm::with_theme(&ColorfulTheme::default())
                .with_prompt(format!("{} already exists. Overwrite?", DEFAULT_CONFIG_FILENAME))
                .default(false)
                .interact()?;
        if !overwrite {
            anyhow::bail!(
                "Configuration file '{}' already exists\n\n\
                 hint: Use --force to overwrite it",
                DEFAULT_CONFIG_FILENAME
            );
        }
    }

    println!(
        "{} Initializing cocos-components",
        emoji(output, "🎯", "[INIT]")
    );

    let mut config = match (&args.library, &args.repository) {
        (Some(library), _) => ProjectConfig::for_library_path(library),
        (None, Some(url)) => ProjectConfig::for_repository(normalize_repo_url(url)),
        (None, None) if prompts => ProjectConfig::for_repository(prompt_repository()?),
        (None, None) => anyhow::bail!(
            "No component library given\n\n\
             hint: Pass --repository <URL> or --library <DIR>"
        ),
    };

    let cache_root = args.project.cache_root();
    let Some(library_root) = config.library_root(&project_dir, &cache_root) else {
        return Err(suggestions::library_not_configured());
    };

    if let Some(url) = config.repository.clone() {
        fetch_library(&url, &library_root, output)?;
        config.touch_last_update();
    } else if !library_root.is_dir() {
        return Err(suggestions::library_missing(&library_root));
    }

    config.save(&project_dir)?;
    println!(
        "{} Created {}",
        emoji(output, "✅", "[OK]"),
        DEFAULT_CONFIG_FILENAME
    );

    let registry = Registry::load(&library_root);
    println!(
        "  {} component(s) available in {}",
        registry.len(),
        library_root.display()
    );
    println!(
        "{} Run `cocos-components list` to browse the library",
        emoji(output, "💡", "[HINT]")
    );

    Ok(())
}

/// Clone or update the library checkout, showing a spinner while git runs.
pub(super) fn fetch_library(url: &str, library_root: &Path, output: &OutputConfig) -> Result<()> {
    debug!("Fetching {} into {}", url, library_root.display());

    let spinner = ProgressBar::new_spinner();
    if output.use_color {
        spinner.set_style(
            ProgressStyle::with_template("{spinner} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        spinner.enable_steady_tick(Duration::from_millis(100));
    } else {
        spinner.set_draw_target(indicatif::ProgressDrawTarget::hidden());
    }
    spinner.set_message(format!("Fetching {}", url));

    let result = git::clone_or_update(url, library_root);
    spinner.finish_and_clear();
    result?;

    println!(
        "{} Library ready at {}",
        emoji(output, "📥", "[FETCH]"),
        library_root.display()
    );
    Ok(())
}

fn prompt_repository() -> Result<String> {
    let input: String = Input::with_theme(&ColorfulTheme::default())
        .with_prompt("Component library repository (e.g., https://github.com/org/components)")
        .interact_text()?;
    Ok(normalize_repo_url(input.trim()))
}

/// Expand GitHub shorthand (`org/repo`); anything URL- or path-like is kept.
fn normalize_repo_url(input: &str) -> String {
    let looks_like_path = input.starts_with('/') || input.starts_with('.');
    if input.contains("://") || input.starts_with("git@") || looks_like_path {
        return input.to_string();
    }

    if input.contains('/') && !input.contains(':') {
        return format!("https://github.com/{}", input);
    }

    input.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn cocos_project(dir: &Path) {
        fs::create_dir_all(dir.join("assets")).unwrap();
        fs::create_dir_all(dir.join("settings")).unwrap();
        fs::write(dir.join("package.json"), "{}").unwrap();
    }

    fn args(project: &Path) -> InitArgs {
        InitArgs {
            repository: None,
            library: None,
            force: false,
            yes: true,
            skip_project_check: false,
            project: ProjectArgs {
                project: Some(project.to_path_buf()),
                cache_root: Some(project.join(".cache")),
            },
        }
    }

    #[test]
    fn test_normalize_repo_url_full_url() {
        assert_eq!(
            normalize_repo_url("https://github.com/org/components"),
            "https://github.com/org/components"
        );
        assert_eq!(
            normalize_repo_url("git@github.com:org/components.git"),
            "git@github.com:org/components.git"
        );
        assert_eq!(normalize_repo_url("/srv/git/kit"), "/srv/git/kit");
    }

    #[test]
    fn test_normalize_repo_url_shorthand() {
        assert_eq!(
            normalize_repo_url("org/components"),
            "https://github.com/org/components"
        );
    }

    #[test]
    fn test_init_rejects_non_cocos_project() {
        let temp = TempDir::new().unwrap();
        let mut init = args(temp.path());
        init.library = Some(PathBuf::from("kit"));

        let error = execute(init, &OutputConfig::without_color()).unwrap_err();
        assert!(error.to_string().contains("Not a Cocos Creator project"));
    }

    #[test]
    fn test_init_with_local_library() {
        let temp = TempDir::new().unwrap();
        cocos_project(temp.path());
        fs::create_dir_all(temp.path().join("kit/components")).unwrap();

        let mut init = args(temp.path());
        init.library = Some(PathBuf::from("kit"));
        execute(init, &OutputConfig::without_color()).unwrap();

        let config = ProjectConfig::load(temp.path()).unwrap().unwrap();
        assert_eq!(config.library_path, Some(PathBuf::from("kit")));
        assert_eq!(config.repository, None);
    }

    #[test]
    fn test_init_missing_local_library() {
        let temp = TempDir::new().unwrap();
        cocos_project(temp.path());

        let mut init = args(temp.path());
        init.library = Some(PathBuf::from("nowhere"));
        let error = execute(init, &OutputConfig::without_color()).unwrap_err();

        assert!(error.to_string().contains("Component library not found"));
        assert!(!ProjectConfig::path_in(temp.path()).exists());
    }

    #[test]
    fn test_init_existing_config_requires_force() {
        let temp = TempDir::new().unwrap();
        cocos_project(temp.path());
        fs::create_dir_all(temp.path().join("kit")).unwrap();
        ProjectConfig::for_library_path("old").save(temp.path()).unwrap();

        let mut init = args(temp.path());
        init.library = Some(PathBuf::from("kit"));
        let error = execute(init, &OutputConfig::without_color()).unwrap_err();
        assert!(error.to_string().contains("already exists"));

        let mut init = args(temp.path());
        init.library = Some(PathBuf::from("kit"));
        init.force = true;
        execute(init, &OutputConfig::without_color()).unwrap();

        let config = ProjectConfig::load(temp.path()).unwrap().unwrap();
        assert_eq!(config.library_path, Some(PathBuf::from("kit")));
    }

    #[test]
    fn test_init_without_library_non_interactive() {
        let temp = TempDir::new().unwrap();
        let mut init = args(temp.path());
        init.skip_project_check = true;

        let error = execute(init, &OutputConfig::without_color()).unwrap_err();
        assert!(error.to_string().contains("No component library given"));
    }
}

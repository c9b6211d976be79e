//! Git-backed component library store.
//!
//! The component library is a git repository checked out into the local
//! cache. These helpers shell out to the system `git`, which automatically
//! picks up:
//! - SSH keys from ~/.ssh/
//! - Git credential helpers
//! - Personal access tokens
//! - Any authentication configured in ~/.gitconfig

use std::fs;
use std::path::Path;
use std::process::Command;

use log::debug;

use crate::error::{Error, Result};

/// Summary of the checked-out library revision.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoInfo {
    pub branch: String,
    /// Abbreviated (7 character) commit hash
    pub latest_commit: String,
    pub latest_commit_date: String,
}

/// Clone the library into `target_dir`, or pull if it is already there.
pub fn clone_or_update(url: &str, target_dir: &Path) -> Result<()> {
    if target_dir.join(".git").exists() {
        debug!("Pulling {} in {}", url, target_dir.display());
        return pull(target_dir);
    }
    debug!("Cloning {} into {}", url, target_dir.display());
    clone(url, target_dir)
}

/// Clone a repository into `target_dir`.
pub fn clone(url: &str, target_dir: &Path) -> Result<()> {
    // git won't clone into an existing non-empty directory
    if target_dir.exists() {
        fs::remove_dir_all(target_dir)?;
    }
    if let Some(parent) = target_dir.parent() {
        fs::create_dir_all(parent)?;
    }

    let output = Command::new("git")
        .args(["clone", url])
        .arg(target_dir)
        .output()
        .map_err(|e| Error::GitClone {
            url: url.to_string(),
            message: e.to_string(),
            hint: Some("Make sure git is installed and on PATH".to_string()),
        })?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        let hint = if stderr.contains("Authentication failed")
            || stderr.contains("Permission denied")
            || stderr.contains("Could not read from remote repository")
        {
            Some(
                "For private libraries, add your SSH key to ssh-agent or configure git credentials"
                    .to_string(),
            )
        } else {
            None
        };

        return Err(Error::GitClone {
            url: url.to_string(),
            message: stderr.trim().to_string(),
            hint,
        });
    }

    Ok(())
}

/// Pull the latest changes of an existing checkout.
pub fn pull(repo_dir: &Path) -> Result<()> {
    run_git(repo_dir, &["pull", "--ff-only"]).map(|_| ())
}

/// Branch and latest commit of a checkout, or `None` if it is not a git
/// repository.
pub fn repository_info(repo_dir: &Path) -> Option<RepoInfo> {
    let branch = run_git(repo_dir, &["rev-parse", "--abbrev-ref", "HEAD"]).ok()?;
    let log = run_git(repo_dir, &["log", "-1", "--format=%H%n%cI"]).ok()?;
    let mut lines = log.lines();
    let hash = lines.next()?.trim();
    let date = lines.next().unwrap_or("unknown").trim();

    Some(RepoInfo {
        branch: branch.trim().to_string(),
        latest_commit: hash.chars().take(7).collect(),
        latest_commit_date: date.to_string(),
    })
}

fn run_git(repo_dir: &Path, args: &[&str]) -> Result<String> {
    let output = Command::new("git")
        .arg("-C")
        .arg(repo_dir)
        .args(args)
        .output()
        .map_err(|e| Error::GitCommand {
            command: args.join(" "),
            url: repo_dir.display().to_string(),
            stderr: e.to_string(),
        })?;

    if !output.status.success() {
        return Err(Error::GitCommand {
            command: args.join(" "),
            url: repo_dir.display().to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        });
    }

    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}

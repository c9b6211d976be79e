//! # List Command Implementation
//!
//! This module implements the `list` subcommand (alias `ls`), which shows the
//! components available in the project's library, grouped by kind.
//!
//! ## Functionality
//!
//! - **Library Summary**: Name and version from the library config, plus the
//!   checked-out branch and commit when the library is a git checkout
//! - **Kind Filter**: `--type` limits the listing to one kind
//! - **Keyword Search**: `--search` matches names and display names,
//!   ignoring case
//!
//! This command is a safe, read-only operation that does not modify any files.

use anyhow::Result;
use clap::Args;

use cocos_components::config::LibraryConfig;
use cocos_components::git;
use cocos_components::output::{emoji, kind_heading, OutputConfig};
use cocos_components::registry::{Registry, RegistryEntry};

use super::{ProjectArgs, ProjectContext};

/// List the components available in the library
#[derive(Args, Debug)]
pub struct ListArgs {
    /// Only show components of this kind (ui, logic, effect, utility)
    #[arg(short = 't', long = "type", value_name = "KIND")]
    pub kind: Option<String>,

    /// Only show components whose name contains this keyword
    #[arg(short, long, value_name = "KEYWORD")]
    pub search: Option<String>,

    #[command(flatten)]
    pub project: ProjectArgs,
}

/// Execute the `list` command.
pub fn execute(args: ListArgs, output: &OutputConfig) -> Result<()> {
    let context = ProjectContext::load(&args.project)?;

    if let Some(library) = LibraryConfig::load(&context.library_root) {
        let version = if library.version.is_empty() {
            String::new()
        } else {
            format!(" v{}", library.version)
        };
        println!(
            "{} {}{}",
            emoji(output, "📚", "[LIBRARY]"),
            output.bold(&library.name),
            version
        );
    } else {
        println!(
            "{} {}",
            emoji(output, "📚", "[LIBRARY]"),
            output.bold(&context.library_root.display().to_string())
        );
    }
    if let Some(info) = git::repository_info(&context.library_root) {
        println!(
            "  {}",
            output.dim(&format!(
                "{} @ {} ({})",
                info.branch, info.latest_commit, info.latest_commit_date
            ))
        );
    }

    let matches = context
        .registry
        .search(args.search.as_deref(), args.kind.as_deref());
    print!("{}", render_listing(output, &matches));

    if matches.is_empty() {
        println!("No matching components found.");
    } else {
        println!();
        println!("{} component(s)", matches.len());
    }

    Ok(())
}

/// Render entries grouped by kind, one indented line per component.
fn render_listing(output: &OutputConfig, entries: &[&RegistryEntry]) -> String {
    let mut text = String::new();

    for (kind, members) in Registry::group_by_kind(entries) {
        let (icon, heading) = kind_heading(&kind);
        text.push('\n');
        text.push_str(&format!(
            "{} {}\n",
            emoji(output, icon, "-"),
            output.cyan(heading)
        ));
        for entry in members {
            match entry.display_name.as_deref() {
                Some(display) if display != entry.name => text.push_str(&format!(
                    "  {} {}\n",
                    output.green(&entry.name),
                    output.dim(&format!("({})", display))
                )),
                _ => text.push_str(&format!("  {}\n", output.green(&entry.name))),
            }
        }
    }

    text
}

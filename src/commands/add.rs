//! # Add Command Implementation
//!
//! This module implements the `add` subcommand, which installs components
//! from the library into the project's asset root.
//!
//! ## Functionality
//!
//! - **Dependency Resolution**: Each requested component is expanded into an
//!   install plan with its dependencies first
//! - **Conflict Policy**: Existing files are skipped unless `--overwrite` is given
//! - **Path Override**: `--path` places every file in one directory under the
//!   asset root, keeping file names
//! - **Interactive Selection**: Without component names on a terminal, a
//!   multi-select prompt lists the registry
//! - **Dry Run**: `--dry-run` prints the install plans without copying

use anyhow::Result;
use clap::Args;
use dialoguer::{theme::ColorfulTheme, Confirm, MultiSelect};
use std::path::PathBuf;

use cocos_components::diagnostics::Diagnostics;
use cocos_components::output::{emoji, OutputConfig};
use cocos_components::phases::orchestrator::{self, InstallOptions, InstallOutcome};
use cocos_components::phases::SyncPolicy;
use cocos_components::registry::Registry;
use cocos_components::suggestions;

use super::{is_interactive, ProjectArgs, ProjectContext};

/// Add components to the project
#[derive(Args, Debug)]
pub struct AddArgs {
    /// Names of the components to add
    #[arg(value_name = "COMPONENT")]
    pub components: Vec<String>,

    /// Overwrite files that already exist in the project
    #[arg(short, long)]
    pub overwrite: bool,

    /// Install every file into this directory (relative to the asset root)
    #[arg(short, long, value_name = "PATH")]
    pub path: Option<PathBuf>,

    /// Install only the named components, not their dependencies
    #[arg(long)]
    pub no_deps: bool,

    /// Do not ask before installing dependencies
    #[arg(short, long)]
    pub yes: bool,

    /// Show the install plan without copying any files
    #[arg(short = 'n', long)]
    pub dry_run: bool,

    #[command(flatten)]
    pub project: ProjectArgs,
}

/// Execute the `add` command.
///
/// Installs the requested components in request order. Problems with one
/// file or one component are reported and do not stop the others; the
/// command fails at the end if any errors were recorded.
pub fn execute(args: AddArgs, output: &OutputConfig) -> Result<()> {
    let context = ProjectContext::load(&args.project)?;
    let registry = &context.registry;

    if registry.is_empty() {
        return Err(suggestions::registry_empty(&context.library_root));
    }

    let mut requested = args.components.clone();
    if requested.is_empty() {
        requested = select_components(registry)?;
        if requested.is_empty() {
            println!("Nothing selected.");
            return Ok(());
        }
    }

    // Unknown names are reported with suggestions up front; the rest proceed
    let mut unknown = 0;
    requested.retain(|name| {
        if registry.find(name).is_some() {
            return true;
        }
        eprintln!(
            "{} {}",
            emoji(output, "❌", "[ERROR]"),
            suggestions::component_not_found(name, registry.names())
        );
        unknown += 1;
        false
    });

    let mut include_dependencies = !args.no_deps;
    let (plans, plan_diagnostics) =
        orchestrator::execute_plan(registry, &requested, include_dependencies);

    if args.dry_run {
        println!("{} Install plan (dry run)", emoji(output, "🔎", "[PLAN]"));
        for (root, plan) in &plans {
            println!("  {}: {}", output.bold(root), plan);
        }
        print_diagnostics(output, &plan_diagnostics);
        return finish(unknown, &plan_diagnostics);
    }

    let dependencies: Vec<&str> = plans
        .iter()
        .flat_map(|(_, plan)| plan.dependencies().iter().map(String::as_str))
        .collect();
    if include_dependencies && !dependencies.is_empty() {
        println!(
            "  {}",
            output.dim(&format!("Dependencies: {}", dependencies.join(", ")))
        );
        if !args.yes && is_interactive() {
            include_dependencies = Confirm::with_theme(&ColorfulTheme::default())
                .with_prompt("Install dependency components as well?")
                .default(true)
                .interact()?;
        }
    }

    let policy = SyncPolicy {
        force_overwrite: args.overwrite,
        target_subpath_override: args.path.clone(),
    };
    let options = InstallOptions {
        policy,
        include_dependencies,
        // Ctrl-C ends the process; between-entry cancellation is for library callers.
        cancel: None,
    };

    println!("{} Adding components", emoji(output, "📦", "[ADD]"));
    let outcome = orchestrator::execute_install(
        registry,
        &requested,
        &context.assets_root(),
        &options,
    );
    print_outcome(output, &outcome, args.overwrite);

    finish(unknown, &outcome.diagnostics)
}

/// Prompt for components when none were named on the command line.
fn select_components(registry: &Registry) -> Result<Vec<String>> {
    if !is_interactive() {
        anyhow::bail!(
            "No components specified\n\n\
             hint: Pass component names, e.g. 'cocos-components add button'\n\
             hint: Run 'cocos-components list' to see available components"
        );
    }

    let items: Vec<String> = registry
        .entries()
        .iter()
        .map(|e| format!("{} ({})", e.label(), e.name))
        .collect();
    let chosen = MultiSelect::with_theme(&ColorfulTheme::default())
        .with_prompt("Select components to add (space to toggle, enter to confirm)")
        .items(&items)
        .interact()?;

    Ok(chosen
        .into_iter()
        .map(|i| registry.entries()[i].name.clone())
        .collect())
}

fn print_outcome(output: &OutputConfig, outcome: &InstallOutcome, overwrite: bool) {
    for component in &outcome.components {
        println!();
        println!("{}", output.cyan(&component.name));

        let report = &component.report;
        if !report.copied.is_empty() {
            println!(
                "  {} {} file(s) copied",
                emoji(output, "✓", "[OK]"),
                report.copied.len()
            );
            for path in &report.copied {
                println!("    - {}", output.dim(&path.display().to_string()));
            }
        }
        if !report.skipped.is_empty() {
            println!(
                "  {} {} existing file(s) skipped",
                emoji(output, "⚠", "[SKIP]"),
                report.skipped.len()
            );
            for path in &report.skipped {
                println!("    - {}", output.dim(&path.display().to_string()));
            }
            if !overwrite {
                println!(
                    "    {}",
                    output.dim("hint: Use --overwrite to replace existing files")
                );
            }
        }
        if report.is_empty() {
            println!("  {}", output.dim("no files"));
        }
    }

    print_diagnostics(output, &outcome.diagnostics);

    let total = outcome.total();
    println!();
    println!(
        "{} Done: {} copied, {} skipped",
        emoji(output, "✅", "[DONE]"),
        total.copied.len(),
        total.skipped.len()
    );
}

fn print_diagnostics(output: &OutputConfig, diagnostics: &Diagnostics) {
    if diagnostics.is_empty() {
        return;
    }
    eprintln!();
    for diagnostic in diagnostics.warnings() {
        eprintln!("{}", output.yellow(&diagnostic.to_string()));
    }
    for diagnostic in diagnostics.errors() {
        eprintln!("{}", output.red(&diagnostic.to_string()));
    }
}

fn finish(unknown: usize, diagnostics: &Diagnostics) -> Result<()> {
    let errors = unknown + diagnostics.errors().count();
    if errors > 0 {
        anyhow::bail!("{} error(s) while adding components", errors);
    }
    Ok(())
}

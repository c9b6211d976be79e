//! CLI argument parsing and command dispatch

use anyhow::Result;
use clap::{Parser, Subcommand};
use log::LevelFilter;

use crate::commands;
use cocos_components::output::OutputConfig;

/// Cocos Components - Add shared components to a Cocos Creator project
#[derive(Parser, Debug)]
#[command(name = "cocos-components")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Colorize output (always, never, auto)
    #[arg(long, global = true, value_name = "WHEN", default_value = "auto")]
    color: String,

    /// Set log level (error, warn, info, debug, trace)
    #[arg(long, global = true, value_name = "LEVEL", default_value = "warn")]
    log_level: String,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Configure the component library for the current project
    Init(commands::init::InitArgs),

    /// Add one or more components (and their dependencies) to the project
    Add(commands::add::AddArgs),

    /// List the components available in the library
    #[command(alias = "ls")]
    List(commands::list::ListArgs),

    /// Show the dependency tree of a component
    Tree(commands::tree::TreeArgs),

    /// Fetch the latest version of the component library
    Update(commands::update::UpdateArgs),

    /// Generate shell completion scripts
    Completions(commands::completions::CompletionsArgs),
}

impl Cli {
    /// Execute the CLI command
    pub fn execute(self) -> Result<()> {
        init_logging(&self.log_level);
        let output = OutputConfig::from_env_and_flag(&self.color);

        match self.command {
            Commands::Init(args) => commands::init::execute(args, &output),
            Commands::Add(args) => commands::add::execute(args, &output),
            Commands::List(args) => commands::list::execute(args, &output),
            Commands::Tree(args) => commands::tree::execute(args, &output),
            Commands::Update(args) => commands::update::execute(args, &output),
            Commands::Completions(args) => commands::completions::execute(args),
        }
    }
}

/// Install the `env_logger` backend.
///
/// `--log-level` sets the baseline and `RUST_LOG` directives refine it.
fn init_logging(level: &str) {
    let mut builder = env_logger::Builder::new();
    builder.filter_level(level.parse().unwrap_or(LevelFilter::Warn));
    if let Ok(filters) = std::env::var("RUST_LOG") {
        builder.parse_filters(&filters);
    }
    builder.format_timestamp(None).format_target(false);
    // A second initialization (e.g. in tests) keeps the first logger
    let _ = builder.try_init();
}

//! # Cocos Components CLI
//!
//! This is the binary entry point for the `cocos-components` command-line tool.
//!
//! Its primary responsibilities are:
//! - Parsing command-line arguments using `clap`.
//! - Executing the appropriate command based on the parsed arguments.
//! - Handling top-level application errors and translating them into user-friendly
//!   output.
//!
//! The install logic lives in the `cocos_components` library crate; the
//! binary is a thin wrapper that adds prompts, progress and reporting.

mod cli;
mod commands;

use anyhow::Result;
use clap::Parser;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    cli.execute()
}

//! Command line driver for the `oas2tf-core` lowering engine.
//!
//! Reads an OpenAPI document, picks one component schema and prints the
//! provider attribute IR as JSON.

use clap::{Parser, Subcommand};

pub mod cli;
pub mod config;
pub mod document;
pub mod logging;

/// Top level command line.
#[derive(Parser, Debug)]
#[command(
    name = "oas2tf",
    version,
    about = "Lower OpenAPI schemas into provider attribute definitions"
)]
pub struct Cli {
    /// Enable debug logging (overridden by RUST_LOG)
    #[arg(long, short, global = true)]
    pub verbose: bool,

    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Commands,
}

/// Subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Lower one component schema to attribute JSON
    Lower(cli::lower::LowerArgs),
    /// List component schema names
    Schemas(cli::schemas::SchemasArgs),
}

/// Dispatch a parsed command line, returning the process exit code.
pub fn run(cli: Cli) -> i32 {
    match cli.command {
        Commands::Lower(args) => cli::lower::run(args),
        Commands::Schemas(args) => cli::schemas::run(args),
    }
}

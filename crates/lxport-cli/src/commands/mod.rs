//! CLI command definitions and dispatch.

pub mod export;
pub mod plan;

use clap::{Parser, Subcommand};

/// lxport — Export LXC containers with namespace-correct ownership.
#[derive(Parser, Debug)]
#[command(name = "lxport", version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Export a container's root filesystem and config artifact.
    Export(export::ExportArgs),
    /// Display the export command plan without executing it.
    Plan(plan::PlanArgs),
}

/// Dispatches the parsed CLI command to its handler.
///
/// # Errors
///
/// Returns an error if the command execution fails.
pub fn execute(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Command::Export(args) => export::execute(args),
        Command::Plan(args) => plan::execute(args),
    }
}

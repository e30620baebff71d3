//! # lxport — LXC container export CLI
//!
//! Exports a container's root filesystem into a portable archive with
//! namespace-correct ownership, alongside a copy of its configuration.

mod commands;

use clap::Parser;

use crate::commands::Cli;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
        )
        .init();

    let cli = Cli::parse();
    commands::execute(cli)
}

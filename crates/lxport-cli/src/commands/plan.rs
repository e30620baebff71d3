//! `lxport plan` — Show the export command plan without executing it.

use std::path::PathBuf;

use clap::Args;
use lxport_common::config::BuildConfig;
use lxport_common::types::ContainerName;
use lxport_core::context::resolve_context;
use lxport_core::export::build_command_plan;
use lxport_core::identity::SystemIdentityResolver;
use lxport_core::idmap::read_remap_args;

/// Arguments for the `plan` command.
#[derive(Args, Debug)]
pub struct PlanArgs {
    /// Name of the container to export.
    #[arg(short, long)]
    pub name: String,

    /// Directory that would receive the export artifacts.
    #[arg(short, long)]
    pub output_dir: PathBuf,

    /// Path to the container's configuration file.
    #[arg(short, long)]
    pub config_file: PathBuf,

    /// Emit the plan as a JSON array of argument vectors.
    #[arg(long)]
    pub json: bool,
}

/// Executes the `plan` command.
///
/// Derives the export context and idmap arguments exactly as `export`
/// would, then prints the resulting command plan instead of running it.
///
/// # Errors
///
/// Returns an error if the container config cannot be read or parsed.
#[allow(clippy::print_stdout)]
pub fn execute(args: PlanArgs) -> anyhow::Result<()> {
    let config = BuildConfig {
        container_name: ContainerName::new(args.name),
        output_dir: args.output_dir,
        config_file: args.config_file,
    };

    let ctx = resolve_context(&config, &SystemIdentityResolver);
    let remap = read_remap_args(&config.config_file)?;
    let plan = build_command_plan(&ctx, &remap);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&plan)?);
    } else {
        for argv in &plan {
            println!("{}", argv.join(" "));
        }
    }
    Ok(())
}

//! `lxport export` — Export a container's root filesystem and config.

use std::path::PathBuf;

use clap::Args;
use lxport_common::config::BuildConfig;
use lxport_common::types::ContainerName;
use lxport_core::export::ExportStep;
use lxport_core::step::{BuildState, ConsoleUi, Step, StepAction};

/// Arguments for the `export` command.
#[derive(Args, Debug)]
pub struct ExportArgs {
    /// Name of the container to export.
    #[arg(short, long)]
    pub name: String,

    /// Directory receiving rootfs.tar.gz and the config artifact.
    #[arg(short, long)]
    pub output_dir: PathBuf,

    /// Path to the container's configuration file.
    #[arg(short, long)]
    pub config_file: PathBuf,
}

/// Executes the `export` command.
///
/// # Errors
///
/// Returns the halting error if any stage of the export step fails.
pub fn execute(args: ExportArgs) -> anyhow::Result<()> {
    tracing::info!(name = %args.name, output = %args.output_dir.display(), "exporting container");

    let config = BuildConfig {
        container_name: ContainerName::new(args.name),
        output_dir: args.output_dir,
        config_file: args.config_file,
    };
    let mut state = BuildState::new(config, Box::new(ConsoleUi));

    match ExportStep::new().run(&mut state) {
        StepAction::Continue => Ok(()),
        StepAction::Halt => match state.error.take() {
            Some(e) => Err(e.into()),
            None => Err(anyhow::anyhow!("export halted without a stored error")),
        },
    }
}

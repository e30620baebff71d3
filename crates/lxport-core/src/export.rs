//! The export step itself.
//!
//! Copies the container's config into the output directory, then drives
//! the fixed command sequence that stops the container, relaxes output
//! permissions, archives the root filesystem inside the container's user
//! namespace, and marks the config artifact executable. Commands run
//! strictly in order; the first failure halts the step.

use std::path::Path;

use lxport_common::config::BuildConfig;
use lxport_common::error::{LxportError, Result};

use crate::context::{ExportContext, resolve_context};
use crate::identity::{IdentityResolver, SystemIdentityResolver};
use crate::idmap::{RemapArgs, read_remap_args};
use crate::runner::{CommandRunner, SystemCommandRunner};
use crate::step::{BuildState, Step, StepAction};

/// Step that exports a container's root filesystem and config.
pub struct ExportStep {
    resolver: Box<dyn IdentityResolver>,
    runner: Box<dyn CommandRunner>,
}

impl ExportStep {
    /// Creates an export step wired to the host system.
    #[must_use]
    pub fn new() -> Self {
        Self {
            resolver: Box::new(SystemIdentityResolver),
            runner: Box::new(SystemCommandRunner),
        }
    }

    /// Creates an export step with injected collaborators.
    #[must_use]
    pub fn with_collaborators(
        resolver: Box<dyn IdentityResolver>,
        runner: Box<dyn CommandRunner>,
    ) -> Self {
        Self { resolver, runner }
    }

    fn execute(&self, config: &BuildConfig) -> Result<()> {
        let ctx = resolve_context(config, self.resolver.as_ref());
        let remap = read_remap_args(&config.config_file)?;
        copy_config_artifact(&config.config_file, &ctx.config_copy_path)?;

        for argv in build_command_plan(&ctx, &remap) {
            self.run_command(argv)?;
        }
        Ok(())
    }

    fn run_command(&self, argv: Vec<String>) -> Result<()> {
        tracing::debug!(?argv, "export command");
        let output = self
            .runner
            .run(&argv)
            .map_err(|e| LxportError::CommandExecution {
                argv: argv.clone(),
                reason: e.to_string(),
            })?;

        if output.success() {
            Ok(())
        } else {
            let mut reason = format!("exit status {}", output.exit_code);
            let stderr = output.stderr.trim();
            if !stderr.is_empty() {
                reason.push_str(": ");
                reason.push_str(stderr);
            }
            Err(LxportError::CommandExecution { argv, reason })
        }
    }
}

impl Default for ExportStep {
    fn default() -> Self {
        Self::new()
    }
}

impl Step for ExportStep {
    fn run(&self, state: &mut BuildState) -> StepAction {
        state.ui.say("Exporting container...");
        match self.execute(&state.config) {
            Ok(()) => StepAction::Continue,
            Err(e) => {
                state.ui.error(&e.to_string());
                state.error = Some(e);
                StepAction::Halt
            }
        }
    }
}

/// Copies the container config byte-for-byte into the output artifact.
///
/// # Errors
///
/// Returns [`LxportError::ArtifactCreate`] if the destination cannot be
/// created and [`LxportError::ArtifactCopy`] on any failure while opening
/// or copying the source.
pub fn copy_config_artifact(source: &Path, dest: &Path) -> Result<()> {
    let mut dest_file = std::fs::File::create(dest).map_err(|e| LxportError::ArtifactCreate {
        path: dest.to_path_buf(),
        source: e,
    })?;

    let mut source_file = std::fs::File::open(source).map_err(|e| LxportError::ArtifactCopy {
        path: source.to_path_buf(),
        source: e,
    })?;

    let bytes =
        std::io::copy(&mut source_file, &mut dest_file).map_err(|e| LxportError::ArtifactCopy {
            path: dest.to_path_buf(),
            source: e,
        })?;

    tracing::debug!(bytes, dest = %dest.display(), "config artifact written");
    Ok(())
}

/// Builds the fixed four-command export plan.
///
/// Order is load-bearing: the container must be stopped before its
/// filesystem is archived, and output permissions must be relaxed before
/// the namespaced archiver writes through them. Callers must execute the
/// commands sequentially and stop at the first failure.
#[must_use]
pub fn build_command_plan(ctx: &ExportContext, remap: &RemapArgs) -> Vec<Vec<String>> {
    let rootfs_dir = ctx.container_dir.join("rootfs");

    let stop = vec![
        "lxc-stop".to_string(),
        "--name".to_string(),
        ctx.container_name.as_str().to_string(),
    ];

    let relax_permissions = vec![
        "sudo".to_string(),
        "chmod".to_string(),
        "-R".to_string(),
        "0777".to_string(),
        ctx.output_dir.to_string_lossy().into_owned(),
    ];

    let mut archive = vec!["lxc-usernsexec".to_string()];
    archive.extend(remap.as_slice().iter().cloned());
    archive.extend([
        "--".to_string(),
        "tar".to_string(),
        "-C".to_string(),
        rootfs_dir.to_string_lossy().into_owned(),
        "--numeric-owner".to_string(),
        "--anchored".to_string(),
        "--exclude=./rootfs/dev/log".to_string(),
        "-czf".to_string(),
        ctx.archive_path.to_string_lossy().into_owned(),
        "./".to_string(),
    ]);

    let finalize = vec![
        "chmod".to_string(),
        "+x".to_string(),
        ctx.config_copy_path.to_string_lossy().into_owned(),
    ];

    vec![stop, relax_permissions, archive, finalize]
}

//! External command execution.
//!
//! The export step shells out to privileged container tooling that is
//! unavailable in test environments, so execution sits behind a small
//! capability trait: callers hand over an argument vector and get back
//! the exit status and captured stderr.

/// Result of running one external command to completion.
#[derive(Debug, Clone)]
pub struct CommandOutput {
    /// Exit code returned by the command (-1 if terminated by signal).
    pub exit_code: i32,
    /// Standard error captured from the command.
    pub stderr: String,
}

impl CommandOutput {
    /// Returns whether the command exited successfully.
    #[must_use]
    pub const fn success(&self) -> bool {
        self.exit_code == 0
    }
}

/// Blocking executor for external commands.
pub trait CommandRunner: Send + Sync {
    /// Runs `argv` to completion and captures its exit status and stderr.
    ///
    /// # Errors
    ///
    /// Returns an error if the argument vector is empty or the process
    /// cannot be spawned. A non-zero exit is not an error at this layer;
    /// the caller decides what a failure means.
    fn run(&self, argv: &[String]) -> std::io::Result<CommandOutput>;
}

/// Runner that spawns real processes on the host.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemCommandRunner;

impl CommandRunner for SystemCommandRunner {
    fn run(&self, argv: &[String]) -> std::io::Result<CommandOutput> {
        let (program, args) = argv.split_first().ok_or_else(|| {
            std::io::Error::new(std::io::ErrorKind::InvalidInput, "empty command vector")
        })?;

        tracing::debug!(?argv, "running external command");
        let output = std::process::Command::new(program).args(args).output()?;

        Ok(CommandOutput {
            exit_code: output.status.code().unwrap_or(-1),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        })
    }
}

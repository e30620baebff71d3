//! Step and reporting contracts between the export core and its
//! orchestrator.
//!
//! A step either completes and lets the workflow continue, or halts it
//! after storing the triggering error in the shared build state.

use lxport_common::config::BuildConfig;
use lxport_common::error::LxportError;

/// Signal returned by a step to the invoking orchestrator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepAction {
    /// The step succeeded; the workflow may proceed.
    Continue,
    /// The step failed; the workflow must stop. The triggering error has
    /// been stored in the build state.
    Halt,
}

/// One discrete unit of work within the export workflow.
pub trait Step {
    /// Runs the step against the shared build state.
    fn run(&self, state: &mut BuildState) -> StepAction;
}

/// User-facing reporter for step progress and failures.
pub trait Ui: Send + Sync {
    /// Reports a progress message.
    fn say(&self, message: &str);
    /// Reports a failure message.
    fn error(&self, message: &str);
}

/// Reporter that writes to the invoking terminal's stderr.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleUi;

impl Ui for ConsoleUi {
    fn say(&self, message: &str) {
        eprintln!("{message}");
    }

    fn error(&self, message: &str) {
        eprintln!("error: {message}");
    }
}

/// Shared state bag threaded through the workflow's steps.
pub struct BuildState {
    /// Configuration for this build.
    pub config: BuildConfig,
    /// User-facing reporter.
    pub ui: Box<dyn Ui>,
    /// Error stored by a halting step, if any.
    pub error: Option<LxportError>,
}

impl BuildState {
    /// Creates a build state with no stored error.
    #[must_use]
    pub fn new(config: BuildConfig, ui: Box<dyn Ui>) -> Self {
        Self {
            config,
            ui,
            error: None,
        }
    }
}

impl std::fmt::Debug for BuildState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BuildState")
            .field("config", &self.config)
            .field("error", &self.error)
            .finish_non_exhaustive()
    }
}

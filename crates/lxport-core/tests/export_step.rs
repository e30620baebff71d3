//! Integration tests for the export step.
//!
//! The real export drives privileged container tooling, so these tests
//! substitute a recording command runner, a capturing UI, and a fixed
//! identity resolver, then verify the full step pipeline: idmap parsing,
//! artifact copying, command-plan assembly, and first-failure halting.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use lxport_common::config::BuildConfig;
use lxport_common::error::{LxportError, Result};
use lxport_common::types::ContainerName;
use lxport_core::export::ExportStep;
use lxport_core::identity::{Identity, IdentityResolver};
use lxport_core::runner::{CommandOutput, CommandRunner};
use lxport_core::step::{BuildState, Step, StepAction, Ui};

// ── Fakes ────────────────────────────────────────────────────────────

struct FixedResolver(Identity);

impl IdentityResolver for FixedResolver {
    fn resolve(&self) -> Result<Identity> {
        Ok(self.0.clone())
    }
}

fn root_resolver() -> Box<dyn IdentityResolver> {
    Box::new(FixedResolver(Identity {
        uid: 0,
        home_dir: Some(PathBuf::from("/root")),
    }))
}

#[derive(Clone, Default)]
struct RecordingRunner {
    calls: Arc<Mutex<Vec<Vec<String>>>>,
    fail_at: Option<usize>,
}

impl RecordingRunner {
    fn failing_at(index: usize) -> Self {
        Self {
            calls: Arc::default(),
            fail_at: Some(index),
        }
    }

    fn recorded(&self) -> Vec<Vec<String>> {
        self.calls.lock().expect("calls lock").clone()
    }
}

impl CommandRunner for RecordingRunner {
    fn run(&self, argv: &[String]) -> std::io::Result<CommandOutput> {
        let mut calls = self.calls.lock().expect("calls lock");
        calls.push(argv.to_vec());
        let failed = self.fail_at == Some(calls.len() - 1);
        Ok(CommandOutput {
            exit_code: i32::from(failed),
            stderr: if failed {
                "simulated failure".to_string()
            } else {
                String::new()
            },
        })
    }
}

/// Runner whose spawn itself fails, as if the binary were missing.
struct SpawnFailRunner;

impl CommandRunner for SpawnFailRunner {
    fn run(&self, _argv: &[String]) -> std::io::Result<CommandOutput> {
        Err(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "no such binary",
        ))
    }
}

#[derive(Clone, Default)]
struct CapturingUi {
    messages: Arc<Mutex<Vec<String>>>,
    errors: Arc<Mutex<Vec<String>>>,
}

impl Ui for CapturingUi {
    fn say(&self, message: &str) {
        self.messages.lock().expect("messages lock").push(message.to_string());
    }

    fn error(&self, message: &str) {
        self.errors.lock().expect("errors lock").push(message.to_string());
    }
}

// ── Fixture helpers ──────────────────────────────────────────────────

const TWO_MAPPINGS: &str = "lxc.idmap = u 0 100000 65536\nlxc.idmap = g 0 100000 65536\n";

struct Fixture {
    _output_dir: tempfile::TempDir,
    state: BuildState,
    ui: CapturingUi,
}

fn fixture(config_contents: Option<&str>) -> Fixture {
    let output_dir = tempfile::tempdir().expect("tempdir");
    let config_file = output_dir.path().join("container-config");
    if let Some(contents) = config_contents {
        std::fs::write(&config_file, contents).expect("write container config");
    }

    let config = BuildConfig {
        container_name: ContainerName::new("web01"),
        output_dir: output_dir.path().to_path_buf(),
        config_file,
    };
    let ui = CapturingUi::default();
    Fixture {
        state: BuildState::new(config, Box::new(ui.clone())),
        _output_dir: output_dir,
        ui,
    }
}

// ── Happy path ───────────────────────────────────────────────────────

#[test]
fn export_runs_all_four_commands_in_order() {
    let mut fx = fixture(Some(TWO_MAPPINGS));
    let runner = RecordingRunner::default();
    let step = ExportStep::with_collaborators(root_resolver(), Box::new(runner.clone()));

    let action = step.run(&mut fx.state);
    assert_eq!(action, StepAction::Continue);
    assert!(fx.state.error.is_none());

    let calls = runner.recorded();
    assert_eq!(calls.len(), 4);
    assert_eq!(calls[0][0], "lxc-stop");
    assert_eq!(calls[1][0], "sudo");
    assert_eq!(calls[2][0], "lxc-usernsexec");
    assert_eq!(calls[3][0], "chmod");
}

#[test]
fn archiver_receives_remap_args_in_declaration_order() {
    let mut fx = fixture(Some(TWO_MAPPINGS));
    let runner = RecordingRunner::default();
    let step = ExportStep::with_collaborators(root_resolver(), Box::new(runner.clone()));

    assert_eq!(step.run(&mut fx.state), StepAction::Continue);

    let calls = runner.recorded();
    assert_eq!(
        calls[2][1..5],
        ["-m", "u:0:100000:65536", "-m", "g:0:100000:65536"]
    );
    assert!(calls[2].contains(&"--numeric-owner".to_string()));
}

#[test]
fn config_artifact_is_a_byte_identical_copy() {
    let mut fx = fixture(Some(TWO_MAPPINGS));
    let step = ExportStep::with_collaborators(
        root_resolver(),
        Box::new(RecordingRunner::default()),
    );

    assert_eq!(step.run(&mut fx.state), StepAction::Continue);

    let copy_path = fx.state.config.output_dir.join("lxc-config");
    let copied = std::fs::read(&copy_path).expect("read artifact");
    let original = std::fs::read(&fx.state.config.config_file).expect("read original");
    assert_eq!(copied, original);
}

#[test]
fn export_announces_progress() {
    let mut fx = fixture(Some(TWO_MAPPINGS));
    let step = ExportStep::with_collaborators(
        root_resolver(),
        Box::new(RecordingRunner::default()),
    );

    assert_eq!(step.run(&mut fx.state), StepAction::Continue);
    let messages = fx.ui.messages.lock().expect("messages lock");
    assert_eq!(messages.as_slice(), ["Exporting container..."]);
}

#[test]
fn non_root_user_archives_from_the_per_user_store() {
    let mut fx = fixture(Some(TWO_MAPPINGS));
    let resolver = Box::new(FixedResolver(Identity {
        uid: 1000,
        home_dir: Some(PathBuf::from("/home/alice")),
    }));
    let runner = RecordingRunner::default();
    let step = ExportStep::with_collaborators(resolver, Box::new(runner.clone()));

    assert_eq!(step.run(&mut fx.state), StepAction::Continue);

    let calls = runner.recorded();
    assert!(
        calls[2].contains(&"/home/alice/.local/share/lxc/web01/rootfs".to_string()),
        "archiver should be rooted in the per-user store: {:?}",
        calls[2]
    );
}

// ── Parse failures issue no commands ─────────────────────────────────

#[test]
fn zero_mappings_halt_before_any_command() {
    let mut fx = fixture(Some("lxc.uts.name = web01\n"));
    let runner = RecordingRunner::default();
    let step = ExportStep::with_collaborators(root_resolver(), Box::new(runner.clone()));

    assert_eq!(step.run(&mut fx.state), StepAction::Halt);
    assert!(runner.recorded().is_empty());
    assert!(matches!(
        fx.state.error,
        Some(LxportError::NoIdentityMappings { .. })
    ));
    // The parse failure precedes artifact creation.
    assert!(!fx.state.config.output_dir.join("lxc-config").exists());
    assert_eq!(fx.ui.errors.lock().expect("errors lock").len(), 1);
}

#[test]
fn malformed_mapping_line_halts_naming_the_line() {
    let mut fx = fixture(Some("lxc.idmap = u 0 100000\n"));
    let runner = RecordingRunner::default();
    let step = ExportStep::with_collaborators(root_resolver(), Box::new(runner.clone()));

    assert_eq!(step.run(&mut fx.state), StepAction::Halt);
    assert!(runner.recorded().is_empty());

    let error = fx.state.error.as_ref().expect("stored error");
    assert!(matches!(error, LxportError::IdentityMapParse { .. }));
    assert!(error.to_string().contains("lxc.idmap = u 0 100000"));
}

#[test]
fn unreadable_config_halts_with_read_error() {
    let mut fx = fixture(None);
    let runner = RecordingRunner::default();
    let step = ExportStep::with_collaborators(root_resolver(), Box::new(runner.clone()));

    assert_eq!(step.run(&mut fx.state), StepAction::Halt);
    assert!(runner.recorded().is_empty());
    assert!(matches!(
        fx.state.error,
        Some(LxportError::ConfigRead { .. })
    ));
}

// ── Command failures stop the plan ───────────────────────────────────

#[test]
fn failing_stop_command_prevents_all_later_commands() {
    let mut fx = fixture(Some(TWO_MAPPINGS));
    let runner = RecordingRunner::failing_at(0);
    let step = ExportStep::with_collaborators(root_resolver(), Box::new(runner.clone()));

    assert_eq!(step.run(&mut fx.state), StepAction::Halt);
    assert_eq!(runner.recorded().len(), 1);

    let error = fx.state.error.as_ref().expect("stored error");
    let message = error.to_string();
    assert!(message.contains("lxc-stop"));
    assert!(message.contains("web01"));
    assert!(message.contains("simulated failure"));
}

#[test]
fn failing_archiver_prevents_finalize() {
    let mut fx = fixture(Some(TWO_MAPPINGS));
    let runner = RecordingRunner::failing_at(2);
    let step = ExportStep::with_collaborators(root_resolver(), Box::new(runner.clone()));

    assert_eq!(step.run(&mut fx.state), StepAction::Halt);

    let calls = runner.recorded();
    assert_eq!(calls.len(), 3, "finalize must not run after archiver fails");
    assert_eq!(calls[2][0], "lxc-usernsexec");

    let message = fx.state.error.as_ref().expect("stored error").to_string();
    assert!(message.contains("lxc-usernsexec"));
}

#[test]
fn spawn_failure_halts_with_command_error() {
    let mut fx = fixture(Some(TWO_MAPPINGS));
    let step = ExportStep::with_collaborators(root_resolver(), Box::new(SpawnFailRunner));

    assert_eq!(step.run(&mut fx.state), StepAction::Halt);

    let error = fx.state.error.as_ref().expect("stored error");
    assert!(matches!(error, LxportError::CommandExecution { .. }));
    assert!(error.to_string().contains("no such binary"));
}

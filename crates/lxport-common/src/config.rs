//! Build configuration consumed by the export step.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::types::ContainerName;

/// Configuration for one export invocation.
///
/// Produced by the invoking CLI (or any other orchestrator) and handed to
/// the export step through the build state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuildConfig {
    /// Name of the container to export.
    pub container_name: ContainerName,
    /// Directory where the archive and config artifact are written.
    pub output_dir: PathBuf,
    /// Path to the container's configuration file.
    pub config_file: PathBuf,
}

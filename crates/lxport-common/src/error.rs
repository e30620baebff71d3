//! Unified error types for the lxport workspace.
//!
//! Every failure in the export step is fatal: the step halts on the first
//! error and surfaces a single human-readable message naming the failing
//! operation and its relevant identifiers.

use std::path::PathBuf;

use thiserror::Error;

/// Top-level error type shared across the workspace.
#[derive(Debug, Error)]
pub enum LxportError {
    /// The container configuration file could not be read.
    #[error("error reading container config {path}: {source}")]
    ConfigRead {
        /// Path of the configuration file.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// An identity-mapping line did not have the expected shape.
    #[error("error parsing idmap: \"{line}\"")]
    IdentityMapParse {
        /// The offending line, verbatim.
        line: String,
    },

    /// The configuration file declared no identity mappings at all.
    #[error("no idmap entries found in {path}: cannot remap ownership for export")]
    NoIdentityMappings {
        /// Path of the configuration file that was scanned.
        path: PathBuf,
    },

    /// The config-copy artifact could not be created.
    #[error("error creating config artifact {path}: {source}")]
    ArtifactCreate {
        /// Destination path of the artifact.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// Copying the configuration file into the artifact failed.
    #[error("error copying config file {path}: {source}")]
    ArtifactCopy {
        /// Path involved in the failed read or write.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// An external export command failed to spawn or exited non-zero.
    #[error("error exporting container: {reason}, command: {argv:?}")]
    CommandExecution {
        /// Full argument vector of the failing command.
        argv: Vec<String>,
        /// Underlying cause (spawn error or exit status with stderr).
        reason: String,
    },

    /// A configuration value or runtime precondition is invalid.
    #[error("invalid configuration: {message}")]
    Config {
        /// Description of the invalid configuration.
        message: String,
    },
}

/// Convenience alias used throughout the workspace.
pub type Result<T> = std::result::Result<T, LxportError>;

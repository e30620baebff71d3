//! Resolved working state for one export operation.

use std::path::PathBuf;

use lxport_common::config::BuildConfig;
use lxport_common::constants::{CONFIG_ARTIFACT_NAME, ROOTFS_ARCHIVE_NAME, SYSTEM_LXC_STORE};
use lxport_common::types::ContainerName;

use crate::identity::IdentityResolver;

/// Paths derived for one export invocation. Immutable after creation.
#[derive(Debug, Clone)]
pub struct ExportContext {
    /// Name of the container being exported.
    pub container_name: ContainerName,
    /// The container's private storage root.
    pub container_dir: PathBuf,
    /// Directory receiving the export artifacts.
    pub output_dir: PathBuf,
    /// Destination of the root filesystem archive.
    pub archive_path: PathBuf,
    /// Destination of the config-copy artifact.
    pub config_copy_path: PathBuf,
}

/// Derives the export context from the build configuration.
///
/// Pure path computation: no I/O is performed and no failure is possible.
/// If the invoking user cannot be determined the system-wide store is
/// used; path errors (such as an unwritable output directory) surface
/// later when the executor touches the filesystem.
#[must_use]
pub fn resolve_context(config: &BuildConfig, resolver: &dyn IdentityResolver) -> ExportContext {
    let store_root = match resolver.resolve() {
        Ok(identity) => identity.store_root(),
        Err(e) => {
            tracing::warn!(error = %e, "cannot find current user, falling back to {SYSTEM_LXC_STORE}");
            PathBuf::from(SYSTEM_LXC_STORE)
        }
    };

    let container_dir = store_root.join(config.container_name.as_str());
    ExportContext {
        container_name: config.container_name.clone(),
        container_dir,
        output_dir: config.output_dir.clone(),
        archive_path: config.output_dir.join(ROOTFS_ARCHIVE_NAME),
        config_copy_path: config.output_dir.join(CONFIG_ARTIFACT_NAME),
    }
}

//! System-wide constants and default paths.

/// System-wide LXC container store used by privileged invocations.
pub const SYSTEM_LXC_STORE: &str = "/var/lib/lxc";

/// Per-user LXC container store, relative to the invoking user's home.
pub const USER_LXC_STORE: &str = ".local/share/lxc";

/// File name of the root filesystem archive written into the output directory.
pub const ROOTFS_ARCHIVE_NAME: &str = "rootfs.tar.gz";

/// File name of the container-config artifact written into the output directory.
pub const CONFIG_ARTIFACT_NAME: &str = "lxc-config";

/// Marker substring identifying identity-mapping lines in a container config.
pub const IDMAP_MARKER: &str = "lxc.idmap";

/// Application name used in CLI output.
pub const APP_NAME: &str = "lxport";

/// Binary name for the CLI.
pub const BIN_NAME: &str = "lxport";

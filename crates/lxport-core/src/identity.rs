//! Invoking-user identity and container-store selection.
//!
//! LXC keeps privileged containers under a system-wide store and
//! unprivileged containers under a per-user store. Which one applies
//! depends on who is running the export.

use std::path::PathBuf;

use lxport_common::constants::{SYSTEM_LXC_STORE, USER_LXC_STORE};
use lxport_common::error::{LxportError, Result};

/// Identity of the invoking user, as far as it could be determined.
#[derive(Debug, Clone)]
pub struct Identity {
    /// Numeric user ID.
    pub uid: u32,
    /// Home directory, if the account has one.
    pub home_dir: Option<PathBuf>,
}

impl Identity {
    /// Returns the container store root for this identity.
    ///
    /// The superuser owns the system-wide store; any other user with a
    /// home directory owns a per-user store beneath it.
    #[must_use]
    pub fn store_root(&self) -> PathBuf {
        match &self.home_dir {
            Some(home) if self.uid != 0 => home.join(USER_LXC_STORE),
            _ => PathBuf::from(SYSTEM_LXC_STORE),
        }
    }
}

/// Resolves the identity of the invoking user.
///
/// Abstracted so the export step can be tested deterministically without
/// relying on the process environment.
pub trait IdentityResolver: Send + Sync {
    /// Looks up the current user's uid and home directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the user database lookup fails. Callers treat
    /// this as non-fatal and fall back to the system store.
    fn resolve(&self) -> Result<Identity>;
}

/// Identity resolver backed by the host's user database.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemIdentityResolver;

impl IdentityResolver for SystemIdentityResolver {
    fn resolve(&self) -> Result<Identity> {
        let uid = nix::unistd::Uid::effective();
        let user = nix::unistd::User::from_uid(uid)
            .map_err(|e| LxportError::Config {
                message: format!("user database lookup failed: {e}"),
            })?
            .ok_or_else(|| LxportError::Config {
                message: format!("no user database entry for uid {uid}"),
            })?;

        tracing::debug!(uid = uid.as_raw(), home = %user.dir.display(), "resolved invoking user");
        let home_dir = if user.dir.as_os_str().is_empty() {
            None
        } else {
            Some(user.dir)
        };
        Ok(Identity {
            uid: uid.as_raw(),
            home_dir,
        })
    }
}

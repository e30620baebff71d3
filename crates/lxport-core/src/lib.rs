//! # lxport-core
//!
//! The export step: turns a running LXC container into a portable
//! `rootfs.tar.gz` whose file ownership survives the user-namespace
//! boundary, plus a byte-identical copy of the container's config.
//!
//! The step derives the container's on-disk location from the invoking
//! user's identity, translates the container's `lxc.idmap` declarations
//! into ownership-remap arguments for `lxc-usernsexec`, and drives a
//! fixed sequence of external commands: stop the container, relax
//! output-directory permissions, archive the root filesystem, and mark
//! the config artifact executable. Any failure halts the step.

pub mod context;
pub mod export;
pub mod identity;
pub mod idmap;
pub mod runner;
pub mod step;

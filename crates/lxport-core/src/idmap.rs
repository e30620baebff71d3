//! Identity-map parsing.
//!
//! An LXC container config declares how IDs inside the container's user
//! namespace map to host IDs, one declaration per line:
//!
//! ```text
//! lxc.idmap = u 0 100000 65536
//! lxc.idmap = g 0 100000 65536
//! ```
//!
//! Each declaration becomes a `-m kind:container-id:host-id:range`
//! argument for `lxc-usernsexec`, in source order. The archiver applies
//! mappings in sequence, so later duplicates for the same ID must win;
//! preserving source order is required for correct shadowing.

use std::path::Path;

use lxport_common::constants::IDMAP_MARKER;
use lxport_common::error::{LxportError, Result};

/// Classification of one container-config line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigLine<'a> {
    /// An identity-mapping declaration with its four value fields.
    Mapping {
        /// Mapping kind: `u` for users, `g` for groups.
        kind: &'a str,
        /// First ID inside the container namespace.
        container_id: &'a str,
        /// First ID on the host.
        host_id: &'a str,
        /// Number of consecutive IDs covered.
        range: &'a str,
    },
    /// Any line that is not an identity-mapping declaration.
    Other,
}

/// Classifies a single config line.
///
/// Lines containing the `lxc.idmap` marker must carry an `=` delimiter
/// followed by exactly four single-space-separated fields.
///
/// # Errors
///
/// Returns [`LxportError::IdentityMapParse`] naming the line verbatim if
/// a mapping line is missing its delimiter or has the wrong field count.
pub fn classify_line(line: &str) -> Result<ConfigLine<'_>> {
    if !line.contains(IDMAP_MARKER) {
        return Ok(ConfigLine::Other);
    }

    let value = line
        .split('=')
        .nth(1)
        .ok_or_else(|| LxportError::IdentityMapParse { line: line.into() })?;

    let fields: Vec<&str> = value.trim().split(' ').collect();
    match fields.as_slice() {
        &[kind, container_id, host_id, range] => Ok(ConfigLine::Mapping {
            kind,
            container_id,
            host_id,
            range,
        }),
        _ => Err(LxportError::IdentityMapParse { line: line.into() }),
    }
}

/// Ordered, non-empty list of ownership-remap arguments.
///
/// Holds alternating `-m` flags and `kind:cid:hid:len` values, ready to
/// splice into an `lxc-usernsexec` invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemapArgs(Vec<String>);

impl RemapArgs {
    /// Returns the flat argument list.
    #[must_use]
    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    /// Returns the number of mapping declarations (not argument strings).
    #[must_use]
    pub fn mapping_count(&self) -> usize {
        self.0.len() / 2
    }
}

/// Parses all identity-mapping declarations out of config file content.
///
/// Mapping lines are folded into remap arguments in source order; the
/// first malformed line aborts the parse with no partial results.
///
/// # Errors
///
/// Returns [`LxportError::IdentityMapParse`] on the first malformed
/// mapping line, or [`LxportError::NoIdentityMappings`] if the content
/// declares no mappings at all — an archive produced without remapping
/// would silently carry wrong ownership.
pub fn parse_remap_args(content: &str, source: &Path) -> Result<RemapArgs> {
    let mut args = Vec::new();
    for line in content.lines() {
        if let ConfigLine::Mapping {
            kind,
            container_id,
            host_id,
            range,
        } = classify_line(line)?
        {
            args.push("-m".to_string());
            args.push(format!("{kind}:{container_id}:{host_id}:{range}"));
        }
    }

    if args.is_empty() {
        return Err(LxportError::NoIdentityMappings {
            path: source.to_path_buf(),
        });
    }

    tracing::debug!(mappings = args.len() / 2, "parsed idmap declarations");
    Ok(RemapArgs(args))
}

/// Reads a container config file and parses its identity mappings.
///
/// # Errors
///
/// Returns [`LxportError::ConfigRead`] if the file cannot be read, plus
/// any error from [`parse_remap_args`].
pub fn read_remap_args(path: &Path) -> Result<RemapArgs> {
    let content = std::fs::read_to_string(path).map_err(|e| LxportError::ConfigRead {
        path: path.to_path_buf(),
        source: e,
    })?;
    parse_remap_args(&content, path)
}

//! Switching the active version.
//!
//! The active version is expressed entirely through links in `<root>/bin/`.
//! Each stable path points at the same-named executable inside one installed
//! version:
//!
//! ```text
//! <root>/bin/node -> <root>/versions/v20.11.1/bin/node
//! <root>/bin/npm  -> <root>/versions/v20.11.1/bin/npm
//! <root>/bin/npx  -> <root>/versions/v20.11.1/bin/npx
//! ```
//!
//! `node` is required. `npm` and `npx` are best-effort: a missing or failing
//! secondary link degrades the activation instead of failing it.

use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::util::fs::{create_symlink, remove_if_exists};
use crate::version::VersionId;

/// Executable every installation must provide.
pub const PRIMARY_BINARY: &str = "node";

/// Executables linked when present.
pub const SECONDARY_BINARIES: [&str; 2] = ["npm", "npx"];

#[derive(Debug, Error)]
pub enum ActivateError {
  #[error("version {0} is not installed")]
  NotInstalled(VersionId),

  #[error("version {version} has no node binary at {path}")]
  MissingPrimaryBinary { version: VersionId, path: PathBuf },

  #[error("failed to link {link} -> {target}: {source}")]
  Link {
    link: PathBuf,
    target: PathBuf,
    #[source]
    source: io::Error,
  },
}

/// A secondary binary that could not be linked.
#[derive(Debug)]
pub enum SecondaryIssue {
  /// The version does not ship this binary; any stale link was removed.
  Missing { name: &'static str },
  /// Linking failed; the previous link was removed.
  Failed { name: &'static str, error: io::Error },
}

impl SecondaryIssue {
  pub fn name(&self) -> &'static str {
    match self {
      Self::Missing { name } | Self::Failed { name, .. } => name,
    }
  }
}

impl fmt::Display for SecondaryIssue {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::Missing { name } => write!(f, "{name} is not provided by this version"),
      Self::Failed { name, error } => write!(f, "failed to link {name}: {error}"),
    }
  }
}

/// Result of a successful activation.
#[derive(Debug)]
pub struct Activation {
  pub version: VersionId,
  /// Stable paths now pointing into the version.
  pub linked: Vec<PathBuf>,
  pub issues: Vec<SecondaryIssue>,
}

impl Activation {
  /// True when at least one secondary binary is not linked.
  pub fn is_degraded(&self) -> bool {
    !self.issues.is_empty()
  }
}

pub struct Activator<'a> {
  config: &'a Config,
}

impl<'a> Activator<'a> {
  pub fn new(config: &'a Config) -> Self {
    Self { config }
  }

  /// Point the stable paths at `version`.
  ///
  /// Both preconditions are checked before any link is touched, so a failed
  /// activation leaves the previous one intact.
  pub fn activate(&self, version: &VersionId) -> Result<Activation, ActivateError> {
    let version_dir = self.config.version_dir(version);
    if !version_dir.is_dir() {
      return Err(ActivateError::NotInstalled(version.clone()));
    }

    let source_bin = version_dir.join("bin");
    let primary = source_bin.join(PRIMARY_BINARY);
    if primary.symlink_metadata().is_err() {
      return Err(ActivateError::MissingPrimaryBinary {
        version: version.clone(),
        path: primary,
      });
    }

    let bin_dir = self.config.bin_dir();
    fs::create_dir_all(&bin_dir).map_err(|source| ActivateError::Link {
      link: bin_dir.clone(),
      target: source_bin.clone(),
      source,
    })?;

    let mut linked = Vec::with_capacity(1 + SECONDARY_BINARIES.len());
    let mut issues = Vec::new();

    let link = bin_dir.join(PRIMARY_BINARY);
    replace_link(&primary, &link).map_err(|source| ActivateError::Link {
      link: link.clone(),
      target: primary.clone(),
      source,
    })?;
    linked.push(link);

    for name in SECONDARY_BINARIES {
      let target = source_bin.join(name);
      let link = bin_dir.join(name);

      if target.symlink_metadata().is_err() {
        debug!(binary = name, version = %version, "secondary binary not shipped");
        if let Err(error) = remove_if_exists(&link) {
          warn!(link = %link.display(), error = %error, "failed to remove stale link");
        }
        issues.push(SecondaryIssue::Missing { name });
        continue;
      }

      match replace_link(&target, &link) {
        Ok(()) => linked.push(link),
        Err(error) => {
          warn!(binary = name, error = %error, "failed to link secondary binary");
          if let Err(remove_err) = remove_if_exists(&link) {
            warn!(link = %link.display(), error = %remove_err, "failed to remove stale link");
          }
          issues.push(SecondaryIssue::Failed { name, error });
        }
      }
    }

    info!(version = %version, degraded = !issues.is_empty(), "activated");
    Ok(Activation {
      version: version.clone(),
      linked,
      issues,
    })
  }

  /// The version the primary link points into, if any.
  pub fn current(&self) -> Option<VersionId> {
    current_version(self.config)
  }
}

/// Read `<root>/bin/node` and derive the version from its target.
///
/// The target must end in `<version>/bin/node`; anything else is treated as no
/// active version.
pub fn current_version(config: &Config) -> Option<VersionId> {
  let link = config.bin_dir().join(PRIMARY_BINARY);
  let target = fs::read_link(&link).ok()?;

  let bin = target.parent()?;
  if bin.file_name()? != "bin" {
    debug!(target = %target.display(), "primary link does not point into a bin directory");
    return None;
  }
  let name = bin.parent()?.file_name()?.to_str()?;
  Some(VersionId::normalize(name))
}

/// Atomically point `link` at `target`.
///
/// A fresh link is created at a hidden sibling and renamed over `link`, so
/// readers see either the old or the new target.
fn replace_link(target: &Path, link: &Path) -> io::Result<()> {
  let file_name = link
    .file_name()
    .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "link path has no file name"))?;
  let tmp = link.with_file_name(format!(".{}.tmp", file_name.to_string_lossy()));

  remove_if_exists(&tmp)?;
  create_symlink(target, &tmp)?;
  if let Err(e) = fs::rename(&tmp, link) {
    let _ = remove_if_exists(&tmp);
    return Err(e);
  }
  debug!(link = %link.display(), target = %target.display(), "linked");
  Ok(())
}

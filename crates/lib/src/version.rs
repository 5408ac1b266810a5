//! Version identifiers and alias resolution.
//!
//! Every version handled by vnode is a [`VersionId`]: the user's input with a
//! leading `v` guaranteed. A [`VersionRequest`] is what the user asked for,
//! either a concrete version or the `lts` alias, and is turned into a
//! [`VersionId`] by one of two resolvers:
//!
//! - [`resolve_remote`] picks the first LTS entry in manifest order. The
//!   release index lists newest releases first, and the resolver relies on it.
//! - [`resolve_installed`] picks the greatest installed LTS version by plain
//!   string comparison, so `v9.0.0` sorts above `v10.0.0`.
//!
//! The two policies can disagree, and neither is semantic-version ordering.

use std::collections::{BTreeSet, HashSet};
use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::consts::{LTS_ALIAS, VERSION_PREFIX};
use crate::manifest::ManifestEntry;

/// A normalized version identifier, e.g. `v20.11.1`.
///
/// Ordering is lexicographic on the string.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct VersionId(String);

impl VersionId {
  /// Trim surrounding whitespace and make sure the `v` prefix is present.
  ///
  /// Idempotent: normalizing an already normalized id returns it unchanged.
  pub fn normalize(input: &str) -> Self {
    let trimmed = input.trim();
    if trimmed.starts_with(VERSION_PREFIX) {
      Self(trimmed.to_string())
    } else {
      Self(format!("{}{}", VERSION_PREFIX, trimmed))
    }
  }

  pub fn as_str(&self) -> &str {
    &self.0
  }
}

impl fmt::Display for VersionId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.0)
  }
}

impl From<String> for VersionId {
  fn from(value: String) -> Self {
    Self::normalize(&value)
  }
}

impl From<VersionId> for String {
  fn from(value: VersionId) -> Self {
    value.0
  }
}

/// What the user asked for on the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VersionRequest {
  /// The `lts` alias.
  Lts,
  /// A concrete, normalized version.
  Exact(VersionId),
}

impl VersionRequest {
  /// `lts` (any ASCII case) is the alias; anything else is a concrete version.
  pub fn parse(input: &str) -> Self {
    let input = input.trim();
    if input.eq_ignore_ascii_case(LTS_ALIAS) {
      Self::Lts
    } else {
      Self::Exact(VersionId::normalize(input))
    }
  }

  pub fn is_lts(&self) -> bool {
    matches!(self, Self::Lts)
  }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ResolveError {
  #[error("could not find an LTS release in the remote manifest")]
  NoLtsFound,

  #[error("no installed version is an LTS release")]
  NoInstalledLts,
}

/// Resolve a request against the remote manifest.
///
/// For `lts` this is the first LTS-flagged entry in the order the manifest
/// lists them; entries are not re-sorted.
pub fn resolve_remote(request: &VersionRequest, manifest: &[ManifestEntry]) -> Result<VersionId, ResolveError> {
  match request {
    VersionRequest::Exact(version) => Ok(version.clone()),
    VersionRequest::Lts => {
      let entry = manifest
        .iter()
        .find(|entry| entry.is_lts())
        .ok_or(ResolveError::NoLtsFound)?;
      debug!(version = %entry.version, "resolved lts from manifest");
      Ok(entry.version.clone())
    }
  }
}

/// Resolve a request against the installed versions.
///
/// For `lts` this is the lexicographically greatest installed version that the
/// manifest flags as LTS.
pub fn resolve_installed(
  request: &VersionRequest,
  installed: &BTreeSet<VersionId>,
  manifest: &[ManifestEntry],
) -> Result<VersionId, ResolveError> {
  match request {
    VersionRequest::Exact(version) => Ok(version.clone()),
    VersionRequest::Lts => {
      let lts = lts_versions(manifest);
      let version = installed
        .iter()
        .filter(|version| lts.contains(version))
        .max()
        .ok_or(ResolveError::NoInstalledLts)?;
      debug!(version = %version, "resolved lts from installed versions");
      Ok(version.clone())
    }
  }
}

/// The set of versions the manifest flags as LTS.
pub fn lts_versions(manifest: &[ManifestEntry]) -> HashSet<&VersionId> {
  manifest
    .iter()
    .filter(|entry| entry.is_lts())
    .map(|entry| &entry.version)
    .collect()
}

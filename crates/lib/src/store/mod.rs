//! The set of installed versions.
//!
//! A version is installed when `<root>/versions/<version>/` exists as a
//! directory. The store never looks inside it.
//!
//! # Layout
//!
//! ```text
//! <root>/
//! ├── versions/
//! │   ├── v18.20.4/
//! │   └── v20.11.1/
//! └── .trash-XXXX/            # transient, holds a version being removed
//! ```

use std::collections::BTreeSet;
use std::fs;
use std::io;
use std::path::PathBuf;

use thiserror::Error;
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::version::VersionId;

/// Name prefix of the directories removed versions pass through.
pub const TRASH_PREFIX: &str = ".trash-";

#[derive(Debug, Error)]
pub enum StoreError {
  #[error("version {0} is not installed")]
  NotInstalled(VersionId),

  #[error("version {0} is currently active and cannot be removed")]
  CannotRemoveActive(VersionId),

  #[error("failed to read {path}: {source}")]
  Read {
    path: PathBuf,
    #[source]
    source: io::Error,
  },

  #[error("failed to remove {path}: {source}")]
  Removal {
    path: PathBuf,
    #[source]
    source: io::Error,
  },
}

pub struct InstallationStore<'a> {
  config: &'a Config,
}

impl<'a> InstallationStore<'a> {
  pub fn new(config: &'a Config) -> Self {
    Self { config }
  }

  /// All installed versions, in identifier order.
  ///
  /// A missing `versions/` directory is an empty store. Hidden entries, plain
  /// files and directories not named like a normalized version are ignored,
  /// so every listed version also passes [`Self::exists`].
  pub fn list(&self) -> Result<BTreeSet<VersionId>, StoreError> {
    let dir = self.config.versions_dir();
    let read_err = |source: io::Error| StoreError::Read {
      path: dir.clone(),
      source,
    };

    let entries = match fs::read_dir(&dir) {
      Ok(entries) => entries,
      Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(BTreeSet::new()),
      Err(e) => return Err(read_err(e)),
    };

    let mut versions = BTreeSet::new();
    for entry in entries {
      let entry = entry.map_err(read_err)?;
      let name = entry.file_name();
      let Some(name) = name.to_str() else {
        debug!(name = ?name, "skipping non-utf8 entry");
        continue;
      };
      if name.starts_with('.') {
        continue;
      }
      if !entry.path().is_dir() {
        continue;
      }
      let version = VersionId::normalize(name);
      if version.as_str() != name {
        debug!(name, "skipping entry without v prefix");
        continue;
      }
      versions.insert(version);
    }

    debug!(count = versions.len(), "listed installed versions");
    Ok(versions)
  }

  pub fn exists(&self, version: &VersionId) -> bool {
    self.config.version_dir(version).is_dir()
  }

  /// Remove an installed version.
  ///
  /// `active` is the currently active version, if any; removing it is refused.
  /// The directory is first renamed out of `versions/`, so it either
  /// disappears as a whole or stays untouched.
  pub fn remove(&self, version: &VersionId, active: Option<&VersionId>) -> Result<(), StoreError> {
    let dir = self.config.version_dir(version);
    if !dir.is_dir() {
      return Err(StoreError::NotInstalled(version.clone()));
    }
    if active == Some(version) {
      return Err(StoreError::CannotRemoveActive(version.clone()));
    }

    let trash = tempfile::Builder::new()
      .prefix(TRASH_PREFIX)
      .tempdir_in(&self.config.root)
      .map_err(|source| StoreError::Removal {
        path: self.config.root.clone(),
        source,
      })?;
    let doomed = trash.path().join(version.as_str());

    fs::rename(&dir, &doomed).map_err(|source| StoreError::Removal {
      path: dir.clone(),
      source,
    })?;
    info!(version = %version, "removed");

    let trash_path = trash.path().to_path_buf();
    if let Err(error) = trash.close() {
      warn!(path = %trash_path.display(), error = %error, "failed to clean up removed version");
    }
    Ok(())
  }
}

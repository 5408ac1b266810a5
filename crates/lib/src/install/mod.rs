//! Version installation.
//!
//! Installing a version downloads `node-<version>-<os>-<arch>.tar.gz` from the
//! distribution mirror and extracts it into `versions/<version>/`.
//!
//! # Atomicity
//!
//! ```text
//! $TMPDIR/vnode-download-XXXX/           # archive, removed on every exit path
//! <root>/.staging-XXXX/tree/             # extraction target, removed on drop
//! <root>/versions/<version>/             # appears via a single rename
//! ```
//!
//! Nothing is written under `versions/` until extraction has fully succeeded,
//! so a failed or interrupted install never shows up as installed.

pub mod archive;
mod download;

use std::fs;
use std::io;
use std::path::PathBuf;

use reqwest::Client;
use tempfile::TempDir;
use thiserror::Error;
use tracing::{debug, info};

use crate::config::Config;
use crate::platform::Target;
use crate::version::VersionId;

pub use archive::{ExtractError, ExtractStats, extract_tar_gz};

/// Name prefix of staging directories below the root.
pub const STAGING_PREFIX: &str = ".staging-";

const DOWNLOAD_PREFIX: &str = "vnode-download-";

#[derive(Debug, Error)]
pub enum InstallError {
  /// The archive request could not be sent or the body could not be read.
  #[error("failed to download {url}: {source}")]
  Download {
    url: String,
    #[source]
    source: reqwest::Error,
  },

  /// The mirror answered with a non-success status.
  #[error("download of {url} failed with HTTP {status}")]
  BadStatus { url: String, status: u16 },

  #[error("failed to extract archive: {0}")]
  Extraction(#[from] ExtractError),

  #[error("io error at {path}: {source}")]
  Io {
    path: PathBuf,
    #[source]
    source: io::Error,
  },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InstallOutcome {
  Installed {
    version: VersionId,
    path: PathBuf,
    /// Size of the downloaded archive in bytes.
    downloaded: u64,
  },
  AlreadyInstalled {
    version: VersionId,
    path: PathBuf,
  },
}

impl InstallOutcome {
  pub fn path(&self) -> &PathBuf {
    match self {
      Self::Installed { path, .. } | Self::AlreadyInstalled { path, .. } => path,
    }
  }
}

/// Archive file name for a version and target.
pub fn archive_name(version: &VersionId, target: &Target) -> String {
  format!("node-{}-{}-{}.tar.gz", version, target.os, target.arch)
}

/// Full download URL for a version and target below `dist_url`.
pub fn download_url(dist_url: &str, version: &VersionId, target: &Target) -> String {
  format!(
    "{}/{}/{}",
    dist_url.trim_end_matches('/'),
    version,
    archive_name(version, target)
  )
}

pub struct Installer<'a> {
  config: &'a Config,
  http: Client,
}

impl<'a> Installer<'a> {
  pub fn new(config: &'a Config) -> Self {
    Self {
      config,
      http: Client::new(),
    }
  }

  /// Download and extract `version` for `target`.
  ///
  /// Returns [`InstallOutcome::AlreadyInstalled`] without touching the
  /// network when the version directory already exists.
  pub async fn install(&self, version: &VersionId, target: &Target) -> Result<InstallOutcome, InstallError> {
    let dest = self.config.version_dir(version);
    if dest.is_dir() {
      info!(version = %version, "already installed");
      return Ok(InstallOutcome::AlreadyInstalled {
        version: version.clone(),
        path: dest,
      });
    }

    let versions_dir = self.config.versions_dir();
    fs::create_dir_all(&versions_dir).map_err(|source| InstallError::Io {
      path: versions_dir.clone(),
      source,
    })?;

    let scratch = tempfile::Builder::new()
      .prefix(DOWNLOAD_PREFIX)
      .tempdir()
      .map_err(|source| InstallError::Io {
        path: std::env::temp_dir(),
        source,
      })?;

    let url = download_url(&self.config.dist_url, version, target);
    let archive_path = scratch.path().join(archive_name(version, target));
    let downloaded = download::download(&self.http, &url, &archive_path).await?;

    let staging = self.staging_dir()?;
    let tree = staging.path().join("tree");
    extract_tar_gz(&archive_path, &tree)?;

    fs::rename(&tree, &dest).map_err(|source| InstallError::Io {
      path: dest.clone(),
      source,
    })?;
    debug!(from = %tree.display(), to = %dest.display(), "moved staged tree into place");

    info!(version = %version, path = %dest.display(), "installed");
    Ok(InstallOutcome::Installed {
      version: version.clone(),
      path: dest,
      downloaded,
    })
  }

  /// Staging directory on the same filesystem as `versions/`.
  fn staging_dir(&self) -> Result<TempDir, InstallError> {
    tempfile::Builder::new()
      .prefix(STAGING_PREFIX)
      .tempdir_in(&self.config.root)
      .map_err(|source| InstallError::Io {
        path: self.config.root.clone(),
        source,
      })
  }
}

//! Runtime configuration.
//!
//! A [`Config`] is built once at startup and passed by reference to every
//! component. All on-disk locations are derived from its root:
//!
//! ```text
//! <root>/
//! ├── versions/           # One directory per installed version
//! │   └── v20.11.1/
//! │       └── bin/node
//! └── bin/                # Stable links to the active version
//!     ├── node -> <root>/versions/v20.11.1/bin/node
//!     ├── npm
//!     └── npx
//! ```

use std::fs;
use std::io;
use std::path::PathBuf;

use thiserror::Error;
use tracing::debug;

use crate::consts::{BIN_DIR, DEFAULT_DIST_URL, DIST_URL_ENV, MANIFEST_FILENAME, ROOT_ENV, VERSIONS_DIR};
use crate::platform::paths::default_root_dir;
use crate::version::VersionId;

#[derive(Debug, Error)]
pub enum ConfigError {
  #[error("could not determine home directory; set VNODE_ROOT to choose a root directory")]
  NoHomeDir,

  #[error("failed to create directory {path}: {source}")]
  CreateDir {
    path: PathBuf,
    #[source]
    source: io::Error,
  },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
  /// Directory holding `versions/` and `bin/`.
  pub root: PathBuf,
  /// Distribution base URL, without a trailing slash.
  pub dist_url: String,
}

impl Config {
  pub fn new(root: impl Into<PathBuf>, dist_url: impl Into<String>) -> Self {
    let dist_url = dist_url.into();
    Self {
      root: root.into(),
      dist_url: dist_url.trim_end_matches('/').to_string(),
    }
  }

  /// Build the configuration from the environment.
  ///
  /// `VNODE_ROOT` overrides the root (default `~/.vnode`), `VNODE_DIST_URL`
  /// overrides the distribution mirror (default `https://nodejs.org/dist`).
  pub fn from_env() -> Result<Self, ConfigError> {
    let root = match std::env::var_os(ROOT_ENV) {
      Some(root) if !root.is_empty() => PathBuf::from(root),
      _ => default_root_dir().ok_or(ConfigError::NoHomeDir)?,
    };

    let dist_url = std::env::var(DIST_URL_ENV)
      .ok()
      .filter(|url| !url.trim().is_empty())
      .unwrap_or_else(|| DEFAULT_DIST_URL.to_string());

    let config = Self::new(root, dist_url);
    debug!(root = %config.root.display(), dist_url = %config.dist_url, "loaded configuration");
    Ok(config)
  }

  pub fn versions_dir(&self) -> PathBuf {
    self.root.join(VERSIONS_DIR)
  }

  pub fn bin_dir(&self) -> PathBuf {
    self.root.join(BIN_DIR)
  }

  /// Directory an installed version lives in.
  pub fn version_dir(&self, version: &VersionId) -> PathBuf {
    self.versions_dir().join(version.as_str())
  }

  pub fn manifest_url(&self) -> String {
    format!("{}/{}", self.dist_url, MANIFEST_FILENAME)
  }

  /// Create `versions/` and `bin/` if they are missing.
  pub fn ensure_dirs(&self) -> Result<(), ConfigError> {
    for dir in [self.versions_dir(), self.bin_dir()] {
      fs::create_dir_all(&dir).map_err(|source| ConfigError::CreateDir { path: dir.clone(), source })?;
    }
    Ok(())
  }
}

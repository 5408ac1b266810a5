//! Release index types.
//!
//! The release index is a JSON array of entries, newest release first:
//!
//! ```json
//! [
//!   { "version": "v22.3.0", "date": "2024-06-11", "files": ["linux-x64", ...],
//!     "npm": "10.8.1", "lts": false, "security": false },
//!   { "version": "v20.14.0", "date": "2024-05-28", "files": [...],
//!     "npm": "10.7.0", "lts": "Iron", "security": false }
//! ]
//! ```
//!
//! `lts` is either `false` or a codename string, and older mirrors also use
//! `true`. [`LtsLabel`] folds those shapes into one enum.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::version::VersionId;

/// Date format used by the release index.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// One release advertised by the manifest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestEntry {
  pub version: VersionId,
  #[serde(default)]
  pub date: String,
  /// Platform artifact tags published for this release (e.g. `linux-x64`).
  #[serde(default)]
  pub files: Vec<String>,
  /// Version of the bundled npm, when advertised.
  #[serde(default)]
  pub npm: Option<String>,
  #[serde(default)]
  pub lts: LtsLabel,
  #[serde(default)]
  pub security: bool,
}

impl ManifestEntry {
  pub fn is_lts(&self) -> bool {
    self.lts.is_lts()
  }

  /// Parsed release date, or `None` if the date is not `YYYY-MM-DD`.
  pub fn release_date(&self) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(&self.date, DATE_FORMAT).ok()
  }
}

/// Long-term-support marker of a release.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawLts", into = "RawLts")]
pub enum LtsLabel {
  #[default]
  NotLts,
  /// LTS with a release-line codename, e.g. `"Iron"`.
  Named(String),
  /// LTS flagged with a bare `true`.
  Unnamed,
}

impl LtsLabel {
  pub fn is_lts(&self) -> bool {
    !matches!(self, Self::NotLts)
  }

  pub fn codename(&self) -> Option<&str> {
    match self {
      Self::Named(name) => Some(name),
      _ => None,
    }
  }
}

/// Wire shape of the `lts` field.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
enum RawLts {
  Flag(bool),
  Codename(String),
  Other(serde_json::Value),
}

impl From<RawLts> for LtsLabel {
  fn from(raw: RawLts) -> Self {
    match raw {
      RawLts::Flag(true) => Self::Unnamed,
      RawLts::Codename(name) if !name.is_empty() => Self::Named(name),
      RawLts::Flag(false) | RawLts::Codename(_) | RawLts::Other(_) => Self::NotLts,
    }
  }
}

impl From<LtsLabel> for RawLts {
  fn from(label: LtsLabel) -> Self {
    match label {
      LtsLabel::NotLts => Self::Flag(false),
      LtsLabel::Unnamed => Self::Flag(true),
      LtsLabel::Named(name) => Self::Codename(name),
    }
  }
}

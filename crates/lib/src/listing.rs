//! Display models for `list` and `ls-remote`.
//!
//! These functions only shape data; fetching and printing stay in the CLI.

use std::cmp::Ordering;
use std::collections::{BTreeSet, HashSet};

use chrono::NaiveDate;
use serde::Serialize;

use crate::manifest::ManifestEntry;
use crate::version::{VersionId, lts_versions};

/// Rows shown by `ls-remote` unless `--all` is given.
pub const REMOTE_LIMIT: usize = 20;

/// Releases younger than this many days are flagged as recent.
pub const RECENT_DAYS: i64 = 30;

#[derive(Debug, Clone, Copy, Default)]
pub struct RemoteOptions {
  /// Only LTS releases.
  pub lts_only: bool,
  /// No row limit.
  pub all: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RemoteRow {
  pub version: VersionId,
  pub date: String,
  pub lts: bool,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub codename: Option<String>,
  pub recent: bool,
  pub security: bool,
  pub installed: bool,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub npm: Option<String>,
  /// Platform artifacts published for the release.
  #[serde(skip_serializing_if = "Vec::is_empty")]
  pub files: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RemoteListing {
  pub rows: Vec<RemoteRow>,
  /// Matching entries, before the limit was applied.
  pub total: usize,
  pub truncated: bool,
}

/// Order entries newest first.
///
/// Entries with a parseable date come first, by date descending. Ties and
/// undated entries fall back to the version string, descending. A pair with
/// one unparseable date is not compared by version string: the dated entry
/// always wins, which keeps the order total.
pub fn sort_newest_first(entries: &mut [&ManifestEntry]) {
  entries.sort_by(|a, b| match (a.release_date(), b.release_date()) {
    (Some(da), Some(db)) => db.cmp(&da).then_with(|| b.version.cmp(&a.version)),
    (Some(_), None) => Ordering::Less,
    (None, Some(_)) => Ordering::Greater,
    (None, None) => b.version.cmp(&a.version),
  });
}

fn is_recent(entry: &ManifestEntry, today: NaiveDate) -> bool {
  entry
    .release_date()
    .is_some_and(|date| (today - date).num_days() < RECENT_DAYS)
}

/// Build the `ls-remote` view of the manifest.
pub fn build_remote_listing(
  manifest: &[ManifestEntry],
  installed: &BTreeSet<VersionId>,
  options: RemoteOptions,
  today: NaiveDate,
) -> RemoteListing {
  let mut entries: Vec<&ManifestEntry> = manifest
    .iter()
    .filter(|entry| !options.lts_only || entry.is_lts())
    .collect();
  sort_newest_first(&mut entries);

  let total = entries.len();
  let shown = if options.all { total } else { total.min(REMOTE_LIMIT) };

  let rows = entries
    .into_iter()
    .take(shown)
    .map(|entry| RemoteRow {
      version: entry.version.clone(),
      date: entry.date.clone(),
      lts: entry.is_lts(),
      codename: entry.lts.codename().map(str::to_string),
      recent: is_recent(entry, today),
      security: entry.security,
      installed: installed.contains(&entry.version),
      npm: entry.npm.clone(),
      files: entry.files.clone(),
    })
    .collect();

  RemoteListing {
    rows,
    total,
    truncated: shown < total,
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InstalledRow {
  pub version: VersionId,
  pub active: bool,
  /// `None` when LTS status is unknown because the manifest was unavailable.
  #[serde(skip_serializing_if = "Option::is_none")]
  pub lts: Option<bool>,
}

/// Build the `list` view of the installed versions.
pub fn build_installed_listing(
  installed: &BTreeSet<VersionId>,
  active: Option<&VersionId>,
  manifest: Option<&[ManifestEntry]>,
) -> Vec<InstalledRow> {
  let lts: Option<HashSet<&VersionId>> = manifest.map(lts_versions);

  installed
    .iter()
    .map(|version| InstalledRow {
      version: version.clone(),
      active: active == Some(version),
      lts: lts.as_ref().map(|set| set.contains(version)),
    })
    .collect()
}

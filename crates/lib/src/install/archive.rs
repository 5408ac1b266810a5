//! Release archive extraction.
//!
//! Release tarballs wrap their contents in a single top-level directory
//! (`node-v20.11.1-linux-x64/`) whose name is not known in advance. Extraction
//! therefore reads the archive twice:
//!
//! 1. Walk every entry to validate the stream and take the first path segment
//!    of the first entry as the wrapper name.
//! 2. Re-open the archive and materialize every entry with the wrapper
//!    segment stripped.
//!
//! Both passes open the file from its path, so the archive must be a file on
//! disk rather than a one-shot stream.

use std::ffi::OsString;
use std::fs::{self, File};
use std::io::{self, BufReader};
use std::path::{Component, Path, PathBuf};

use flate2::read::GzDecoder;
use tar::{Archive, Entry, EntryType};
use thiserror::Error;
use tracing::{debug, info};

use crate::util::fs::create_symlink;

#[derive(Debug, Error)]
pub enum ExtractError {
  /// The compressed stream is malformed or truncated.
  #[error("failed to read archive {path}: {source}")]
  Read {
    path: PathBuf,
    #[source]
    source: io::Error,
  },

  #[error("archive {0} contains no entries")]
  Empty(PathBuf),

  #[error("archive entry {0} points outside the destination")]
  UnsafePath(PathBuf),

  #[error("symlink entry {0} has no target")]
  MissingLinkTarget(PathBuf),

  /// Materializing an entry on disk failed.
  #[error("failed to write {path}: {source}")]
  Write {
    path: PathBuf,
    #[source]
    source: io::Error,
  },
}

/// Counts of what an extraction produced.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ExtractStats {
  pub dirs: usize,
  pub files: usize,
  pub symlinks: usize,
  pub skipped: usize,
}

fn open_archive(archive_path: &Path) -> Result<Archive<GzDecoder<BufReader<File>>>, ExtractError> {
  let file = File::open(archive_path).map_err(|source| ExtractError::Read {
    path: archive_path.to_path_buf(),
    source,
  })?;
  Ok(Archive::new(GzDecoder::new(BufReader::new(file))))
}

/// Path components without `.` segments.
fn components(path: &Path) -> impl Iterator<Item = Component<'_>> {
  path.components().filter(|c| !matches!(c, Component::CurDir))
}

/// First pass: read every entry and return the wrapper directory name.
///
/// Returns `None` when the first entry's path has no normal first segment.
pub fn find_wrapper(archive_path: &Path) -> Result<Option<OsString>, ExtractError> {
  let read_err = |source: io::Error| ExtractError::Read {
    path: archive_path.to_path_buf(),
    source,
  };

  let mut archive = open_archive(archive_path)?;
  let mut wrapper = None;
  let mut count = 0usize;

  for entry in archive.entries().map_err(read_err)? {
    let entry = entry.map_err(read_err)?;
    if count == 0 {
      let path = entry.path().map_err(read_err)?;
      wrapper = match components(&path).next() {
        Some(Component::Normal(name)) => Some(name.to_os_string()),
        _ => None,
      };
    }
    count += 1;
  }

  if count == 0 {
    return Err(ExtractError::Empty(archive_path.to_path_buf()));
  }

  debug!(entries = count, wrapper = ?wrapper, "scanned archive");
  Ok(wrapper)
}

/// Strip the wrapper segment from an entry path.
///
/// Entries outside the wrapper keep their full path. Returns an empty path
/// for the wrapper directory itself.
fn strip_wrapper(path: &Path, wrapper: Option<&OsString>) -> PathBuf {
  let mut parts = components(path).peekable();
  let in_wrapper = match (wrapper, parts.peek()) {
    (Some(wrapper), Some(Component::Normal(first))) => *first == wrapper.as_os_str(),
    _ => false,
  };
  if in_wrapper {
    parts.next();
  }
  parts.collect()
}

fn ensure_relative(path: &Path) -> Result<(), ExtractError> {
  if path.components().all(|c| matches!(c, Component::Normal(_))) {
    Ok(())
  } else {
    Err(ExtractError::UnsafePath(path.to_path_buf()))
  }
}

/// Extract a `.tar.gz` release archive into `dest`, stripping its wrapper
/// directory.
///
/// `dest` is created if missing. Regular files keep the permission bits from
/// their header; symlinks are recreated with the exact target string and are
/// never followed. Entry types other than directories, files and symlinks are
/// skipped.
pub fn extract_tar_gz(archive_path: &Path, dest: &Path) -> Result<ExtractStats, ExtractError> {
  let wrapper = find_wrapper(archive_path)?;

  let read_err = |source: io::Error| ExtractError::Read {
    path: archive_path.to_path_buf(),
    source,
  };

  fs::create_dir_all(dest).map_err(|source| ExtractError::Write {
    path: dest.to_path_buf(),
    source,
  })?;

  let mut archive = open_archive(archive_path)?;
  let mut stats = ExtractStats::default();

  for entry in archive.entries().map_err(read_err)? {
    let mut entry = entry.map_err(read_err)?;
    let path = entry.path().map_err(read_err)?.into_owned();

    let relative = strip_wrapper(&path, wrapper.as_ref());
    if relative.as_os_str().is_empty() {
      continue;
    }
    ensure_relative(&relative)?;

    let target = dest.join(&relative);
    clear_target(dest, &relative, &path)?;
    match entry.header().entry_type() {
      EntryType::Directory => {
        create_dir(&target)?;
        stats.dirs += 1;
      }
      EntryType::Regular | EntryType::Continuous => {
        write_file(&mut entry, &target, archive_path)?;
        stats.files += 1;
      }
      EntryType::Symlink => {
        let link_target = entry
          .link_name()
          .map_err(read_err)?
          .ok_or_else(|| ExtractError::MissingLinkTarget(path.clone()))?
          .into_owned();
        write_symlink(&link_target, &target)?;
        stats.symlinks += 1;
      }
      other => {
        debug!(path = %path.display(), entry_type = ?other, "skipping unsupported archive entry");
        stats.skipped += 1;
      }
    }
  }

  info!(
    dest = %dest.display(),
    dirs = stats.dirs,
    files = stats.files,
    symlinks = stats.symlinks,
    "extracted archive"
  );
  Ok(stats)
}

/// Prepare `dest/relative` for an entry written from `entry_path`.
///
/// Every existing ancestor below `dest` must be a real directory: a symlink
/// left by an earlier entry would redirect the write outside `dest`. A
/// non-directory already at the target itself is removed so it is replaced
/// rather than written through.
fn clear_target(dest: &Path, relative: &Path, entry_path: &Path) -> Result<(), ExtractError> {
  let mut current = dest.to_path_buf();
  let mut parts = relative.components().peekable();

  while let Some(part) = parts.next() {
    current.push(part);
    let meta = match current.symlink_metadata() {
      Ok(meta) => meta,
      Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(()),
      Err(source) => return Err(ExtractError::Write { path: current, source }),
    };

    if parts.peek().is_some() {
      if meta.file_type().is_symlink() {
        return Err(ExtractError::UnsafePath(entry_path.to_path_buf()));
      }
    } else if !meta.is_dir() {
      fs::remove_file(&current).map_err(|source| ExtractError::Write { path: current.clone(), source })?;
      debug!(path = %current.display(), "replacing existing entry");
    }
  }

  Ok(())
}

fn create_dir(path: &Path) -> Result<(), ExtractError> {
  fs::create_dir_all(path).map_err(|source| ExtractError::Write {
    path: path.to_path_buf(),
    source,
  })
}

fn create_parent(path: &Path) -> Result<(), ExtractError> {
  match path.parent() {
    Some(parent) => create_dir(parent),
    None => Ok(()),
  }
}

fn write_file<R: io::Read>(entry: &mut Entry<'_, R>, target: &Path, archive_path: &Path) -> Result<(), ExtractError> {
  let write_err = |source: io::Error| ExtractError::Write {
    path: target.to_path_buf(),
    source,
  };

  create_parent(target)?;

  let mut file = File::create(target).map_err(write_err)?;
  io::copy(entry, &mut file).map_err(|source| {
    // A short read here means the stream ended early.
    if source.kind() == io::ErrorKind::UnexpectedEof {
      ExtractError::Read {
        path: archive_path.to_path_buf(),
        source,
      }
    } else {
      write_err(source)
    }
  })?;

  #[cfg(unix)]
  {
    use std::os::unix::fs::PermissionsExt;
    let mode = entry.header().mode().map_err(|source| ExtractError::Read {
      path: archive_path.to_path_buf(),
      source,
    })?;
    fs::set_permissions(target, fs::Permissions::from_mode(mode & 0o7777)).map_err(write_err)?;
  }

  Ok(())
}

fn write_symlink(link_target: &Path, target: &Path) -> Result<(), ExtractError> {
  create_parent(target)?;
  create_symlink(link_target, target).map_err(|source| ExtractError::Write {
    path: target.to_path_buf(),
    source,
  })
}

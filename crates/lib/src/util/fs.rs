//! Filesystem helpers.

use std::io;
use std::path::Path;

/// Cross-platform symlink creation helper
pub fn create_symlink(target: &Path, link: &Path) -> io::Result<()> {
  #[cfg(unix)]
  {
    std::os::unix::fs::symlink(target, link)
  }
  #[cfg(windows)]
  {
    if target.is_dir() {
      std::os::windows::fs::symlink_dir(target, link)
    } else {
      std::os::windows::fs::symlink_file(target, link)
    }
  }
}

/// Remove a file or link, treating an already absent path as success.
pub fn remove_if_exists(path: &Path) -> io::Result<()> {
  match std::fs::remove_file(path) {
    Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
    result => result,
  }
}

pub mod arch;
pub mod os;
pub mod paths;

use std::fmt;

/// Download target combining the OS and architecture tags (e.g., "linux-x64")
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Target {
  pub os: String,
  pub arch: String,
}

impl Target {
  /// Create a target from already-translated tags
  pub fn new(os: impl Into<String>, arch: impl Into<String>) -> Self {
    Self {
      os: os.into(),
      arch: arch.into(),
    }
  }

  /// The target matching the running system
  pub fn current() -> Self {
    Self::new(os::current(), arch::current())
  }
}

impl fmt::Display for Target {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}-{}", self.os, self.arch)
  }
}

/// Translate a native operating system name into the tag used in distribution
/// archive names. Unknown names pass through unchanged.
pub fn dist_os(native: &str) -> &str {
  match native {
    "macos" => "darwin",
    other => other,
  }
}

/// Distribution tag for the operating system this binary was compiled for
pub fn current() -> &'static str {
  dist_os(std::env::consts::OS)
}

/// Translate a native architecture name into the tag used in distribution
/// archive names.
///
/// Known names map onto `x64`, `x86` and `arm64`; anything else passes
/// through unchanged.
pub fn dist_arch(native: &str) -> &str {
  match native {
    "x86_64" | "amd64" => "x64",
    "x86" | "i386" | "i686" | "386" => "x86",
    "aarch64" | "arm64" => "arm64",
    other => other,
  }
}

/// Distribution tag for the architecture this binary was compiled for
pub fn current() -> &'static str {
  dist_arch(std::env::consts::ARCH)
}

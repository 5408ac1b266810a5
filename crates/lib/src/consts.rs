/// Application name, used for the default root directory (`~/.vnode`).
pub const APP_NAME: &str = "vnode";

/// Overrides the root directory holding `versions/` and `bin/`.
pub const ROOT_ENV: &str = "VNODE_ROOT";

/// Overrides the distribution mirror the manifest and archives are fetched from.
pub const DIST_URL_ENV: &str = "VNODE_DIST_URL";

pub const DEFAULT_DIST_URL: &str = "https://nodejs.org/dist";

/// File name of the release index below the distribution URL.
pub const MANIFEST_FILENAME: &str = "index.json";

pub const VERSIONS_DIR: &str = "versions";
pub const BIN_DIR: &str = "bin";

/// Prefix every normalized version identifier carries.
pub const VERSION_PREFIX: char = 'v';

/// Alias accepted by `install` and `use` for long-term-support releases.
pub const LTS_ALIAS: &str = "lts";

//! Implementation of the `vnode uninstall` command.

use anyhow::{Context, Result};

use vnode_lib::activate::current_version;
use vnode_lib::config::Config;
use vnode_lib::store::InstallationStore;
use vnode_lib::version::VersionId;

use crate::output::print_success;

/// Remove an installed version. The active version is refused.
pub fn cmd_uninstall(config: &Config, version: &str) -> Result<()> {
  let version = VersionId::normalize(version);
  let active = current_version(config);

  InstallationStore::new(config)
    .remove(&version, active.as_ref())
    .with_context(|| format!("Failed to uninstall {}", version))?;

  print_success(&format!("Uninstalled {}", version));
  Ok(())
}

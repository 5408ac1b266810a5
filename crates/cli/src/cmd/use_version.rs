//! Implementation of the `vnode use` command.

use anyhow::{Context, Result};
use tracing::debug;

use vnode_lib::activate::Activator;
use vnode_lib::config::Config;
use vnode_lib::manifest::ManifestClient;
use vnode_lib::store::InstallationStore;
use vnode_lib::version::{VersionId, VersionRequest, resolve_installed};

use super::runtime;
use crate::output::{print_info, print_success, print_warning};

/// Activate an installed version.
///
/// `lts` resolves to the greatest installed version the remote manifest flags
/// as LTS, so it needs network access; concrete versions do not.
pub fn cmd_use(config: &Config, version: &str) -> Result<()> {
  let request = VersionRequest::parse(version);

  let version = match &request {
    VersionRequest::Exact(version) => version.clone(),
    VersionRequest::Lts => {
      let manifest = runtime()?
        .block_on(ManifestClient::new(config).fetch())
        .context("Failed to fetch release manifest")?;
      let installed = InstallationStore::new(config)
        .list()
        .context("Failed to list installed versions")?;
      let resolved = resolve_installed(&request, &installed, &manifest)?;
      debug!(version = %resolved, installed = installed.len(), "resolved lts among installed versions");
      resolved
    }
  };

  activate_version(config, &version)
}

/// Activate `version` and report the result.
///
/// Shared with `install --use`.
pub(crate) fn activate_version(config: &Config, version: &VersionId) -> Result<()> {
  let activation = Activator::new(config)
    .activate(version)
    .with_context(|| format!("Failed to activate {}", version))?;

  for issue in &activation.issues {
    print_warning(&issue.to_string());
  }
  print_success(&format!("Now using {}", activation.version));
  print_info(&format!(
    "Make sure {} is on your PATH:",
    config.bin_dir().display()
  ));
  println!("  export PATH=\"{}:$PATH\"", config.bin_dir().display());

  Ok(())
}

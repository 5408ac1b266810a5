//! Implementation of the `vnode list` command.

use anyhow::{Context, Result};
use tracing::debug;

use vnode_lib::activate::current_version;
use vnode_lib::config::Config;
use vnode_lib::listing::build_installed_listing;
use vnode_lib::manifest::ManifestClient;
use vnode_lib::store::InstallationStore;

use super::runtime;
use crate::output::{OutputFormat, installed_line, print_info, print_json, print_warning};

/// List installed versions, marking the active one.
///
/// LTS annotations come from the remote manifest, fetched once. When it
/// cannot be fetched the list is still printed, without annotations.
pub fn cmd_list(config: &Config, output: OutputFormat) -> Result<()> {
  let installed = InstallationStore::new(config)
    .list()
    .context("Failed to list installed versions")?;
  let active = current_version(config);

  let manifest = if installed.is_empty() {
    None
  } else {
    match runtime()?.block_on(ManifestClient::new(config).fetch()) {
      Ok(manifest) => Some(manifest),
      Err(e) => {
        print_warning(&format!("Could not fetch release manifest, LTS status unknown: {}", e));
        None
      }
    }
  };

  debug!(
    installed = installed.len(),
    active = ?active,
    annotated = manifest.is_some(),
    "listing installed versions"
  );
  let rows = build_installed_listing(&installed, active.as_ref(), manifest.as_deref());

  if output.is_json() {
    print_json(&rows)?;
  } else if rows.is_empty() {
    print_info("No versions installed. Run 'vnode install <version>' to install one.");
  } else {
    for row in &rows {
      println!("{}", installed_line(row));
    }
  }

  Ok(())
}

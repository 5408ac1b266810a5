//! Implementation of the `vnode ls-remote` command.

use anyhow::{Context, Result};

use vnode_lib::config::Config;
use vnode_lib::listing::{REMOTE_LIMIT, RemoteOptions, build_remote_listing};
use vnode_lib::manifest::ManifestClient;
use vnode_lib::store::InstallationStore;

use super::runtime;
use crate::output::{OutputFormat, print_info, print_json, remote_line};

/// List releases from the remote manifest, newest first.
pub fn cmd_ls_remote(config: &Config, lts_only: bool, all: bool, output: OutputFormat) -> Result<()> {
  let manifest = runtime()?
    .block_on(ManifestClient::new(config).fetch())
    .context("Failed to fetch release manifest")?;
  let installed = InstallationStore::new(config)
    .list()
    .context("Failed to list installed versions")?;

  let today = chrono::Local::now().date_naive();
  let listing = build_remote_listing(&manifest, &installed, RemoteOptions { lts_only, all }, today);

  if output.is_json() {
    return print_json(&listing);
  }

  if listing.rows.is_empty() {
    print_info("No matching releases found.");
    return Ok(());
  }

  for row in &listing.rows {
    println!("{}", remote_line(row));
  }

  if listing.truncated {
    println!();
    print_info(&format!(
      "Showing the {} newest of {} releases. Use --all to see all of them.",
      REMOTE_LIMIT, listing.total
    ));
  }

  Ok(())
}

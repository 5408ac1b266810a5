//! Implementation of the `vnode install` command.

use anyhow::{Context, Result};
use tracing::debug;

use vnode_lib::config::Config;
use vnode_lib::install::{InstallOutcome, Installer};
use vnode_lib::manifest::ManifestClient;
use vnode_lib::platform::Target;
use vnode_lib::version::{VersionRequest, resolve_remote};

use super::runtime;
use super::use_version::activate_version;
use crate::output::{format_bytes, print_info, print_stat, print_success};
use crate::prompts::{confirm, is_interactive};

/// Install a version and optionally activate it.
///
/// With `activate` the new version is used right away. Without it, an
/// interactive session is asked; a non-interactive one leaves the active
/// version alone.
pub fn cmd_install(config: &Config, version: &str, activate: bool) -> Result<()> {
  let rt = runtime()?;
  let request = VersionRequest::parse(version);

  let version = match &request {
    VersionRequest::Exact(version) => version.clone(),
    VersionRequest::Lts => {
      let manifest = rt
        .block_on(ManifestClient::new(config).fetch())
        .context("Failed to fetch release manifest")?;
      let resolved = resolve_remote(&request, &manifest)?;
      print_info(&format!("Latest LTS is {}", resolved));
      resolved
    }
  };

  let target = Target::current();
  debug!(version = %version, target = %target, "installing");
  let outcome = rt
    .block_on(Installer::new(config).install(&version, &target))
    .with_context(|| format!("Failed to install {}", version))?;

  match &outcome {
    InstallOutcome::Installed { path, downloaded, .. } => {
      print_success(&format!("Installed {}", version));
      print_stat("Location", &path.display().to_string());
      print_stat("Downloaded", &format_bytes(*downloaded));
    }
    InstallOutcome::AlreadyInstalled { .. } => {
      print_info(&format!("{} is already installed", version));
    }
  }

  let should_activate = if activate || is_interactive() {
    confirm(&format!("Use {} now?", version), activate)?
  } else {
    print_info(&format!("Run 'vnode use {}' to activate it", version));
    false
  };

  if should_activate {
    activate_version(config, &version)?;
  }

  Ok(())
}

mod install;
mod list;
mod ls_remote;
mod uninstall;
mod use_version;

pub use install::cmd_install;
pub use list::cmd_list;
pub use ls_remote::cmd_ls_remote;
pub use uninstall::cmd_uninstall;
pub use use_version::cmd_use;

use anyhow::{Context, Result};
use tokio::runtime::Runtime;

/// Runtime for the network calls of a single command.
fn runtime() -> Result<Runtime> {
  tokio::runtime::Builder::new_current_thread()
    .enable_all()
    .build()
    .context("Failed to create async runtime")
}

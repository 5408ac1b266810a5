mod cmd;
mod output;
mod prompts;

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use vnode_lib::config::Config;

use cmd::{cmd_install, cmd_list, cmd_ls_remote, cmd_uninstall, cmd_use};
use output::{OutputFormat, print_error};

/// vnode - Install and switch between Node.js versions
#[derive(Parser)]
#[command(name = "vnode")]
#[command(author, version, about, long_about = None)]
struct Cli {
  /// Enable verbose output
  #[arg(short, long, global = true)]
  verbose: bool,

  #[command(subcommand)]
  command: Commands,
}

#[derive(Subcommand)]
enum Commands {
  /// Download and install a version
  Install {
    /// Version to install (e.g. 20.11.1, v18.20.4, or lts)
    version: String,

    /// Activate the version after installing without asking
    #[arg(long = "use")]
    activate: bool,
  },

  /// Make an installed version the active one
  Use {
    /// Installed version to activate, or lts for the newest installed LTS
    version: String,
  },

  /// Remove an installed version
  #[command(alias = "remove")]
  Uninstall {
    /// Installed version to remove
    version: String,
  },

  /// List installed versions
  #[command(alias = "ls")]
  List {
    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    output: OutputFormat,
  },

  /// List versions available for download
  #[command(name = "ls-remote", alias = "list-remote")]
  LsRemote {
    /// Only show LTS releases
    #[arg(short, long)]
    lts: bool,

    /// Show every release instead of the newest ones
    #[arg(short, long)]
    all: bool,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    output: OutputFormat,
  },
}

fn init_tracing(verbose: bool) {
  let default_level = if verbose { "debug" } else { "warn" };
  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

  tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_writer(std::io::stderr)
    .without_time()
    .with_target(false)
    .init();
}

fn run(cli: Cli) -> anyhow::Result<()> {
  let config = Config::from_env()?;
  config.ensure_dirs()?;

  match cli.command {
    Commands::Install { version, activate } => cmd_install(&config, &version, activate),
    Commands::Use { version } => cmd_use(&config, &version),
    Commands::Uninstall { version } => cmd_uninstall(&config, &version),
    Commands::List { output } => cmd_list(&config, output),
    Commands::LsRemote { lts, all, output } => cmd_ls_remote(&config, lts, all, output),
  }
}

fn main() -> ExitCode {
  let cli = Cli::parse();
  init_tracing(cli.verbose);

  match run(cli) {
    Ok(()) => ExitCode::SUCCESS,
    Err(e) => {
      print_error(&format!("{:#}", e));
      ExitCode::FAILURE
    }
  }
}

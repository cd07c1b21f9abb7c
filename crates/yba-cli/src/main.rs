use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use clap_complete::Shell;
use tracing_subscriber::EnvFilter;
use yba_installer::InstallerError;

mod completion;
mod dispatch;
mod render;

#[cfg(test)]
mod tests;

#[derive(Parser, Debug)]
#[command(name = "yba-ctl")]
#[command(about = "YugabyteDB Anywhere install-state manager", long_about = None)]
pub(crate) struct Cli {
    /// Installer config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Directory holding version_metadata.json and bundled packages [default: binary directory]
    #[arg(long, global = true)]
    bundle_dir: Option<PathBuf>,
    /// Skip all confirmation prompts
    #[arg(short, long, global = true)]
    force: bool,
    /// Run as an upgrade rather than a fresh install
    #[arg(long, global = true)]
    upgrade: bool,
    #[arg(short, long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
pub(crate) enum Commands {
    /// Print the canonical install paths
    Paths,
    /// Print the version this binary installs
    Version,
    /// Remove old release directories, keeping the active one and one fallback
    Prune {
        #[arg(long)]
        dry_run: bool,
    },
    /// Point the active symlink at this version's install directory
    Activate,
    /// Print a random URL-safe secret
    GenerateSecret {
        #[arg(long, default_value_t = 32)]
        bytes: usize,
    },
    /// Report user, privilege level, OS family and primary IP
    Doctor,
    /// Print a shell completion script
    Completion { shell: Shell },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = dispatch::run_cli(cli);
    if let Err(err) = &result {
        if let Some(installer_err) = err.downcast_ref::<InstallerError>() {
            if installer_err.is_fatal() {
                tracing::error!("fatal: {installer_err}");
            }
        }
    }
    result
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

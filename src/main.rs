mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

use commands::config::{cmd_config, ConfigAction};
use commands::install::cmd_install;
use commands::status::cmd_status;
use commands::uninstall::cmd_uninstall;

#[derive(Parser)]
#[command(
    name = "ghostty-setup",
    version,
    about = "Install Ghostty with its helper tools, and remove exactly what was installed"
)]
struct Cli {
    /// Print every command and file operation instead of running it
    #[arg(long, global = true)]
    dry_run: bool,

    /// Skip installing dependencies; only deploy configuration
    #[arg(long, conflicts_with = "uninstall")]
    skip_install: bool,

    /// Enable debug logging
    #[arg(long, short, global = true)]
    verbose: bool,

    /// Remove what a previous run installed
    #[arg(long)]
    uninstall: bool,

    /// Answer routine confirmation prompts with yes
    #[arg(long, short)]
    yes: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the install record and what an uninstall would remove
    Status,

    /// Manage ghostty-setup configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

fn init_logging(verbose: bool) {
    let level = if verbose {
        LevelFilter::DEBUG
    } else {
        LevelFilter::INFO
    };
    let filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .try_init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Some(Commands::Status) => cmd_status()?,
        Some(Commands::Config { action }) => cmd_config(action)?,
        None if cli.uninstall => cmd_uninstall(cli.dry_run, cli.yes)?,
        None => cmd_install(cli.dry_run, cli.skip_install, cli.yes)?,
    }

    Ok(())
}

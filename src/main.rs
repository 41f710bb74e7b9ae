use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use phpfetch::commands;
use phpfetch::commands::install::InstallOptions;

#[derive(Parser)]
#[clap(name = "phpfetch")]
#[clap(about = "Download and unpack the PHP Windows binary archive")]
#[clap(version = env!("CARGO_PKG_VERSION"))]
pub struct Cli {
    /// Log each install step
    #[clap(short, long, global = true)]
    verbose: bool,

    #[clap(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Download and extract a PHP archive
    Install {
        /// Archive name on the download host (e.g., php-7.0.0-Win32-VC14-x64.zip)
        version: Option<String>,
        /// Directory to extract into
        #[clap(short, long)]
        destination: Option<PathBuf>,
        /// Override the download host
        #[clap(long)]
        base_url: Option<String>,
    },
    /// Show the effective configuration
    Config {
        /// Only print the config file location
        #[clap(long, conflicts_with = "init")]
        path: bool,
        /// Write the effective configuration to the config file if none exists
        #[clap(long)]
        init: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "info" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    let result = match cli.command {
        Commands::Install {
            version,
            destination,
            base_url,
        } => commands::install::install_php(InstallOptions {
            version,
            destination,
            base_url,
        })
        .map(|_| ())
        .map_err(|e| anyhow::anyhow!(e)),
        Commands::Config { path, init } => {
            if init {
                commands::config::init_config().map_err(|e| anyhow::anyhow!(e))
            } else {
                commands::config::show_config(path).map_err(|e| anyhow::anyhow!(e))
            }
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }

    Ok(())
}

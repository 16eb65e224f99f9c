mod commands;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use islet_router::{Config, LogLevel};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "islet")]
#[command(version, about = "islet - file-system route compiler", long_about = None)]
struct Cli {
    /// Configuration file
    #[arg(short, long, default_value = islet_router::config::DEFAULT_CONFIG_FILE)]
    config: PathBuf,

    /// Log verbosity: debug, info, warn, error or silent (overrides the config)
    #[arg(short, long)]
    log_level: Option<LogLevel>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Scan route directories and write the generated tables
    Generate {
        /// What to generate
        #[arg(value_enum, default_value = "all")]
        target: Target,

        /// Scan and report without writing artifacts
        #[arg(long)]
        dry_run: bool,

        /// Exit with an error when two files claim the same path
        #[arg(long)]
        deny_collisions: bool,
    },

    /// Print a route table
    Routes {
        #[arg(value_enum, default_value = "pages")]
        target: TableTarget,
    },

    /// Show which route serves a URL
    Match {
        /// Request path, e.g. /users/42
        url: String,

        /// Look the URL up among API routes
        #[arg(long)]
        api: bool,
    },
}

#[derive(Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
enum Target {
    Pages,
    Api,
    Islands,
    All,
}

#[derive(Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
enum TableTarget {
    Pages,
    Api,
}

/// Installs the stderr fmt subscriber; `silent` installs none
fn init_tracing(level: LogLevel) {
    if let Some(level) = level.to_level() {
        tracing_subscriber::fmt()
            .with_max_level(level)
            .with_writer(std::io::stderr)
            .with_target(false)
            .init();
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = Config::load(&cli.config)
        .with_context(|| format!("Failed to load {}", cli.config.display()))?;

    init_tracing(cli.log_level.unwrap_or(config.routes.log_level));

    match cli.command {
        Commands::Generate {
            target,
            dry_run,
            deny_collisions,
        } => {
            commands::generate::execute(&config, target, dry_run, deny_collisions)?;
        }
        Commands::Routes { target } => {
            commands::routes::execute(&config, target)?;
        }
        Commands::Match { url, api } => {
            commands::match_url::execute(&config, &url, api)?;
        }
    }

    Ok(())
}

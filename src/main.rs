use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use talentsync::config::{Config, ScheduleConfig};

mod commands;

#[derive(Parser)]
#[command(
    name = "talentsync",
    version,
    about = "Schedule ranked candidates into interview slots and notify them",
    long_about = None
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Log format (text, json)
    #[arg(long, global = true)]
    log_format: Option<String>,

    /// TOML config file (defaults to environment variables)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve the scheduling API
    Serve {
        /// Host to bind
        #[arg(long)]
        host: Option<String>,

        /// Port to bind
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Run one scheduling pass and print the summary
    Schedule {
        /// Collection to schedule (defaults to the configured one)
        #[arg(short = 'n', long)]
        collection: Option<String>,
    },

    /// Show the interview slots for a date
    Calendar {
        /// Date (YYYY-MM-DD)
        date: String,
    },

    /// Load candidates from a JSON file into the store
    Import {
        /// JSON array of {name, email, rank} records
        file: PathBuf,

        /// Target collection (defaults to the configured one)
        #[arg(short = 'n', long)]
        collection: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let Cli {
        command,
        verbose,
        log_format,
        config: config_path,
    } = Cli::parse();

    // The calendar view needs no sender credentials or store
    if let Commands::Calendar { date } = &command {
        let schedule = match config_path.as_deref() {
            Some(path) => Config::from_file(path)?.schedule,
            None => ScheduleConfig::default(),
        };
        return commands::calendar(&schedule, date);
    }

    let config = Config::load(config_path.as_deref())?;

    // Initialize tracing/logging
    let log_format = log_format.unwrap_or_else(|| config.logging.format.clone());
    setup_tracing(&log_format, &config.logging.level, verbose)?;

    tracing::info!("talentsync starting");

    match command {
        Commands::Serve { host, port } => {
            tracing::info!(host = ?host, port = ?port, "Starting serve command");
            commands::serve(config, commands::ServeParams { host, port }).await?;
        }

        Commands::Schedule { collection } => {
            tracing::info!(collection = ?collection, "Starting schedule command");
            commands::schedule(config, collection).await?;
        }

        Commands::Import { file, collection } => {
            tracing::info!(
                file = %file.display(),
                collection = ?collection,
                "Starting import command"
            );
            commands::import(&config, &file, collection)?;
        }

        Commands::Calendar { .. } => {}
    }

    tracing::info!("talentsync completed successfully");
    Ok(())
}

fn setup_tracing(format: &str, level: &str, verbose: bool) -> Result<()> {
    let env_filter = if verbose {
        tracing_subscriber::EnvFilter::new("talentsync=debug,tower_http=debug,info")
    } else {
        tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(format!("talentsync={level},warn")))
    };

    match format {
        "json" => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().json())
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().pretty())
                .init();
        }
    }

    Ok(())
}

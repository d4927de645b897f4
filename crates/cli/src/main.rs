//! Meeting Agent CLI — the main entry point.
//!
//! Commands:
//! - `onboard` — Initialize config directory & default config.toml
//! - `analyze` — Run the agent once over a transcript, print the events
//! - `gateway` — Start the HTTP API server
//! - `doctor`  — Diagnose system health

use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(
    name = "meetagent",
    about = "Meeting Agent — turn meeting transcripts into structured artifacts",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize configuration
    Onboard,

    /// Analyze a meeting transcript and print the progress events
    Analyze {
        /// Transcript file to analyze (reads stdin when omitted)
        file: Option<PathBuf>,

        /// Inline transcript text instead of a file
        #[arg(short, long, conflicts_with = "file")]
        text: Option<String>,
    },

    /// Start the HTTP gateway server
    Gateway {
        /// Override the port
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Diagnose system health
    Doctor,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Initialize tracing
    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
        )
        .with_target(false)
        .init();

    match cli.command {
        Commands::Onboard => commands::onboard::run().await?,
        Commands::Analyze { file, text } => commands::analyze::run(file, text).await?,
        Commands::Gateway { port } => commands::gateway::run(port).await?,
        Commands::Doctor => commands::doctor::run().await?,
    }

    Ok(())
}

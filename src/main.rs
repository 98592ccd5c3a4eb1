mod commands;
mod config;
mod routes;
mod state;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::config::ServerConfig;

#[derive(Parser)]
#[command(name = "certcal")]
#[command(about = "Publish certificate expiry dates as a subscribable iCalendar feed")]
struct Cli {
    /// Config file (default: ./certcal.toml and ~/.config/certcal/config.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the feed and sync HTTP server
    Serve {
        /// Address to bind
        #[arg(long)]
        host: Option<String>,

        /// Port to listen on
        #[arg(short, long)]
        port: Option<u16>,
    },
    /// Write the ICS feed for a JSON list of {user, name, expiry}
    Render {
        input: PathBuf,

        /// Output file (stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// List the events in an ICS file
    Inspect { input: PathBuf },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr so `render` can write the calendar to stdout
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    run(Cli::parse()).await
}

/// Dispatch a subcommand. Only `serve` and `render` read configuration.
async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Serve { host, port } => {
            let mut config = ServerConfig::load(cli.config.as_deref())?;
            if let Some(host) = host {
                config.host = host;
            }
            if let Some(port) = port {
                config.port = port;
            }
            commands::serve::run(config).await
        }
        Commands::Render { input, output } => {
            let config = ServerConfig::load(cli.config.as_deref())?;
            commands::render::run(&config, &input, output.as_deref())
        }
        Commands::Inspect { input } => commands::inspect::run(&input),
    }
}

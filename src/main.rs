//! Session server binary.
//!
//! Construct collaborators, start the server, serve until a stop signal,
//! shut down, release the store. Exactly in that order.

use std::path::PathBuf;

use clap::Parser;

use sessiond::config::{loader::load_config, ServerConfig};
use sessiond::lifecycle::startup;
use sessiond::observability;

#[derive(Parser)]
#[command(name = "sessiond")]
#[command(about = "Session-tracking TCP server", long_about = None)]
struct Cli {
    /// Path to a TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the configured listen port.
    #[arg(short, long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => ServerConfig::default(),
    };
    if let Some(port) = cli.port {
        config.listener.port = port;
    }

    observability::logging::init(&config.observability);

    tracing::info!(
        host = %config.listener.host,
        port = config.listener.port,
        backlog = config.listener.backlog,
        poll_interval_ms = config.poll.interval_ms,
        store_path = %config.storage.path,
        "Configuration loaded"
    );

    startup::run(config).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}

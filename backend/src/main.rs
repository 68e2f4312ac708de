use std::net::SocketAddr;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

mod config;
mod domain;
mod import;
mod rest;
mod storage;

use config::Config;
use domain::ImportService;
use import::ImportCommand;
use storage::json::JsonConnection;

#[derive(Parser)]
#[command(name = "staylist", about = "Rental offer listing service", version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Start the REST API server
    Serve,
    /// Bulk-import offers from a tab-separated file
    Import {
        /// Path to the offers file
        file: Option<String>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    match cli.command {
        Command::Serve => serve().await,
        Command::Import { file } => import(file).await,
    }
}

async fn serve() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = Config::from_env()?;
    info!("Setting up storage in {}", config.data_dir.display());
    let connection = Arc::new(JsonConnection::new(&config.data_dir)?);

    let state = rest::AppState::new(connection);
    let app = rest::router(state);

    let addr = SocketAddr::new(config.host, config.port);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}

async fn import(file: Option<String>) -> anyhow::Result<()> {
    // The importer owns the terminal for in-place repaints, so no fmt
    // subscriber is installed here.
    let config = Config::from_env()?;
    let connection = Arc::new(JsonConnection::new(&config.data_dir)?);

    let sink = Arc::new(ImportService::new(connection));
    let command = ImportCommand::new(sink);
    command.execute(file.as_deref().unwrap_or("")).await;

    Ok(())
}

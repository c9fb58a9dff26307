//! Tally backend server.

use clap::Parser;
use std::path::PathBuf;
use tracing::info;

use tally::{
    config::{Config, Overrides},
    create_app_with_config, logging,
    state::AppState,
};

/// Tally - digit-string summation service
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Address to bind to
    #[arg(long)]
    host: Option<String>,

    /// Port to listen on
    #[arg(short, long)]
    port: Option<u16>,

    /// Log level or filter directive (overrides RUST_LOG)
    #[arg(long)]
    log_level: Option<String>,

    /// Also write logs to this file
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Extra TOML config file
    #[arg(short, long, env = "TALLY_CONFIG")]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let config = Config::from_figment(Overrides {
        host: args.host,
        port: args.port,
        log_level: args.log_level,
        log_file: args.log_file,
        config_file: args.config,
    })?;

    // Keep the guard alive so the file writer flushes until shutdown
    let _log_guard = logging::init(config.log_level.as_deref(), config.log_file.as_deref())?;

    info!("Starting tally server...");
    info!("Configuration loaded");

    let state = AppState::new();
    let app = create_app_with_config(state, config.cors_allowed_origins.clone());

    let addr = config.socket_addr();
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Server listening on {}", addr);

    // Set up graceful shutdown handler
    let shutdown_signal = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
        info!("Received Ctrl+C, shutting down gracefully...");
    };

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal)
        .await?;

    info!("Server shut down");
    Ok(())
}

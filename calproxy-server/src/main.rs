use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tokio::net::TcpListener;

use calproxy_core::Tables;
use calproxy_server::{AppState, Settings, UpstreamClient, logging};

#[derive(Parser)]
#[command(name = "calproxy-server", version, about = "Cleans up TUMonline calendar feeds")]
struct Cli {
    /// Configuration file (defaults to ./calproxy.toml when present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Run the HTTP server (default)
    Serve,
    /// Probe /health of a running instance and exit non-zero on failure
    Healthcheck,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let settings = Settings::load(cli.config.as_deref()).context("Failed to load configuration")?;

    match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => serve(settings).await,
        Command::Healthcheck => healthcheck(&settings).await,
    }
}

async fn serve(settings: Settings) -> Result<()> {
    logging::init(&settings.logging.level);

    let tables = Tables::load(
        settings.data.courses.as_deref(),
        settings.data.buildings.as_deref(),
    )?;
    tracing::info!(
        replacements = tables.replacements.len(),
        buildings = tables.buildings.len(),
        "Loaded lookup tables"
    );

    let upstream = UpstreamClient::new(&settings.upstream)?;
    let app = calproxy_server::app(AppState::new(tables, upstream));

    let addr = settings.bind_addr();
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    tracing::info!(%addr, upstream = %settings.upstream.url, "calproxy-server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Shut down");
    Ok(())
}

async fn healthcheck(settings: &Settings) -> Result<()> {
    let url = format!("http://127.0.0.1:{}/health", settings.server.port);
    let response = reqwest::Client::builder()
        .timeout(Duration::from_secs(5))
        .build()?
        .get(&url)
        .send()
        .await
        .with_context(|| format!("Health check request to {} failed", url))?;

    if !response.status().is_success() {
        anyhow::bail!("Health check returned HTTP {}", response.status());
    }
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}

//! Income eligibility engine HTTP server.

use std::net::SocketAddr;
use std::path::PathBuf;

use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use income_engine::api::{AppState, create_router};
use income_engine::config::ConfigLoader;

/// Serves the income eligibility engine over HTTP.
#[derive(Debug, Parser)]
#[command(name = "income-engine", version, about)]
struct Cli {
    /// Address to bind.
    #[arg(long, default_value = "127.0.0.1")]
    host: String,

    /// Port to listen on.
    #[arg(long, default_value_t = 3000)]
    port: u16,

    /// Directory holding constants.yaml and income_types.yaml.
    /// The built-in registry is used when omitted.
    #[arg(long)]
    config: Option<PathBuf>,
}

fn init_tracing() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new("info"))?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .try_init()
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let loader = match &cli.config {
        Some(path) => ConfigLoader::load(path)?,
        None => ConfigLoader::builtin(),
    };
    info!(
        config = %cli.config.as_ref().map_or("built-in".to_string(), |p| p.display().to_string()),
        "Loaded calculation registry"
    );

    let addr: SocketAddr = format!("{}:{}", cli.host, cli.port).parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "Income engine listening");

    axum::serve(listener, create_router(AppState::new(loader))).await?;
    Ok(())
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Err(err) = init_tracing() {
        eprintln!("telemetry error: {err}");
        std::process::exit(1);
    }

    if let Err(err) = run(cli).await {
        eprintln!("application error: {err}");
        std::process::exit(1);
    }
}

//! Explorer API Server
//!
//! Serves interactive community explorer sessions to the dashboard shell.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

use explorer_api::config::DashboardConfig;
use explorer_api::state::AppState;

/// Explorer API Server
#[derive(Parser, Debug)]
#[command(name = "explorer-api")]
#[command(about = "Interactive community explorer server")]
struct Args {
    /// Listen address
    #[arg(short, long, default_value = "0.0.0.0:8050", env = "EXPLORER_LISTEN_ADDR")]
    listen: String,

    /// Log level
    #[arg(long, default_value = "info", env = "RUST_LOG")]
    log_level: String,

    /// Dashboard configuration file
    #[arg(short, long, default_value = "config/explorer.yaml", env = "EXPLORER_CONFIG")]
    config: String,

    /// Number of worker threads
    #[arg(long, env = "EXPLORER_WORKER_THREADS")]
    worker_threads: Option<usize>,
}

fn main() {
    // Load .env file if present
    dotenvy::dotenv().ok();

    let args = Args::parse();

    // Build runtime with configured threads
    let mut runtime_builder = tokio::runtime::Builder::new_multi_thread();
    runtime_builder.enable_all();

    if let Some(threads) = args.worker_threads {
        runtime_builder.worker_threads(threads);
    }

    let runtime = match runtime_builder.build() {
        Ok(runtime) => runtime,
        Err(e) => {
            eprintln!("Failed to create Tokio runtime: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = runtime.block_on(run_server(args)) {
        tracing::error!("Explorer API failed: {:#}", e);
        eprintln!("Explorer API failed: {:#}", e);
        std::process::exit(1);
    }
}

async fn run_server(args: Args) -> Result<()> {
    // Initialize tracing
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_level(true)
        .json()
        .init();

    // Initialize Prometheus metrics exporter
    let prometheus_handle = metrics_exporter_prometheus::PrometheusBuilder::new()
        .install_recorder()
        .context("Failed to install Prometheus recorder")?;

    info!("Starting explorer API server");

    // The dataset is loaded before accepting connections
    let config = DashboardConfig::load(&args.config)?;
    let state = Arc::new(AppState::new(config)?);

    let app = explorer_api::app(state, prometheus_handle);

    let addr: SocketAddr = args
        .listen
        .parse()
        .with_context(|| format!("Invalid listen address: {}", args.listen))?;

    info!("Explorer API listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    axum::serve(listener, app).await.context("Server failed")?;
    Ok(())
}

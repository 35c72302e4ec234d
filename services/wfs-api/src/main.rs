//! WFS API Server

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

use wfs_api::{handlers, AppState, WfsConfig};

/// WFS API Server
#[derive(Parser, Debug)]
#[command(name = "wfs-api")]
#[command(about = "OGC Web Feature Service 2.0 over an observation archive")]
struct Args {
    /// Listen address
    #[arg(short, long, default_value = "0.0.0.0:8084", env = "WFS_LISTEN_ADDR")]
    listen: String,

    /// Log level
    #[arg(long, default_value = "info", env = "RUST_LOG")]
    log_level: String,

    /// Configuration file
    #[arg(short, long, default_value = "config/wfs.yaml", env = "WFS_CONFIG")]
    config: PathBuf,

    /// Number of worker threads
    #[arg(long, env = "WFS_WORKER_THREADS")]
    worker_threads: Option<usize>,
}

fn main() -> Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    let args = Args::parse();

    let mut runtime_builder = tokio::runtime::Builder::new_multi_thread();
    runtime_builder.enable_all();
    if let Some(threads) = args.worker_threads {
        runtime_builder.worker_threads(threads);
    }
    let runtime = runtime_builder
        .build()
        .context("Failed to create Tokio runtime")?;

    runtime.block_on(run_server(args))
}

async fn run_server(args: Args) -> Result<()> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level));
    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_level(true)
        .json()
        .init();

    let prometheus_handle = metrics_exporter_prometheus::PrometheusBuilder::new()
        .install_recorder()
        .context("Failed to install Prometheus recorder")?;

    info!("Starting WFS API server");

    let config = WfsConfig::load(&args.config)?.with_env_overrides();
    let refresh_interval = config.refresh_interval();
    let state = Arc::new(AppState::new(config)?);

    // A failed first refresh leaves GetCapabilities reporting "not computed"
    // until the next tick succeeds.
    let _ = state.refresher.refresh().await;
    let _refresh_task = state.refresher.clone().spawn(refresh_interval);

    let app = handlers::router(state, prometheus_handle);

    let addr: SocketAddr = args
        .listen
        .parse()
        .with_context(|| format!("Invalid listen address: {}", args.listen))?;
    info!("WFS API listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    axum::serve(listener, app).await.context("Server failed")?;
    Ok(())
}

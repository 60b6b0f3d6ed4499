//! TreeMatch server - main entry point
//!
//! Serves the plant catalog, soil catalog and soil recommendation API.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tokio::signal;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use treematch_common::config::{self, TomlConfig};
use treematch_server::services::SoilPropertyClient;
use treematch_server::{build_router, AppState};

/// Command-line arguments for treematch-server
#[derive(Parser, Debug)]
#[command(name = "treematch-server")]
#[command(about = "TreeMatch plant and soil recommendation service")]
#[command(version)]
struct Args {
    /// Port to listen on
    #[arg(short, long, env = "TREEMATCH_PORT")]
    port: Option<u16>,

    /// Address to bind
    #[arg(short, long, env = "TREEMATCH_BIND_ADDRESS")]
    bind_address: Option<String>,

    /// Folder holding treematch.db (overrides TREEMATCH_ROOT_FOLDER and config.toml)
    #[arg(short, long)]
    root_folder: Option<PathBuf>,

    /// Path to config.toml
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let toml_config = TomlConfig::load_or_default(args.config.as_deref());

    let level = &toml_config.logging.level;
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!("treematch_server={level},treematch_common={level},tower_http={level}")
                    .into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting TreeMatch server v{}", env!("CARGO_PKG_VERSION"));

    let root_folder = config::resolve_root_folder(args.root_folder.as_deref(), &toml_config);
    let db_path = config::ensure_root_folder(&root_folder)
        .with_context(|| format!("Failed to prepare root folder {}", root_folder.display()))?;
    info!("Database path: {}", db_path.display());

    let pool = treematch_common::db::init_database(&db_path)
        .await
        .context("Failed to initialize database")?;
    info!("Database ready");

    let soil_api = toml_config.soil_api_config();
    if soil_api.api_key.is_none() {
        warn!(
            "No soil API key configured (set {} or [soil_api].api_key); soil lookups will return no data",
            config::SOIL_API_KEY_ENV
        );
    }
    let soil_client =
        SoilPropertyClient::new(&soil_api).context("Failed to build soil API client")?;
    info!(
        base_url = %soil_api.base_url,
        depth = %soil_api.depth,
        "Soil API client ready"
    );

    let state = AppState::new(pool, Arc::new(soil_client));
    let app = build_router(state);

    let bind_address = args
        .bind_address
        .or_else(|| toml_config.bind_address.clone())
        .unwrap_or_else(|| config::DEFAULT_BIND_ADDRESS.to_string());
    let port = args
        .port
        .or(toml_config.port)
        .unwrap_or(config::DEFAULT_PORT);
    let addr = format!("{}:{}", bind_address, port);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;
    info!("treematch-server listening on http://{}", addr);
    info!("Health check: http://{}/health", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server shutdown complete");
    Ok(())
}

/// Resolves on Ctrl+C or SIGTERM
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, shutting down");
        },
        _ = terminate => {
            info!("Received terminate signal, shutting down");
        },
    }
}

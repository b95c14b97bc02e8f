//! quiz-api - Web3 personality quiz service
//!
//! Serves the quiz questions, scores answers, stores results in Redis and
//! answers leaderboard and share-card requests for the client frame.

use anyhow::Result;
use clap::Parser;
use std::sync::Arc;
use tokio::signal::ctrl_c;
#[cfg(unix)]
use tokio::signal::unix::{signal, SignalKind};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use quiz_api::cli::Cli;
use quiz_api::{build_router, AppState};
use quiz_common::config::{default_config_path, load_toml_config, ServiceConfig};
use quiz_common::store::{KeyValueStore, MemoryStore, RedisStore};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Config is resolved before tracing starts so log_level can apply
    let config_path = cli.config.clone().or_else(default_config_path);
    let file_layer = match &config_path {
        Some(path) => load_toml_config(path)?,
        None => None,
    };
    let file_found = file_layer.is_some();

    let cli_layer = cli.layer();
    let file_layer = file_layer.unwrap_or_default();
    let config = ServiceConfig::from_layers(&[&cli_layer, &file_layer]);

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.log_level)),
        )
        .init();

    info!(
        "Starting Web3 Personality Quiz (quiz-api) v{}",
        env!("CARGO_PKG_VERSION")
    );

    match (&config_path, file_found) {
        (Some(path), true) => info!("Loaded config from {}", path.display()),
        (Some(path), false) => warn!(
            "Config file not found at {}, using defaults",
            path.display()
        ),
        (None, _) => warn!("No config directory available, using defaults"),
    }

    config.validate()?;

    let store = open_store(&cli, &config).await?;

    let state = AppState::new(store, &config);
    let app = build_router(state);

    let address = config.listen_address();
    let listener = tokio::net::TcpListener::bind(&address).await?;
    info!("quiz-api listening on http://{}", address);
    info!("Health check: http://{}/health", address);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("quiz-api stopped");
    Ok(())
}

async fn open_store(cli: &Cli, config: &ServiceConfig) -> Result<Arc<dyn KeyValueStore>> {
    if cli.memory_store {
        warn!("Using in-memory store; results are lost on exit");
        return Ok(Arc::new(MemoryStore::new()));
    }

    match RedisStore::connect(&config.redis_url, config.store_timeout()).await {
        Ok(store) => Ok(Arc::new(store)),
        Err(e) => {
            error!("Failed to connect to Redis at {}: {}", config.redis_url, e);
            Err(e.into())
        }
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = ctrl_c().await {
            error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
        info!("Received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        match signal(SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
                info!("Received terminate signal, shutting down");
            }
            Err(e) => {
                error!("Failed to install terminate handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}

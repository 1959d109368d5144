// ABOUTME: Task API server assembly
// ABOUTME: Opens the configured store, layers CORS and request tracing over the router, serves until Ctrl-C

use std::sync::Arc;

use anyhow::Context;
use axum::http::{HeaderValue, Method};
use axum::Router;
use taskbot_api::{create_router, DbState};
use taskbot_config::constants::MEMORY_DATABASE;
use taskbot_storage::{InMemoryTaskStorage, SqliteTaskStorage, StorageResult, TaskStorage};
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{error, info};

use crate::config::{ConfigError, ServerConfig};

/// Open the store named by `database_url`; `memory` selects the in-memory store
pub async fn open_storage(database_url: &str) -> StorageResult<Arc<dyn TaskStorage>> {
    if database_url == MEMORY_DATABASE {
        info!("Using in-memory task storage");
        return Ok(Arc::new(InMemoryTaskStorage::new()));
    }

    info!("Using SQLite task storage at {}", database_url);
    Ok(Arc::new(SqliteTaskStorage::connect(database_url).await?))
}

/// Any origin when none is configured
pub fn cors_layer(origin: Option<&str>) -> Result<CorsLayer, ConfigError> {
    let layer = CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
        ])
        .allow_headers(Any);

    match origin {
        Some(origin) => {
            let origin = origin
                .parse::<HeaderValue>()
                .map_err(|_| ConfigError::InvalidCorsOrigin(origin.to_string()))?;
            Ok(layer.allow_origin(origin))
        }
        None => Ok(layer.allow_origin(Any)),
    }
}

pub fn build_app(storage: Arc<dyn TaskStorage>, cors_origin: Option<&str>) -> Result<Router, ConfigError> {
    let cors = cors_layer(cors_origin)?;
    Ok(create_router(DbState::new(storage))
        .layer(cors)
        .layer(TraceLayer::new_for_http()))
}

pub async fn serve(config: &ServerConfig) -> anyhow::Result<()> {
    let storage = open_storage(&config.database_url)
        .await
        .context("Failed to open task storage")?;
    let app = build_app(storage, config.cors_origin.as_deref())?;

    let listener = TcpListener::bind(config.bind_address())
        .await
        .with_context(|| format!("Failed to bind to {}", config.bind_address()))?;
    info!("Task API listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Task API server failed")?;

    info!("Task API stopped");
    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Shutdown signal received"),
        Err(e) => {
            error!("Failed to listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    }
}

//! HTTP server for the task list.
//!
//! # Module Structure
//!
//! - `handlers` - HTTP route handlers
//! - `models` - form payloads and page view models
//! - `csrf` - double-submit anti-forgery token
//! - `error` - mapping of task errors to HTTP responses
//! - `templates` - HTML template rendering

mod csrf;
mod error;
mod handlers;
mod models;
mod templates;

pub use error::AppError;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{routing::get, Router};
use thiserror::Error;
use tower_http::trace::TraceLayer;

use todos_core::{open_store, Config, ConfigError, StorageError, StoreLocation, TaskManager};

// =============================================================================
// Application State
// =============================================================================

/// Shared application state for the server.
pub struct AppState {
    /// Task operations, bound to the store opened at startup.
    pub manager: TaskManager,
    /// Whether form submissions must carry a matching anti-forgery token.
    pub csrf: bool,
}

impl AppState {
    pub fn new(manager: TaskManager, csrf: bool) -> Self {
        Self { manager, csrf }
    }
}

// =============================================================================
// Errors
// =============================================================================

/// Errors that stop the server from starting or running.
#[derive(Debug, Error)]
pub enum ServeError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Could not open task store: {0}")]
    Storage(#[from] StorageError),

    #[error("Server IO error: {0}")]
    Io(#[from] std::io::Error),
}

// =============================================================================
// Router
// =============================================================================

/// Build the application router.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(handlers::index).post(handlers::create))
        .route("/changes_status/{id}/{status}", get(handlers::change_status))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

// =============================================================================
// Server Entry Point
// =============================================================================

/// Open the store and serve until Ctrl+C.
pub async fn start_server(config: Config) -> Result<(), ServeError> {
    let descriptor = config.store.descriptor()?;
    let location = StoreLocation::parse(&config.store.namespace, &config.store.store_path)?;
    let store = open_store(&descriptor, &location).await?;

    let manager = TaskManager::with_options(store, config.query.options());
    let state = Arc::new(AppState::new(manager, config.server.csrf));
    let app = router(state);

    let host = config
        .server
        .host
        .parse::<std::net::IpAddr>()
        .map_err(|_| ConfigError::Invalid(format!("server.host = {:?}", config.server.host)))?;
    let addr = SocketAddr::new(host, config.server.port);
    let url = format!("http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%url, "Todos listening, press Ctrl+C to stop");

    if config.server.open_browser {
        if let Err(e) = open::that(&url) {
            tracing::warn!(error = %e, "Could not open browser");
        }
    }

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for Ctrl+C");
    }
}

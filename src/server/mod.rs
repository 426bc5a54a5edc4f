//! HTTP front end: the `/api/chargers` proxy route and the static search page.

use std::path::Path;

use anyhow::{Context, Result};
use axum::{Router, routing::get};
use tokio::net::TcpListener;
use tokio::signal::{self, ctrl_c};
use tower_http::services::ServeFile;
use tracing::info;

pub mod error;
pub mod routes;
pub mod state;

use routes::chargers_handler;
use state::AppState;

/// The JSON API alone.
pub fn api_router(state: AppState) -> Router {
    Router::new()
        .route("/api/chargers", get(chargers_handler))
        .with_state(state)
}

/// The API plus the search page served from `static_dir/index.html`.
pub fn router(state: AppState, static_dir: &Path) -> Router {
    api_router(state).route_service("/", ServeFile::new(static_dir.join("index.html")))
}

/// Binds `listener` and serves until Ctrl+C or SIGTERM.
pub async fn serve(listener: TcpListener, app: Router) -> Result<()> {
    let address = listener.local_addr()?;
    info!(%address, "Server running");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server shut down");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
        info!("Received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
                info!("Received terminate signal, shutting down");
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
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

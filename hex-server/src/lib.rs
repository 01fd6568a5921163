//! Hex Server - read-only HTTP API for renderers
//!
//! This crate exposes a running game to any renderer that can poll JSON:
//! - Status and game lifecycle
//! - Board ownership grid
//! - Raw snapshots
//! - Optional static file serving for a browser front end

mod routes;
mod state;

use axum::{routing::get, Router};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;

pub use state::ServerState;

/// Server configuration
#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub port: u16,
    /// Directory served for paths outside `/api`, if any
    pub static_dir: Option<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 8003,
            static_dir: None,
        }
    }
}

/// Create the router with all routes
pub fn create_router(config: &ServerConfig, state: Arc<ServerState>) -> Router {
    let router = Router::new()
        // Status endpoint
        .route("/api/status", get(routes::status::status_handler))
        // Board ownership
        .route("/api/board", get(routes::board::get_board))
        // Game API
        .route("/api/game", get(routes::game::get_game))
        .route("/api/snapshot", get(routes::game::get_snapshot))
        // Shared state
        .with_state(state)
        .layer(CorsLayer::permissive());

    match &config.static_dir {
        // Static file serving (must be last)
        Some(dir) => router.fallback_service(ServeDir::new(dir)),
        None => router,
    }
}

/// Start the HTTP server
pub async fn run_server(config: ServerConfig, state: Arc<ServerState>) -> anyhow::Result<()> {
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let router = create_router(&config, state);

    tracing::info!("Hex observer server starting on http://0.0.0.0:{}", config.port);
    if let Some(dir) = &config.static_dir {
        tracing::info!("Static files served from: {}", dir);
    }

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router).await?;

    Ok(())
}

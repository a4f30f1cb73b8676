//! Router construction and server loop.

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};
use thiserror::Error;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use crate::{
    config::ServerConfig, infrastructure::repository::InMemoryBoardHubRepository,
    ui::{handler, signal::shutdown_signal, state::AppState},
};

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Failed to bind {addr}: {source}")]
    Bind {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Server stopped unexpectedly: {0}")]
    Serve(#[source] std::io::Error),
}

/// Build the application router over the given state.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/ws", get(handler::websocket_handler))
        .route("/api/health", get(handler::health_check))
        .route(
            "/api/boards/{board_id}/events",
            post(handler::broadcast_board_event),
        )
        .route(
            "/api/boards/{board_id}/connections",
            get(handler::get_board_connections),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Run the server until a shutdown signal arrives.
pub async fn run(config: ServerConfig) -> Result<(), ServerError> {
    let repository = Arc::new(InMemoryBoardHubRepository::new());
    let state = Arc::new(AppState::new(repository, config.outbound_queue));
    let app = router(state);

    let addr = config.bind_addr();
    let listener = TcpListener::bind(&addr)
        .await
        .map_err(|source| ServerError::Bind {
            addr: addr.clone(),
            source,
        })?;

    tracing::info!("Board hub listening on {}", addr);
    tracing::info!("WebSocket endpoint: ws://{}/ws", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(ServerError::Serve)?;

    tracing::info!("Server stopped");
    Ok(())
}

//! Server execution logic.

use std::sync::Arc;

use axum::{
    Router,
    routing::{delete, get, post, put},
};
use tower_http::trace::TraceLayer;

use super::{
    handler::{
        advance_round, change_visibility, create_room, create_team, delete_room, delete_team,
        get_room_detail, get_words, health_check, join_room, join_team, kick_participant,
        leave_room, list_my_rooms, list_rooms, pass_admin, reset_game, start_game,
        websocket_handler,
    },
    signal::shutdown_signal,
    state::AppState,
};

/// Game server
///
/// # Example
///
/// ```ignore
/// let server = Server::new(build_in_memory_state(&config));
/// server.run("127.0.0.1".to_string(), 8080).await?;
/// ```
pub struct Server {
    state: Arc<AppState>,
}

impl Server {
    pub fn new(state: Arc<AppState>) -> Self {
        Self { state }
    }

    /// Build the router with every endpoint
    pub fn router(&self) -> Router {
        Router::new()
            // WebSocket エンドポイント
            .route("/ws", get(websocket_handler))
            // HTTP エンドポイント
            .route("/api/health", get(health_check))
            .route("/api/words/{count}", get(get_words))
            .route("/api/rooms", post(create_room).get(list_rooms))
            .route("/api/me/rooms", get(list_my_rooms))
            .route("/api/me/leave", post(leave_room))
            .route(
                "/api/rooms/{room_id}",
                get(get_room_detail).delete(delete_room),
            )
            .route("/api/rooms/{room_id}/visibility", put(change_visibility))
            .route("/api/rooms/{room_id}/admin", put(pass_admin))
            .route("/api/rooms/{room_id}/join", post(join_room))
            .route(
                "/api/rooms/{room_id}/participants/{participant_id}",
                delete(kick_participant),
            )
            .route("/api/rooms/{room_id}/teams", post(create_team))
            .route("/api/teams/{team_id}", delete(delete_team))
            .route("/api/teams/{team_id}/join", put(join_team))
            .route("/api/rooms/{room_id}/game/start", post(start_game))
            .route("/api/rooms/{room_id}/game/advance", post(advance_round))
            .route("/api/rooms/{room_id}/game/reset", post(reset_game))
            .layer(TraceLayer::new_for_http())
            .with_state(self.state.clone())
    }

    /// Run the game server
    ///
    /// # Arguments
    ///
    /// * `host` - The host address to bind to (e.g., "127.0.0.1")
    /// * `port` - The port number to bind to (e.g., 8080)
    ///
    /// # Errors
    ///
    /// Returns an error if the server fails to bind to the specified address or
    /// if there's an error during server execution.
    pub async fn run(self, host: String, port: u16) -> Result<(), Box<dyn std::error::Error>> {
        let app = self.router();

        // Bind the server to the host and port
        let bind_addr = format!("{}:{}", host, port);
        let listener = tokio::net::TcpListener::bind(&bind_addr).await?;

        tracing::info!("Game server listening on {}", listener.local_addr()?);
        tracing::info!("Connect to: ws://{}/ws?token=<user-id>", bind_addr);
        tracing::info!("Press Ctrl+C to shutdown gracefully");

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Server shutdown complete");

        Ok(())
    }
}

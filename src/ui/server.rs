//! Server execution logic.

use std::sync::Arc;

use axum::{Router, routing::get};
use tower_http::trace::TraceLayer;

use crate::domain::{ChatRepository, MessagePusher};
use crate::usecase::{
    DisconnectSessionUseCase, JoinRoomUseCase, ListRoomsUseCase, RegisterUserUseCase,
    SendMessageUseCase,
};

use super::{
    handler::{get_rooms, health_check, websocket_handler},
    signal::shutdown_signal,
    state::AppState,
};

/// WebSocket chat relay server
///
/// This struct encapsulates the server configuration and provides methods to run the server.
///
/// # Example
///
/// ```ignore
/// let server = Server::new(
///     repository,
///     message_pusher,
///     register_user_usecase,
///     join_room_usecase,
///     send_message_usecase,
///     list_rooms_usecase,
///     disconnect_session_usecase,
/// );
/// server.run("127.0.0.1".to_string(), 8080).await?;
/// ```
pub struct Server {
    repository: Arc<dyn ChatRepository>,
    message_pusher: Arc<dyn MessagePusher>,
    register_user_usecase: Arc<RegisterUserUseCase>,
    join_room_usecase: Arc<JoinRoomUseCase>,
    send_message_usecase: Arc<SendMessageUseCase>,
    list_rooms_usecase: Arc<ListRoomsUseCase>,
    disconnect_session_usecase: Arc<DisconnectSessionUseCase>,
}

impl Server {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        repository: Arc<dyn ChatRepository>,
        message_pusher: Arc<dyn MessagePusher>,
        register_user_usecase: Arc<RegisterUserUseCase>,
        join_room_usecase: Arc<JoinRoomUseCase>,
        send_message_usecase: Arc<SendMessageUseCase>,
        list_rooms_usecase: Arc<ListRoomsUseCase>,
        disconnect_session_usecase: Arc<DisconnectSessionUseCase>,
    ) -> Self {
        Self {
            repository,
            message_pusher,
            register_user_usecase,
            join_room_usecase,
            send_message_usecase,
            list_rooms_usecase,
            disconnect_session_usecase,
        }
    }

    /// Run the WebSocket chat relay server
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
        let app_state = Arc::new(AppState {
            repository: self.repository,
            message_pusher: self.message_pusher,
            register_user_usecase: self.register_user_usecase,
            join_room_usecase: self.join_room_usecase,
            send_message_usecase: self.send_message_usecase,
            list_rooms_usecase: self.list_rooms_usecase,
            disconnect_session_usecase: self.disconnect_session_usecase,
        });

        // Define handlers
        let app = Router::new()
            .route("/ws", get(websocket_handler))
            .route("/api/health", get(health_check))
            .route("/api/rooms", get(get_rooms))
            .layer(TraceLayer::new_for_http())
            .with_state(app_state);

        // Bind the server to the host and port
        let bind_addr = format!("{}:{}", host, port);
        let listener = tokio::net::TcpListener::bind(&bind_addr).await?;

        // Start the server
        tracing::info!(
            "WebSocket chat relay listening on {}",
            listener.local_addr()?
        );
        tracing::info!("Connect to: ws://{}/ws", bind_addr);
        tracing::info!("Press Ctrl+C to shutdown gracefully");

        // Set up graceful shutdown signal handler
        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Server shutdown complete");

        Ok(())
    }
}

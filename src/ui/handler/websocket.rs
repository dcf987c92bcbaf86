//! WebSocket connection handlers.

use std::sync::Arc;

use axum::{
    extract::{
        State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    response::IntoResponse,
};
use futures_util::{sink::SinkExt, stream::StreamExt};
use tokio::sync::mpsc;

use crate::{
    domain::{MessageContent, Nickname, RoomName, SessionId},
    infrastructure::dto::envelope::{self, ClientCommand},
    ui::state::AppState,
};

pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

/// Spawns a task that receives payloads from the rx channel and pushes them
/// to the WebSocket sender.
///
/// This is the outbound half of the connection: everything addressed to this
/// session (by any lifecycle operation) flows through the channel.
fn pusher_loop(
    mut rx: mpsc::UnboundedReceiver<String>,
    mut sender: futures_util::stream::SplitSink<WebSocket, Message>,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            if sender.send(Message::Text(msg.into())).await.is_err() {
                break;
            }
        }
    })
}

async fn handle_socket(socket: WebSocket, state: Arc<AppState>) {
    // Issue a session handle and register the push channel before any
    // payload can address this connection
    let id = state.repository.create_session().await;
    let (tx, rx) = mpsc::unbounded_channel();
    state.message_pusher.register_client(id, tx).await;
    tracing::info!("Session '{}' connected", id);

    let (sender, mut receiver) = socket.split();

    let state_clone = state.clone();

    // Spawn a task to receive commands from this client
    let mut recv_task = tokio::spawn(async move {
        while let Some(msg) = receiver.next().await {
            let msg = match msg {
                Ok(msg) => msg,
                Err(e) => {
                    tracing::error!("WebSocket error on session '{}': {}", id, e);
                    break;
                }
            };

            match msg {
                Message::Text(text) => {
                    dispatch_payload(&state_clone, id, &text).await;
                }
                Message::Ping(_) => {
                    tracing::debug!("Received ping from session '{}'", id);
                    // Ping/pong is handled automatically by the WebSocket protocol
                }
                Message::Close(_) => {
                    tracing::info!("Session '{}' requested close", id);
                    break;
                }
                _ => {}
            }
        }
    });

    // Spawn a task to receive payloads addressed to this session
    let mut send_task = pusher_loop(rx, sender);

    // If any one of the tasks completes, abort the other
    tokio::select! {
        _ = &mut recv_task => send_task.abort(),
        _ = &mut send_task => recv_task.abort(),
    };

    state.disconnect_session_usecase.execute(id).await;
}

/// Decode one inbound payload and route it to its use case.
///
/// Malformed payloads and domain validation failures are logged and dropped;
/// the connection stays open.
async fn dispatch_payload(state: &Arc<AppState>, id: SessionId, payload: &str) {
    let command = match envelope::decode(payload) {
        Ok(command) => command,
        Err(e) => {
            tracing::warn!("Dropping payload from session '{}': {}", id, e);
            return;
        }
    };

    match command {
        ClientCommand::UserJoin { nickname, avatar } => {
            let nickname = match Nickname::new(nickname) {
                Ok(n) => n,
                Err(e) => {
                    tracing::warn!("Session '{}' sent an invalid nickname: {}", id, e);
                    return;
                }
            };
            if let Err(e) = state.register_user_usecase.execute(id, nickname, avatar).await {
                tracing::warn!("Failed to register session '{}': {}", id, e);
            }
        }
        ClientCommand::Join {
            room,
            nickname,
            avatar,
        } => {
            let (room, nickname) = match (RoomName::new(room), Nickname::new(nickname)) {
                (Ok(r), Ok(n)) => (r, n),
                (Err(e), _) => {
                    tracing::warn!("Session '{}' sent an invalid room name: {}", id, e);
                    return;
                }
                (_, Err(e)) => {
                    tracing::warn!("Session '{}' sent an invalid nickname: {}", id, e);
                    return;
                }
            };
            if let Err(e) = state
                .join_room_usecase
                .execute(id, room, nickname, avatar)
                .await
            {
                tracing::warn!("Failed to join session '{}' to room: {}", id, e);
            }
        }
        ClientCommand::Message { content } => {
            let content = match MessageContent::new(content) {
                Ok(c) => c,
                Err(e) => {
                    tracing::warn!("Session '{}' sent an invalid message: {}", id, e);
                    return;
                }
            };
            if let Err(e) = state.send_message_usecase.execute(id, content).await {
                tracing::warn!("Failed to relay message from session '{}': {}", id, e);
            }
        }
        ClientCommand::ListRooms => {
            state.list_rooms_usecase.execute(id).await;
        }
    }
}

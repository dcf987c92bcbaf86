//! Room-based WebSocket chat relay server.
//!
//! Accepts WebSocket connections, routes JSON commands through the session
//! lifecycle and fans events out to rooms.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin server
//! cargo run --bin server -- --host 0.0.0.0 --port 3000
//! ```

use std::{collections::HashMap, sync::Arc};

use clap::Parser;
use tokio::sync::Mutex;

use sala::{
    common::{logger::setup_logger, time::SystemClock},
    domain::{ChatState, RoomName},
    infrastructure::{message_pusher::WebSocketMessagePusher, repository::InMemoryChatRepository},
    ui::Server,
    usecase::{
        BroadcastRouter, DisconnectSessionUseCase, JoinRoomUseCase, ListRoomsUseCase,
        RegisterUserUseCase, SendMessageUseCase,
    },
};

/// Room names seeded at process start
const DEFAULT_ROOMS: [&str; 3] = ["#geral", "#python", "#jogos"];

#[derive(Parser, Debug)]
#[command(name = "server")]
#[command(about = "Room-based WebSocket chat relay", long_about = None)]
struct Args {
    /// Host address to bind the server to
    #[arg(short = 'H', long, default_value = "127.0.0.1")]
    host: String,

    /// Port number to bind the server to
    #[arg(short = 'p', long, default_value = "8080")]
    port: u16,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), "debug");

    let args = Args::parse();

    // Initialize dependencies in order:
    // 1. Repository
    // 2. MessagePusher
    // 3. BroadcastRouter
    // 4. UseCases
    // 5. Server

    // 1. Create Repository (in-memory state seeded with the default rooms)
    let default_rooms: Vec<RoomName> = DEFAULT_ROOMS
        .iter()
        .map(|name| RoomName::new(name.to_string()).expect("default room name is valid"))
        .collect();
    let state = Arc::new(Mutex::new(ChatState::with_rooms(default_rooms)));
    let repository = Arc::new(InMemoryChatRepository::new(state));
    tracing::info!("Seeded default rooms: {}", DEFAULT_ROOMS.join(", "));

    // 2. Create MessagePusher (WebSocket implementation)
    let message_pusher_clients = Arc::new(Mutex::new(HashMap::new()));
    let message_pusher = Arc::new(WebSocketMessagePusher::new(message_pusher_clients));

    // 3. Create BroadcastRouter
    let router = Arc::new(BroadcastRouter::new(
        repository.clone(),
        message_pusher.clone(),
    ));

    // 4. Create UseCases
    let clock = Arc::new(SystemClock);
    let register_user_usecase = Arc::new(RegisterUserUseCase::new(
        repository.clone(),
        router.clone(),
    ));
    let join_room_usecase = Arc::new(JoinRoomUseCase::new(
        repository.clone(),
        router.clone(),
        clock.clone(),
    ));
    let send_message_usecase = Arc::new(SendMessageUseCase::new(
        repository.clone(),
        router.clone(),
        clock.clone(),
    ));
    let list_rooms_usecase = Arc::new(ListRoomsUseCase::new(repository.clone(), router.clone()));
    let disconnect_session_usecase = Arc::new(DisconnectSessionUseCase::new(
        repository.clone(),
        message_pusher.clone(),
        router.clone(),
        clock,
    ));

    // 5. Create and run the server
    let server = Server::new(
        repository,
        message_pusher,
        register_user_usecase,
        join_room_usecase,
        send_message_usecase,
        list_rooms_usecase,
        disconnect_session_usecase,
    );
    if let Err(e) = server.run(args.host, args.port).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}

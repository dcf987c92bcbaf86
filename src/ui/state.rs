//! Server state shared across connection handlers.

use std::sync::Arc;

use crate::domain::{ChatRepository, MessagePusher};
use crate::usecase::{
    DisconnectSessionUseCase, JoinRoomUseCase, ListRoomsUseCase, RegisterUserUseCase,
    SendMessageUseCase,
};

/// Shared application state
pub struct AppState {
    /// Repository (data access abstraction, also backs the HTTP endpoints)
    pub repository: Arc<dyn ChatRepository>,
    /// MessagePusher (push channel registry, shared with the use cases)
    pub message_pusher: Arc<dyn MessagePusher>,
    pub register_user_usecase: Arc<RegisterUserUseCase>,
    pub join_room_usecase: Arc<JoinRoomUseCase>,
    pub send_message_usecase: Arc<SendMessageUseCase>,
    pub list_rooms_usecase: Arc<ListRoomsUseCase>,
    pub disconnect_session_usecase: Arc<DisconnectSessionUseCase>,
}

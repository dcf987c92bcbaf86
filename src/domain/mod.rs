//! Domain layer: value objects, entities, the in-memory chat state and the
//! interfaces (repository, message pusher) implemented by infrastructure.

pub mod entity;
pub mod error;
pub mod pusher;
pub mod repository;
pub mod state;
pub mod value_object;

pub use entity::{ChatMessage, Room, Session, UserEntry};
pub use error::{StateError, ValidationError};
pub use pusher::{MessagePushError, MessagePusher, PusherChannel};
pub use repository::ChatRepository;
pub use state::{
    ChatState, Departure, DisconnectTransition, HISTORY_LIMIT, JoinTransition, MessageTransition,
    RegisterTransition,
};
pub use value_object::{MessageContent, Nickname, RoomName, SessionId, Timestamp};

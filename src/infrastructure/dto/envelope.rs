//! JSON envelope codec.
//!
//! Inbound payloads decode into a typed [`ClientCommand`] or a
//! [`EnvelopeError`] describing why they were dropped. Outbound events are
//! plain serde structs carrying a `type` discriminator; encoding a
//! well-formed outbound value is total and never fails.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Inbound command kinds recognized by the relay
const KNOWN_KINDS: [&str; 4] = ["user_join", "join", "message", "list_rooms"];

/// Why an inbound payload was dropped.
///
/// None of these close the connection; the payload is logged and ignored.
#[derive(Debug, Error)]
pub enum EnvelopeError {
    /// Payload is not parseable JSON
    #[error("payload is not well-formed JSON: {0}")]
    Malformed(#[source] serde_json::Error),

    /// Payload parsed but carries no `type` key
    #[error("payload has no 'type' field")]
    MissingKind,

    /// Well-formed envelope with an unrecognized `type`
    #[error("unknown message type '{0}'")]
    UnknownKind(String),

    /// Recognized `type` but required fields are absent or mistyped
    #[error("invalid fields for '{kind}': {source}")]
    InvalidFields {
        kind: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Typed inbound command
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientCommand {
    /// Register a display identity for this connection
    UserJoin {
        nickname: String,
        #[serde(default)]
        avatar: Option<String>,
    },
    /// Enter a room (leaving the current one, if any)
    Join {
        room: String,
        nickname: String,
        #[serde(default)]
        avatar: Option<String>,
    },
    /// Send a chat message to the current room
    Message { content: String },
    /// Request the current room list
    ListRooms,
}

/// Parse one inbound payload into a typed command.
pub fn decode(payload: &str) -> Result<ClientCommand, EnvelopeError> {
    let value: serde_json::Value =
        serde_json::from_str(payload).map_err(EnvelopeError::Malformed)?;

    let kind = value
        .get("type")
        .and_then(|t| t.as_str())
        .ok_or(EnvelopeError::MissingKind)?;
    if !KNOWN_KINDS.contains(&kind) {
        return Err(EnvelopeError::UnknownKind(kind.to_string()));
    }
    let kind = kind.to_string();

    serde_json::from_value(value).map_err(|source| EnvelopeError::InvalidFields { kind, source })
}

/// Serialize an outbound event.
///
/// Outbound DTOs contain only strings, vectors and options, so
/// serialization cannot fail for well-formed internal values.
pub fn encode<T: Serialize>(event: &T) -> String {
    serde_json::to_string(event).expect("outbound event serialization is infallible")
}

/// Discriminator for outbound event payloads
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageType {
    Message,
    Notification,
    RoomsList,
    RoomHistory,
    UsersList,
    AllUsers,
}

/// Chat message as carried in broadcasts and history replays
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessageDto {
    pub r#type: MessageType,
    pub nickname: String,
    pub content: String,
    /// RFC 3339 (ISO-8601) timestamp
    pub timestamp: String,
    pub avatar: Option<String>,
}

/// One user in a room-scoped or global user list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserEntryDto {
    pub nickname: String,
    pub avatar: Option<String>,
}

/// Current room names, directory insertion order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomsListMessage {
    pub r#type: MessageType,
    pub rooms: Vec<String>,
}

impl RoomsListMessage {
    pub fn new(rooms: Vec<String>) -> Self {
        Self {
            r#type: MessageType::RoomsList,
            rooms,
        }
    }
}

/// History replay sent to a joining session, most-recent-last
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomHistoryMessage {
    pub r#type: MessageType,
    pub messages: Vec<ChatMessageDto>,
}

impl RoomHistoryMessage {
    pub fn new(messages: Vec<ChatMessageDto>) -> Self {
        Self {
            r#type: MessageType::RoomHistory,
            messages,
        }
    }
}

/// Human-readable room event ("x joined the room")
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationMessage {
    pub r#type: MessageType,
    pub content: String,
    /// RFC 3339 (ISO-8601) timestamp
    pub timestamp: String,
}

impl NotificationMessage {
    pub fn new(content: String, timestamp: String) -> Self {
        Self {
            r#type: MessageType::Notification,
            content,
            timestamp,
        }
    }
}

/// Room-scoped user list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UsersListMessage {
    pub r#type: MessageType,
    pub users: Vec<UserEntryDto>,
}

impl UsersListMessage {
    pub fn new(users: Vec<UserEntryDto>) -> Self {
        Self {
            r#type: MessageType::UsersList,
            users,
        }
    }
}

/// Global user list (every registered session, regardless of room)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllUsersMessage {
    pub r#type: MessageType,
    pub users: Vec<UserEntryDto>,
}

impl AllUsersMessage {
    pub fn new(users: Vec<UserEntryDto>) -> Self {
        Self {
            r#type: MessageType::AllUsers,
            users,
        }
    }
}

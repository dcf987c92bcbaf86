//! Domain entities: sessions, rooms and chat messages.

use std::collections::{HashSet, VecDeque};

use super::value_object::{MessageContent, Nickname, RoomName, SessionId, Timestamp};

/// Server-side state for one live connection.
///
/// Created with all optional fields unset when the connection is accepted,
/// mutated in place as registration and join commands arrive, removed when
/// the connection closes.
#[derive(Debug, Clone)]
pub struct Session {
    pub id: SessionId,
    /// Display identity; unset until the client registers
    pub nickname: Option<Nickname>,
    /// Current room; unset until the client joins one
    pub room: Option<RoomName>,
    /// Opaque identity decoration (e.g., an image reference)
    pub avatar: Option<String>,
}

impl Session {
    pub fn new(id: SessionId) -> Self {
        Self {
            id,
            nickname: None,
            room: None,
            avatar: None,
        }
    }
}

/// Named channel with a member set and a bounded message history.
///
/// Rooms are created lazily on first join and never destroyed; an empty room
/// persists for the life of the process.
#[derive(Debug, Clone)]
pub struct Room {
    pub name: RoomName,
    /// Connection handles currently in the room
    pub members: HashSet<SessionId>,
    /// Most recent messages, oldest first
    pub history: VecDeque<ChatMessage>,
}

impl Room {
    pub fn new(name: RoomName) -> Self {
        Self {
            name,
            members: HashSet::new(),
            history: VecDeque::new(),
        }
    }
}

/// One chat message, immutable once created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    pub nickname: Nickname,
    pub content: MessageContent,
    pub timestamp: Timestamp,
    pub avatar: Option<String>,
}

impl ChatMessage {
    pub fn new(
        nickname: Nickname,
        content: MessageContent,
        timestamp: Timestamp,
        avatar: Option<String>,
    ) -> Self {
        Self {
            nickname,
            content,
            timestamp,
            avatar,
        }
    }
}

/// One entry in a room-scoped or global user list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserEntry {
    pub nickname: Nickname,
    pub avatar: Option<String>,
}

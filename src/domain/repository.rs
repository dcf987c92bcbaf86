//! Repository trait definition.
//!
//! The domain layer defines the data-access interface it needs; the concrete
//! implementation lives in the infrastructure layer (dependency inversion).

use async_trait::async_trait;

use super::{
    entity::ChatMessage,
    error::StateError,
    state::{DisconnectTransition, JoinTransition, MessageTransition, RegisterTransition},
    value_object::{MessageContent, Nickname, RoomName, SessionId, Timestamp},
};

/// Chat state repository.
///
/// Each state-changing method is one atomic transition: the implementation
/// must apply the whole mutation sequence and compute the returned snapshot
/// under a single lock acquisition, so room membership and
/// `Session::room` can never be observed diverged.
#[async_trait]
pub trait ChatRepository: Send + Sync {
    /// Issue a stable session identifier and create the session record
    async fn create_session(&self) -> SessionId;

    /// Store nickname/avatar for the session and return the snapshots the
    /// registration replies are built from
    async fn register_user(
        &self,
        id: SessionId,
        nickname: Nickname,
        avatar: Option<String>,
    ) -> Result<RegisterTransition, StateError>;

    /// Move the session into `room`, leaving its old room first
    async fn join_room(
        &self,
        id: SessionId,
        room: RoomName,
        nickname: Nickname,
        avatar: Option<String>,
    ) -> Result<JoinTransition, StateError>;

    /// Append a message to the session's current room; `None` when the
    /// session is not in a room
    async fn record_message(
        &self,
        id: SessionId,
        content: MessageContent,
        timestamp: Timestamp,
    ) -> Result<Option<MessageTransition>, StateError>;

    /// Remove the session and its room memberships; `None` when the session
    /// was already gone (idempotent)
    async fn disconnect_session(&self, id: SessionId) -> Option<DisconnectTransition>;

    /// Room names in directory insertion order
    async fn list_room_names(&self) -> Vec<String>;

    /// Current member handles of a room
    async fn room_members(&self, room: &RoomName) -> Vec<SessionId>;

    /// Every live session handle, regardless of room
    async fn all_session_ids(&self) -> Vec<SessionId>;

    /// Up to the last `limit` history entries of a room, most-recent-last
    async fn recent_history(&self, room: &RoomName, limit: usize) -> Vec<ChatMessage>;

    /// Remove handles whose delivery failed from a room's member set
    async fn remove_members(&self, room: &RoomName, ids: &[SessionId]);
}

//! In-memory chat repository.
//!
//! Wraps the domain `ChatState` behind a single coarse `tokio::sync::Mutex`.
//! Every trait method performs its whole mutation sequence inside one lock
//! acquisition; the membership/session consistency invariant is therefore
//! preserved even with many connection tasks running in parallel.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{
    ChatMessage, ChatRepository, ChatState, DisconnectTransition, JoinTransition,
    MessageContent, MessageTransition, Nickname, RegisterTransition, RoomName, SessionId,
    StateError, Timestamp,
};

/// In-memory `ChatRepository` implementation
pub struct InMemoryChatRepository {
    state: Arc<Mutex<ChatState>>,
}

impl InMemoryChatRepository {
    pub fn new(state: Arc<Mutex<ChatState>>) -> Self {
        Self { state }
    }
}

#[async_trait]
impl ChatRepository for InMemoryChatRepository {
    async fn create_session(&self) -> SessionId {
        let mut state = self.state.lock().await;
        let id = state.create_session();
        tracing::debug!("Session '{}' created ({} connected)", id, state.session_count());
        id
    }

    async fn register_user(
        &self,
        id: SessionId,
        nickname: Nickname,
        avatar: Option<String>,
    ) -> Result<RegisterTransition, StateError> {
        let mut state = self.state.lock().await;
        state.register_user(id, nickname, avatar)
    }

    async fn join_room(
        &self,
        id: SessionId,
        room: RoomName,
        nickname: Nickname,
        avatar: Option<String>,
    ) -> Result<JoinTransition, StateError> {
        let mut state = self.state.lock().await;
        state.join_room(id, room, nickname, avatar)
    }

    async fn record_message(
        &self,
        id: SessionId,
        content: MessageContent,
        timestamp: Timestamp,
    ) -> Result<Option<MessageTransition>, StateError> {
        let mut state = self.state.lock().await;
        state.record_message(id, content, timestamp)
    }

    async fn disconnect_session(&self, id: SessionId) -> Option<DisconnectTransition> {
        let mut state = self.state.lock().await;
        let transition = state.disconnect_session(id);
        if transition.is_some() {
            tracing::debug!(
                "Session '{}' removed ({} still connected)",
                id,
                state.session_count()
            );
        }
        transition
    }

    async fn list_room_names(&self) -> Vec<String> {
        let state = self.state.lock().await;
        state.list_room_names()
    }

    async fn room_members(&self, room: &RoomName) -> Vec<SessionId> {
        let state = self.state.lock().await;
        state.room_members(room)
    }

    async fn all_session_ids(&self) -> Vec<SessionId> {
        let state = self.state.lock().await;
        state.session_ids()
    }

    async fn recent_history(&self, room: &RoomName, limit: usize) -> Vec<ChatMessage> {
        let state = self.state.lock().await;
        state.recent_history(room, limit)
    }

    async fn remove_members(&self, room: &RoomName, ids: &[SessionId]) {
        let mut state = self.state.lock().await;
        for id in ids {
            state.remove_member(room, *id);
        }
    }
}

//! WebSocket-backed `MessagePusher` implementation.
//!
//! Socket creation happens in the UI layer (`src/ui/handler/websocket.rs`);
//! this implementation only manages the per-client `UnboundedSender` halves
//! and pushes serialized payloads through them. A send fails exactly when
//! the receiving half is gone, i.e. the connection's push task has exited.

use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{MessagePushError, MessagePusher, PusherChannel, SessionId};

/// WebSocket `MessagePusher` implementation
pub struct WebSocketMessagePusher {
    /// Sender channels of the currently connected clients
    clients: Arc<Mutex<HashMap<SessionId, PusherChannel>>>,
}

impl WebSocketMessagePusher {
    pub fn new(clients: Arc<Mutex<HashMap<SessionId, PusherChannel>>>) -> Self {
        Self { clients }
    }
}

#[async_trait]
impl MessagePusher for WebSocketMessagePusher {
    async fn register_client(&self, id: SessionId, sender: PusherChannel) {
        let mut clients = self.clients.lock().await;
        clients.insert(id, sender);
        tracing::debug!("Client '{}' registered to MessagePusher", id);
    }

    async fn unregister_client(&self, id: SessionId) {
        let mut clients = self.clients.lock().await;
        clients.remove(&id);
        tracing::debug!("Client '{}' unregistered from MessagePusher", id);
    }

    async fn push_to(&self, id: SessionId, content: &str) -> Result<(), MessagePushError> {
        let clients = self.clients.lock().await;

        let sender = clients
            .get(&id)
            .ok_or(MessagePushError::ClientNotFound(id))?;
        sender
            .send(content.to_string())
            .map_err(|_| MessagePushError::PushFailed(id))?;
        Ok(())
    }

    async fn broadcast(&self, targets: Vec<SessionId>, content: &str) -> Vec<SessionId> {
        let clients = self.clients.lock().await;

        let mut failed = Vec::new();
        for target in targets {
            match clients.get(&target) {
                Some(sender) => {
                    if sender.send(content.to_string()).is_err() {
                        tracing::warn!("Failed to push message to client '{}'", target);
                        failed.push(target);
                    }
                }
                None => {
                    tracing::warn!("Client '{}' not found during broadcast", target);
                    failed.push(target);
                }
            }
        }
        failed
    }
}

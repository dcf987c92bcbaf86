//! Broadcast router: fan-out of one payload to a computed recipient set.
//!
//! Targets are snapshotted first, delivery is attempted for every target
//! independently, failures are collected, and removals are applied in a
//! follow-up pass. A failed recipient never aborts delivery to the rest and
//! never surfaces an error to the caller.

use std::sync::Arc;

use crate::domain::{ChatRepository, MessagePusher, RoomName, SessionId};

/// Routes payloads to rooms, the whole population, or single sessions
pub struct BroadcastRouter {
    repository: Arc<dyn ChatRepository>,
    pusher: Arc<dyn MessagePusher>,
}

impl BroadcastRouter {
    pub fn new(repository: Arc<dyn ChatRepository>, pusher: Arc<dyn MessagePusher>) -> Self {
        Self { repository, pusher }
    }

    /// Deliver to every current member of `room`.
    ///
    /// Handles whose delivery failed are pruned from the room's member set
    /// (their connections are gone; the disconnect path removes the rest).
    pub async fn to_room(&self, room: &RoomName, payload: &str) {
        let targets = self.repository.room_members(room).await;
        if targets.is_empty() {
            return;
        }
        let failed = self.pusher.broadcast(targets, payload).await;
        if !failed.is_empty() {
            tracing::warn!(
                "Pruning {} unreachable member(s) from room '{}'",
                failed.len(),
                room
            );
            self.repository.remove_members(room, &failed).await;
        }
    }

    /// Deliver to every live session regardless of room.
    ///
    /// Failures are logged and otherwise ignored; session removal only
    /// happens via the disconnect path.
    pub async fn to_all(&self, payload: &str) {
        let targets = self.repository.all_session_ids().await;
        if targets.is_empty() {
            return;
        }
        let failed = self.pusher.broadcast(targets, payload).await;
        if !failed.is_empty() {
            tracing::warn!(
                "Failed to deliver global broadcast to {} session(s)",
                failed.len()
            );
        }
    }

    /// Deliver to a single session; failure is logged and swallowed.
    pub async fn unicast(&self, id: SessionId, payload: &str) {
        if let Err(e) = self.pusher.push_to(id, payload).await {
            tracing::warn!("Failed to push message to session '{}': {}", id, e);
        }
    }
}

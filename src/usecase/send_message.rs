//! UseCase: chat message relay.
//!
//! Stamps the message server-side, appends it to the room history and
//! broadcasts it to the room, sender included.

use std::sync::Arc;

use crate::common::time::Clock;
use crate::domain::{ChatRepository, MessageContent, SessionId, StateError, Timestamp};
use crate::infrastructure::dto::envelope::{self, ChatMessageDto};

use super::router::BroadcastRouter;

/// Chat message relay use case
pub struct SendMessageUseCase {
    repository: Arc<dyn ChatRepository>,
    router: Arc<BroadcastRouter>,
    clock: Arc<dyn Clock>,
}

impl SendMessageUseCase {
    pub fn new(
        repository: Arc<dyn ChatRepository>,
        router: Arc<BroadcastRouter>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            repository,
            router,
            clock,
        }
    }

    /// Execute the relay. A message from a session that has not joined a
    /// room (or never registered) is dropped without an error.
    pub async fn execute(&self, id: SessionId, content: MessageContent) -> Result<(), StateError> {
        let timestamp = Timestamp::new(self.clock.now_utc_millis());
        let Some(transition) = self.repository.record_message(id, content, timestamp).await?
        else {
            tracing::debug!("Session '{}' sent a message while not in a room, ignoring", id);
            return Ok(());
        };

        let event = envelope::encode(&ChatMessageDto::from(transition.message));
        self.router.to_room(&transition.room, &event).await;
        Ok(())
    }
}

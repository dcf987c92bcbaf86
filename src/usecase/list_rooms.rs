//! UseCase: on-demand room list.
//!
//! Replies to the requesting session only; no state changes.

use std::sync::Arc;

use crate::domain::{ChatRepository, SessionId};
use crate::infrastructure::dto::envelope::{self, RoomsListMessage};

use super::router::BroadcastRouter;

/// Room list query use case
pub struct ListRoomsUseCase {
    repository: Arc<dyn ChatRepository>,
    router: Arc<BroadcastRouter>,
}

impl ListRoomsUseCase {
    pub fn new(repository: Arc<dyn ChatRepository>, router: Arc<BroadcastRouter>) -> Self {
        Self { repository, router }
    }

    pub async fn execute(&self, id: SessionId) {
        let rooms = self.repository.list_room_names().await;
        let event = envelope::encode(&RoomsListMessage::new(rooms));
        self.router.unicast(id, &event).await;
    }
}

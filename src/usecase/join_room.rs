//! UseCase: room entry.
//!
//! Moves a session into a room (leaving its previous one if any), replays
//! the room history to the joiner and fans the membership changes out to
//! everyone affected.

use std::sync::Arc;

use crate::common::time::{Clock, timestamp_to_rfc3339};
use crate::domain::{ChatRepository, Departure, Nickname, RoomName, SessionId, StateError};
use crate::infrastructure::dto::{
    conversion::{history_to_dto, user_entries_to_dto},
    envelope::{
        self, AllUsersMessage, NotificationMessage, RoomHistoryMessage, RoomsListMessage,
        UsersListMessage,
    },
};

use super::router::BroadcastRouter;

/// Room entry use case
pub struct JoinRoomUseCase {
    repository: Arc<dyn ChatRepository>,
    router: Arc<BroadcastRouter>,
    clock: Arc<dyn Clock>,
}

impl JoinRoomUseCase {
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

    /// Execute the room entry.
    ///
    /// Fan-out order: departure traffic to the old room first, then the room
    /// list (when a room was created), then the joiner's history replay,
    /// then arrival traffic to the new room, then the global user list.
    pub async fn execute(
        &self,
        id: SessionId,
        room: RoomName,
        nickname: Nickname,
        avatar: Option<String>,
    ) -> Result<(), StateError> {
        let now = timestamp_to_rfc3339(self.clock.now_utc_millis());
        let transition = self
            .repository
            .join_room(id, room.clone(), nickname.clone(), avatar)
            .await?;
        tracing::info!("Session '{}' ('{}') joined room '{}'", id, nickname, room);

        if let Some(departure) = transition.departed {
            self.announce_departure(&departure, &now).await;
        }

        if let Some(rooms) = transition.created_rooms {
            let event = envelope::encode(&RoomsListMessage::new(rooms));
            self.router.to_all(&event).await;
        }

        let history =
            envelope::encode(&RoomHistoryMessage::new(history_to_dto(transition.history)));
        self.router.unicast(id, &history).await;

        let joined = envelope::encode(&NotificationMessage::new(
            format!("{nickname} joined the room"),
            now,
        ));
        self.router.to_room(&room, &joined).await;

        let user_list = envelope::encode(&UsersListMessage::new(user_entries_to_dto(
            transition.user_list,
        )));
        self.router.to_room(&room, &user_list).await;

        let all_users = envelope::encode(&AllUsersMessage::new(user_entries_to_dto(
            transition.all_users,
        )));
        self.router.to_all(&all_users).await;

        Ok(())
    }

    async fn announce_departure(&self, departure: &Departure, now: &str) {
        if let Some(name) = &departure.announce {
            let left = envelope::encode(&NotificationMessage::new(
                format!("{name} left the room"),
                now.to_string(),
            ));
            self.router.to_room(&departure.room, &left).await;
        }
        let user_list = envelope::encode(&UsersListMessage::new(user_entries_to_dto(
            departure.user_list.clone(),
        )));
        self.router.to_room(&departure.room, &user_list).await;
    }
}

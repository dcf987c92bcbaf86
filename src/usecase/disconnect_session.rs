//! UseCase: connection teardown.
//!
//! Unregisters the push channel, removes the session's handle from every
//! room member set and announces the departures. Safe to run more than once
//! for the same session.

use std::sync::Arc;

use crate::common::time::{Clock, timestamp_to_rfc3339};
use crate::domain::{ChatRepository, MessagePusher, SessionId};
use crate::infrastructure::dto::{
    conversion::user_entries_to_dto,
    envelope::{self, AllUsersMessage, NotificationMessage, UsersListMessage},
};

use super::router::BroadcastRouter;

/// Connection teardown use case
pub struct DisconnectSessionUseCase {
    repository: Arc<dyn ChatRepository>,
    pusher: Arc<dyn MessagePusher>,
    router: Arc<BroadcastRouter>,
    clock: Arc<dyn Clock>,
}

impl DisconnectSessionUseCase {
    pub fn new(
        repository: Arc<dyn ChatRepository>,
        pusher: Arc<dyn MessagePusher>,
        router: Arc<BroadcastRouter>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            repository,
            pusher,
            router,
            clock,
        }
    }

    /// Execute the teardown. Idempotent: a second call for the same session
    /// finds nothing to remove and announces nothing.
    pub async fn execute(&self, id: SessionId) {
        self.pusher.unregister_client(id).await;

        let Some(transition) = self.repository.disconnect_session(id).await else {
            tracing::debug!("Session '{}' already disconnected", id);
            return;
        };
        tracing::info!("Session '{}' disconnected", id);

        let now = timestamp_to_rfc3339(self.clock.now_utc_millis());
        for departure in &transition.departures {
            if let Some(name) = &departure.announce {
                let left = envelope::encode(&NotificationMessage::new(
                    format!("{name} left the room"),
                    now.clone(),
                ));
                self.router.to_room(&departure.room, &left).await;
            }
            let user_list = envelope::encode(&UsersListMessage::new(user_entries_to_dto(
                departure.user_list.clone(),
            )));
            self.router.to_room(&departure.room, &user_list).await;
        }

        let all_users = envelope::encode(&AllUsersMessage::new(user_entries_to_dto(
            transition.all_users,
        )));
        self.router.to_all(&all_users).await;
    }
}

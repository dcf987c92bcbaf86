//! UseCase: identity registration.
//!
//! Stores the nickname/avatar on the session, replies to the registering
//! session with the current room list and pushes the refreshed global user
//! list to everyone.

use std::sync::Arc;

use crate::domain::{ChatRepository, Nickname, SessionId, StateError};
use crate::infrastructure::dto::{
    conversion::user_entries_to_dto,
    envelope::{self, AllUsersMessage, RoomsListMessage},
};

use super::router::BroadcastRouter;

/// Identity registration use case
pub struct RegisterUserUseCase {
    repository: Arc<dyn ChatRepository>,
    router: Arc<BroadcastRouter>,
}

impl RegisterUserUseCase {
    pub fn new(repository: Arc<dyn ChatRepository>, router: Arc<BroadcastRouter>) -> Self {
        Self { repository, router }
    }

    /// Execute the registration.
    ///
    /// # Arguments
    ///
    /// * `id` - Session of the registering connection
    /// * `nickname` - Chosen display identity
    /// * `avatar` - Optional identity decoration
    pub async fn execute(
        &self,
        id: SessionId,
        nickname: Nickname,
        avatar: Option<String>,
    ) -> Result<(), StateError> {
        let transition = self
            .repository
            .register_user(id, nickname.clone(), avatar)
            .await?;
        tracing::info!("Session '{}' registered as '{}'", id, nickname);

        let rooms = envelope::encode(&RoomsListMessage::new(transition.rooms));
        self.router.unicast(id, &rooms).await;

        let all_users = envelope::encode(&AllUsersMessage::new(user_entries_to_dto(
            transition.all_users,
        )));
        self.router.to_all(&all_users).await;

        Ok(())
    }
}

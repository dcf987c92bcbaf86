//! Conversion logic between DTOs and domain entities.

use crate::common::time::timestamp_to_rfc3339;
use crate::domain::entity;
use crate::infrastructure::dto::envelope as dto;

// ========================================
// Domain Entity → DTO
// ========================================

impl From<entity::ChatMessage> for dto::ChatMessageDto {
    fn from(model: entity::ChatMessage) -> Self {
        Self {
            r#type: dto::MessageType::Message,
            nickname: model.nickname.into_string(),
            content: model.content.into_string(),
            timestamp: timestamp_to_rfc3339(model.timestamp.value()),
            avatar: model.avatar,
        }
    }
}

impl From<entity::UserEntry> for dto::UserEntryDto {
    fn from(model: entity::UserEntry) -> Self {
        Self {
            nickname: model.nickname.into_string(),
            avatar: model.avatar,
        }
    }
}

/// Convert a list of domain user entries, preserving order.
pub fn user_entries_to_dto(entries: Vec<entity::UserEntry>) -> Vec<dto::UserEntryDto> {
    entries.into_iter().map(Into::into).collect()
}

/// Convert a history snapshot, preserving order.
pub fn history_to_dto(messages: Vec<entity::ChatMessage>) -> Vec<dto::ChatMessageDto> {
    messages.into_iter().map(Into::into).collect()
}

//! Error types for the domain layer.

use thiserror::Error;

use super::value_object::SessionId;

/// Validation errors for value object construction
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("nickname must not be empty")]
    EmptyNickname,

    #[error("nickname must be at most {max} characters (got {actual})")]
    NicknameTooLong { max: usize, actual: usize },

    #[error("room name must not be empty")]
    EmptyRoomName,

    #[error("room name must be at most {max} characters (got {actual})")]
    RoomNameTooLong { max: usize, actual: usize },

    #[error("message content must not be empty")]
    EmptyMessageContent,

    #[error("message content must be at most {max} characters (got {actual})")]
    MessageContentTooLong { max: usize, actual: usize },
}

/// Errors raised by chat state transitions
#[derive(Debug, Error, PartialEq, Eq)]
pub enum StateError {
    /// The addressed session does not exist (already disconnected or never created)
    #[error("session '{0}' not found")]
    SessionNotFound(SessionId),
}

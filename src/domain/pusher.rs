//! Message pusher trait definition.
//!
//! Outbound delivery interface the lifecycle layer depends on. The concrete
//! implementation (WebSocket sender channels) lives in the infrastructure
//! layer; socket creation stays in the UI layer.

use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;
use thiserror::Error;
use tokio::sync::mpsc;

use super::value_object::SessionId;

/// Channel used to push serialized payloads to one client
pub type PusherChannel = mpsc::UnboundedSender<String>;

/// Delivery errors for a single recipient
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MessagePushError {
    /// No channel registered for this session
    #[error("client '{0}' not found")]
    ClientNotFound(SessionId),

    /// The client's channel is closed (connection gone)
    #[error("failed to push message to client '{0}'")]
    PushFailed(SessionId),
}

/// Outbound message delivery.
///
/// Sends are non-blocking (unbounded channels), so one slow or broken
/// recipient cannot stall delivery to the others.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait MessagePusher: Send + Sync {
    /// Register the sender channel for a newly accepted connection
    async fn register_client(&self, id: SessionId, sender: PusherChannel);

    /// Drop the sender channel of a closed connection
    async fn unregister_client(&self, id: SessionId);

    /// Deliver to a single recipient
    async fn push_to(&self, id: SessionId, content: &str) -> Result<(), MessagePushError>;

    /// Attempt delivery to every target independently; returns the targets
    /// whose delivery failed. A partial failure never aborts the rest.
    async fn broadcast(&self, targets: Vec<SessionId>, content: &str) -> Vec<SessionId>;
}

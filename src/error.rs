//! Error taxonomy shared by the registration and approval flows.
//!
//! The `Display` text of every [`FlowError`] is what the acting user sees, so
//! handlers can turn any failure into a reply without extra mapping.

use thiserror::Error;

use crate::bot::platform::ChannelId;

/// Failures reported by the chat platform port.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PlatformError {
    #[error("chat {0} not found")]
    ChatNotFound(ChannelId),
    #[error("{0}")]
    Delivery(String),
    #[error("platform request timed out after {0}s")]
    Timeout(u64),
}

/// Failures of a user-triggered operation, surfaced back to that user.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FlowError {
    #[error("You do not have permission to approve.")]
    Forbidden,
    #[error("Already approved.")]
    AlreadyApproved,
    #[error("This approval request has expired. Please submit the announcement again.")]
    Expired,
    #[error("This approval request is no longer available.")]
    UnknownApproval,
    #[error("Failed to DM you: {0}")]
    DeliveryFailure(String),
    #[error("Channel {0} not found.")]
    ChannelNotFound(ChannelId),
    #[error("Telegram request failed: {0}")]
    Platform(#[from] PlatformError),
}

impl FlowError {
    /// Maps a failed channel post, keeping "not found" distinct from other failures.
    pub fn from_channel_post(err: PlatformError) -> Self {
        match err {
            PlatformError::ChatNotFound(chat) => FlowError::ChannelNotFound(chat),
            other => FlowError::Platform(other),
        }
    }

    /// Maps a failed private message; the platform reason is kept verbatim.
    pub fn from_direct_message(err: PlatformError) -> Self {
        FlowError::DeliveryFailure(err.to_string())
    }
}

//! The narrow slice of the chat platform the flows depend on.
//!
//! [`ChatPlatform`] is what the registration and approval flows talk to;
//! [`TelegramPlatform`] implements it over `teloxide` and bounds every
//! request with a timeout.

use async_trait::async_trait;
use std::future::IntoFuture;
use std::time::Duration;
use teloxide::prelude::*;
use teloxide::types::{InlineKeyboardButton, InlineKeyboardMarkup, MessageId, ParseMode};
use teloxide::{ApiError, RequestError};

use crate::bot::controls::Control;
use crate::error::PlatformError;
use crate::utils::logging::log_timeout;

/// Telegram user id of a participant or moderator.
pub type ParticipantId = u64;
/// Telegram chat id (negative for groups and channels).
pub type ChannelId = i64;

/// Location of a message the bot posted, so it can be edited later.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MessageRef {
    pub channel_id: ChannelId,
    pub message_id: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Permission {
    /// Moderator right required to announce and approve.
    ManageMessages,
}

/// All text handed to the platform is Telegram MarkdownV2.
#[async_trait]
pub trait ChatPlatform: Send + Sync {
    async fn send_direct(&self, user: ParticipantId, text: &str) -> Result<(), PlatformError>;

    async fn send_channel(
        &self,
        channel: ChannelId,
        text: &str,
        control: Option<Control>,
    ) -> Result<MessageRef, PlatformError>;

    /// Replaces the text (when given) and the attached control of a message.
    async fn edit_message(
        &self,
        message: MessageRef,
        text: Option<&str>,
        control: Option<Control>,
    ) -> Result<(), PlatformError>;

    async fn has_permission(
        &self,
        channel: ChannelId,
        actor: ParticipantId,
        permission: Permission,
    ) -> Result<bool, PlatformError>;
}

#[derive(Clone)]
pub struct TelegramPlatform {
    bot: Bot,
    timeout: Duration,
}

impl TelegramPlatform {
    pub fn new(bot: Bot, timeout: Duration) -> Self {
        Self { bot, timeout }
    }

    async fn call<T, R>(
        &self,
        operation: &str,
        chat: ChannelId,
        request: R,
    ) -> Result<T, PlatformError>
    where
        R: IntoFuture<Output = Result<T, RequestError>>,
    {
        match tokio::time::timeout(self.timeout, request.into_future()).await {
            Ok(result) => result.map_err(|e| map_request_error(chat, e)),
            Err(_) => {
                let secs = self.timeout.as_secs();
                log_timeout(operation, secs, Some(&format!("chat {chat}")));
                Err(PlatformError::Timeout(secs))
            }
        }
    }
}

fn map_request_error(chat: ChannelId, err: RequestError) -> PlatformError {
    match err {
        RequestError::Api(ApiError::ChatNotFound) => PlatformError::ChatNotFound(chat),
        other => PlatformError::Delivery(other.to_string()),
    }
}

pub fn keyboard(control: Control) -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(vec![vec![InlineKeyboardButton::callback(
        control.label(),
        control.callback_data(),
    )]])
}

#[async_trait]
impl ChatPlatform for TelegramPlatform {
    async fn send_direct(&self, user: ParticipantId, text: &str) -> Result<(), PlatformError> {
        let chat = user as ChannelId;
        let request = self
            .bot
            .send_message(ChatId(chat), text)
            .parse_mode(ParseMode::MarkdownV2);
        self.call("send_direct", chat, request).await.map(|_| ())
    }

    async fn send_channel(
        &self,
        channel: ChannelId,
        text: &str,
        control: Option<Control>,
    ) -> Result<MessageRef, PlatformError> {
        let mut request = self
            .bot
            .send_message(ChatId(channel), text)
            .parse_mode(ParseMode::MarkdownV2);
        if let Some(control) = control {
            request = request.reply_markup(keyboard(control));
        }
        let sent = self.call("send_channel", channel, request).await?;
        Ok(MessageRef {
            channel_id: sent.chat.id.0,
            message_id: sent.id.0,
        })
    }

    async fn edit_message(
        &self,
        message: MessageRef,
        text: Option<&str>,
        control: Option<Control>,
    ) -> Result<(), PlatformError> {
        let chat_id = ChatId(message.channel_id);
        let message_id = MessageId(message.message_id);

        match text {
            Some(text) => {
                let mut request = self
                    .bot
                    .edit_message_text(chat_id, message_id, text)
                    .parse_mode(ParseMode::MarkdownV2);
                if let Some(control) = control {
                    request = request.reply_markup(keyboard(control));
                }
                self.call("edit_message_text", message.channel_id, request).await?;
            }
            None => {
                let mut request = self.bot.edit_message_reply_markup(chat_id, message_id);
                if let Some(control) = control {
                    request = request.reply_markup(keyboard(control));
                }
                self.call("edit_message_reply_markup", message.channel_id, request).await?;
            }
        }
        Ok(())
    }

    async fn has_permission(
        &self,
        channel: ChannelId,
        actor: ParticipantId,
        permission: Permission,
    ) -> Result<bool, PlatformError> {
        let request = self.bot.get_chat_member(ChatId(channel), UserId(actor));
        let member = self.call("get_chat_member", channel, request).await?;
        Ok(match permission {
            Permission::ManageMessages => member.kind.can_delete_messages(),
        })
    }
}

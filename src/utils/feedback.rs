use teloxide::prelude::*;
use teloxide::types::ParseMode;
use crate::utils::markdown::{bold, escape_markdown};

/// Feedback types for different command outcomes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedbackType {
    Success,
    Error,
}

impl FeedbackType {
    pub fn emoji(&self) -> &'static str {
        match self {
            FeedbackType::Success => "✅",
            FeedbackType::Error => "❌",
        }
    }
}

/// Renders a feedback line as MarkdownV2, escaping the message.
pub fn format_feedback(feedback_type: FeedbackType, message: &str) -> String {
    format!("{} {}", feedback_type.emoji(), escape_markdown(message))
}

/// Plain-text variant for callback query answers, which have no formatting.
pub fn format_alert(feedback_type: FeedbackType, message: &str) -> String {
    format!("{} {}", feedback_type.emoji(), message)
}

/// Renders an error with a usage hint underneath.
pub fn format_usage_error(error: &str, suggestion: &str) -> String {
    format!(
        "{}\n\n💡 {} {}",
        format_feedback(FeedbackType::Error, error),
        bold("Suggestion:"),
        escape_markdown(suggestion)
    )
}

/// Centralized feedback for command replies in the invoking chat
pub struct CommandFeedback {
    bot: Bot,
    chat_id: ChatId,
}

impl CommandFeedback {
    pub fn new(bot: Bot, chat_id: ChatId) -> Self {
        Self { bot, chat_id }
    }

    async fn send_markdown(&self, text: String) -> ResponseResult<Message> {
        self.bot
            .send_message(self.chat_id, text)
            .parse_mode(ParseMode::MarkdownV2)
            .await
    }

    /// Send immediate feedback message
    pub async fn send(
        &self,
        feedback_type: FeedbackType,
        message: &str,
    ) -> ResponseResult<Message> {
        self.send_markdown(format_feedback(feedback_type, message)).await
    }

    pub async fn success(&self, message: &str) -> ResponseResult<Message> {
        self.send(FeedbackType::Success, message).await
    }

    pub async fn error(&self, message: &str) -> ResponseResult<Message> {
        self.send(FeedbackType::Error, message).await
    }

    /// Send validation error with helpful suggestion
    pub async fn usage_error(&self, error: &str, suggestion: &str) -> ResponseResult<Message> {
        self.send_markdown(format_usage_error(error, suggestion)).await
    }
}

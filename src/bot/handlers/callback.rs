use std::sync::Arc;
use teloxide::prelude::*;

use crate::bot::controls::{Control, ControlKind};
use crate::bot::handlers::HandlerResult;
use crate::services::approval::ApprovalFlow;
use crate::services::registration::{Activation, RegistrationService};
use crate::utils::feedback::{format_alert, FeedbackType};
use crate::utils::logging::log_control_activation;

/// Telegram rejects callback answers longer than this.
const MAX_ANSWER_CHARS: usize = 200;

pub const APPROVED_NOTICE: &str = "Registration announcement posted in the registration channel.";

/// Reply to a button press, visible only to the user who pressed it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControlReply {
    pub text: String,
    pub alert: bool,
}

impl ControlReply {
    fn toast(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            alert: false,
        }
    }

    fn alert(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            alert: true,
        }
    }

    pub fn truncated_text(&self) -> String {
        self.text.chars().take(MAX_ANSWER_CHARS).collect()
    }
}

/// Resolves a decoded button press against the flow that owns its target.
pub async fn dispatch_control(
    control: Control,
    actor: u64,
    approvals: &ApprovalFlow,
    registration: &RegistrationService,
) -> ControlReply {
    match control.kind {
        ControlKind::Register => match registration.activate(control, actor).await {
            Ok(activation) => {
                log_control_activation("register", actor, activation.notice());
                match activation {
                    Activation::Started => ControlReply::toast(activation.notice()),
                    Activation::Closed => ControlReply::alert(activation.notice()),
                }
            }
            Err(e) => {
                log_control_activation("register", actor, &e.to_string());
                ControlReply::alert(format_alert(FeedbackType::Error, &e.to_string()))
            }
        },
        ControlKind::Approve => match approvals.approve(control.target, actor).await {
            Ok(outcome) => {
                log_control_activation(
                    "approve",
                    actor,
                    &format!(
                        "posted, closed {} earlier announcement(s), {} edit failure(s)",
                        outcome.closed,
                        outcome.failed_edits.len()
                    ),
                );
                ControlReply::toast(format_alert(FeedbackType::Success, APPROVED_NOTICE))
            }
            Err(e) => {
                log_control_activation("approve", actor, &e.to_string());
                ControlReply::alert(format_alert(FeedbackType::Error, &e.to_string()))
            }
        },
    }
}

pub async fn callback_handler(
    bot: Bot,
    q: CallbackQuery,
    approvals: Arc<ApprovalFlow>,
    registration: Arc<RegistrationService>,
) -> HandlerResult {
    let user_id = q.from.id.0;
    let username = q.from.username.as_deref().unwrap_or("unknown");

    let control = match q.data.as_deref().map(str::parse::<Control>) {
        Some(Ok(control)) => control,
        Some(Err(e)) => {
            tracing::warn!("Callback from {} ({}) rejected: {}", username, user_id, e);
            bot.answer_callback_query(q.id).text("Unknown button").await?;
            return Ok(());
        }
        None => {
            bot.answer_callback_query(q.id).text("Invalid callback data format").await?;
            return Ok(());
        }
    };

    tracing::info!("Callback received: '{}' from user {} ({})", control, username, user_id);

    let reply = dispatch_control(control, user_id, &approvals, &registration).await;
    bot.answer_callback_query(q.id)
        .text(reply.truncated_text())
        .show_alert(reply.alert)
        .await?;

    Ok(())
}

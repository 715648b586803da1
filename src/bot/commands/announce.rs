use teloxide::prelude::*;

use crate::bot::handlers::HandlerResult;
use crate::services::announcement::{build_announcement, AnnouncementFields};
use crate::services::approval::ApprovalFlow;
use crate::utils::feedback::CommandFeedback;
use crate::utils::logging::{log_command_error, log_command_start, log_command_success};

pub const COMMAND_FORBIDDEN: &str = "You do not have permission to use this command.";
pub const PREVIEW_SENT: &str = "Preview sent with Approve button. Only a mod can approve.";
pub const ANNOUNCE_USAGE: &str = "Put one field per line, for example:\n\
    /announce title: Spring Gala\n\
    subtitle: Annual dinner\n\
    location: Hall A\n\
    info: Doors open 18:00\n\
    link: https://example.com/gala\n\
    description: Food, music and dancing.";

pub async fn handle_announce(
    bot: Bot,
    msg: Message,
    args: String,
    approvals: &ApprovalFlow,
) -> HandlerResult {
    let feedback = CommandFeedback::new(bot, msg.chat.id);
    let chat_id = msg.chat.id.0;
    let Some(user) = msg.from() else {
        return Ok(());
    };
    let user_id = user.id.0;
    let username = user.username.as_deref().unwrap_or("unknown");

    log_command_start("announce", username, user_id, chat_id, None);

    match approvals.is_moderator(user_id).await {
        Ok(true) => {}
        Ok(false) => {
            let reason = "missing moderator permission";
            log_command_error("announce", username, user_id, chat_id, reason);
            feedback.error(COMMAND_FORBIDDEN).await?;
            return Ok(());
        }
        Err(e) => {
            log_command_error("announce", username, user_id, chat_id, &e.to_string());
            feedback.error(&e.to_string()).await?;
            return Ok(());
        }
    }

    let fields: AnnouncementFields = match args.parse() {
        Ok(fields) => fields,
        Err(e) => {
            log_command_error("announce", username, user_id, chat_id, &e.to_string());
            feedback.usage_error(&e.to_string(), ANNOUNCE_USAGE).await?;
            return Ok(());
        }
    };

    let announcement = build_announcement(&fields);
    match approvals
        .submit_for_approval(announcement, fields.event_name(), chat_id, user_id)
        .await
    {
        Ok(pending) => {
            log_command_success(
                "announce",
                username,
                user_id,
                chat_id,
                Some(&format!("pending approval {}", pending.id)),
            );
            feedback.success(PREVIEW_SENT).await?;
        }
        Err(e) => {
            log_command_error("announce", username, user_id, chat_id, &e.to_string());
            feedback.error(&e.to_string()).await?;
        }
    }

    Ok(())
}

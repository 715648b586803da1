use std::sync::Arc;
use teloxide::prelude::*;
use teloxide::utils::command::BotCommands;

use crate::bot::commands::{announce, Command};
use crate::bot::handlers::HandlerResult;
use crate::services::approval::ApprovalFlow;
use crate::services::registration::{Participant, RegistrationService};
use crate::services::sessions::SessionStatus;
use crate::utils::logging::log_delivery_error;

pub const WELCOME: &str = "🎟 Welcome to the Event Registration Bot!\n\n\
    Press Register under an event announcement and I will ask you a few questions here.\n\
    Moderators can use /announce to publish a new event.";

pub async fn command_handler(
    bot: Bot,
    msg: Message,
    cmd: Command,
    approvals: Arc<ApprovalFlow>,
) -> HandlerResult {
    match cmd {
        Command::Help => {
            bot.send_message(msg.chat.id, Command::descriptions().to_string()).await?;
        }
        Command::Start => {
            bot.send_message(msg.chat.id, WELCOME).await?;
        }
        Command::Announce(args) => {
            announce::handle_announce(bot, msg, args, &approvals).await?;
        }
    }
    Ok(())
}

/// Every private text message from a participant with a session is their next answer.
pub async fn private_message_handler(
    msg: Message,
    registration: Arc<RegistrationService>,
) -> HandlerResult {
    let (Some(user), Some(text)) = (msg.from(), msg.text()) else {
        return Ok(());
    };
    let participant = Participant {
        id: user.id.0,
        display_name: user.full_name(),
    };

    match registration.handle_private_message(&participant, text).await {
        Ok(SessionStatus::NoActiveSession) => {
            tracing::trace!("Ignoring private message from {} without a session", participant.id);
        }
        Ok(_) => {}
        Err(e) => log_delivery_error("registration_dm", msg.chat.id.0, &e.to_string()),
    }
    Ok(())
}

pub mod callback;
pub mod message;

use std::sync::Arc;
use teloxide::types::Me;
use teloxide::{dispatching::UpdateHandler, prelude::*};

use crate::bot::commands::Command;
use crate::services::approval::ApprovalFlow;
use crate::services::registration::RegistrationService;

pub type HandlerError = Box<dyn std::error::Error + Send + Sync + 'static>;
pub type HandlerResult = Result<(), HandlerError>;

pub struct BotHandler {
    pub approvals: Arc<ApprovalFlow>,
    pub registration: Arc<RegistrationService>,
}

impl BotHandler {
    pub fn new(approvals: Arc<ApprovalFlow>, registration: Arc<RegistrationService>) -> Self {
        Self { approvals, registration }
    }

    /// Commands first, then private messages as registration answers, then button presses.
    pub fn schema(&self) -> UpdateHandler<HandlerError> {
        use teloxide::dispatching::UpdateFilterExt;

        let approvals = self.approvals.clone();
        let registration = self.registration.clone();
        let approvals_callback = self.approvals.clone();
        let registration_callback = self.registration.clone();

        dptree::entry()
            .branch(
                Update::filter_message()
                    .filter_map(|msg: Message, me: Me| {
                        let text = msg.text().or_else(|| msg.caption())?;
                        Command::parse_message(text, me.username()).ok()
                    })
                    .endpoint(move |bot: Bot, msg: Message, cmd: Command| {
                        let approvals = approvals.clone();
                        async move { message::command_handler(bot, msg, cmd, approvals).await }
                    }),
            )
            .branch(
                Update::filter_message()
                    .filter(|msg: Message| msg.chat.is_private())
                    .endpoint(move |msg: Message| {
                        let registration = registration.clone();
                        async move { message::private_message_handler(msg, registration).await }
                    }),
            )
            .branch(Update::filter_callback_query().endpoint(move |bot: Bot, q: CallbackQuery| {
                let approvals = approvals_callback.clone();
                let registration = registration_callback.clone();
                async move { callback::callback_handler(bot, q, approvals, registration).await }
            }))
    }
}

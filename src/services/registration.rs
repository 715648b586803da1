//! Drives a participant from the Register button to the results feed.

use std::sync::Arc;

use crate::bot::controls::Control;
use crate::bot::platform::{ChannelId, ChatPlatform, ParticipantId};
use crate::error::FlowError;
use crate::services::board::AnnouncementBoard;
use crate::services::sessions::{CompletedRegistration, SessionStatus, SessionTracker};
use crate::utils::logging::{log_delivery_error, log_session_event};
use crate::utils::markdown::{bold, escape_markdown, user_mention};

pub const REGISTRATION_CLOSED: &str = "Registration is closed.";
pub const CHECK_DMS: &str = "Check your DMs to complete registration!";
pub const INTRO: &str =
    "Let's get you registered! Please answer the following questions one by one.";
pub const THANK_YOU: &str = "Thank you! Your registration has been submitted.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Activation {
    Started,
    Closed,
}

impl Activation {
    /// Reply shown only to the user who pressed the button.
    pub fn notice(&self) -> &'static str {
        match self {
            Activation::Started => CHECK_DMS,
            Activation::Closed => REGISTRATION_CLOSED,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Participant {
    pub id: ParticipantId,
    pub display_name: String,
}

pub fn format_results(participant: &Participant, registration: &CompletedRegistration) -> String {
    let mut lines = vec![format!(
        "Registration from {} {}",
        user_mention(&participant.display_name, participant.id),
        escape_markdown(&format!("(ID: {}):", participant.id))
    )];
    if let Some(event_name) = &registration.event_name {
        lines.push(format!("{} {}", bold("Event:"), escape_markdown(event_name)));
    }
    for (question, answer) in &registration.answers {
        lines.push(bold(question));
        lines.push(escape_markdown(answer));
    }
    lines.join("\n")
}

pub struct RegistrationService {
    platform: Arc<dyn ChatPlatform>,
    tracker: Arc<SessionTracker>,
    board: Arc<AnnouncementBoard>,
    results_channel: ChannelId,
}

impl RegistrationService {
    pub fn new(
        platform: Arc<dyn ChatPlatform>,
        tracker: Arc<SessionTracker>,
        board: Arc<AnnouncementBoard>,
        results_channel: ChannelId,
    ) -> Self {
        Self {
            platform,
            tracker,
            board,
            results_channel,
        }
    }

    /// Handles a Register button press.
    pub async fn activate(
        &self,
        control: Control,
        actor: ParticipantId,
    ) -> Result<Activation, FlowError> {
        let announcement = if control.enabled {
            self.board.find_open(control.target)
        } else {
            None
        };
        let Some(announcement) = announcement else {
            return Ok(Activation::Closed);
        };

        self.platform
            .send_direct(actor, &escape_markdown(INTRO))
            .await
            .map_err(FlowError::from_direct_message)?;

        self.tracker.start_session(actor, announcement.event_name.clone());
        log_session_event("started", actor, announcement.event_name.as_deref());

        self.platform
            .send_direct(actor, &escape_markdown(self.tracker.first_question()))
            .await
            .map_err(FlowError::from_direct_message)?;

        Ok(Activation::Started)
    }

    /// Records a private message as the sender's next answer.
    pub async fn handle_private_message(
        &self,
        participant: &Participant,
        text: &str,
    ) -> Result<SessionStatus, FlowError> {
        let status = self.tracker.record_answer(participant.id, text);

        match &status {
            SessionStatus::NoActiveSession => {}
            SessionStatus::AwaitingNextQuestion(question) => {
                log_session_event("answer recorded", participant.id, None);
                self.platform
                    .send_direct(participant.id, &escape_markdown(question))
                    .await
                    .map_err(FlowError::from_direct_message)?;
            }
            SessionStatus::Complete(registration) => {
                log_session_event("completed", participant.id, registration.event_name.as_deref());
                let record = format_results(participant, registration);
                let posted = self.platform.send_channel(self.results_channel, &record, None).await;
                if let Err(e) = posted {
                    log_delivery_error("registration_result", self.results_channel, &e.to_string());
                }
                self.platform
                    .send_direct(participant.id, &escape_markdown(THANK_YOU))
                    .await
                    .map_err(FlowError::from_direct_message)?;
            }
        }

        Ok(status)
    }
}

#![allow(dead_code)]

use async_trait::async_trait;
use std::collections::HashSet;
use std::sync::atomic::{AtomicI32, Ordering};
use std::sync::{Arc, Mutex};

use event_registration_bot::bot::controls::{Control, ControlKind};
use event_registration_bot::bot::platform::{
    ChannelId, ChatPlatform, MessageRef, ParticipantId, Permission,
};
use event_registration_bot::error::PlatformError;
use event_registration_bot::services::approval::ApprovalFlow;
use event_registration_bot::services::board::AnnouncementBoard;
use event_registration_bot::services::registration::RegistrationService;
use event_registration_bot::services::sessions::SessionTracker;

pub const REGISTRATION_CHANNEL: ChannelId = -1001;
pub const RESULTS_CHANNEL: ChannelId = -1002;
pub const MOD_CHAT: ChannelId = -1003;
pub const MODERATOR: ParticipantId = 900;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Direct {
        user: ParticipantId,
        text: String,
    },
    Channel {
        message: MessageRef,
        text: String,
        control: Option<Control>,
    },
    Edit {
        message: MessageRef,
        text: Option<String>,
        control: Option<Control>,
    },
}

/// Records every outbound request instead of talking to Telegram.
#[derive(Default)]
pub struct FakePlatform {
    calls: Mutex<Vec<Call>>,
    moderators: Mutex<HashSet<ParticipantId>>,
    blocked_dms: Mutex<HashSet<ParticipantId>>,
    missing_channels: Mutex<HashSet<ChannelId>>,
    failing_edits: Mutex<HashSet<MessageRef>>,
    next_message_id: AtomicI32,
}

impl FakePlatform {
    pub fn new() -> Arc<Self> {
        let platform = Self::default();
        platform.moderators.lock().unwrap().insert(MODERATOR);
        Arc::new(platform)
    }

    pub fn block_dms(&self, user: ParticipantId) {
        self.blocked_dms.lock().unwrap().insert(user);
    }

    pub fn remove_channel(&self, channel: ChannelId) {
        self.missing_channels.lock().unwrap().insert(channel);
    }

    pub fn fail_edits_of(&self, message: MessageRef) {
        self.failing_edits.lock().unwrap().insert(message);
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn clear(&self) {
        self.calls.lock().unwrap().clear();
    }

    pub fn directs_to(&self, user: ParticipantId) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                Call::Direct { user: to, text } if to == user => Some(text),
                _ => None,
            })
            .collect()
    }

    pub fn posts_in(&self, channel: ChannelId) -> Vec<(MessageRef, String, Option<Control>)> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                Call::Channel { message, text, control } if message.channel_id == channel => {
                    Some((message, text, control))
                }
                _ => None,
            })
            .collect()
    }

    pub fn edits(&self) -> Vec<(MessageRef, Option<String>, Option<Control>)> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                Call::Edit { message, text, control } => Some((message, text, control)),
                _ => None,
            })
            .collect()
    }

    /// The Register button of the latest announcement in the registration channel.
    pub fn latest_register_control(&self) -> Option<Control> {
        self.posts_in(REGISTRATION_CHANNEL)
            .into_iter()
            .filter_map(|(_, _, control)| control)
            .filter(|control| control.kind == ControlKind::Register)
            .last()
    }
}

#[async_trait]
impl ChatPlatform for FakePlatform {
    async fn send_direct(&self, user: ParticipantId, text: &str) -> Result<(), PlatformError> {
        if self.blocked_dms.lock().unwrap().contains(&user) {
            return Err(PlatformError::Delivery(
                "Forbidden: bot was blocked by the user".to_string(),
            ));
        }
        self.calls.lock().unwrap().push(Call::Direct {
            user,
            text: text.to_string(),
        });
        Ok(())
    }

    async fn send_channel(
        &self,
        channel: ChannelId,
        text: &str,
        control: Option<Control>,
    ) -> Result<MessageRef, PlatformError> {
        if self.missing_channels.lock().unwrap().contains(&channel) {
            return Err(PlatformError::ChatNotFound(channel));
        }
        let message = MessageRef {
            channel_id: channel,
            message_id: self.next_message_id.fetch_add(1, Ordering::SeqCst) + 1,
        };
        self.calls.lock().unwrap().push(Call::Channel {
            message,
            text: text.to_string(),
            control,
        });
        Ok(message)
    }

    async fn edit_message(
        &self,
        message: MessageRef,
        text: Option<&str>,
        control: Option<Control>,
    ) -> Result<(), PlatformError> {
        if self.failing_edits.lock().unwrap().contains(&message) {
            let reason = "Bad Request: message to edit not found".to_string();
            return Err(PlatformError::Delivery(reason));
        }
        self.calls.lock().unwrap().push(Call::Edit {
            message,
            text: text.map(str::to_string),
            control,
        });
        Ok(())
    }

    async fn has_permission(
        &self,
        channel: ChannelId,
        actor: ParticipantId,
        permission: Permission,
    ) -> Result<bool, PlatformError> {
        assert_eq!(channel, REGISTRATION_CHANNEL);
        assert_eq!(permission, Permission::ManageMessages);
        Ok(self.moderators.lock().unwrap().contains(&actor))
    }
}

pub struct Harness {
    pub platform: Arc<FakePlatform>,
    pub tracker: Arc<SessionTracker>,
    pub board: Arc<AnnouncementBoard>,
    pub approvals: Arc<ApprovalFlow>,
    pub registration: Arc<RegistrationService>,
}

impl Harness {
    pub fn new() -> Self {
        Self::with_validity(chrono::Duration::seconds(600))
    }

    pub fn with_validity(validity: chrono::Duration) -> Self {
        let platform = FakePlatform::new();
        let tracker = Arc::new(SessionTracker::new());
        let board = Arc::new(AnnouncementBoard::new());
        let approvals = Arc::new(ApprovalFlow::new(
            platform.clone(),
            board.clone(),
            REGISTRATION_CHANNEL,
            RESULTS_CHANNEL,
            validity,
        ));
        let registration = Arc::new(RegistrationService::new(
            platform.clone(),
            tracker.clone(),
            board.clone(),
            RESULTS_CHANNEL,
        ));
        Self {
            platform,
            tracker,
            board,
            approvals,
            registration,
        }
    }

    /// Submits and approves an announcement, returning its Register button.
    pub async fn publish(&self, announcement: &str, event_name: Option<&str>) -> Control {
        let pending = self
            .approvals
            .submit_for_approval(
                announcement.to_string(),
                event_name.map(str::to_string),
                MOD_CHAT,
                MODERATOR,
            )
            .await
            .unwrap();
        self.approvals.approve(pending.id, MODERATOR).await.unwrap();
        self.platform.latest_register_control().unwrap()
    }
}

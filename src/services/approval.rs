//! Moderator gate in front of registration announcements.
//!
//! `/announce` produces a [`PendingApproval`] with a preview message. The
//! first moderator to press Approve consumes it: older Register buttons are
//! closed, the announcement is published with a fresh Register button and
//! the results feed is told which event is now taking registrations.

use chrono::{DateTime, Duration, Utc};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::sync::Mutex as AsyncMutex;
use uuid::Uuid;

use crate::bot::controls::Control;
use crate::bot::platform::{ChannelId, ChatPlatform, MessageRef, ParticipantId, Permission};
use crate::error::{FlowError, PlatformError};
use crate::services::board::AnnouncementBoard;
use crate::utils::feedback::{format_feedback, FeedbackType};
use crate::utils::logging::{log_delivery_error, log_system_event};
use crate::utils::markdown::{bold, escape_markdown};

/// An announcement waiting for a moderator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingApproval {
    pub id: Uuid,
    /// Rendered MarkdownV2 body to publish.
    pub announcement: String,
    pub event_name: Option<String>,
    pub target_channel: ChannelId,
    pub requester: ParticipantId,
    pub preview: MessageRef,
    pub created_at: DateTime<Utc>,
    pub consumed: bool,
}

impl PendingApproval {
    pub fn control(&self) -> Control {
        Control::approve(self.id)
    }

    pub fn is_expired(&self, now: DateTime<Utc>, validity: Duration) -> bool {
        now.signed_duration_since(self.created_at) >= validity
    }
}

#[derive(Debug)]
pub struct ApprovalOutcome {
    pub announcement: MessageRef,
    /// Number of earlier announcements whose Register button was switched off.
    pub closed: usize,
    /// Button edits that failed; the flow carries on regardless.
    pub failed_edits: Vec<(MessageRef, PlatformError)>,
}

pub fn preview_text(announcement: &str) -> String {
    format!("{}\n\n{announcement}", bold("Registration Announcement Preview:"))
}

pub struct ApprovalFlow {
    platform: Arc<dyn ChatPlatform>,
    board: Arc<AnnouncementBoard>,
    registration_channel: ChannelId,
    results_channel: ChannelId,
    validity: Duration,
    pending: Mutex<HashMap<Uuid, PendingApproval>>,
    /// Held while old buttons are closed and the new announcement is posted and recorded.
    publishing: AsyncMutex<()>,
}

impl ApprovalFlow {
    pub fn new(
        platform: Arc<dyn ChatPlatform>,
        board: Arc<AnnouncementBoard>,
        registration_channel: ChannelId,
        results_channel: ChannelId,
        validity: Duration,
    ) -> Self {
        Self {
            platform,
            board,
            registration_channel,
            results_channel,
            validity,
            pending: Mutex::new(HashMap::new()),
            publishing: AsyncMutex::new(()),
        }
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<Uuid, PendingApproval>> {
        self.pending.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Moderators are members allowed to manage messages in the registration channel.
    pub async fn is_moderator(&self, actor: ParticipantId) -> Result<bool, FlowError> {
        self.platform
            .has_permission(self.registration_channel, actor, Permission::ManageMessages)
            .await
            .map_err(FlowError::from_channel_post)
    }

    /// Posts the preview with an Approve button in `origin` and starts tracking it.
    pub async fn submit_for_approval(
        &self,
        announcement: String,
        event_name: Option<String>,
        origin: ChannelId,
        requester: ParticipantId,
    ) -> Result<PendingApproval, FlowError> {
        let id = Uuid::new_v4();
        let preview = self
            .platform
            .send_channel(origin, &preview_text(&announcement), Some(Control::approve(id)))
            .await
            .map_err(FlowError::from_channel_post)?;

        let pending = PendingApproval {
            id,
            announcement,
            event_name,
            target_channel: self.registration_channel,
            requester,
            preview,
            created_at: Utc::now(),
            consumed: false,
        };
        self.lock().insert(id, pending.clone());
        tracing::info!("Announcement {} submitted for approval by {}", id, requester);
        Ok(pending)
    }

    pub async fn approve(
        &self,
        approval_id: Uuid,
        actor: ParticipantId,
    ) -> Result<ApprovalOutcome, FlowError> {
        let known = self.lock().contains_key(&approval_id);
        if !known {
            return Err(FlowError::UnknownApproval);
        }
        if !self.is_moderator(actor).await? {
            return Err(FlowError::Forbidden);
        }

        let pending = {
            let mut pending = self.lock();
            let entry = pending.get_mut(&approval_id).ok_or(FlowError::UnknownApproval)?;
            if entry.consumed {
                return Err(FlowError::AlreadyApproved);
            }
            if entry.is_expired(Utc::now(), self.validity) {
                return Err(FlowError::Expired);
            }
            entry.consumed = true;
            entry.clone()
        };
        tracing::info!("Announcement {} approved by {}", approval_id, actor);

        let (announcement, closed, failed_edits) = {
            let _publishing = self.publishing.lock().await;
            let (closed, failed_edits) = self.close_open_registrations().await;

            let control_id = Uuid::new_v4();
            let announcement = self
                .platform
                .send_channel(
                    pending.target_channel,
                    &pending.announcement,
                    Some(Control::register(control_id)),
                )
                .await
                .map_err(FlowError::from_channel_post)?;
            self.board.record(control_id, announcement, pending.event_name.clone());
            (announcement, closed, failed_edits)
        };

        if let Some(event_name) = &pending.event_name {
            let notice = format!("Registrations for {}", escape_markdown(event_name));
            if let Err(e) = self.platform.send_channel(self.results_channel, &notice, None).await {
                log_delivery_error("registrations_notice", self.results_channel, &e.to_string());
            }
        }

        let confirmation = format_feedback(
            FeedbackType::Success,
            "Approved and posted to the registration channel.",
        );
        if let Err(e) = self
            .platform
            .edit_message(pending.preview, Some(&confirmation), Some(pending.control().disabled()))
            .await
        {
            log_delivery_error("preview_confirmation", pending.preview.channel_id, &e.to_string());
        }

        Ok(ApprovalOutcome {
            announcement,
            closed,
            failed_edits,
        })
    }

    /// Disables the Register button on every open announcement, one edit at a time.
    async fn close_open_registrations(&self) -> (usize, Vec<(MessageRef, PlatformError)>) {
        let open = self.board.close_all();
        let mut failed = Vec::new();

        for entry in &open {
            let control = Control::register(entry.control_id).disabled();
            if let Err(e) = self.platform.edit_message(entry.message, None, Some(control)).await {
                log_delivery_error("close_registration", entry.message.channel_id, &e.to_string());
                failed.push((entry.message, e));
            }
        }

        (open.len(), failed)
    }

    /// Drops approvals older than the validity window; unapproved previews are marked expired.
    pub async fn sweep_expired(&self) -> usize {
        self.sweep_expired_at(Utc::now()).await
    }

    pub async fn sweep_expired_at(&self, now: DateTime<Utc>) -> usize {
        let expired: Vec<PendingApproval> = {
            let mut pending = self.lock();
            let ids: Vec<Uuid> = pending
                .values()
                .filter(|p| p.is_expired(now, self.validity))
                .map(|p| p.id)
                .collect();
            ids.iter().filter_map(|id| pending.remove(id)).collect()
        };

        let text = format!("⌛ {}", escape_markdown("Approval request expired."));
        for approval in expired.iter().filter(|p| !p.consumed) {
            if let Err(e) = self
                .platform
                .edit_message(approval.preview, Some(&text), Some(approval.control().disabled()))
                .await
            {
                log_delivery_error("expire_preview", approval.preview.channel_id, &e.to_string());
            }
        }

        if !expired.is_empty() {
            log_system_event(
                "Approval sweep",
                Some(&format!("removed {} expired approval(s)", expired.len())),
            );
        }
        expired.len()
    }

    pub fn pending(&self, approval_id: Uuid) -> Option<PendingApproval> {
        self.lock().get(&approval_id).cloned()
    }

    /// Approvals still waiting for a moderator.
    pub fn pending_count(&self) -> usize {
        self.lock().values().filter(|p| !p.consumed).count()
    }
}

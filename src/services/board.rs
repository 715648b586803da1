//! Registry of announcements the bot has posted.
//!
//! Telegram bots cannot read channel history, so instead of scanning recent
//! messages for live Register buttons the bot remembers what it posted. Only
//! the most recent [`ANNOUNCEMENT_WINDOW`] announcements are kept.

use std::collections::VecDeque;
use std::sync::{Mutex, MutexGuard, PoisonError};
use uuid::Uuid;

use crate::bot::platform::MessageRef;

pub const ANNOUNCEMENT_WINDOW: usize = 50;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostedAnnouncement {
    /// Target id carried by the announcement's Register button.
    pub control_id: Uuid,
    pub message: MessageRef,
    pub event_name: Option<String>,
    pub open: bool,
}

#[derive(Default)]
pub struct AnnouncementBoard {
    entries: Mutex<VecDeque<PostedAnnouncement>>,
}

impl AnnouncementBoard {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, VecDeque<PostedAnnouncement>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Records a freshly posted, open announcement, evicting the oldest beyond the window.
    pub fn record(&self, control_id: Uuid, message: MessageRef, event_name: Option<String>) {
        let mut entries = self.lock();
        entries.push_back(PostedAnnouncement {
            control_id,
            message,
            event_name,
            open: true,
        });
        while entries.len() > ANNOUNCEMENT_WINDOW {
            if let Some(evicted) = entries.pop_front() {
                tracing::debug!(
                    "Announcement {} left the tracking window (open: {})",
                    evicted.control_id,
                    evicted.open
                );
            }
        }
    }

    /// Marks every open announcement closed and returns them so their buttons can be disabled.
    pub fn close_all(&self) -> Vec<PostedAnnouncement> {
        self.lock()
            .iter_mut()
            .filter(|entry| entry.open)
            .map(|entry| {
                entry.open = false;
                entry.clone()
            })
            .collect()
    }

    pub fn find_open(&self, control_id: Uuid) -> Option<PostedAnnouncement> {
        self.lock()
            .iter()
            .find(|entry| entry.open && entry.control_id == control_id)
            .cloned()
    }

    pub fn open_count(&self) -> usize {
        self.lock().iter().filter(|entry| entry.open).count()
    }
}

//! Success notifications for the presentation layer.

use crate::constants::{
    ENTRY_SAVED_DESCRIPTION, ENTRY_SAVED_TITLE, NOTIFICATION_DURATION_MS,
    REFLECTION_COMPLETED_DESCRIPTION, REFLECTION_COMPLETED_TITLE,
};
use std::time::Duration;
use tracing::info;

/// A short message the caller may show after an action succeeds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub title: String,
    pub description: String,
    /// How long the message should stay visible.
    pub duration: Duration,
}

impl Notification {
    pub fn entry_saved() -> Self {
        Self::new(ENTRY_SAVED_TITLE, ENTRY_SAVED_DESCRIPTION)
    }

    pub fn reflection_completed() -> Self {
        Self::new(REFLECTION_COMPLETED_TITLE, REFLECTION_COMPLETED_DESCRIPTION)
    }

    fn new(title: &str, description: &str) -> Self {
        Notification {
            title: title.to_string(),
            description: description.to_string(),
            duration: Duration::from_millis(NOTIFICATION_DURATION_MS),
        }
    }
}

/// Receives notifications emitted by a [`super::JournalSession`].
pub trait Notifier {
    fn notify(&self, notification: &Notification);
}

impl<F: Fn(&Notification)> Notifier for F {
    fn notify(&self, notification: &Notification) {
        self(notification)
    }
}

/// Writes notifications to the log.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, notification: &Notification) {
        info!(
            title = %notification.title,
            duration_ms = notification.duration.as_millis() as u64,
            "{}",
            notification.description
        );
    }
}

/// Discards every notification.
#[derive(Debug, Default, Clone, Copy)]
pub struct SilentNotifier;

impl Notifier for SilentNotifier {
    fn notify(&self, _notification: &Notification) {}
}

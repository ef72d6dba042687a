//! Notification sink for reviewer-facing messages

use std::collections::VecDeque;
use std::sync::Mutex;

use crate::{
    error::AppError,
    models::{Notification, NotificationKind},
};

/// Anything that can deliver a transient message to reviewers.
///
/// Services receive a sink explicitly instead of looking one up.
pub trait Notifier: Send + Sync {
    fn notify(&self, notification: Notification);
}

/// Error notification for a remote call that failed, carrying the error text
pub fn remote_failure(key: impl Into<String>, summary: &str, error: &AppError) -> Notification {
    Notification::new(NotificationKind::Error, key, format!("{}: {}", summary, error))
        .with_value("error", error.to_string())
}

/// Bounded in-memory queue of recent notifications, oldest dropped first
pub struct CalloutQueue {
    capacity: usize,
    entries: Mutex<VecDeque<Notification>>,
}

impl CalloutQueue {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
            entries: Mutex::new(VecDeque::new()),
        }
    }

    /// Snapshot, newest last
    pub fn recent(&self) -> Vec<Notification> {
        match self.entries.lock() {
            Ok(entries) => entries.iter().cloned().collect(),
            Err(poisoned) => poisoned.into_inner().iter().cloned().collect(),
        }
    }
}

impl Notifier for CalloutQueue {
    fn notify(&self, notification: Notification) {
        match notification.kind {
            NotificationKind::Error => {
                tracing::warn!(key = %notification.key, "{}", notification.message)
            }
            _ => tracing::info!(key = %notification.key, "{}", notification.message),
        }

        let mut entries = match self.entries.lock() {
            Ok(entries) => entries,
            Err(poisoned) => poisoned.into_inner(),
        };
        if entries.len() == self.capacity {
            entries.pop_front();
        }
        entries.push_back(notification);
    }
}

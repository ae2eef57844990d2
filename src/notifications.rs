//! Notification center
//!
//! In-memory inbox for the signed-in user. Its only link to access control
//! is the badge on the `/notifications` menu entry, supplied through
//! [`BadgeSource`].

use crate::menu::BadgeSource;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Resource whose menu entry carries the unread badge
pub const NOTIFICATIONS_RESOURCE: &str = "/notifications";

/// Severity of a notification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    #[default]
    Info,
    Success,
    Warning,
    Error,
}

/// A single inbox item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub id: String,
    pub user_id: String,
    pub title: String,
    pub message: String,
    #[serde(rename = "type", default)]
    pub kind: NotificationKind,
    #[serde(default)]
    pub read: bool,
    pub timestamp: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
}

impl Notification {
    /// Unread notification with no link
    pub fn new(
        id: impl Into<String>,
        user_id: impl Into<String>,
        title: impl Into<String>,
        message: impl Into<String>,
        kind: NotificationKind,
        timestamp: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            user_id: user_id.into(),
            title: title.into(),
            message: message.into(),
            kind,
            read: false,
            timestamp: timestamp.into(),
            link: None,
        }
    }

    pub fn with_link(mut self, link: impl Into<String>) -> Self {
        self.link = Some(link.into());
        self
    }
}

#[derive(Debug, Clone, Default)]
pub struct NotificationCenter {
    items: Vec<Notification>,
}

impl NotificationCenter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_items(items: Vec<Notification>) -> Self {
        Self { items }
    }

    pub fn push(&mut self, notification: Notification) {
        self.items.push(notification);
    }

    pub fn all(&self) -> &[Notification] {
        &self.items
    }

    /// Notifications addressed to one user, in arrival order
    pub fn for_user<'a>(&'a self, user_id: &'a str) -> impl Iterator<Item = &'a Notification> {
        self.items.iter().filter(move |n| n.user_id == user_id)
    }

    pub fn unread_count(&self) -> u32 {
        let unread = self.items.iter().filter(|n| !n.read).count();
        u32::try_from(unread).unwrap_or(u32::MAX)
    }

    /// Mark one notification read. Returns false for an unknown id.
    pub fn mark_as_read(&mut self, id: &str) -> bool {
        match self.items.iter_mut().find(|n| n.id == id) {
            Some(notification) => {
                notification.read = true;
                true
            }
            None => {
                debug!(id, "No such notification");
                false
            }
        }
    }

    pub fn mark_all_as_read(&mut self) {
        for notification in &mut self.items {
            notification.read = true;
        }
    }

    /// Remove a notification. Returns false for an unknown id.
    pub fn delete(&mut self, id: &str) -> bool {
        let before = self.items.len();
        self.items.retain(|n| n.id != id);
        self.items.len() != before
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl BadgeSource for NotificationCenter {
    fn count_for(&self, resource: &str) -> u32 {
        if resource == NOTIFICATIONS_RESOURCE {
            self.unread_count()
        } else {
            0
        }
    }
}

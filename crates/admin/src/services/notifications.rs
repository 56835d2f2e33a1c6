//! Fire-and-forget notifications.
//!
//! The panel never blocks on a notification: bulk deletes proceed and get a
//! warning toast as deliberate friction, new comments notify the acting
//! admin through the database channel. Delivery is the hosting
//! application's job via [`Notifier`]; this module defines the messages and
//! a recording double for tests.

use std::sync::Mutex;

use mercado_core::AdminUserId;

use crate::schema::table::BulkBehavior;

/// Notification severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Info,
    Success,
    Warning,
}

/// A user-facing notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    /// Title line.
    pub title: String,
    /// Optional markdown body.
    pub body: Option<String>,
    /// Optional icon name.
    pub icon: Option<&'static str>,
    /// Severity.
    pub level: NotificationLevel,
}

impl Notification {
    /// Create an info notification.
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: None,
            icon: None,
            level: NotificationLevel::Info,
        }
    }

    /// Set the body.
    #[must_use]
    pub fn body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Set the icon.
    #[must_use]
    pub fn icon(mut self, icon: &'static str) -> Self {
        self.icon = Some(icon);
        self
    }

    /// Mark as a warning.
    #[must_use]
    pub const fn warning(mut self) -> Self {
        self.level = NotificationLevel::Warning;
        self
    }

    /// Mark as a success.
    #[must_use]
    pub const fn success(mut self) -> Self {
        self.level = NotificationLevel::Success;
        self
    }
}

/// Notification delivery, implemented by the hosting application.
pub trait Notifier {
    /// Toast in the acting user's current session.
    fn flash(&self, notification: Notification);

    /// Persist to a user's database notification inbox.
    fn send_to_database(&self, recipient: AdminUserId, notification: Notification);
}

/// The standing bulk-delete warning.
#[must_use]
pub fn bulk_delete_warning() -> Notification {
    Notification::new("Now, now, don't be cheeky, leave some records for others to play with!")
        .warning()
}

/// Run a bulk delete's notification side effect.
///
/// The deletion itself always proceeds; [`BulkBehavior::DeleteWithWarning`]
/// only adds the warning toast on top.
pub fn on_bulk_delete(behavior: BulkBehavior, notifier: &dyn Notifier) {
    match behavior {
        BulkBehavior::Delete => {}
        BulkBehavior::DeleteWithWarning => {
            tracing::warn!("bulk delete executed with friction warning");
            notifier.flash(bulk_delete_warning());
        }
    }
}

/// Test double that records every notification it is asked to deliver.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    flashed: Mutex<Vec<Notification>>,
    database: Mutex<Vec<(AdminUserId, Notification)>>,
}

impl RecordingNotifier {
    /// Create an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Every flashed notification so far.
    #[must_use]
    pub fn flashed(&self) -> Vec<Notification> {
        self.flashed.lock().map(|g| g.clone()).unwrap_or_default()
    }

    /// Every database notification so far.
    #[must_use]
    pub fn database(&self) -> Vec<(AdminUserId, Notification)> {
        self.database.lock().map(|g| g.clone()).unwrap_or_default()
    }
}

impl Notifier for RecordingNotifier {
    fn flash(&self, notification: Notification) {
        if let Ok(mut guard) = self.flashed.lock() {
            guard.push(notification);
        }
    }

    fn send_to_database(&self, recipient: AdminUserId, notification: Notification) {
        if let Ok(mut guard) = self.database.lock() {
            guard.push((recipient, notification));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bulk_delete_warning_message() {
        let n = bulk_delete_warning();
        assert_eq!(
            n.title,
            "Now, now, don't be cheeky, leave some records for others to play with!"
        );
        assert_eq!(n.level, NotificationLevel::Warning);
    }

    #[test]
    fn test_on_bulk_delete_flashes_only_with_warning_behavior() {
        let notifier = RecordingNotifier::new();

        on_bulk_delete(BulkBehavior::Delete, &notifier);
        assert!(notifier.flashed().is_empty());

        on_bulk_delete(BulkBehavior::DeleteWithWarning, &notifier);
        assert_eq!(notifier.flashed().len(), 1);
    }

    #[test]
    fn test_recording_notifier_database_channel() {
        let notifier = RecordingNotifier::new();
        notifier.send_to_database(AdminUserId::new(1), Notification::new("New comment"));

        let sent = notifier.database();
        assert_eq!(sent.len(), 1);
        let (recipient, n) = sent.first().expect("one notification");
        assert_eq!(*recipient, AdminUserId::new(1));
        assert_eq!(n.title, "New comment");
    }
}

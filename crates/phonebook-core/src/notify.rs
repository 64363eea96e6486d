//! User notifications
//!
//! The application reports outcomes through a `Notifier`; how they are
//! shown (toast line, stdout) is up to the implementation.

use std::sync::{Arc, Mutex};

/// Sink for user-visible success and failure messages
pub trait Notifier {
    fn notify_success(&self, message: &str);
    fn notify_failure(&self, message: &str);
}

impl<N: Notifier + ?Sized> Notifier for &N {
    fn notify_success(&self, message: &str) {
        (**self).notify_success(message)
    }

    fn notify_failure(&self, message: &str) {
        (**self).notify_failure(message)
    }
}

/// A single notification
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notification {
    Success(String),
    Failure(String),
}

impl Notification {
    pub fn message(&self) -> &str {
        match self {
            Notification::Success(m) | Notification::Failure(m) => m,
        }
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, Notification::Failure(_))
    }
}

/// Notifier that queues notifications for later display
///
/// Clones share the same queue.
#[derive(Debug, Clone, Default)]
pub struct RecordingNotifier {
    queue: Arc<Mutex<Vec<Notification>>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take every queued notification, oldest first
    pub fn drain(&self) -> Vec<Notification> {
        std::mem::take(&mut *self.lock())
    }

    /// Copy of the queued notifications
    pub fn snapshot(&self) -> Vec<Notification> {
        self.lock().clone()
    }

    fn push(&self, notification: Notification) {
        self.lock().push(notification);
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<Notification>> {
        self.queue.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl Notifier for RecordingNotifier {
    fn notify_success(&self, message: &str) {
        self.push(Notification::Success(message.to_string()));
    }

    fn notify_failure(&self, message: &str) {
        self.push(Notification::Failure(message.to_string()));
    }
}

/// Notification texts
pub mod messages {
    /// Shown after a contact is added
    pub fn contact_added(name: &str) -> String {
        format!("New contact {} successfully added", name)
    }

    /// Shown after a delete request
    pub const CONTACT_REMOVED: &str = "Contact successfully removed";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recording_notifier_keeps_order() {
        let notifier = RecordingNotifier::new();
        notifier.notify_success("one");
        notifier.notify_failure("two");

        assert_eq!(
            notifier.drain(),
            vec![
                Notification::Success("one".to_string()),
                Notification::Failure("two".to_string()),
            ]
        );
        assert!(notifier.drain().is_empty());
    }

    #[test]
    fn test_recording_notifier_clones_share_queue() {
        let notifier = RecordingNotifier::new();
        let handle = notifier.clone();
        (&handle).notify_success("hi");
        assert_eq!(notifier.snapshot().len(), 1);
        assert_eq!(notifier.snapshot()[0].message(), "hi");
    }

    #[test]
    fn test_messages() {
        assert_eq!(
            messages::contact_added("Ann"),
            "New contact Ann successfully added"
        );
        assert!(Notification::Failure("x".into()).is_failure());
    }
}

use std::sync::Mutex;

use crate::console::Console;

/// Transient user-facing notifications. Fire-and-forget: nothing is returned.
pub trait Notifier: Send + Sync {
    fn success(&self, message: &str);

    fn error(&self, message: &str);

    fn info(&self, message: &str);
}

impl Notifier for Console {
    fn success(&self, message: &str) {
        Console::success(self, message);
    }

    fn error(&self, message: &str) {
        Console::error(self, message);
    }

    fn info(&self, message: &str) {
        Console::info(self, message);
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notification {
    Success(String),
    Error(String),
    Info(String),
}

/// Keeps every notification in memory. Used by tests and scripted hosts.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    notifications: Mutex<Vec<Notification>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn notifications(&self) -> Vec<Notification> {
        self.notifications
            .lock()
            .map(|n| n.clone())
            .unwrap_or_default()
    }

    pub fn errors(&self) -> Vec<String> {
        self.notifications()
            .into_iter()
            .filter_map(|n| match n {
                Notification::Error(msg) => Some(msg),
                _ => None,
            })
            .collect()
    }

    pub fn successes(&self) -> Vec<String> {
        self.notifications()
            .into_iter()
            .filter_map(|n| match n {
                Notification::Success(msg) => Some(msg),
                _ => None,
            })
            .collect()
    }

    fn push(&self, notification: Notification) {
        if let Ok(mut notifications) = self.notifications.lock() {
            notifications.push(notification);
        }
    }
}

impl Notifier for RecordingNotifier {
    fn success(&self, message: &str) {
        self.push(Notification::Success(message.to_string()));
    }

    fn error(&self, message: &str) {
        self.push(Notification::Error(message.to_string()));
    }

    fn info(&self, message: &str) {
        self.push(Notification::Info(message.to_string()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recording_notifier_keeps_order() {
        let notifier = RecordingNotifier::new();
        notifier.info("uploading");
        notifier.error("boom");
        notifier.success("done");

        assert_eq!(
            notifier.notifications(),
            vec![
                Notification::Info("uploading".to_string()),
                Notification::Error("boom".to_string()),
                Notification::Success("done".to_string()),
            ]
        );
        assert_eq!(notifier.errors(), vec!["boom".to_string()]);
        assert_eq!(notifier.successes(), vec!["done".to_string()]);
    }
}

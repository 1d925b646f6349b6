//! User-facing notification sink.
//!
//! Validation and dispatch failures are never returned as errors. They are
//! shown to the user through a [`Notifier`] and the executor reports `false`.

use std::sync::Arc;

use parking_lot::Mutex;
use tracing::warn;

/// A fire-and-forget sink for user-facing messages.
pub trait Notifier {
    /// Shows a message to the user.
    fn show_message(&self, title: &str, body: &str);
}

impl<N: Notifier + ?Sized> Notifier for &N {
    fn show_message(&self, title: &str, body: &str) {
        (**self).show_message(title, body);
    }
}

impl<N: Notifier + ?Sized> Notifier for Arc<N> {
    fn show_message(&self, title: &str, body: &str) {
        (**self).show_message(title, body);
    }
}

/// Writes notifications to the log at `warn` level.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn show_message(&self, title: &str, body: &str) {
        warn!(title, body, "Notification");
    }
}

/// A message captured by [`MemoryNotifier`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    /// Short title.
    pub title: String,
    /// Message body.
    pub body: String,
}

/// Keeps notifications in memory so a host can render them later.
///
/// # Examples
///
/// ```
/// use sr_launcher::{MemoryNotifier, Notifier};
///
/// let notifier = MemoryNotifier::new();
/// notifier.show_message("Script not found", "Configured script 'x' does not exist.");
///
/// let messages = notifier.take();
/// assert_eq!(messages.len(), 1);
/// assert_eq!(messages[0].title, "Script not found");
/// assert!(notifier.is_empty());
/// ```
#[derive(Debug, Default)]
pub struct MemoryNotifier {
    messages: Mutex<Vec<Notification>>,
}

impl MemoryNotifier {
    /// Creates an empty notifier.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of the captured messages.
    #[must_use]
    pub fn messages(&self) -> Vec<Notification> {
        self.messages.lock().clone()
    }

    /// Removes and returns the captured messages.
    pub fn take(&self) -> Vec<Notification> {
        std::mem::take(&mut *self.messages.lock())
    }

    /// Number of captured messages.
    #[must_use]
    pub fn len(&self) -> usize {
        self.messages.lock().len()
    }

    /// Returns `true` if nothing has been captured.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.messages.lock().is_empty()
    }
}

impl Notifier for MemoryNotifier {
    fn show_message(&self, title: &str, body: &str) {
        self.messages.lock().push(Notification {
            title: title.to_owned(),
            body: body.to_owned(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_notifier_keeps_order() {
        let notifier = MemoryNotifier::new();
        notifier.show_message("a", "1");
        notifier.show_message("b", "2");

        let titles: Vec<_> = notifier.messages().into_iter().map(|n| n.title).collect();
        assert_eq!(titles, ["a", "b"]);
        assert_eq!(notifier.len(), 2);
    }

    #[test]
    fn test_shared_notifier_via_arc() {
        let notifier = Arc::new(MemoryNotifier::new());
        let shared = Arc::clone(&notifier);
        shared.show_message("title", "body");
        assert_eq!(notifier.len(), 1);
    }

    #[test]
    fn test_notifier_by_reference() {
        fn notify(sink: impl Notifier) {
            sink.show_message("t", "b");
        }

        let notifier = MemoryNotifier::new();
        notify(&notifier);
        assert_eq!(notifier.take()[0].body, "b");
    }
}

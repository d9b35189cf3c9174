//! Chat notification delivery.
//!
//! The [`Notifier`] trait abstracts over notification backends. Currently, the
//! only implementation is [`telegram::TelegramNotifier`].
//!
//! Callers go through [`send_message`], which never fails: delivery errors
//! are logged and reported as `false` so the poll loop can decide whether
//! to remember the message.

pub mod telegram;

use tracing::{debug, error};

use crate::error::Result;

/// Trait for notification backends.
///
/// Implementations must be `Send + Sync` for use across async tasks.
#[async_trait::async_trait]
pub trait Notifier: Send + Sync {
    /// Deliver `text` to the configured destination.
    async fn notify(&self, text: &str) -> Result<()>;
    /// Return the backend name (e.g., `"telegram"`).
    fn name(&self) -> &str;
}

/// Deliver `text` through `notifier`, returning whether it was accepted.
pub async fn send_message<N: Notifier + ?Sized>(notifier: &N, text: &str) -> bool {
    match notifier.notify(text).await {
        Ok(()) => {
            debug!(backend = notifier.name(), "bot sent message: {}", text);
            true
        }
        Err(e) => {
            error!(backend = notifier.name(), "failed to send message: {}", e);
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::HomeworkBotError;
    use std::sync::{Arc, Mutex};

    /// A mock notifier that collects messages for testing.
    struct MockNotifier {
        messages: Arc<Mutex<Vec<String>>>,
        fail: bool,
    }

    impl MockNotifier {
        fn new(fail: bool) -> (Self, Arc<Mutex<Vec<String>>>) {
            let messages = Arc::new(Mutex::new(Vec::new()));
            (
                Self {
                    messages: messages.clone(),
                    fail,
                },
                messages,
            )
        }
    }

    #[async_trait::async_trait]
    impl Notifier for MockNotifier {
        async fn notify(&self, text: &str) -> Result<()> {
            if self.fail {
                return Err(HomeworkBotError::Delivery("chat not found".to_string()));
            }
            self.messages.lock().unwrap().push(text.to_string());
            Ok(())
        }

        fn name(&self) -> &str {
            "mock"
        }
    }

    #[tokio::test]
    async fn send_message_reports_success() {
        let (mock, messages) = MockNotifier::new(false);
        assert!(send_message(&mock, "hello").await);
        assert_eq!(*messages.lock().unwrap(), vec!["hello".to_string()]);
    }

    #[tokio::test]
    async fn send_message_swallows_delivery_error() {
        let (mock, messages) = MockNotifier::new(true);
        assert!(!send_message(&mock, "hello").await);
        assert!(messages.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn send_message_accepts_trait_objects() {
        let (mock, messages) = MockNotifier::new(false);
        let boxed: Box<dyn Notifier> = Box::new(mock);
        assert!(send_message(boxed.as_ref(), "boxed").await);
        assert_eq!(messages.lock().unwrap().len(), 1);
    }
}

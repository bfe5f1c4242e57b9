// File: starter-notify/src/service.rs
// Purpose: FIFO notification queue with a single current slot

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use starter_events::{EventEmitter, Subscription};

use crate::notification::{Notification, NotificationKind};

const CURRENT_EVENT: &str = "current";

/// Pause between a dismissal and the next notification
pub const ADVANCE_DELAY: Duration = Duration::from_millis(200);

/// The notification occupying the slot
#[derive(Debug, Clone, PartialEq)]
pub struct Current {
    /// Increases with every notification shown
    pub key: u64,
    pub notification: Notification,
}

#[derive(Debug, Default)]
struct Queue {
    messages: VecDeque<Notification>,
    current: Option<Current>,
    next_key: u64,
}

/// Notification queue.
///
/// One notification is current at a time; [`NotificationService::show`]
/// queues behind it and [`NotificationService::next`] advances. Clones share
/// the queue.
#[derive(Clone, Default)]
pub struct NotificationService {
    queue: Arc<Mutex<Queue>>,
    emitter: EventEmitter<Option<Current>>,
}

impl NotificationService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a notification; it becomes current right away when the slot
    /// is free
    pub fn show(&self, notification: Notification) {
        let idle = {
            let mut queue = self.lock();
            queue.messages.push_back(notification);
            queue.current.is_none()
        };
        if idle {
            self.next();
        }
    }

    /// Replace the current notification with the next queued one, or clear
    /// the slot when the queue is empty
    pub fn next(&self) {
        let current = {
            let mut queue = self.lock();
            let current = queue.messages.pop_front().map(|notification| {
                queue.next_key += 1;
                Current {
                    key: queue.next_key,
                    notification,
                }
            });
            queue.current = current.clone();
            current
        };
        tracing::debug!(key = current.as_ref().map(|c| c.key), "notification slot changed");
        self.emitter.emit(CURRENT_EVENT, &current);
    }

    pub fn current(&self) -> Option<Current> {
        self.lock().current.clone()
    }

    /// Number of notifications waiting behind the current one
    pub fn pending(&self) -> usize {
        self.lock().messages.len()
    }

    /// Called with the new current notification, or `None` once the queue
    /// drains
    pub fn on_current<F>(&self, handler: F) -> Subscription
    where
        F: Fn(Option<&Current>) + Send + Sync + 'static,
    {
        self.emitter
            .on(CURRENT_EVENT, move |current: &Option<Current>| handler(current.as_ref()))
    }

    /// Dismiss the current notification if it is still `key`
    pub fn dismiss(&self, key: u64) {
        let matches = self.lock().current.as_ref().map_or(false, |c| c.key == key);
        if matches {
            self.next();
        }
    }

    pub fn info(&self, content: impl Into<String>) {
        self.show(Notification::new(NotificationKind::Info, content));
    }

    pub fn success(&self, content: impl Into<String>) {
        self.show(Notification::new(NotificationKind::Success, content));
    }

    pub fn warn(&self, content: impl Into<String>, sticky: bool) {
        self.show(Notification::new(NotificationKind::Warn, content).sticky(sticky));
    }

    pub fn error(&self, content: impl Into<String>, sticky: bool) {
        self.show(Notification::new(NotificationKind::Error, content).sticky(sticky));
    }

    pub fn toast(&self, content: impl Into<String>, sticky: bool) {
        self.show(Notification::new(NotificationKind::Toast, content).sticky(sticky));
    }

    /// Dismiss non-sticky notifications once their timeout elapses and
    /// advance after [`ADVANCE_DELAY`]. Must run inside a tokio runtime;
    /// the returned subscription stops it.
    pub fn auto_advance(&self) -> Subscription {
        let service = self.clone();
        self.on_current(move |current| {
            let Some(current) = current else {
                return;
            };
            let Some(delay) = current.notification.dismiss_after() else {
                return;
            };
            let key = current.key;
            let service = service.clone();
            tokio::spawn(async move {
                tokio::time::sleep(delay + ADVANCE_DELAY).await;
                service.dismiss(key);
            });
        })
    }

    fn lock(&self) -> MutexGuard<'_, Queue> {
        self.queue.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

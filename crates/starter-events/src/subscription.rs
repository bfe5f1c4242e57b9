// File: starter-events/src/subscription.rs
// Purpose: Unsubscribe handles returned by `on` and `once`

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Weak;

static HANDLER_ID_ALLOCATOR: AtomicU64 = AtomicU64::new(1);

/// Stable identity of a registered handler
pub type HandlerId = u64;

pub(crate) fn next_handler_id() -> HandlerId {
    HANDLER_ID_ALLOCATOR.fetch_add(1, Ordering::SeqCst)
}

pub(crate) trait Detach: Send + Sync {
    fn detach(&self, key: &str, id: HandlerId);
}

/// Handle for a single registered handler.
///
/// Calling [`Subscription::unsubscribe`] more than once, after a `once`
/// handler already fired, or after the emitter was dropped is a no-op.
/// Dropping the handle does not unsubscribe.
#[derive(Clone)]
pub struct Subscription {
    registry: Weak<dyn Detach>,
    key: String,
    id: HandlerId,
}

impl Subscription {
    pub(crate) fn new(registry: Weak<dyn Detach>, key: &str, id: HandlerId) -> Self {
        Self {
            registry,
            key: key.to_string(),
            id,
        }
    }

    /// Remove the handler from its emitter
    pub fn unsubscribe(&self) {
        if let Some(registry) = self.registry.upgrade() {
            registry.detach(&self.key, self.id);
        }
    }

    pub fn id(&self) -> HandlerId {
        self.id
    }

    /// Event or namespace the handler was registered under
    pub fn key(&self) -> &str {
        &self.key
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("key", &self.key)
            .field("id", &self.id)
            .finish()
    }
}

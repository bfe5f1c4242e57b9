// File: starter-events/src/emitter.rs
// Purpose: Flat event emitter (one handler list per event name)

use std::sync::{Arc, Weak};

use crate::registry::Registry;
use crate::subscription::{Detach, Subscription};

pub(crate) type Handler<A> = dyn Fn(&A) + Send + Sync;

/// Event emitter with a flat handler list per event name.
///
/// Handlers fire in subscription order. Clones share the same handler
/// registry.
pub struct EventEmitter<A> {
    registry: Arc<Registry<Handler<A>>>,
}

impl<A: 'static> EventEmitter<A> {
    pub fn new() -> Self {
        Self {
            registry: Arc::new(Registry::new()),
        }
    }

    /// Subscribe to `event`
    pub fn on<F>(&self, event: &str, handler: F) -> Subscription
    where
        F: Fn(&A) + Send + Sync + 'static,
    {
        self.subscribe(event, Arc::new(handler), false)
    }

    /// Subscribe to the next `event` only
    pub fn once<F>(&self, event: &str, handler: F) -> Subscription
    where
        F: Fn(&A) + Send + Sync + 'static,
    {
        self.subscribe(event, Arc::new(handler), true)
    }

    fn subscribe(&self, event: &str, handler: Arc<Handler<A>>, once: bool) -> Subscription {
        let id = self.registry.add(event, handler, once);
        let registry = Arc::downgrade(&self.registry) as Weak<dyn Detach>;
        Subscription::new(registry, event, id)
    }

    /// Invoke every handler registered for `event`
    pub fn emit(&self, event: &str, args: &A) {
        let handlers = self.registry.snapshot(event);
        tracing::trace!(event, handlers = handlers.len(), "emit");
        for handler in handlers {
            handler(args);
        }
    }

    pub fn listener_count(&self, event: &str) -> usize {
        self.registry.count(event)
    }

    /// Remove all handlers. The emitter stays inert afterwards.
    pub fn close(&self) {
        self.registry.close();
    }

    pub fn is_closed(&self) -> bool {
        self.registry.is_closed()
    }
}

impl<A: 'static> Default for EventEmitter<A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A> Clone for EventEmitter<A> {
    fn clone(&self) -> Self {
        Self {
            registry: self.registry.clone(),
        }
    }
}

// File: starter-events/src/namespaced.rs
// Purpose: Namespaced emitter with prefix-level and exact-event subscriptions

use std::sync::{Arc, Weak};

use crate::emitter::EventEmitter;
use crate::registry::Registry;
use crate::subscription::{Detach, Subscription};

/// Separator used by [`NsEmitter::new`]
pub const DEFAULT_SEPARATOR: char = ':';

type NsHandler<A> = dyn Fn(&str, &A) + Send + Sync;

/// Event emitter with namespace subscriptions.
///
/// An event name of the form `prefix<sep>suffix` belongs to namespace
/// `prefix`. Emitting it first notifies the namespace listeners with
/// `(suffix, args)` and then the exact listeners of the full name with
/// `args`. Event names without a separator only reach exact listeners.
///
/// ```text
/// emitter.on_namespace("route:", ..)   <- ("change", args)
/// emitter.on("route:change", ..)       <- (args)
/// emitter.emit("route:change", args)
/// ```
pub struct NsEmitter<A> {
    separator: char,
    exact: EventEmitter<A>,
    namespaces: Arc<Registry<NsHandler<A>>>,
}

impl<A: 'static> NsEmitter<A> {
    pub fn new() -> Self {
        Self::with_separator(DEFAULT_SEPARATOR)
    }

    pub fn with_separator(separator: char) -> Self {
        Self {
            separator,
            exact: EventEmitter::new(),
            namespaces: Arc::new(Registry::new()),
        }
    }

    pub fn separator(&self) -> char {
        self.separator
    }

    /// Whether `key` denotes a namespace subscription (ends with the separator)
    pub fn is_namespace(&self, key: &str) -> bool {
        key.ends_with(self.separator)
    }

    /// Subscribe to the exact event name
    pub fn on<F>(&self, event: &str, handler: F) -> Subscription
    where
        F: Fn(&A) + Send + Sync + 'static,
    {
        self.exact.on(event, handler)
    }

    pub fn once<F>(&self, event: &str, handler: F) -> Subscription
    where
        F: Fn(&A) + Send + Sync + 'static,
    {
        self.exact.once(event, handler)
    }

    /// Subscribe to every event in `namespace`.
    ///
    /// `namespace` may be given with or without the trailing separator
    /// (`"socket:"` and `"socket"` are the same subscription). The handler
    /// receives the de-prefixed event name.
    pub fn on_namespace<F>(&self, namespace: &str, handler: F) -> Subscription
    where
        F: Fn(&str, &A) + Send + Sync + 'static,
    {
        self.subscribe_namespace(namespace, Arc::new(handler), false)
    }

    pub fn once_namespace<F>(&self, namespace: &str, handler: F) -> Subscription
    where
        F: Fn(&str, &A) + Send + Sync + 'static,
    {
        self.subscribe_namespace(namespace, Arc::new(handler), true)
    }

    fn subscribe_namespace(
        &self,
        namespace: &str,
        handler: Arc<NsHandler<A>>,
        once: bool,
    ) -> Subscription {
        let prefix = namespace.strip_suffix(self.separator).unwrap_or(namespace);
        let id = self.namespaces.add(prefix, handler, once);
        let registry = Arc::downgrade(&self.namespaces) as Weak<dyn Detach>;
        Subscription::new(registry, prefix, id)
    }

    /// Notify namespace listeners, then exact listeners
    pub fn emit(&self, event: &str, args: &A) {
        if let Some((prefix, suffix)) = event.split_once(self.separator) {
            if !prefix.is_empty() {
                let handlers = self.namespaces.snapshot(prefix);
                tracing::trace!(namespace = prefix, event = suffix, handlers = handlers.len(), "emit namespace");
                for handler in handlers {
                    handler(suffix, args);
                }
            }
        }
        self.exact.emit(event, args);
    }

    /// Number of handlers for `key`; a separator-terminated key counts
    /// namespace handlers
    pub fn listener_count(&self, key: &str) -> usize {
        match key.strip_suffix(self.separator) {
            Some(prefix) => self.namespaces.count(prefix),
            None => self.exact.listener_count(key),
        }
    }

    /// Remove every handler from every namespace. Terminal.
    pub fn close(&self) {
        self.namespaces.close();
        self.exact.close();
    }

    pub fn is_closed(&self) -> bool {
        self.exact.is_closed()
    }
}

impl<A: 'static> Default for NsEmitter<A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A> Clone for NsEmitter<A> {
    fn clone(&self) -> Self {
        Self {
            separator: self.separator,
            exact: self.exact.clone(),
            namespaces: self.namespaces.clone(),
        }
    }
}

// File: starter-events/src/registry.rs
// Purpose: Keyed handler lists with stable ids and snapshot dispatch

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::subscription::{next_handler_id, Detach, HandlerId};

struct Entry<H: ?Sized> {
    id: HandlerId,
    once: bool,
    handler: Arc<H>,
}

/// Handler lists keyed by event (or namespace) name.
///
/// The lock is only held while the lists are read or edited. Dispatch takes a
/// snapshot of the handlers first so that handlers are free to subscribe,
/// unsubscribe or emit re-entrantly.
pub(crate) struct Registry<H: ?Sized> {
    lists: Mutex<HashMap<String, Vec<Entry<H>>>>,
    closed: AtomicBool,
}

impl<H: ?Sized> Registry<H> {
    pub(crate) fn new() -> Self {
        Self {
            lists: Mutex::new(HashMap::new()),
            closed: AtomicBool::new(false),
        }
    }

    fn lists(&self) -> MutexGuard<'_, HashMap<String, Vec<Entry<H>>>> {
        self.lists.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub(crate) fn add(&self, key: &str, handler: Arc<H>, once: bool) -> HandlerId {
        let id = next_handler_id();
        if self.is_closed() {
            return id;
        }
        self.lists()
            .entry(key.to_string())
            .or_default()
            .push(Entry { id, once, handler });
        id
    }

    pub(crate) fn remove(&self, key: &str, id: HandlerId) -> bool {
        let mut lists = self.lists();
        let Some(list) = lists.get_mut(key) else {
            return false;
        };
        let before = list.len();
        list.retain(|entry| entry.id != id);
        let removed = list.len() != before;
        if list.is_empty() {
            lists.remove(key);
        }
        removed
    }

    /// Handlers registered under `key`, in subscription order.
    ///
    /// One-shot entries are detached as part of taking the snapshot, so a
    /// re-entrant emit cannot fire them a second time.
    pub(crate) fn snapshot(&self, key: &str) -> Vec<Arc<H>> {
        if self.is_closed() {
            return Vec::new();
        }
        let mut lists = self.lists();
        let Some(list) = lists.get_mut(key) else {
            return Vec::new();
        };
        let handlers = list.iter().map(|entry| entry.handler.clone()).collect();
        list.retain(|entry| !entry.once);
        if list.is_empty() {
            lists.remove(key);
        }
        handlers
    }

    pub(crate) fn count(&self, key: &str) -> usize {
        self.lists().get(key).map_or(0, Vec::len)
    }

    pub(crate) fn close(&self) {
        self.closed.store(true, Ordering::SeqCst);
        self.lists().clear();
    }

    pub(crate) fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }
}

impl<H: ?Sized + Send + Sync> Detach for Registry<H> {
    fn detach(&self, key: &str, id: HandlerId) {
        self.remove(key, id);
    }
}

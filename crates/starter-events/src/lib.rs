// File: starter-events/src/lib.rs
// Purpose: Main entry point for the starter-events library

//! # starter-events
//!
//! Process-local publish/subscribe with hierarchical (prefix) subscriptions.
//!
//! ## Quick Start
//!
//! ```rust
//! use starter_events::NsEmitter;
//! use std::sync::{Arc, Mutex};
//!
//! let emitter: NsEmitter<i32> = NsEmitter::new();
//! let seen = Arc::new(Mutex::new(Vec::new()));
//!
//! let log = seen.clone();
//! emitter.on_namespace("foo:", move |event, value| {
//!     log.lock().unwrap().push(format!("ns {event} {value}"));
//! });
//! let log = seen.clone();
//! emitter.on("foo:bar", move |value| {
//!     log.lock().unwrap().push(format!("exact {value}"));
//! });
//!
//! emitter.emit("foo:bar", &1);
//! assert_eq!(*seen.lock().unwrap(), vec!["ns bar 1", "exact 1"]);
//! ```

pub mod emitter;
pub mod namespaced;
mod registry;
pub mod subscription;

pub use emitter::EventEmitter;
pub use namespaced::{NsEmitter, DEFAULT_SEPARATOR};
pub use subscription::{HandlerId, Subscription};

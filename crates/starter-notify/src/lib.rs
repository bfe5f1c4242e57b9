// File: starter-notify/src/lib.rs
// Purpose: Main entry point for the starter-notify library

//! # starter-notify
//!
//! Queue of user-facing notifications shown one at a time.
//!
//! ```rust
//! use starter_notify::NotificationService;
//!
//! let notify = NotificationService::new();
//! notify.on_current(|current| {
//!     if let Some(current) = current {
//!         println!("{}", current.notification.render(true).into_string());
//!     }
//! });
//!
//! notify.success("Profile saved");
//! notify.error("Connection lost", true);
//! assert_eq!(notify.pending(), 1);
//! ```

pub mod notification;
pub mod service;

pub use notification::{Notification, NotificationKind, Position, DEFAULT_TIMEOUT};
pub use service::{Current, NotificationService, ADVANCE_DELAY};

// File: starter-notify/src/notification.rs
// Purpose: Notification message model and markup

use std::time::Duration;

use maud::{html, Markup};
use serde::{Deserialize, Serialize};

/// Default display time of a non-sticky notification
pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(3000);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    #[default]
    Toast,
    Info,
    Success,
    Warn,
    Error,
}

impl NotificationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            NotificationKind::Toast => "toast",
            NotificationKind::Info => "info",
            NotificationKind::Success => "success",
            NotificationKind::Warn => "warn",
            NotificationKind::Error => "error",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Position {
    #[default]
    Bottom,
    Top,
}

impl Position {
    pub fn as_str(&self) -> &'static str {
        match self {
            Position::Bottom => "bottom",
            Position::Top => "top",
        }
    }
}

/// A message waiting for, or occupying, the notification slot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    #[serde(rename = "type", default)]
    pub kind: NotificationKind,
    pub content: String,
    #[serde(default)]
    pub position: Position,
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
    /// Sticky notifications stay until dismissed
    #[serde(default)]
    pub sticky: bool,
}

fn default_timeout_ms() -> u64 {
    DEFAULT_TIMEOUT.as_millis() as u64
}

impl Notification {
    pub fn new(kind: NotificationKind, content: impl Into<String>) -> Self {
        Self {
            kind,
            content: content.into(),
            position: Position::default(),
            timeout_ms: default_timeout_ms(),
            sticky: false,
        }
    }

    pub fn position(mut self, position: Position) -> Self {
        self.position = position;
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout_ms = timeout.as_millis() as u64;
        self
    }

    pub fn sticky(mut self, sticky: bool) -> Self {
        self.sticky = sticky;
        self
    }

    /// How long the notification shows before it dismisses itself
    pub fn dismiss_after(&self) -> Option<Duration> {
        if self.sticky {
            None
        } else {
            Some(Duration::from_millis(self.timeout_ms))
        }
    }

    pub fn render(&self, visible: bool) -> Markup {
        let class = format!(
            "notification {} {}{}",
            self.kind.as_str(),
            self.position.as_str(),
            if visible { " show" } else { "" }
        );
        html! {
            div class=(class) { (self.content) }
        }
    }
}

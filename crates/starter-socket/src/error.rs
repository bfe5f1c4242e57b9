// File: starter-socket/src/error.rs
// Purpose: Transport, socket and request errors

use std::time::Duration;

use serde_json::Value;
use thiserror::Error;

/// Failures of the underlying channel
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("failed to connect to {url}: {reason}")]
    Connect { url: String, reason: String },

    #[error("connecting to {url} timed out")]
    ConnectTimeout { url: String },

    #[error("connection closed")]
    Closed,

    #[error("websocket error: {0}")]
    WebSocket(#[from] tokio_tungstenite::tungstenite::Error),
}

/// Failures of [`crate::SocketClient`] operations
#[derive(Debug, Error)]
pub enum SocketError {
    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error("failed to encode message: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Failures of a request/reply exchange
#[derive(Debug, Error)]
pub enum RequestError {
    #[error("request type missing")]
    MissingType,

    #[error("request timed out after {0:?}")]
    Timeout(Duration),

    /// The peer replied with `isError: true`; the reply payload is kept whole
    #[error("remote error: {0}")]
    Remote(Value),

    /// The client went away before a reply arrived
    #[error("request cancelled")]
    Cancelled,

    #[error(transparent)]
    Socket(#[from] SocketError),
}

impl RequestError {
    pub fn is_timeout(&self) -> bool {
        matches!(self, RequestError::Timeout(_))
    }
}

pub type SocketResult<T> = Result<T, SocketError>;

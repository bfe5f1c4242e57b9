// File: starter-socket/src/transport.rs
// Purpose: Transport abstraction and the in-process memory transport

use async_trait::async_trait;
use tokio::sync::mpsc;

use crate::error::TransportError;

/// Close code of a normal shutdown
pub const NORMAL_CLOSURE: u16 = 1000;
/// Close code reported when the channel drops without a close frame
pub const ABNORMAL_CLOSURE: u16 = 1006;

/// What the client asks the channel to do
#[derive(Debug, Clone, PartialEq)]
pub enum Outgoing {
    Text(String),
    Close { code: u16, reason: String },
}

/// What the channel reports back
#[derive(Debug, Clone, PartialEq)]
pub enum TransportEvent {
    Message(String),
    Error(String),
    Closed { code: u16, reason: String },
}

/// An open channel
#[derive(Debug)]
pub struct Connection {
    pub outgoing: mpsc::UnboundedSender<Outgoing>,
    pub incoming: mpsc::UnboundedReceiver<TransportEvent>,
}

/// Opens bidirectional message channels
#[async_trait]
pub trait Transport: Send + Sync {
    /// Resolves once the channel is open
    async fn connect(&self, url: &str) -> Result<Connection, TransportError>;
}

/// Loopback transport. Every `connect` hands the far end of the channel to
/// the paired [`MemoryServer`].
#[derive(Debug, Clone)]
pub struct MemoryTransport {
    accept_tx: mpsc::UnboundedSender<MemoryPeer>,
}

/// Accepting side of a [`MemoryTransport`]. Dropping it makes further
/// connects fail.
#[derive(Debug)]
pub struct MemoryServer {
    accept_rx: mpsc::UnboundedReceiver<MemoryPeer>,
}

impl MemoryTransport {
    pub fn pair() -> (MemoryTransport, MemoryServer) {
        let (accept_tx, accept_rx) = mpsc::unbounded_channel();
        (MemoryTransport { accept_tx }, MemoryServer { accept_rx })
    }
}

#[async_trait]
impl Transport for MemoryTransport {
    async fn connect(&self, url: &str) -> Result<Connection, TransportError> {
        let (out_tx, out_rx) = mpsc::unbounded_channel();
        let (in_tx, in_rx) = mpsc::unbounded_channel();

        let peer = MemoryPeer {
            url: url.to_string(),
            incoming: out_rx,
            outgoing: in_tx,
        };
        self.accept_tx.send(peer).map_err(|_| TransportError::Connect {
            url: url.to_string(),
            reason: "memory server is gone".to_string(),
        })?;

        Ok(Connection {
            outgoing: out_tx,
            incoming: in_rx,
        })
    }
}

impl MemoryServer {
    /// Next connection opened by the paired transport
    pub async fn accept(&mut self) -> Option<MemoryPeer> {
        self.accept_rx.recv().await
    }
}

/// Server-side end of one memory connection
#[derive(Debug)]
pub struct MemoryPeer {
    url: String,
    incoming: mpsc::UnboundedReceiver<Outgoing>,
    outgoing: mpsc::UnboundedSender<TransportEvent>,
}

impl MemoryPeer {
    /// URL the client connected with
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Next frame sent by the client
    pub async fn recv(&mut self) -> Option<Outgoing> {
        self.incoming.recv().await
    }

    pub fn send_text(&self, text: impl Into<String>) -> Result<(), TransportError> {
        self.push(TransportEvent::Message(text.into()))
    }

    pub fn send_error(&self, message: impl Into<String>) -> Result<(), TransportError> {
        self.push(TransportEvent::Error(message.into()))
    }

    pub fn close(&self, code: u16, reason: impl Into<String>) -> Result<(), TransportError> {
        self.push(TransportEvent::Closed {
            code,
            reason: reason.into(),
        })
    }

    fn push(&self, event: TransportEvent) -> Result<(), TransportError> {
        self.outgoing.send(event).map_err(|_| TransportError::Closed)
    }
}

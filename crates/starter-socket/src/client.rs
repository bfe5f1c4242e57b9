// File: starter-socket/src/client.rs
// Purpose: Socket client with typed events and request/reply over a transport

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use serde::Deserialize;
use serde_json::{json, Value};
use starter_events::{NsEmitter, Subscription};
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;

use crate::config::ClientConfig;
use crate::error::{RequestError, SocketResult, TransportError};
use crate::transport::{Connection, Outgoing, Transport, TransportEvent, NORMAL_CLOSURE};
use crate::ws::WebSocketTransport;

/// Event emitted for malformed frames and channel failures
pub const ERROR_EVENT: &str = "error";
/// Event emitted when the channel closes
pub const CLOSE_EVENT: &str = "close";

/// Wire frame: `{"type": ..., "payload": ...}`
#[derive(Debug, Deserialize)]
struct Frame {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    payload: Value,
}

/// Live connection state
struct Link {
    outgoing: mpsc::UnboundedSender<Outgoing>,
    open: Arc<AtomicBool>,
    receiver: JoinHandle<()>,
}

impl Link {
    fn is_open(&self) -> bool {
        self.open.load(Ordering::SeqCst) && !self.outgoing.is_closed()
    }
}

/// Client for a `{type, payload}` message protocol.
///
/// Incoming frames are emitted under their `type` with the payload as
/// argument, so handlers subscribe with [`SocketClient::on`] or to a whole
/// namespace with [`SocketClient::on_namespace`]. [`SocketClient::request`]
/// pairs a message with the next frame of the same type.
pub struct SocketClient {
    config: ClientConfig,
    transport: Arc<dyn Transport>,
    emitter: NsEmitter<Value>,
    link: Mutex<Option<Link>>,
}

impl SocketClient {
    /// Client over a WebSocket transport
    pub fn new(config: ClientConfig) -> Self {
        Self::with_transport(config, WebSocketTransport::new())
    }

    pub fn with_transport(config: ClientConfig, transport: impl Transport + 'static) -> Self {
        Self {
            config,
            transport: Arc::new(transport),
            emitter: NsEmitter::new(),
            link: Mutex::new(None),
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Connection URL including the encoded params
    pub fn url(&self) -> String {
        self.config.url()
    }

    pub fn is_connected(&self) -> bool {
        self.lock_link().as_ref().map_or(false, Link::is_open)
    }

    /// Open a fresh connection, closing any current one first
    pub async fn connect(&self) -> SocketResult<()> {
        self.disconnect();

        let url = self.url();
        tracing::debug!(url = %url, "connecting");
        let connection = match self.transport.connect(&url).await {
            Ok(connection) => connection,
            Err(e) => {
                tracing::error!("Failed to connect to {}: {}", url, e);
                self.emitter.emit(ERROR_EVENT, &json!({ "error": e.to_string() }));
                return Err(e.into());
            }
        };

        let Connection { outgoing, incoming } = connection;
        let open = Arc::new(AtomicBool::new(true));
        let receiver = tokio::spawn(receive_loop(incoming, self.emitter.clone(), open.clone()));

        let previous = self.lock_link().replace(Link {
            outgoing,
            open,
            receiver,
        });
        // A concurrent connect may have raced this one
        if let Some(previous) = previous {
            previous.receiver.abort();
        }
        Ok(())
    }

    /// Close the connection with code 1000 and the presence id as reason
    pub fn disconnect(&self) {
        let Some(link) = self.lock_link().take() else {
            return;
        };
        if link.is_open() {
            let reason = self.config.presence_id.clone().unwrap_or_default();
            tracing::debug!(reason = %reason, "disconnecting");
            let _ = link.outgoing.send(Outgoing::Close {
                code: NORMAL_CLOSURE,
                reason: reason.clone(),
            });
            link.open.store(false, Ordering::SeqCst);
            link.receiver.abort();
            self.emitter
                .emit(CLOSE_EVENT, &json!({ "code": NORMAL_CLOSURE, "reason": reason }));
        } else {
            link.receiver.abort();
        }
    }

    /// Send `message` as JSON, connecting first when needed
    pub async fn send(&self, message: &Value) -> SocketResult<()> {
        let text = serde_json::to_string(message)?;
        self.send_text(text).await
    }

    /// Send a raw text frame, connecting first when needed
    pub async fn send_text(&self, text: impl Into<String>) -> SocketResult<()> {
        if !self.is_connected() {
            self.connect().await?;
        }
        let sender = self
            .lock_link()
            .as_ref()
            .map(|link| link.outgoing.clone())
            .ok_or(TransportError::Closed)?;
        sender
            .send(Outgoing::Text(text.into()))
            .map_err(|_| TransportError::Closed)?;
        Ok(())
    }

    /// [`SocketClient::request_with_timeout`] with the configured timeout
    pub async fn request(&self, message: Value) -> Result<Value, RequestError> {
        self.request_with_timeout(message, self.config.request_timeout())
            .await
    }

    /// Send `message` and wait for the next frame of the same `type`.
    ///
    /// A reply payload carrying `isError: true` fails with
    /// [`RequestError::Remote`]. `None` or a zero duration waits forever. The
    /// reply listener is gone once this returns, whatever the outcome.
    pub async fn request_with_timeout(
        &self,
        message: Value,
        timeout: Option<Duration>,
    ) -> Result<Value, RequestError> {
        let kind = message
            .get("type")
            .and_then(Value::as_str)
            .filter(|t| !t.is_empty())
            .ok_or(RequestError::MissingType)?
            .to_string();

        let (reply_tx, reply_rx) = oneshot::channel::<Value>();
        let reply_tx = Mutex::new(Some(reply_tx));
        let subscription = self.emitter.once(&kind, move |reply| {
            let sender = reply_tx.lock().unwrap_or_else(PoisonError::into_inner).take();
            if let Some(sender) = sender {
                let _ = sender.send(reply.clone());
            }
        });

        let exchange = async {
            match self.send(&message).await {
                Ok(()) => reply_rx.await.map_err(|_| RequestError::Cancelled),
                Err(e) => Err(RequestError::Socket(e)),
            }
        };
        let outcome = match timeout.filter(|d| !d.is_zero()) {
            Some(limit) => match tokio::time::timeout(limit, exchange).await {
                Ok(result) => result,
                Err(_) => Err(RequestError::Timeout(limit)),
            },
            None => exchange.await,
        };
        subscription.unsubscribe();

        let reply = outcome.map_err(|e| {
            tracing::warn!(request = %kind, "request failed: {}", e);
            e
        })?;
        if reply.get("isError").and_then(Value::as_bool) == Some(true) {
            return Err(RequestError::Remote(reply));
        }
        Ok(reply)
    }

    /// Subscribe to frames of `event`
    pub fn on<F>(&self, event: &str, handler: F) -> Subscription
    where
        F: Fn(&Value) + Send + Sync + 'static,
    {
        self.emitter.on(event, handler)
    }

    pub fn once<F>(&self, event: &str, handler: F) -> Subscription
    where
        F: Fn(&Value) + Send + Sync + 'static,
    {
        self.emitter.once(event, handler)
    }

    /// Subscribe to every event under `namespace` (e.g. `"chat:"`)
    pub fn on_namespace<F>(&self, namespace: &str, handler: F) -> Subscription
    where
        F: Fn(&str, &Value) + Send + Sync + 'static,
    {
        self.emitter.on_namespace(namespace, handler)
    }

    pub fn once_namespace<F>(&self, namespace: &str, handler: F) -> Subscription
    where
        F: Fn(&str, &Value) + Send + Sync + 'static,
    {
        self.emitter.once_namespace(namespace, handler)
    }

    fn lock_link(&self) -> std::sync::MutexGuard<'_, Option<Link>> {
        self.link.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Drop for SocketClient {
    fn drop(&mut self) {
        if let Some(link) = self.lock_link().take() {
            link.receiver.abort();
        }
    }
}

async fn receive_loop(
    mut incoming: mpsc::UnboundedReceiver<TransportEvent>,
    emitter: NsEmitter<Value>,
    open: Arc<AtomicBool>,
) {
    while let Some(event) = incoming.recv().await {
        match event {
            TransportEvent::Message(text) => dispatch_frame(&emitter, text),
            TransportEvent::Error(error) => {
                tracing::error!("Socket error: {}", error);
                emitter.emit(ERROR_EVENT, &json!({ "error": error }));
            }
            TransportEvent::Closed { code, reason } => {
                open.store(false, Ordering::SeqCst);
                tracing::debug!(code, reason = %reason, "connection closed");
                emitter.emit(CLOSE_EVENT, &json!({ "code": code, "reason": reason }));
                return;
            }
        }
    }
    open.store(false, Ordering::SeqCst);
}

fn dispatch_frame(emitter: &NsEmitter<Value>, data: String) {
    match serde_json::from_str::<Frame>(&data) {
        Ok(frame) => emitter.emit(&frame.kind, &frame.payload),
        Err(e) => {
            tracing::warn!("Failed to parse frame: {}", e);
            emitter.emit(ERROR_EVENT, &json!({ "data": data, "error": e.to_string() }));
        }
    }
}

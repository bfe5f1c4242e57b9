// File: starter-socket/src/lib.rs
// Purpose: Main entry point for the starter-socket library

//! # starter-socket
//!
//! Client for `{"type": ..., "payload": ...}` message channels with
//! namespaced events and type-correlated request/reply.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use serde_json::json;
//! use starter_socket::{ClientConfig, SocketClient};
//!
//! # async fn run() -> anyhow::Result<()> {
//! let client = SocketClient::new(ClientConfig::load("client.toml")?);
//! client.on_namespace("chat:", |event, payload| {
//!     tracing::info!("chat {}: {}", event, payload);
//! });
//!
//! client.connect().await?;
//! let reply = client.request(json!({"type": "ping"})).await?;
//! # let _ = reply;
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod query;
pub mod transport;
pub mod ws;

pub use client::{SocketClient, CLOSE_EVENT, ERROR_EVENT};
pub use config::ClientConfig;
pub use error::{RequestError, SocketError, SocketResult, TransportError};
pub use query::as_query_parameters;
pub use transport::{Connection, MemoryPeer, MemoryServer, MemoryTransport, Outgoing, Transport, TransportEvent};
pub use ws::WebSocketTransport;

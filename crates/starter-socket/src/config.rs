// File: starter-socket/src/config.rs
// Purpose: Client configuration parsing from a TOML file

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fs;
use std::path::Path;
use std::time::Duration;

use crate::query::as_query_parameters;

/// Socket client configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientConfig {
    #[serde(default = "default_server_url")]
    pub server_url: String,

    /// Path appended to the server URL (e.g., "/chat")
    #[serde(default)]
    pub base_path: String,

    /// Connection parameters encoded into the query string
    #[serde(default = "default_params")]
    pub params: Value,

    /// Sent as the close reason on disconnect
    #[serde(default)]
    pub presence_id: Option<String>,

    /// Default request timeout; 0 disables it
    #[serde(default = "default_request_timeout_ms")]
    pub request_timeout_ms: u64,
}

// Default values
fn default_server_url() -> String {
    "ws://localhost:8080".to_string()
}

fn default_params() -> Value {
    Value::Object(Map::new())
}

fn default_request_timeout_ms() -> u64 {
    30_000
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            server_url: default_server_url(),
            base_path: String::new(),
            params: default_params(),
            presence_id: None,
            request_timeout_ms: default_request_timeout_ms(),
        }
    }
}

impl ClientConfig {
    pub fn new(server_url: impl Into<String>) -> Self {
        Self {
            server_url: server_url.into(),
            ..Self::default()
        }
    }

    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        // Missing or empty file means defaults
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;

        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        let config: ClientConfig = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {:?}", path))?;

        Ok(config)
    }

    /// Connection URL: server URL, base path and encoded params
    pub fn url(&self) -> String {
        format!(
            "{}{}?{}",
            self.server_url,
            self.base_path,
            as_query_parameters(&self.params)
        )
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        match self.request_timeout_ms {
            0 => None,
            ms => Some(Duration::from_millis(ms)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_default_config() {
        let config = ClientConfig::default();
        assert_eq!(config.server_url, "ws://localhost:8080");
        assert_eq!(config.base_path, "");
        assert_eq!(config.params, json!({}));
        assert_eq!(config.request_timeout(), Some(Duration::from_secs(30)));
        assert_eq!(config.url(), "ws://localhost:8080?");
    }

    #[test]
    fn test_empty_config() {
        let config = toml::from_str::<ClientConfig>("").unwrap_or_default();
        assert_eq!(config, ClientConfig::default());
    }

    #[test]
    fn test_toml_overrides() {
        let toml = r#"
            server_url = "wss://chat.example.com"
            base_path = "/ws"
            presence_id = "peer-7"
            request_timeout_ms = 0

            [params]
            room = "lobby"
            tags = ["a", "b"]

            [params.user]
            name = "ada"
        "#;
        let config: ClientConfig = toml::from_str(toml).unwrap();

        assert_eq!(config.presence_id.as_deref(), Some("peer-7"));
        assert_eq!(config.request_timeout(), None);
        assert_eq!(
            config.url(),
            "wss://chat.example.com/ws?room=lobby&tags=a&tags=b&user.name=ada"
        );
    }

    #[test]
    fn test_load_missing_and_empty_files() {
        let dir = std::env::temp_dir().join(format!("starter-socket-config-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();

        let missing = dir.join("missing.toml");
        assert_eq!(ClientConfig::load(&missing).unwrap(), ClientConfig::default());

        let empty = dir.join("empty.toml");
        fs::write(&empty, "  \n").unwrap();
        assert_eq!(ClientConfig::load(&empty).unwrap(), ClientConfig::default());

        let broken = dir.join("broken.toml");
        fs::write(&broken, "server_url = ").unwrap();
        let err = ClientConfig::load(&broken).unwrap_err();
        assert!(err.to_string().contains("Failed to parse config file"));

        fs::remove_dir_all(&dir).unwrap();
    }
}

//! Node configuration: storage root, listening port and the identity advertised to the
//! orchestrator.

use std::{env, fs, io::ErrorKind, path::PathBuf};

use serde::Deserialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::state::NodeIdentity;

/// Default location on disk where the node looks for the JSON configuration.
const DEFAULT_CONFIG_PATH: &str = "config/node.json";
/// Environment variable that overrides [`DEFAULT_CONFIG_PATH`].
const CONFIG_PATH_ENV: &str = "QUIZ_NODE_CONFIG_PATH";

const DEFAULT_PORT: u16 = 3000;
const DEFAULT_STORAGE_PATH: &str = "./storage";
const DEFAULT_PUBLIC_HOST: &str = "localhost";

#[derive(Debug, Clone, PartialEq, Eq)]
/// Immutable runtime configuration shared across the application.
pub struct AppConfig {
    /// Port the HTTP server listens on, also advertised in stream addresses.
    pub port: u16,
    /// Folder holding one sub-folder per match.
    pub storage_path: PathBuf,
    /// Host advertised in stream addresses.
    pub public_host: String,
    /// Identifier of this data node.
    pub node_id: String,
    /// Optional human readable name of this data node.
    pub node_name: Option<String>,
}

impl AppConfig {
    /// Load the configuration from disk, then apply environment overrides.
    ///
    /// A missing or unreadable file falls back to the built-in defaults.
    pub fn load() -> Self {
        let path = resolve_config_path();
        let base = match fs::read_to_string(&path) {
            Ok(contents) => match serde_json::from_str::<RawConfig>(&contents) {
                Ok(raw) => {
                    info!(path = %path.display(), "loaded node config");
                    raw.into()
                }
                Err(err) => {
                    warn!(
                        path = %path.display(),
                        error = %err,
                        "failed to parse config; falling back to defaults"
                    );
                    Self::default()
                }
            },
            Err(err) if err.kind() == ErrorKind::NotFound => {
                info!(
                    path = %path.display(),
                    "config file not found; using built-in defaults"
                );
                Self::default()
            }
            Err(err) => {
                warn!(
                    path = %path.display(),
                    error = %err,
                    "failed to read config; falling back to defaults"
                );
                Self::default()
            }
        };

        base.with_overrides(|key| env::var(key).ok())
    }

    /// Apply `PORT`, `STORAGE_PATH`, `PUBLIC_HOST`, `NODE_ID` and `NODE_NAME` overrides.
    fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        let lookup = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        if let Some(port) = lookup("PORT") {
            match port.parse::<u16>() {
                Ok(port) => self.port = port,
                Err(err) => warn!(value = %port, error = %err, "ignoring invalid PORT"),
            }
        }
        if let Some(storage_path) = lookup("STORAGE_PATH") {
            self.storage_path = PathBuf::from(storage_path);
        }
        if let Some(public_host) = lookup("PUBLIC_HOST") {
            self.public_host = public_host;
        }
        if let Some(node_id) = lookup("NODE_ID") {
            self.node_id = node_id;
        }
        if let Some(node_name) = lookup("NODE_NAME") {
            self.node_name = Some(node_name);
        }
        self
    }

    /// Identity recorded in new matches and used to build stream addresses.
    pub fn node_identity(&self) -> NodeIdentity {
        NodeIdentity {
            id: self.node_id.clone(),
            name: self.node_name.clone(),
            public_host: self.public_host.clone(),
            port: self.port,
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            storage_path: PathBuf::from(DEFAULT_STORAGE_PATH),
            public_host: DEFAULT_PUBLIC_HOST.to_owned(),
            node_id: generated_node_id(),
            node_name: None,
        }
    }
}

#[derive(Debug, Deserialize)]
/// JSON representation of the configuration file located at [`DEFAULT_CONFIG_PATH`].
struct RawConfig {
    #[serde(default)]
    port: Option<u16>,
    #[serde(default)]
    storage_path: Option<PathBuf>,
    #[serde(default)]
    public_host: Option<String>,
    #[serde(default)]
    node_id: Option<String>,
    #[serde(default)]
    node_name: Option<String>,
}

impl From<RawConfig> for AppConfig {
    fn from(value: RawConfig) -> Self {
        let defaults = AppConfig::default();
        Self {
            port: value.port.unwrap_or(defaults.port),
            storage_path: value.storage_path.unwrap_or(defaults.storage_path),
            public_host: value.public_host.unwrap_or(defaults.public_host),
            node_id: value.node_id.unwrap_or(defaults.node_id),
            node_name: value.node_name.or(defaults.node_name),
        }
    }
}

/// Resolve the configuration path taking the environment override into account.
fn resolve_config_path() -> PathBuf {
    env::var_os(CONFIG_PATH_ENV)
        .map(PathBuf::from)
        .filter(|path| !path.as_os_str().is_empty())
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH))
}

fn generated_node_id() -> String {
    format!("node-{}", Uuid::new_v4().simple())
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    #[test]
    fn partial_file_keeps_defaults_for_missing_keys() {
        let raw: RawConfig =
            serde_json::from_str(r#"{"port": 4000, "node_name": "Máy chủ phụ"}"#).unwrap();
        let config = AppConfig::from(raw);

        assert_eq!(config.port, 4000);
        assert_eq!(config.storage_path, PathBuf::from(DEFAULT_STORAGE_PATH));
        assert_eq!(config.public_host, DEFAULT_PUBLIC_HOST);
        assert_eq!(config.node_name.as_deref(), Some("Máy chủ phụ"));
        assert!(config.node_id.starts_with("node-"));
    }

    #[test]
    fn environment_overrides_file_values() {
        let env: HashMap<&str, &str> = HashMap::from([
            ("PORT", "3100"),
            ("PUBLIC_HOST", "192.168.1.20"),
            ("NODE_ID", "node-b"),
            ("STORAGE_PATH", " "),
        ]);
        let config = AppConfig::default()
            .with_overrides(|key| env.get(key).map(|value| (*value).to_owned()));

        assert_eq!(config.port, 3100);
        assert_eq!(config.public_host, "192.168.1.20");
        assert_eq!(config.node_id, "node-b");
        assert_eq!(config.storage_path, PathBuf::from(DEFAULT_STORAGE_PATH));
    }

    #[test]
    fn invalid_port_override_is_ignored() {
        let config = AppConfig::default().with_overrides(|key| {
            (key == "PORT").then(|| "not-a-port".to_owned())
        });

        assert_eq!(config.port, DEFAULT_PORT);
    }

    #[test]
    fn node_identity_mirrors_config() {
        let config = AppConfig {
            node_id: "node-a".into(),
            ..AppConfig::default()
        };
        let node = config.node_identity();

        assert_eq!(node.id, "node-a");
        assert_eq!(node.port, DEFAULT_PORT);
        assert_eq!(node.public_host, DEFAULT_PUBLIC_HOST);
    }
}

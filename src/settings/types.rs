// Standard library
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;

// 3rd party crates
use serde::Deserialize;
use tokio::sync::RwLock;

#[derive(Debug, Deserialize, Clone)]
pub struct Log {
    #[serde(default = "default_log_level")]
    pub level: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct Store {
    #[serde(default = "default_store_url")]
    pub url: String,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Limits {
    /// Fallback rate-limit string for namespaces without their own entry.
    #[serde(default)]
    pub default: Option<String>,

    /// Per-namespace rate-limit strings, e.g. `hubspot = "100/s"`.
    #[serde(default)]
    pub namespaces: HashMap<String, String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct Settings {
    pub log: Log,
    pub store: Store,

    #[serde(default)]
    pub limits: Limits,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_store_url() -> String {
    "redis://127.0.0.1:6379".to_string()
}

/// Settings that have passed validation.
pub struct ValidatedSettings(pub(super) Settings);

/// Manages the application settings, allowing for loading and reloading
/// configurations.
pub struct ConfigManager {
    pub settings: Arc<RwLock<Settings>>,
    pub(super) config_path: PathBuf,
}

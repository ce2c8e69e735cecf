// Standard library
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::{env, fs};

// 3rd party crates
use config::{Config, ConfigError as FileError, File};
use tokio::sync::RwLock;
use tracing::{error, info};

// Project imports
use crate::quota::RateLimitSpec;

// Current module imports
use super::constants::DEFAULT_CONFIG;
use super::errors::ValidationError;
use super::types::{ConfigManager, Settings, ValidatedSettings};

impl Settings {
    pub fn get_log_level(&self) -> String {
        self.log.level.to_lowercase()
    }

    pub fn store_url(&self) -> &str {
        &self.store.url
    }

    /// Resolves the rate-limit string for `namespace`, falling back to the
    /// configured default. `None` means the namespace has no quota
    /// configured at all; tasks registered under it fail at first
    /// invocation.
    pub fn limit_for(&self, namespace: &str) -> Option<String> {
        self.limits
            .namespaces
            .get(namespace)
            .cloned()
            .or_else(|| self.limits.default.clone())
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        // Validate log level
        match self.log.level.to_lowercase().as_str() {
            "error" | "warn" | "info" | "debug" | "trace" => {}
            _ => return Err(ValidationError::InvalidLogLevel(self.log.level.clone())),
        }

        // Validate store URL
        if self.store.url.is_empty() {
            return Err(ValidationError::MissingStoreUrl);
        }

        // Every configured rate-limit string must parse
        if let Some(default) = &self.limits.default {
            default
                .parse::<RateLimitSpec>()
                .map_err(|source| ValidationError::InvalidRateLimit {
                    scope: "default".to_string(),
                    source,
                })?;
        }
        for (namespace, limit) in &self.limits.namespaces {
            limit
                .parse::<RateLimitSpec>()
                .map_err(|source| ValidationError::InvalidRateLimit {
                    scope: namespace.clone(),
                    source,
                })?;
        }

        Ok(())
    }
}

impl ConfigManager {
    /// Creates a new `ConfigManager` instance by loading and validating the
    /// configuration from the default location.
    pub async fn new() -> Result<Self, Box<dyn std::error::Error>> {
        let config_path: PathBuf = Self::get_config_path()?;
        Self::from_path(&config_path).await
    }

    /// Loads and validates the configuration at `config_path`, creating a
    /// default config file there when none exists.
    pub async fn from_path(config_path: &Path) -> Result<Self, Box<dyn std::error::Error>> {
        Self::ensure_config_file_exists(config_path)?;

        let settings: Settings = Self::load_settings(config_path)?;

        // Validate settings before proceeding
        let validated_settings = ValidatedSettings::new(settings).map_err(|e| {
            error!("Configuration validation failed: {}", e);
            e
        })?;

        Ok(ConfigManager {
            settings: Arc::new(RwLock::new(validated_settings.into_inner())),
            config_path: config_path.to_path_buf(),
        })
    }

    /// Determines the configuration file path.
    fn get_config_path() -> Result<PathBuf, FileError> {
        if let Ok(path) = env::var("TASKGATE_CONFIG_PATH") {
            Ok(PathBuf::from(path))
        } else if let Some(config_dir) = dirs::config_dir() {
            Ok(config_dir.join("taskgate").join("config.toml"))
        } else {
            let msg: &str = "Could not determine the configuration directory";
            error!("{}", msg);
            Err(FileError::Message(msg.into()))
        }
    }

    /// Ensures that the configuration file exists, creating it if necessary.
    fn ensure_config_file_exists(config_path: &Path) -> Result<(), FileError> {
        if !config_path.exists() {
            if let Some(parent_dir) = config_path.parent() {
                fs::create_dir_all(parent_dir).map_err(|e| {
                    let msg: String = format!("Failed to create configuration directory: {}", e);
                    error!("{}", msg);
                    FileError::Message(msg)
                })?;
            }
            fs::write(config_path, DEFAULT_CONFIG).map_err(|e| {
                let msg: String = format!("Failed to create default configuration file: {}", e);
                error!("{}", msg);
                FileError::Message(msg)
            })?;
            info!("Default configuration file created at: {:?}", config_path);
        }
        Ok(())
    }

    /// Loads the settings from the configuration file.
    fn load_settings(config_path: &Path) -> Result<Settings, FileError> {
        let config_file: &str = config_path.to_str().ok_or_else(|| {
            let msg: &str = "Configuration file path contains invalid UTF-8 characters";
            error!("{}", msg);
            FileError::Message(msg.into())
        })?;

        let settings: Config = Config::builder()
            .add_source(File::with_name(config_file))
            .build()?;

        settings.try_deserialize()
    }

    /// Reloads the configuration from the file.
    pub async fn reload(&self) -> Result<(), Box<dyn std::error::Error>> {
        let new_settings: Settings = Self::load_settings(&self.config_path)?;

        // Validate settings before updating
        let validated_settings = ValidatedSettings::new(new_settings).map_err(|e| {
            error!("Configuration validation failed during reload: {}", e);
            e
        })?;

        *self.settings.write().await = validated_settings.into_inner();
        info!("Configuration reloaded from {:?}", self.config_path);
        Ok(())
    }

    /// Provides a read-locked reference to the current settings.
    pub async fn get_settings(&self) -> tokio::sync::RwLockReadGuard<'_, Settings> {
        self.settings.read().await
    }

    pub async fn get_log_level(&self) -> String {
        self.settings.read().await.get_log_level()
    }
}

impl ValidatedSettings {
    pub fn new(settings: Settings) -> Result<Self, ValidationError> {
        settings.validate()?;
        Ok(ValidatedSettings(settings))
    }

    pub fn into_inner(self) -> Settings {
        self.0
    }
}

// Implement Deref to allow transparent access to Settings fields
impl std::ops::Deref for ValidatedSettings {
    type Target = Settings;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

//! Application configuration model.
//!
//! Loaded from `config.toml` by the infrastructure layer. Every section is
//! optional; missing values fall back to the defaults below.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};

use crate::settings::{ApiSettings, DEFAULT_API_URL, DEFAULT_PLATFORM, DEFAULT_USER_CONTEXT};

/// Data directory used in production when none is configured.
pub const PRODUCTION_DATA_DIR: &str = "/data";

/// Data directory used outside production when none is configured.
pub const DEFAULT_DATA_DIR: &str = "./data";

/// Which persistence variant backs the chat.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum StorageMode {
    /// Durable JSON document on disk.
    #[default]
    File,
    /// In-memory sessions with idle expiry.
    Session,
}

#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Environment {
    #[default]
    Development,
    Production,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub mode: StorageMode,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,
}

/// Default API settings for new stores and sessions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    pub url: String,
    pub key: String,
    pub platform: String,
    pub user_context: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_API_URL.to_string(),
            key: String::new(),
            platform: DEFAULT_PLATFORM.to_string(),
            user_context: DEFAULT_USER_CONTEXT.to_string(),
        }
    }
}

impl ApiConfig {
    pub fn to_settings(&self) -> ApiSettings {
        ApiSettings {
            api_url: self.url.clone(),
            api_key: self.key.clone(),
            platform: self.platform.clone(),
            user_context: self.user_context.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive used when `RUST_LOG` is not set.
    pub level: String,
    /// Also write a daily rolling log file.
    pub file: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: false,
        }
    }
}

/// Root of `config.toml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub environment: Environment,
    pub storage: StorageConfig,
    pub api: ApiConfig,
    pub logging: LoggingConfig,
}

impl AppConfig {
    pub fn is_production(&self) -> bool {
        self.environment == Environment::Production
    }

    /// Data directory: configured value, else `/data` in production, else `./data`.
    pub fn data_dir(&self) -> PathBuf {
        match &self.storage.data_dir {
            Some(dir) => dir.clone(),
            None if self.is_production() => PathBuf::from(PRODUCTION_DATA_DIR),
            None => PathBuf::from(DEFAULT_DATA_DIR),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_empty_toml_gives_defaults() {
        let config: AppConfig = toml::from_str("").unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.storage.mode, StorageMode::File);
        assert_eq!(config.api.to_settings(), ApiSettings::default());
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_partial_toml() {
        let config: AppConfig = toml::from_str(
            r#"
            environment = "production"

            [storage]
            mode = "session"

            [api]
            key = "k-123"
            "#,
        )
        .unwrap();
        assert!(config.is_production());
        assert_eq!(config.storage.mode, StorageMode::Session);
        assert_eq!(config.api.key, "k-123");
        assert_eq!(config.api.platform, DEFAULT_PLATFORM);
    }

    #[test]
    fn test_data_dir_precedence() {
        let mut config = AppConfig::default();
        assert_eq!(config.data_dir(), PathBuf::from("./data"));

        config.environment = Environment::Production;
        assert_eq!(config.data_dir(), PathBuf::from("/data"));

        config.storage.data_dir = Some(PathBuf::from("/srv/parlor"));
        assert_eq!(config.data_dir(), PathBuf::from("/srv/parlor"));
    }

    #[test]
    fn test_storage_mode_parsing() {
        assert_eq!(StorageMode::from_str("Session").unwrap(), StorageMode::Session);
        assert_eq!(StorageMode::File.to_string(), "file");
        assert!(StorageMode::from_str("redis").is_err());
    }
}

//! Configuration service implementation.
//!
//! Loads `AppConfig` from `config.toml` (creating it with defaults when
//! missing) and layers environment overrides on top.

use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use parlor_core::config::{AppConfig, Environment, StorageMode};
use parlor_core::{ParlorError, Result};

use crate::paths::ParlorPaths;

pub const ENV_STORAGE: &str = "PARLOR_STORAGE";
pub const ENV_ENVIRONMENT: &str = "PARLOR_ENV";
pub const ENV_DATA_DIR: &str = "DATA_DIR";
pub const ENV_API_URL: &str = "CHAT_API_URL";
pub const ENV_API_KEY: &str = "CHAT_API_KEY";
pub const ENV_API_PLATFORM: &str = "CHAT_API_PLATFORM";
pub const ENV_USER_CONTEXT: &str = "CHAT_USER_CONTEXT";

/// Loads the application configuration from a TOML file.
#[derive(Debug, Clone)]
pub struct ConfigService {
    path: PathBuf,
}

impl ConfigService {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Uses `<config_dir>/parlor/config.toml`.
    pub fn at_default_location() -> Result<Self> {
        Ok(Self::new(ParlorPaths::config_file()?))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the file, then applies overrides from the process environment.
    pub fn load(&self) -> Result<AppConfig> {
        let config = self.load_file()?;
        apply_env_overrides(config, |key| std::env::var(key).ok())
    }

    /// Loads the file only. A missing file is created with defaults.
    pub fn load_file(&self) -> Result<AppConfig> {
        if !self.path.exists() {
            let config = AppConfig::default();
            self.save(&config)?;
            tracing::info!(path = %self.path.display(), "Created default configuration");
            return Ok(config);
        }

        let content = fs::read_to_string(&self.path)?;
        let config: AppConfig = toml::from_str(&content)?;
        tracing::debug!(path = %self.path.display(), "Loaded configuration");
        Ok(config)
    }

    pub fn save(&self, config: &AppConfig) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(config)?;
        fs::write(&self.path, content)?;
        Ok(())
    }
}

/// Applies environment overrides read through `lookup`.
///
/// Empty values are ignored.
pub fn apply_env_overrides<F>(mut config: AppConfig, lookup: F) -> Result<AppConfig>
where
    F: Fn(&str) -> Option<String>,
{
    let get = |key: &str| lookup(key).filter(|v| !v.is_empty());

    if let Some(mode) = get(ENV_STORAGE) {
        config.storage.mode = StorageMode::from_str(&mode).map_err(|_| {
            ParlorError::config(format!(
                "{} must be 'file' or 'session', got '{}'",
                ENV_STORAGE, mode
            ))
        })?;
    }
    if let Some(env) = get(ENV_ENVIRONMENT) {
        config.environment = if env.eq_ignore_ascii_case("production") {
            Environment::Production
        } else {
            Environment::Development
        };
    }
    if let Some(dir) = get(ENV_DATA_DIR) {
        config.storage.data_dir = Some(PathBuf::from(dir));
    }
    if let Some(url) = get(ENV_API_URL) {
        config.api.url = url;
    }
    if let Some(key) = get(ENV_API_KEY) {
        config.api.key = key;
    }
    if let Some(platform) = get(ENV_API_PLATFORM) {
        config.api.platform = platform;
    }
    if let Some(user_context) = get(ENV_USER_CONTEXT) {
        config.api.user_context = user_context;
    }

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::TempDir;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_missing_file_is_created_with_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("parlor").join("config.toml");
        let service = ConfigService::new(path.clone());

        let config = service.load_file().unwrap();
        assert_eq!(config, AppConfig::default());
        assert!(path.exists());

        // Round trip through the file just written.
        assert_eq!(service.load_file().unwrap(), config);
    }

    #[test]
    fn test_invalid_toml_is_serialization_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        fs::write(&path, "[storage\nmode = ").unwrap();

        let err = ConfigService::new(path).load_file().unwrap_err();
        assert!(err.is_serialization());
    }

    #[test]
    fn test_env_overrides() {
        let config = apply_env_overrides(
            AppConfig::default(),
            env(&[
                (ENV_STORAGE, "session"),
                (ENV_ENVIRONMENT, "production"),
                (ENV_API_KEY, "secret"),
                (ENV_API_PLATFORM, ""),
            ]),
        )
        .unwrap();

        assert_eq!(config.storage.mode, StorageMode::Session);
        assert!(config.is_production());
        assert_eq!(config.data_dir(), PathBuf::from("/data"));
        assert_eq!(config.api.key, "secret");
        assert_eq!(config.api.platform, "adhoc");
    }

    #[test]
    fn test_data_dir_env_wins() {
        let config = apply_env_overrides(
            AppConfig::default(),
            env(&[(ENV_DATA_DIR, "/tmp/parlor"), (ENV_ENVIRONMENT, "production")]),
        )
        .unwrap();
        assert_eq!(config.data_dir(), PathBuf::from("/tmp/parlor"));
    }

    #[test]
    fn test_invalid_storage_mode_rejected() {
        let err = apply_env_overrides(AppConfig::default(), env(&[(ENV_STORAGE, "redis")]))
            .unwrap_err();
        assert!(matches!(err, ParlorError::Config(_)));
    }
}

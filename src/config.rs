//! Application configuration
//!
//! Manages the user-facing settings persisted as JSON in the per-user
//! config directory. Defaults are merged under any persisted values on
//! load, so a config file written by an older version stays valid.

use crate::error::{AppError, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tokio::fs;

/// Placeholder token shipped as the default. Treated as "no credential".
pub const DEFAULT_API_TOKEN: &str = "YOUR_TREFLE_API_TOKEN";

/// Which upstream plant-catalogue API to query
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ApiProvider {
    #[default]
    Trefle,
    Perenual,
}

/// Application settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default = "default_api_key")]
    pub api_key: String,
    #[serde(default = "default_theme")]
    pub theme: String,
    #[serde(default = "default_city")]
    pub city: String,
    /// First-run welcome screen shown at most once
    #[serde(default)]
    pub orientation_viewed: bool,
    #[serde(default)]
    pub api_provider: ApiProvider,
}

fn default_api_key() -> String {
    DEFAULT_API_TOKEN.to_string()
}

fn default_theme() -> String {
    "default".to_string()
}

fn default_city() -> String {
    "Winnipeg".to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_key: default_api_key(),
            theme: default_theme(),
            city: default_city(),
            orientation_viewed: false,
            api_provider: ApiProvider::default(),
        }
    }
}

impl AppConfig {
    /// Whether a real API credential is configured. The shipped
    /// placeholder and an empty string both count as unconfigured.
    pub fn has_api_key(&self) -> bool {
        !self.api_key.trim().is_empty() && self.api_key != DEFAULT_API_TOKEN
    }
}

/// Service for loading and saving the application config
#[derive(Clone)]
pub struct ConfigService {
    config_path: PathBuf,
}

impl ConfigService {
    pub fn new(config_dir: PathBuf) -> Self {
        Self {
            config_path: config_dir.join("flora_config.json"),
        }
    }

    /// Default per-user config location (`<config-dir>/flora`)
    pub fn default_dir() -> Result<PathBuf> {
        dirs::config_dir()
            .map(|d| d.join("flora"))
            .ok_or_else(|| AppError::Config("No user config directory available".to_string()))
    }

    /// Load config from disk, falling back to defaults if the file is
    /// missing or unreadable. Missing keys take their default values.
    pub async fn load(&self) -> AppConfig {
        let content = match fs::read_to_string(&self.config_path).await {
            Ok(content) => content,
            Err(_) => {
                tracing::info!("Config file not found, using defaults");
                return AppConfig::default();
            }
        };

        match serde_json::from_str(&content) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!("Failed to parse config, using defaults: {}", e);
                AppConfig::default()
            }
        }
    }

    /// Save config to disk, creating the config directory if needed
    pub async fn save(&self, config: &AppConfig) -> Result<()> {
        if let Some(parent) = self.config_path.parent() {
            fs::create_dir_all(parent).await?;
        }

        let content = serde_json::to_string_pretty(config)?;
        fs::write(&self.config_path, content).await?;

        tracing::info!("Config saved to {:?}", self.config_path);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn create_test_service() -> (ConfigService, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let service = ConfigService::new(temp_dir.path().to_path_buf());
        (service, temp_dir)
    }

    #[tokio::test]
    async fn test_defaults_when_file_missing() {
        let (service, _temp) = create_test_service();

        let config = service.load().await;

        assert_eq!(config.api_key, DEFAULT_API_TOKEN);
        assert_eq!(config.theme, "default");
        assert_eq!(config.city, "Winnipeg");
        assert!(!config.orientation_viewed);
        assert_eq!(config.api_provider, ApiProvider::Trefle);
    }

    #[tokio::test]
    async fn test_save_and_reload() {
        let (service, _temp) = create_test_service();

        let mut config = AppConfig::default();
        config.api_key = "abc123".to_string();
        config.city = "Lisbon".to_string();
        config.api_provider = ApiProvider::Perenual;
        service.save(&config).await.unwrap();

        let loaded = service.load().await;
        assert_eq!(loaded.api_key, "abc123");
        assert_eq!(loaded.city, "Lisbon");
        assert_eq!(loaded.api_provider, ApiProvider::Perenual);
    }

    #[tokio::test]
    async fn test_partial_file_merges_defaults_under_values() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("flora_config.json");
        std::fs::write(&path, r#"{"city": "Oslo"}"#).unwrap();

        let service = ConfigService::new(temp_dir.path().to_path_buf());
        let config = service.load().await;

        assert_eq!(config.city, "Oslo");
        assert_eq!(config.theme, "default");
        assert_eq!(config.api_provider, ApiProvider::Trefle);
    }

    #[tokio::test]
    async fn test_corrupt_file_falls_back_to_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("flora_config.json");
        std::fs::write(&path, "not json{{").unwrap();

        let service = ConfigService::new(temp_dir.path().to_path_buf());
        let config = service.load().await;

        assert_eq!(config.city, "Winnipeg");
    }

    #[test]
    fn test_has_api_key() {
        let mut config = AppConfig::default();
        assert!(!config.has_api_key());

        config.api_key = String::new();
        assert!(!config.has_api_key());

        config.api_key = "real-token".to_string();
        assert!(config.has_api_key());
    }
}

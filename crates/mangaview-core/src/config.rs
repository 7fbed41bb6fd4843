//! Application configuration management.
//!
//! Configuration is stored at `~/.config/mangaview/config.json`. Every field
//! is optional; a missing file or field falls back to the built-in default.

use std::path::PathBuf;

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::api::DEFAULT_MANIFEST_URL;
use crate::cache::CACHE_NAME;

/// Application name used for config/cache directory paths
const APP_NAME: &str = "mangaview";

/// Config file name
const CONFIG_FILE: &str = "config.json";

/// Site the precached assets are served from.
pub const DEFAULT_ORIGIN: &str = "http://localhost:8080";

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub manifest_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub origin: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cache_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub offline_cache: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fullscreen_button: Option<bool>,
}

impl Config {
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;
        if path.exists() {
            let contents = std::fs::read_to_string(&path)?;
            Ok(serde_json::from_str(&contents)?)
        } else {
            Ok(Self::default())
        }
    }

    fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find config directory"))?;
        Ok(config_dir.join(APP_NAME).join(CONFIG_FILE))
    }

    pub fn cache_dir(&self) -> Result<PathBuf> {
        let cache_dir = dirs::cache_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find cache directory"))?;
        Ok(cache_dir.join(APP_NAME))
    }

    pub fn manifest_url(&self) -> &str {
        self.manifest_url.as_deref().unwrap_or(DEFAULT_MANIFEST_URL)
    }

    pub fn origin(&self) -> &str {
        self.origin.as_deref().unwrap_or(DEFAULT_ORIGIN)
    }

    pub fn cache_name(&self) -> &str {
        self.cache_name.as_deref().unwrap_or(CACHE_NAME)
    }

    pub fn offline_cache_enabled(&self) -> bool {
        self.offline_cache.unwrap_or(true)
    }

    pub fn fullscreen_button_enabled(&self) -> bool {
        self.fullscreen_button.unwrap_or(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_when_fields_missing() {
        let config: Config = serde_json::from_str("{}").unwrap();
        assert_eq!(config.manifest_url(), DEFAULT_MANIFEST_URL);
        assert_eq!(config.origin(), "http://localhost:8080");
        assert_eq!(config.cache_name(), "manga-viewer-cache-v1");
        assert!(config.offline_cache_enabled());
        assert!(config.fullscreen_button_enabled());
    }

    #[test]
    fn test_overrides_are_read() {
        let config: Config = serde_json::from_str(
            r#"{"manifest_url": "https://example.com/m.json", "offline_cache": false}"#,
        )
        .unwrap();
        assert_eq!(config.manifest_url(), "https://example.com/m.json");
        assert!(!config.offline_cache_enabled());
    }

    #[test]
    fn test_unset_fields_are_not_written() {
        let json = serde_json::to_string(&Config::default()).unwrap();
        assert_eq!(json, "{}");
    }
}

//! Configuration management for StreamVault
//!
//! Handles config file loading/saving and API credentials.
//! Config is stored at ~/.config/streamvault/config.toml
//!
//! Both credentials are optional: a missing key is not a startup failure,
//! it switches the corresponding client into degraded placeholder mode.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// OMDb API key (search + detail)
    pub omdb_api_key: Option<String>,
    /// YouTube Data API key (trailer lookup)
    pub youtube_api_key: Option<String>,
}

impl Config {
    /// Get config file path (~/.config/streamvault/config.toml)
    pub fn path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("streamvault").join("config.toml"))
    }

    /// Load config from file (if any), then apply environment overrides:
    /// `OMDB_API_KEY` and `YOUTUBE_API_KEY` win over file values.
    pub fn load() -> Self {
        let mut config: Self = Self::path()
            .and_then(|p| std::fs::read_to_string(p).ok())
            .and_then(|s| toml::from_str(&s).ok())
            .unwrap_or_default();

        if let Ok(key) = std::env::var("OMDB_API_KEY") {
            if !key.is_empty() {
                config.omdb_api_key = Some(key);
            }
        }
        if let Ok(key) = std::env::var("YOUTUBE_API_KEY") {
            if !key.is_empty() {
                config.youtube_api_key = Some(key);
            }
        }

        config
    }

    /// Apply key updates, leaving unspecified keys untouched. Returns
    /// whether any update was requested.
    pub fn update_keys(&mut self, omdb: Option<String>, youtube: Option<String>) -> bool {
        let mut changed = false;
        if let Some(key) = omdb {
            self.omdb_api_key = Some(key);
            changed = true;
        }
        if let Some(key) = youtube {
            self.youtube_api_key = Some(key);
            changed = true;
        }
        changed
    }

    /// Save config to file
    pub fn save(&self) -> Result<()> {
        let path =
            Self::path().ok_or_else(|| anyhow::anyhow!("Could not determine config path"))?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let toml = toml::to_string_pretty(self)?;
        std::fs::write(path, toml)?;
        Ok(())
    }
}

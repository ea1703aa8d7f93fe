// src/config.rs v2
//! Configuration management

use crate::error::{Result, ViewerError};
use crate::wspr::bands;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ViewerConfig {
    /// Band label looked up in the band table, e.g. "10m (28)".
    pub band: String,
    /// How far back the spot query reaches, in hours.
    pub window_hours: u32,
    /// Maximum rows requested from the database.
    pub row_limit: u32,
    /// Spot database endpoint.
    pub endpoint: String,
    /// Budget for the blocking fetch, in seconds.
    pub http_timeout_secs: u64,
    /// Where map tiles are cached. Defaults under ~/.cache when unset.
    pub tile_cache_dir: Option<PathBuf>,
    /// Initial map view.
    pub map_center_lat: f64,
    pub map_center_lon: f64,
    pub map_zoom: u8,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            band: bands::DEFAULT_BAND_LABEL.to_string(),
            window_hours: 1,
            row_limit: 500,
            endpoint: "https://db1.wspr.live/".to_string(),
            http_timeout_secs: 25,
            tile_cache_dir: None,
            map_center_lat: 30.0,
            map_center_lon: 0.0,
            map_zoom: 2,
        }
    }
}

impl ViewerConfig {
    /// Load configuration from the config file, falling back to defaults
    /// when the file does not exist yet.
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(&config_path)
            .map_err(|e| ViewerError::Other(format!("Failed to read config file: {}", e)))?;

        let config: Self = serde_json::from_str(&contents)
            .map_err(|e| ViewerError::Other(format!("Failed to parse config file: {}", e)))?;

        Ok(config)
    }

    /// Save configuration to the config file.
    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path()?;

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| ViewerError::Other(format!("Failed to create config directory: {}", e)))?;
        }

        let contents = serde_json::to_string_pretty(self)?;

        std::fs::write(&config_path, contents)
            .map_err(|e| ViewerError::Other(format!("Failed to write config file: {}", e)))?;

        Ok(())
    }

    fn config_path() -> Result<PathBuf> {
        let home = std::env::var("HOME")
            .map_err(|_| ViewerError::Other("HOME environment variable not set".to_string()))?;

        Ok(PathBuf::from(home)
            .join(".config")
            .join("wspr-viewer")
            .join("config.json"))
    }

    /// Resolved tile cache directory.
    pub fn tile_cache_dir(&self) -> Result<PathBuf> {
        if let Some(ref dir) = self.tile_cache_dir {
            return Ok(dir.clone());
        }

        let home = std::env::var("HOME")
            .map_err(|_| ViewerError::Other("HOME environment variable not set".to_string()))?;

        Ok(PathBuf::from(home)
            .join(".cache")
            .join("wspr-viewer")
            .join("tiles"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ViewerConfig::default();

        assert_eq!(config.band, "10m (28)");
        assert_eq!(config.window_hours, 1);
        assert_eq!(config.row_limit, 500);
        assert_eq!(config.http_timeout_secs, 25);
        assert_eq!(config.map_zoom, 2);
        assert!(bands::band_by_label(&config.band).is_some());
    }

    #[test]
    fn test_json_round_trip() {
        let mut config = ViewerConfig::default();
        config.band = "2m (144)".to_string();
        config.window_hours = 6;

        let json = serde_json::to_string(&config).unwrap();
        let restored: ViewerConfig = serde_json::from_str(&json).unwrap();

        assert_eq!(restored.band, "2m (144)");
        assert_eq!(restored.window_hours, 6);
        assert_eq!(restored.endpoint, config.endpoint);
    }
}

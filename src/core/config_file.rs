//! User configuration file handling
//!
//! Manages settings from ~/.config/ghht/settings.json

use crate::geometry::RasterStrategy;
use crate::layout::Padding;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// User configuration from ~/.config/ghht/settings.json
///
/// These settings override built-in defaults but are overridden by CLI arguments
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ConfigFile {
    /// UFO font used when --font-file is not given
    pub font_file: Option<PathBuf>,
    pub px_step: Option<u32>,
    pub line_height: Option<i32>,
    pub per_glyph_height: Option<bool>,
    pub intensity: Option<u32>,
    pub padding: Option<Padding>,
    pub raster: Option<RasterStrategy>,
}

impl ConfigFile {
    /// Get the path to the ghht config directory
    pub fn config_dir() -> PathBuf {
        let config_dir = dirs::config_dir()
            .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")));
        config_dir.join("ghht")
    }

    /// Get the path to the user config file
    pub fn config_path() -> PathBuf {
        Self::config_dir().join("settings.json")
    }

    /// Load configuration from the user config file
    pub fn load() -> Option<Self> {
        Self::load_from(&Self::config_path())
    }

    /// Load configuration from `path`, `None` when missing or unreadable
    pub fn load_from(path: &Path) -> Option<Self> {
        if !path.exists() {
            return None;
        }

        match fs::read_to_string(path) {
            Ok(contents) => match serde_json::from_str(&contents) {
                Ok(config) => {
                    debug!("Loaded user settings from {:?}", path);
                    Some(config)
                }
                Err(e) => {
                    warn!("Failed to parse settings.json: {}", e);
                    None
                }
            },
            Err(e) => {
                warn!("Failed to read settings.json: {}", e);
                None
            }
        }
    }

    /// Save configuration to `path`
    pub fn save_to(&self, path: &Path) -> anyhow::Result<()> {
        // Create parent directory if it doesn't exist
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let contents = serde_json::to_string_pretty(self)?;
        fs::write(path, contents)?;

        debug!("Saved settings to {:?}", path);
        Ok(())
    }

    /// Settings written by --new-config
    pub fn example() -> Self {
        Self {
            font_file: None,
            px_step: Some(200),
            line_height: None,
            per_glyph_height: Some(false),
            intensity: Some(1),
            padding: Some(Padding::default()),
            raster: Some(RasterStrategy::default()),
        }
    }

    /// Initialize the user configuration directory
    ///
    /// This creates:
    /// 1. The ~/.config/ghht directory
    /// 2. A settings.json file with default values
    /// 3. A logs/ directory for application logs
    pub fn initialize_config_directory() -> anyhow::Result<()> {
        Self::initialize_in(&Self::config_dir())
    }

    pub fn initialize_in(config_dir: &Path) -> anyhow::Result<()> {
        fs::create_dir_all(config_dir)?;
        println!("Created config directory: {:?}", config_dir);

        let logs_dir = config_dir.join("logs");
        fs::create_dir_all(&logs_dir)?;
        println!("Created logs directory: {:?}", logs_dir);

        let settings_path = config_dir.join("settings.json");
        if !settings_path.exists() {
            Self::example().save_to(&settings_path)?;
            println!("Created settings file: {:?}", settings_path);
        } else {
            println!("Settings file already exists: {:?}", settings_path);
        }

        println!("\nConfiguration initialized successfully!");
        println!("You can now:");
        println!("  - Set font_file in: {:?}", settings_path);
        println!("  - View application logs in: {:?}", logs_dir);

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initialize_and_reload() {
        let dir = tempfile::tempdir().unwrap();
        let config_dir = dir.path().join("ghht");
        ConfigFile::initialize_in(&config_dir).unwrap();

        assert!(config_dir.join("logs").is_dir());
        let loaded = ConfigFile::load_from(&config_dir.join("settings.json")).unwrap();
        assert_eq!(loaded, ConfigFile::example());
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, r#"{ "px_step": 100, "raster": "even-odd" }"#).unwrap();

        let loaded = ConfigFile::load_from(&path).unwrap();
        assert_eq!(loaded.px_step, Some(100));
        assert_eq!(loaded.raster, Some(RasterStrategy::EvenOdd));
        assert_eq!(loaded.font_file, None);
        assert_eq!(loaded.padding, None);
    }

    #[test]
    fn test_invalid_file_is_ignored() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, "not json").unwrap();
        assert_eq!(ConfigFile::load_from(&path), None);
        assert_eq!(ConfigFile::load_from(&dir.path().join("missing.json")), None);
    }
}

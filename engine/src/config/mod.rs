//! Config Module
//!
//! Centralized, JSON-backed configuration for the input sampler, the menu
//! interaction engine and the presentation surface. Every section has a
//! `Default` matching the built-in constants, so a missing file or a missing
//! field simply falls back to defaults.

pub mod input_config;
pub mod menu_config;
pub mod surface_config;

use std::path::Path;

use serde::{Deserialize, Serialize};

pub use input_config::InputSettings;
pub use menu_config::MenuSettings;
pub use surface_config::{SafeArea, ScalingMode, SurfaceSettings};

// ============================================================================
// ERROR TYPE
// ============================================================================

/// Errors that can occur while loading or saving configuration files.
#[derive(Debug)]
pub enum ConfigError {
    /// Standard I/O error.
    IoError(std::io::Error),
    /// JSON serialization/deserialization error.
    JsonError(serde_json::Error),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::IoError(e) => write!(f, "IO error: {e}"),
            ConfigError::JsonError(e) => write!(f, "JSON error: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::IoError(e)
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(e: serde_json::Error) -> Self {
        ConfigError::JsonError(e)
    }
}

// ============================================================================
// ENGINE CONFIG
// ============================================================================

/// Top-level configuration file contents.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub input: InputSettings,
    pub menu: MenuSettings,
    pub surface: SurfaceSettings,
}

impl EngineConfig {
    /// Load the configuration from `path`.
    ///
    /// A missing file yields the defaults; a malformed file is an error so a
    /// typo never silently resets the user's settings.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let data = match std::fs::read_to_string(path) {
            Ok(data) => data,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::info!("no config at {}, using defaults", path.display());
                return Ok(Self::default());
            }
            Err(e) => return Err(e.into()),
        };
        Ok(serde_json::from_str(&data)?)
    }

    /// Persist the configuration to `path` as pretty JSON.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();
        let json = serde_json::to_string_pretty(self)?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, json)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> std::path::PathBuf {
        std::env::temp_dir()
            .join(format!("menu_forge_config_{}_{name}", std::process::id()))
            .join("config.json")
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let config = EngineConfig::load(temp_path("missing")).unwrap();
        assert_eq!(config, EngineConfig::default());
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let config: EngineConfig =
            serde_json::from_str(r#"{ "menu": { "repeat_delay": 0.5 } }"#).unwrap();
        assert_eq!(config.menu.repeat_delay, 0.5);
        assert_eq!(config.menu.repeat_interval, MenuSettings::default().repeat_interval);
        assert_eq!(config.input, InputSettings::default());
    }

    #[test]
    fn test_save_then_load() {
        let path = temp_path("save");
        let mut config = EngineConfig::default();
        config.input.stick_deadzone = 0.25;
        config.surface.mode = ScalingMode::Stretch;
        config.save(&path).unwrap();

        let loaded = EngineConfig::load(&path).unwrap();
        assert_eq!(loaded, config);
        let _ = std::fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn test_malformed_file_is_error() {
        let path = temp_path("malformed");
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, "{ not json").unwrap();
        assert!(matches!(EngineConfig::load(&path), Err(ConfigError::JsonError(_))));
        let _ = std::fs::remove_dir_all(path.parent().unwrap());
    }
}

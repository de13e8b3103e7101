//! `citadel.yaml`: where the save file lives plus the engine settings.
//!
//! ```yaml
//! storage:
//!   save_path: citadel-save.json
//!   city_name: Rivenhold
//! selection:
//!   threshold_max: 100
//! turn:
//!   seed: 42
//! ```
//!
//! The `selection` and `turn` sections are the engine's own
//! [`EngineConfig`], read from the same document.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use citadel_events::{ConfigError, EngineConfig};

/// Everything the binary reads from its config file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct AppConfig {
    /// Save file settings.
    #[serde(default)]
    pub storage: StorageConfig,

    /// Event engine settings.
    #[serde(flatten)]
    pub engine: EngineConfig,
}

impl AppConfig {
    /// Load configuration from a YAML file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    /// Parse configuration from a YAML string.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yml::from_str(yaml)?;
        config.engine.validate()?;
        Ok(config)
    }
}

/// Where and under which name the city is kept.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct StorageConfig {
    /// JSON save file. Created on first start.
    #[serde(default = "default_save_path")]
    pub save_path: PathBuf,

    /// Name of the city founded when the save file holds none.
    #[serde(default = "default_city_name")]
    pub city_name: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            save_path: default_save_path(),
            city_name: default_city_name(),
        }
    }
}

fn default_save_path() -> PathBuf {
    PathBuf::from("citadel-save.json")
}

fn default_city_name() -> String {
    "Rivenhold".to_owned()
}

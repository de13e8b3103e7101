//! Engine configuration loaded from YAML.
//!
//! Every field has a default, so an empty document is a valid
//! configuration:
//!
//! ```yaml
//! selection:
//!   threshold_max: 100
//!   disabled_events: [riot]
//! turn:
//!   quiet_turn_message: "It was a quiet year. Nothing happened out of the ordinary."
//!   seed: 42
//! ```

use std::path::Path;

use serde::Deserialize;

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },

    /// A value is outside its allowed range.
    #[error("invalid config value for {field}: {reason}")]
    Invalid {
        /// Dotted path of the offending field.
        field: &'static str,
        /// What is wrong with it.
        reason: &'static str,
    },
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Top-level engine configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct EngineConfig {
    /// Event selection settings.
    #[serde(default)]
    pub selection: SelectionConfig,

    /// Turn orchestration settings.
    #[serde(default)]
    pub turn: TurnConfig,
}

impl EngineConfig {
    /// Load configuration from a YAML file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    /// Parse configuration from a YAML string.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Check value ranges serde can't express.
    pub const fn validate(&self) -> Result<(), ConfigError> {
        if self.selection.threshold_max == 0 {
            return Err(ConfigError::Invalid {
                field: "selection.threshold_max",
                reason: "must be greater than zero",
            });
        }
        Ok(())
    }
}

/// Probability-weighted selection.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SelectionConfig {
    /// Exclusive upper bound of the shared per-turn threshold. Event
    /// probabilities are stated in percent and rescaled to
    /// `0..=threshold_max`, so this sets the resolution of the draw, not
    /// the odds.
    #[serde(default = "default_threshold_max")]
    pub threshold_max: u32,

    /// Event keys left out of selection. Decisions already deferred for
    /// them can still be resolved.
    #[serde(default)]
    pub disabled_events: Vec<String>,
}

impl Default for SelectionConfig {
    fn default() -> Self {
        Self {
            threshold_max: default_threshold_max(),
            disabled_events: Vec::new(),
        }
    }
}

/// Turn orchestration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TurnConfig {
    /// Reported when no event fires in a year.
    #[serde(default = "default_quiet_turn_message")]
    pub quiet_turn_message: String,

    /// Seed for the turn RNG. Absent means OS entropy.
    #[serde(default)]
    pub seed: Option<u64>,
}

impl Default for TurnConfig {
    fn default() -> Self {
        Self {
            quiet_turn_message: default_quiet_turn_message(),
            seed: None,
        }
    }
}

const fn default_threshold_max() -> u32 {
    100
}

fn default_quiet_turn_message() -> String {
    "It was a quiet year. Nothing happened out of the ordinary.".to_owned()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_uses_defaults() {
        let config = EngineConfig::parse("{}").unwrap();
        assert_eq!(config, EngineConfig::default());
        assert_eq!(config.selection.threshold_max, 100);
        assert!(config.turn.seed.is_none());
        assert!(config.turn.quiet_turn_message.starts_with("It was a quiet year"));
    }

    #[test]
    fn parse_full_yaml() {
        let yaml = r"
selection:
  threshold_max: 1000
  disabled_events:
    - riot
    - plague
turn:
  quiet_turn_message: Nothing to report.
  seed: 7
";
        let config = EngineConfig::parse(yaml).unwrap();
        assert_eq!(config.selection.threshold_max, 1000);
        assert_eq!(config.selection.disabled_events, vec!["riot", "plague"]);
        assert_eq!(config.turn.quiet_turn_message, "Nothing to report.");
        assert_eq!(config.turn.seed, Some(7));
    }

    #[test]
    fn zero_threshold_is_rejected() {
        let result = EngineConfig::parse("selection:\n  threshold_max: 0\n");
        assert!(matches!(
            result,
            Err(ConfigError::Invalid {
                field: "selection.threshold_max",
                ..
            })
        ));
    }

    #[test]
    fn malformed_yaml_is_an_error() {
        let result = EngineConfig::parse("selection: [unclosed");
        assert!(matches!(result, Err(ConfigError::Yaml { .. })));
    }
}

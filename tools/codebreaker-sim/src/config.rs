//! Simulator configuration (codebreaker.toml)
//!
//! Every field has a default, so an empty file is a valid configuration.

use std::fs;
use std::path::{Path, PathBuf};

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use codebreaker_input::POLL_INTERVAL_MS;

/// How scripted touches reach the touch channel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Delivery {
    /// The game polls a touch source on every wait cycle
    Poll,
    /// A feeder thread writes into the channel like a pen-down interrupt
    Interrupt,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Panel width in pixels
    pub width: u32,
    /// Panel height in pixels (also used to flip raw touch Y)
    pub height: u16,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        // ILI9341 in portrait
        Self {
            width: 240,
            height: 320,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct TimingConfig {
    /// Sleep between polls of the touch channel
    pub poll_interval_ms: u32,
    /// Pause between two scripted taps
    pub tap_interval_ms: u32,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            poll_interval_ms: POLL_INTERVAL_MS,
            tap_interval_ms: 300,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct ScriptConfig {
    /// One answer per level, typed on the on-screen keyboard
    pub answers: Vec<String>,
    /// Number of complete games to play
    pub rounds: usize,
    pub delivery: Delivery,
    /// Print every refreshed screen
    pub render: bool,
}

impl Default for ScriptConfig {
    fn default() -> Self {
        Self {
            answers: vec![
                "HELLO".to_string(),
                "USER_123".to_string(),
                "101".to_string(),
                "DYNAMIC PROGRAMMING".to_string(),
                "THE SECRET IS IN THE LAST LEVEL".to_string(),
            ],
            rounds: 1,
            delivery: Delivery::Poll,
            render: true,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct SimConfig {
    pub display: DisplayConfig,
    pub timing: TimingConfig,
    pub script: ScriptConfig,
}

impl SimConfig {
    /// Load and validate a config file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.display.width == 0 || self.display.height == 0 {
            return Err(ConfigError::Invalid(format!(
                "display must be non-empty, got {}x{}",
                self.display.width, self.display.height
            )));
        }
        if self.timing.poll_interval_ms == 0 {
            return Err(ConfigError::Invalid(
                "timing.poll_interval_ms must be at least 1".to_string(),
            ));
        }
        if self.script.rounds == 0 {
            return Err(ConfigError::Invalid(
                "script.rounds must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Commented TOML with every default filled in
    pub fn default_toml() -> String {
        let body = toml::to_string_pretty(&Self::default())
            .unwrap_or_else(|e| format!("# failed to serialize defaults: {}\n", e));
        format!(
            "# CodeBreaker simulator configuration\n\
             # Generated by: codebreaker-sim generate config\n\n{}",
            body
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_empty_file_uses_defaults() {
        let config = SimConfig::parse("").unwrap();
        assert_eq!(config, SimConfig::default());
        assert_eq!(config.display.height, 320);
        assert_eq!(config.timing.poll_interval_ms, 100);
        assert_eq!(config.script.delivery, Delivery::Poll);
    }

    #[test]
    fn test_partial_override() {
        let config = SimConfig::parse(
            r#"
            [timing]
            tap_interval_ms = 50

            [script]
            answers = ["HELLO"]
            delivery = "interrupt"
            rounds = 2
            "#,
        )
        .unwrap();

        assert_eq!(config.timing.tap_interval_ms, 50);
        assert_eq!(config.timing.poll_interval_ms, 100);
        assert_eq!(config.script.answers, ["HELLO"]);
        assert_eq!(config.script.delivery, Delivery::Interrupt);
        assert_eq!(config.script.rounds, 2);
        assert!(config.script.render);
    }

    #[test]
    fn test_invalid_values_rejected() {
        let err = SimConfig::parse("[script]\nrounds = 0\n").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));

        let err = SimConfig::parse("[display]\nwidth = 0\n").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));

        let err = SimConfig::parse("[script]\ndelivery = \"dma\"\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[display]\nwidth = 320\nheight = 240").unwrap();

        let config = SimConfig::load(file.path()).unwrap();
        assert_eq!(config.display, DisplayConfig { width: 320, height: 240 });
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = SimConfig::load(&dir.path().join("nope.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }

    #[test]
    fn test_generated_config_round_trips() {
        let config = SimConfig::parse(&SimConfig::default_toml()).unwrap();
        assert_eq!(config, SimConfig::default());
    }
}

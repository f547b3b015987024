//! Configuration for the fairway engine and feedback ledger.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};

/// Main configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub ledger: LedgerConfig,
    pub review: ReviewConfig,
    pub extraction: ExtractionConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(ConfigError::ReadFile)?;
        Self::from_str(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn from_str(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content).map_err(ConfigError::Parse)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from default locations or use defaults.
    pub fn load() -> Result<Self> {
        let config_paths = [
            // Current directory
            PathBuf::from("fairway.toml"),
            PathBuf::from("config.toml"),
            // User config directory
            dirs::config_dir()
                .map(|p| p.join("fairway/config.toml"))
                .unwrap_or_default(),
            // Home directory
            dirs::home_dir()
                .map(|p| p.join(".fairway/config.toml"))
                .unwrap_or_default(),
        ];

        for path in &config_paths {
            if path.exists() {
                tracing::info!("Loading config from: {}", path.display());
                return Self::from_file(path);
            }
        }

        tracing::info!("No config file found, using defaults");
        Ok(Config::default())
    }

    /// Validate the configuration.
    fn validate(&self) -> Result<()> {
        if self.ledger.data_dir.is_empty() {
            return Err(ConfigError::MissingField("ledger.data_dir".to_string()).into());
        }
        if !(0.0..=1.0).contains(&self.review.min_confidence) {
            return Err(
                ConfigError::Invalid("review.min_confidence must be in 0.0..=1.0".to_string())
                    .into(),
            );
        }
        if self.extraction.max_player_count == 0 {
            return Err(
                ConfigError::Invalid("extraction.max_player_count must be > 0".to_string()).into(),
            );
        }
        Ok(())
    }

    /// Expand the ledger data directory path.
    pub fn data_dir(&self) -> PathBuf {
        let expanded = shellexpand::tilde(&self.ledger.data_dir);
        PathBuf::from(expanded.as_ref())
    }
}

/// Feedback ledger storage.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LedgerConfig {
    /// Directory holding the JSONL feedback log. Tilde is expanded.
    pub data_dir: String,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            data_dir: "~/.fairway/feedback".to_string(),
        }
    }
}

/// Review workflow thresholds.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReviewConfig {
    /// Extractions below this confidence land in the review queue.
    pub min_confidence: f32,
}

impl Default for ReviewConfig {
    fn default() -> Self {
        Self {
            min_confidence: 0.5,
        }
    }
}

/// Extraction engine toggles.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Consult an injected fuzzy date backend when one is attached.
    pub enable_fuzzy_dates: bool,
    /// Run the person-name recognizer fallback.
    pub enable_ner: bool,
    /// Upper bound for accepted player counts.
    pub max_player_count: u32,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            enable_fuzzy_dates: true,
            enable_ner: true,
            max_player_count: 100,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.review.min_confidence, 0.5);
        assert!(config.extraction.enable_ner);
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let config = Config::from_str(
            r#"
            [review]
            min_confidence = 0.7
            "#,
        )
        .unwrap();
        assert_eq!(config.review.min_confidence, 0.7);
        assert_eq!(config.ledger.data_dir, "~/.fairway/feedback");
        assert_eq!(config.extraction.max_player_count, 100);
    }

    #[test]
    fn test_invalid_confidence_rejected() {
        let result = Config::from_str(
            r#"
            [review]
            min_confidence = 1.5
            "#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_empty_data_dir_rejected() {
        let result = Config::from_str(
            r#"
            [ledger]
            data_dir = ""
            "#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_data_dir_tilde_expansion() {
        let config = Config::default();
        let dir = config.data_dir();
        assert!(!dir.to_string_lossy().starts_with('~'));
    }
}

//! Configuration management for the skill sync tool

use crate::error::{Result, SkillSyncError};
use crate::processing::batch::FailurePolicy;
use crate::processing::keyword_matcher::MatchMode;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    pub matching: MatchingConfig,
    pub processing: ProcessingConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchingConfig {
    pub mode: MatchMode,
    /// Inclusive lower bound (0-100) for rows kept in the filtered table
    pub min_percentage: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessingConfig {
    pub on_error: FailurePolicy,
    pub enable_caching: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub detailed: bool,
    pub color_output: bool,
    pub pretty_json: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutputFormat {
    Console,
    Json,
    Csv,
    Markdown,
    Html,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            matching: MatchingConfig {
                mode: MatchMode::Substring,
                min_percentage: 50,
            },
            processing: ProcessingConfig {
                on_error: FailurePolicy::Abort,
                enable_caching: true,
            },
            output: OutputConfig {
                format: OutputFormat::Console,
                detailed: false,
                color_output: true,
                pretty_json: true,
            },
        }
    }
}

impl Config {
    /// Load the configuration at `config_path`, writing defaults on first use
    pub fn load_from(config_path: &Path) -> Result<Self> {
        if config_path.exists() {
            let content = std::fs::read_to_string(config_path)?;
            let config: Config = toml::from_str(&content)
                .map_err(|e| SkillSyncError::Configuration(format!("Failed to parse config: {}", e)))?;
            config.validate()?;
            Ok(config)
        } else {
            let config = Self::default();
            config.save_to(config_path)?;
            Ok(config)
        }
    }

    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| SkillSyncError::Configuration(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
            .join("skill-sync")
            .join("config.toml")
    }

    pub fn validate(&self) -> Result<()> {
        if self.matching.min_percentage > 100 {
            return Err(SkillSyncError::Configuration(format!(
                "matching.min_percentage must be between 0 and 100, got {}",
                self.matching.min_percentage
            )));
        }
        Ok(())
    }

    /// Set a single value addressed by a dotted key such as `matching.mode`
    pub fn set_value(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "matching.mode" => {
                self.matching.mode = match value.to_lowercase().as_str() {
                    "substring" => MatchMode::Substring,
                    "whole-word" | "wholeword" | "whole_word" => MatchMode::WholeWord,
                    _ => return Err(invalid_value(key, value)),
                };
            }
            "matching.min_percentage" => {
                self.matching.min_percentage = parse_percentage(value)
                    .ok_or_else(|| invalid_value(key, value))?;
            }
            "processing.on_error" => {
                self.processing.on_error = match value.to_lowercase().as_str() {
                    "abort" => FailurePolicy::Abort,
                    "skip" => FailurePolicy::Skip,
                    _ => return Err(invalid_value(key, value)),
                };
            }
            "processing.enable_caching" => {
                self.processing.enable_caching = parse_bool(key, value)?;
            }
            "output.format" => {
                self.output.format = crate::cli::parse_output_format(value)
                    .map_err(SkillSyncError::Configuration)?;
            }
            "output.detailed" => self.output.detailed = parse_bool(key, value)?,
            "output.color_output" => self.output.color_output = parse_bool(key, value)?,
            "output.pretty_json" => self.output.pretty_json = parse_bool(key, value)?,
            _ => {
                return Err(SkillSyncError::Configuration(format!(
                    "Unknown configuration key: {}",
                    key
                )))
            }
        }
        Ok(())
    }
}

/// Parse an integer percentage in 0..=100
pub fn parse_percentage(value: &str) -> Option<u8> {
    value.trim().parse::<u8>().ok().filter(|p| *p <= 100)
}

fn parse_bool(key: &str, value: &str) -> Result<bool> {
    value
        .trim()
        .parse::<bool>()
        .map_err(|_| invalid_value(key, value))
}

fn invalid_value(key: &str, value: &str) -> SkillSyncError {
    SkillSyncError::Configuration(format!("Invalid value '{}' for {}", value, key))
}

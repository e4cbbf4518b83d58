//! Configuration management for the CLI.

use crate::error::{CliError, Result};
use glucoqa_domain::{KnowledgeBase, Role};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// CLI configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Role used when none is given on the command line
    #[serde(default)]
    pub default_role: Role,

    /// Alternative authored knowledge base (TOML); built-in content when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub knowledge_base: Option<PathBuf>,

    /// Global settings
    #[serde(default)]
    pub settings: Settings,
}

/// Global CLI settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Enable colored output
    #[serde(default = "default_true")]
    pub color: bool,

    /// Default output format
    #[serde(default = "default_format")]
    pub format: OutputFormat,

    /// Readline history size
    #[serde(default = "default_history_size")]
    pub history_size: usize,

    /// Number of questions shown by `history` when no count is given
    #[serde(default = "default_recent_limit")]
    pub recent_limit: usize,
}

/// Output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable text and tables
    Table,
    /// JSON format
    Json,
    /// Quiet (minimal) format
    Quiet,
}

impl Config {
    /// Get the default configuration file path.
    pub fn path() -> Result<PathBuf> {
        Ok(data_dir()?.join("config.toml"))
    }

    /// Load configuration from the default path, writing defaults on first run.
    pub fn load() -> Result<Self> {
        Self::load_or_init(&Self::path()?)
    }

    /// Load configuration from a file, creating it with defaults if missing.
    ///
    /// An existing file that fails to parse or validate is an error and is
    /// left untouched.
    pub fn load_or_init(path: &Path) -> Result<Self> {
        if path.exists() {
            return Self::load_from(path);
        }

        let config = Self::default();
        if let Err(e) = config.save_to(path) {
            tracing::warn!(path = %path.display(), "Could not write default configuration: {}", e);
        }
        Ok(config)
    }

    /// Load configuration from a file, or defaults if it does not exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let contents = fs::read_to_string(path)?;
            let config: Config = toml::from_str(&contents)?;
            config.validate()?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    /// Save configuration to a file.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        // Create parent directory if it doesn't exist
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)
            .map_err(|e| CliError::Config(format!("Failed to serialize config: {}", e)))?;
        fs::write(path, contents)?;
        Ok(())
    }

    /// Check setting values.
    pub fn validate(&self) -> Result<()> {
        if self.settings.recent_limit == 0 {
            return Err(CliError::Config(
                "settings.recent_limit must be greater than 0".to_string(),
            ));
        }
        if self.settings.history_size == 0 {
            return Err(CliError::Config(
                "settings.history_size must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }

    /// Load the configured knowledge base.
    ///
    /// Falls back to the built-in content when no file is configured.
    pub fn load_knowledge_base(&self) -> Result<KnowledgeBase> {
        match &self.knowledge_base {
            Some(path) => {
                let contents = fs::read_to_string(path).map_err(|e| {
                    CliError::Config(format!(
                        "Cannot read knowledge base {}: {}",
                        path.display(),
                        e
                    ))
                })?;
                tracing::info!(path = %path.display(), "Loading knowledge base from file");
                Ok(KnowledgeBase::from_toml(&contents)?)
            }
            None => Ok(KnowledgeBase::load()?),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_role: Role::Patient,
            knowledge_base: None,
            settings: Settings::default(),
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            color: true,
            format: OutputFormat::Table,
            history_size: 1000,
            recent_limit: 5,
        }
    }
}

/// Directory holding the config file and readline history.
pub fn data_dir() -> Result<PathBuf> {
    let home = dirs::home_dir().ok_or_else(|| CliError::Config("Could not find home directory".into()))?;
    Ok(home.join(".glucoqa"))
}

fn default_true() -> bool {
    true
}

fn default_format() -> OutputFormat {
    OutputFormat::Table
}

fn default_history_size() -> usize {
    1000
}

fn default_recent_limit() -> usize {
    5
}

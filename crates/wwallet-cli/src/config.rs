//! Configuration management for the CLI.
//!
//! The configuration is loaded once at startup and injected into the
//! clients and the pipeline; API keys prefer the environment over the
//! config file so secrets can stay out of it entirely.

use crate::error::{CliError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use wwallet_extractor::ExtractionConfig;

/// Environment variable overriding the completion API key.
pub const OPENAI_API_KEY_VAR: &str = "OPENAI_API_KEY";

/// Environment variable overriding the web-search API key.
pub const BRAVE_SEARCH_API_KEY_VAR: &str = "BRAVE_SEARCH_API_KEY";

/// CLI configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Completion API key (environment variable takes precedence)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub openai_api_key: Option<String>,

    /// Web-search API key (environment variable takes precedence)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brave_search_api_key: Option<String>,

    /// Completion model identifier
    #[serde(default = "default_model")]
    pub model: String,

    /// Record database path; defaults to `~/.wwallet/records.db`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub database_path: Option<PathBuf>,

    /// Extraction pipeline settings
    #[serde(default)]
    pub extraction: ExtractionConfig,

    /// Global CLI settings
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
}

/// Output format.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Table format
    Table,
    /// JSON format
    Json,
    /// Quiet (minimal) format
    Quiet,
}

impl Config {
    /// Get the configuration file path.
    pub fn path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| CliError::Config("Could not find home directory".into()))?;
        Ok(home.join(".wwallet").join("config.toml"))
    }

    /// Load configuration from file or create default.
    pub fn load() -> Result<Self> {
        let path = Self::path()?;

        if path.exists() {
            let contents = fs::read_to_string(&path)?;
            let config: Config = toml::from_str(&contents)?;
            config
                .extraction
                .validate()
                .map_err(CliError::Config)?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    /// Save configuration to file.
    pub fn save(&self) -> Result<()> {
        let path = Self::path()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)
            .map_err(|e| CliError::Config(format!("Failed to serialize config: {}", e)))?;
        fs::write(&path, contents)?;
        Ok(())
    }

    /// Resolve the completion API key from environment or file.
    pub fn openai_api_key(&self) -> Result<String> {
        resolve_key(OPENAI_API_KEY_VAR, self.openai_api_key.as_deref())
    }

    /// Resolve the web-search API key from environment or file.
    pub fn brave_search_api_key(&self) -> Result<String> {
        resolve_key(BRAVE_SEARCH_API_KEY_VAR, self.brave_search_api_key.as_deref())
    }

    /// Resolve the record database path.
    pub fn database_path(&self) -> Result<PathBuf> {
        if let Some(path) = &self.database_path {
            return Ok(path.clone());
        }
        let home = dirs::home_dir()
            .ok_or_else(|| CliError::Config("Could not find home directory".into()))?;
        Ok(home.join(".wwallet").join("records.db"))
    }
}

fn resolve_key(var: &str, from_file: Option<&str>) -> Result<String> {
    if let Ok(key) = std::env::var(var) {
        if !key.is_empty() {
            return Ok(key);
        }
    }
    match from_file {
        Some(key) if !key.is_empty() => Ok(key.to_string()),
        _ => Err(CliError::Config(format!(
            "{} is not configured (environment or config file)",
            var
        ))),
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            openai_api_key: None,
            brave_search_api_key: None,
            model: default_model(),
            database_path: None,
            extraction: ExtractionConfig::default(),
            settings: Settings::default(),
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            color: true,
            format: OutputFormat::Table,
        }
    }
}

fn default_model() -> String {
    wwallet_llm::responses::DEFAULT_MODEL.to_string()
}

fn default_true() -> bool {
    true
}

fn default_format() -> OutputFormat {
    OutputFormat::Table
}

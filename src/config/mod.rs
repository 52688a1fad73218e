//! Configuration management.

mod file_config;

pub use file_config::ConfigFileError;

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Application directory name under the platform config/data dirs
pub const APP_DIR: &str = "research-hub";

/// Default location of the search service
pub const DEFAULT_API_BASE: &str = "http://localhost:8000/api/v1";

/// Application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Search service settings
    #[serde(default)]
    pub api: ApiConfig,

    /// Client-local storage settings
    #[serde(default)]
    pub storage: StorageConfig,

    /// Export settings
    #[serde(default)]
    pub export: ExportConfig,

    /// Result card display limits
    #[serde(default)]
    pub display: DisplayConfig,

    /// Logging settings
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Search service configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL including the version prefix
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
        }
    }
}

fn default_base_url() -> String {
    DEFAULT_API_BASE.to_string()
}

/// Storage configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Directory holding the key/value file (platform data dir when unset)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub directory: Option<PathBuf>,
}

impl StorageConfig {
    /// Resolved storage directory
    pub fn resolved_dir(&self) -> PathBuf {
        self.directory.clone().unwrap_or_else(default_data_dir)
    }
}

/// Export configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportConfig {
    /// Directory where exported result files are written
    #[serde(default = "default_export_dir")]
    pub directory: PathBuf,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            directory: default_export_dir(),
        }
    }
}

fn default_export_dir() -> PathBuf {
    PathBuf::from(".")
}

/// Character budgets used when rendering result cards
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayConfig {
    #[serde(default = "default_abstract_chars")]
    pub abstract_chars: usize,

    #[serde(default = "default_author_chars")]
    pub author_chars: usize,

    #[serde(default = "default_max_categories")]
    pub max_categories: usize,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            abstract_chars: default_abstract_chars(),
            author_chars: default_author_chars(),
            max_categories: default_max_categories(),
        }
    }
}

fn default_abstract_chars() -> usize {
    300
}

fn default_author_chars() -> usize {
    80
}

fn default_max_categories() -> usize {
    3
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log file used by the interactive UI (data dir when unset)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: None,
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

impl LoggingConfig {
    /// Resolved log file for interactive mode
    pub fn resolved_file(&self) -> PathBuf {
        self.file
            .clone()
            .unwrap_or_else(|| default_data_dir().join("research-hub.log"))
    }
}

/// Platform data directory for this application
pub fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from(".local/share"))
        .join(APP_DIR)
}

/// Default config file location
pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from(".config"))
        .join(APP_DIR)
        .join("config.toml")
}

/// Find a config file in the default locations
pub fn find_config_file() -> Option<PathBuf> {
    let local = PathBuf::from("research-hub.toml");
    if local.is_file() {
        return Some(local);
    }
    let user = default_config_path();
    user.is_file().then_some(user)
}

/// Load configuration from a file, layered with `RESEARCH_HUB__*` env vars
pub fn load_config(path: &Path) -> Result<Config, config::ConfigError> {
    let settings = config::Config::builder()
        .add_source(config::File::from(path))
        .add_source(env_source())
        .build()?;

    settings.try_deserialize()
}

/// Get the configuration from env vars and defaults only
pub fn get_config() -> Result<Config, config::ConfigError> {
    config::Config::builder()
        .add_source(env_source())
        .build()?
        .try_deserialize()
}

fn env_source() -> config::Environment {
    config::Environment::with_prefix("RESEARCH_HUB")
        .prefix_separator("__")
        .separator("__")
}

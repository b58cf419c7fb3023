//! Configuration management for contactbook.
//!
//! This module provides configuration loading and validation using figment,
//! supporting TOML config files, environment variables, and defaults.

use std::path::PathBuf;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::reminders::{ReminderPolicy, DEFAULT_WINDOW_DAYS};

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "config.toml";

/// Default data directory name.
const DATA_DIR_NAME: &str = "contactbook";

/// Largest accepted reminder window.
const MAX_WINDOW_DAYS: u32 = 365;

/// Application configuration.
///
/// Configuration is loaded from (in order of precedence, highest first):
/// 1. Environment variables (prefixed with `CONTACTBOOK_`, sections split by `__`)
/// 2. TOML config file at `~/.config/contactbook/config.toml`
/// 3. Default values
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Storage configuration.
    pub storage: StorageConfig,
    /// Birthday reminder configuration.
    pub reminders: ReminderConfig,
}

/// On-disk format of the contact store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageFormat {
    /// A single JSON document.
    #[default]
    Json,
    /// An `SQLite` database.
    Sqlite,
}

impl StorageFormat {
    /// Default file name for this format.
    #[must_use]
    pub fn default_file_name(self) -> &'static str {
        match self {
            Self::Json => "contacts.json",
            Self::Sqlite => "contacts.db",
        }
    }
}

impl std::fmt::Display for StorageFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Json => write!(f, "json"),
            Self::Sqlite => write!(f, "sqlite"),
        }
    }
}

/// Storage-related configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Path to the contact store.
    /// Defaults to `~/.local/share/contactbook/contacts.<ext>`
    pub path: Option<PathBuf>,
    /// Store format.
    pub format: StorageFormat,
    /// Save after every change instead of only on exit.
    pub autosave: bool,
}

/// Birthday reminder configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReminderConfig {
    /// How many days ahead the `birthdays` command looks.
    pub window_days: u32,
    /// Move weekend congratulations to the following Monday.
    pub roll_weekends: bool,
}

impl Default for ReminderConfig {
    fn default() -> Self {
        Self {
            window_days: DEFAULT_WINDOW_DAYS,
            roll_weekends: true,
        }
    }
}

impl Config {
    /// Load configuration from all sources.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading or parsing fails.
    pub fn load() -> Result<Self> {
        Self::load_from(None)
    }

    /// Load configuration with an optional custom config path.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading or parsing fails.
    pub fn load_from(config_path: Option<PathBuf>) -> Result<Self> {
        let config_file = config_path.unwrap_or_else(Self::default_config_path);

        let figment = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Toml::file(&config_file))
            .merge(Env::prefixed("CONTACTBOOK_").split("__"));

        let config: Config = figment.extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Get the default configuration file path.
    #[must_use]
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from(".config"))
            .join(DATA_DIR_NAME)
            .join(CONFIG_FILE_NAME)
    }

    /// Get the default data directory path.
    #[must_use]
    pub fn default_data_dir() -> PathBuf {
        dirs::data_local_dir()
            .unwrap_or_else(|| PathBuf::from(".local/share"))
            .join(DATA_DIR_NAME)
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid.
    pub fn validate(&self) -> Result<()> {
        if !(1..=MAX_WINDOW_DAYS).contains(&self.reminders.window_days) {
            return Err(Error::ConfigValidation {
                message: format!(
                    "reminders.window_days must be between 1 and {MAX_WINDOW_DAYS}, got {}",
                    self.reminders.window_days
                ),
            });
        }

        if let Some(path) = &self.storage.path {
            if path.as_os_str().is_empty() {
                return Err(Error::ConfigValidation {
                    message: "storage.path must not be empty".to_string(),
                });
            }
        }

        Ok(())
    }

    /// Get the store path, resolving defaults if not set.
    #[must_use]
    pub fn store_path(&self) -> PathBuf {
        self.storage.path.clone().unwrap_or_else(|| {
            Self::default_data_dir().join(self.storage.format.default_file_name())
        })
    }

    /// The reminder policy described by this configuration.
    #[must_use]
    pub fn reminder_policy(&self) -> ReminderPolicy {
        ReminderPolicy {
            window_days: self.reminders.window_days,
            roll_weekends: self.reminders.roll_weekends,
        }
    }
}

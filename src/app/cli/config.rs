//! TOML configuration file loading
//!
//! The demo binary reads an optional file with a `[queue]` table (see
//! [`QueueConfig`]) and a `[logging]` table. Command-line flags override
//! file values.
//!
//! ```toml
//! [queue]
//! name = "demo"
//! failure_policy = "continue"
//!
//! [logging]
//! level = "debug"
//! format = "ext"
//! ```

use super::args::Args;
use crate::queue::{ConfigError, QueueConfig};
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingConfig {
    pub level: Option<String>,
    pub format: Option<String>,
    pub file: Option<PathBuf>,
    pub color: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    pub queue: QueueConfig,
    pub logging: LoggingConfig,
}

impl AppConfig {
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        let config: Self =
            toml::from_str(contents).map_err(|source| ConfigError::Parse { source })?;
        config.queue.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&contents)
    }
}

/// Fully resolved settings for one run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub queue: QueueConfig,
    pub count: u64,
    pub producers: u16,
    pub log_level: Option<String>,
    pub log_format: Option<String>,
    pub log_file: Option<PathBuf>,
    pub color: bool,
}

impl Args {
    /// Load the config file named by `--config-file`, if any, and apply
    /// command-line overrides on top of it
    pub fn resolve(&self) -> Result<Settings, ConfigError> {
        let file_config = match &self.config_file {
            Some(path) => AppConfig::from_file(path)?,
            None => AppConfig::default(),
        };
        self.apply_to(file_config)
    }

    /// Merge this command line over an already loaded configuration
    pub fn apply_to(&self, config: AppConfig) -> Result<Settings, ConfigError> {
        let AppConfig { mut queue, logging } = config;

        if let Some(name) = &self.name {
            queue.name = name.clone();
        }
        if let Some(policy) = self.failure_policy() {
            queue.failure_policy = policy;
        }
        queue.validate()?;

        Ok(Settings {
            count: self.count,
            producers: self.producers,
            log_level: self.log_level.clone().or(logging.level),
            log_format: self.log_format.clone().or(logging.format),
            log_file: self.log_file.clone().or(logging.file),
            color: self.use_color(logging.color),
            queue,
        })
    }
}

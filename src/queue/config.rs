//! Queue configuration
//!
//! Loaded from a TOML table such as:
//!
//! ```toml
//! name = "audit"
//! max_callbacks = 4
//! failure_policy = "continue"
//! ```
//!
//! Every key is optional; missing keys take their defaults.

use crate::core::error_handling::ContextualError;
use crate::queue::registry::DEFAULT_MAX_CALLBACKS;
use crate::queue::types::FailurePolicy;
use serde::Deserialize;
use std::path::{Path, PathBuf};

pub const DEFAULT_QUEUE_NAME: &str = "proqueue";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read configuration file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse configuration: {source}")]
    Parse {
        #[source]
        source: toml::de::Error,
    },

    #[error("Invalid configuration: {message}")]
    Invalid { message: String },
}

impl ContextualError for ConfigError {
    fn is_user_actionable(&self) -> bool {
        matches!(self, ConfigError::Invalid { .. })
    }

    fn user_message(&self) -> Option<&str> {
        match self {
            ConfigError::Invalid { message } => Some(message.as_str()),
            _ => None,
        }
    }
}

/// Settings for one queue instance
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct QueueConfig {
    /// Used in the worker thread name and log lines
    pub name: String,
    /// Upper bound on registered callbacks
    pub max_callbacks: usize,
    /// Behaviour when a callback panics
    pub failure_policy: FailurePolicy,
}

impl Default for QueueConfig {
    fn default() -> Self {
        Self {
            name: DEFAULT_QUEUE_NAME.to_string(),
            max_callbacks: DEFAULT_MAX_CALLBACKS,
            failure_policy: FailurePolicy::default(),
        }
    }
}

impl QueueConfig {
    /// Parse and validate a TOML string
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        let config: Self =
            toml::from_str(contents).map_err(|source| ConfigError::Parse { source })?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a TOML file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&contents)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.name.trim().is_empty() {
            return Err(ConfigError::Invalid {
                message: "queue name must not be empty".to_string(),
            });
        }
        if self.max_callbacks == 0 {
            return Err(ConfigError::Invalid {
                message: "max_callbacks must be at least 1".to_string(),
            });
        }
        Ok(())
    }
}

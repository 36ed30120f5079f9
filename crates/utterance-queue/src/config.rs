//! Queue configuration
//!
//! Settings can be built in code or loaded from a TOML file:
//!
//! ```toml
//! interval_ms = 500
//! muted = false
//! enabled = true
//! ```

use std::fs;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{Result, UtteranceError};

/// Default milliseconds between drain cycles
pub const DEFAULT_INTERVAL_MS: u64 = 500;

/// Runtime settings for an [`UtteranceQueue`](crate::UtteranceQueue)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UtteranceQueueConfig {
    /// Milliseconds between drain cycles
    pub interval_ms: u64,
    /// Drain without announcing
    pub muted: bool,
    /// Accept entries and drain them
    pub enabled: bool,
}

impl Default for UtteranceQueueConfig {
    fn default() -> Self {
        Self {
            interval_ms: DEFAULT_INTERVAL_MS,
            muted: false,
            enabled: true,
        }
    }
}

impl UtteranceQueueConfig {
    /// Parse and validate a TOML document
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a file
    ///
    /// A missing file is not an error; defaults are returned instead.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, is not valid TOML, or
    /// fails validation.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            tracing::debug!(path = %path.display(), "No queue config found, using defaults");
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Serialize to TOML
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string(self).map_err(|e| UtteranceError::config(e.to_string()))
    }

    /// Check the settings are usable
    pub fn validate(&self) -> Result<()> {
        if self.interval_ms == 0 {
            return Err(UtteranceError::config("interval_ms must be greater than zero"));
        }
        Ok(())
    }

    /// Drain period as a `Duration`
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }

    /// Merge two configurations (non-default values in `other` win)
    pub fn merge(mut self, other: Self) -> Self {
        let defaults = Self::default();

        if other.interval_ms != defaults.interval_ms {
            self.interval_ms = other.interval_ms;
        }

        if other.muted != defaults.muted {
            self.muted = other.muted;
        }

        if other.enabled != defaults.enabled {
            self.enabled = other.enabled;
        }

        self
    }
}

//! Dashboard configuration
//!
//! Stored as JSON in `<config_dir>/mktboard/config.json`.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::analytics::DEFAULT_IMPACT_WINDOW;
use crate::calendar::Granularity;
use crate::error::CoreError;
use crate::generator::GeneratorConfig;

const CONFIG_FILE: &str = "config.json";

/// mktboard settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Exported `analyticsData` JSON; synthetic data is used when unset
    pub data_file: Option<PathBuf>,
    /// Days of synthetic timeline to generate
    pub lookback_days: usize,
    /// Days after a post or campaign counted towards its impact
    pub correlation_window_days: usize,
    /// Seed for synthetic data
    pub seed: Option<u64>,
    pub average_order_value: f64,
    /// Heat-map granularity on startup
    pub default_view: Granularity,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            data_file: None,
            lookback_days: 60,
            correlation_window_days: DEFAULT_IMPACT_WINDOW,
            seed: None,
            average_order_value: 85.0,
            default_view: Granularity::Month,
        }
    }
}

impl DashboardConfig {
    /// `<config_dir>/mktboard`, if the platform has a config directory
    pub fn default_dir() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("mktboard"))
    }

    /// Default config file path
    pub fn default_path() -> Option<PathBuf> {
        Self::default_dir().map(|dir| dir.join(CONFIG_FILE))
    }

    /// Load from `path`.
    /// Returns defaults on any I/O, parse or validation error (graceful degradation).
    pub fn load(path: &Path) -> Self {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(_) => {
                tracing::debug!(path = %path.display(), "No config file, using defaults");
                return Self::default();
            }
        };

        let config: Self = match serde_json::from_str(&content) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "Invalid config, using defaults");
                return Self::default();
            }
        };

        match config.validate() {
            Ok(()) => config,
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "Rejected config, using defaults");
                Self::default()
            }
        }
    }

    /// Persist to `path`, creating its directory.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .context("Failed to create config directory")?;
        }
        let content =
            serde_json::to_string_pretty(self).context("Failed to serialize config")?;
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config to {}", path.display()))
    }

    pub fn validate(&self) -> Result<(), CoreError> {
        if self.lookback_days == 0 {
            return Err(CoreError::InvalidConfig {
                message: "lookback_days must be at least 1".to_string(),
            });
        }
        if self.average_order_value.is_nan() || self.average_order_value <= 0.0 {
            return Err(CoreError::InvalidConfig {
                message: format!(
                    "average_order_value must be positive (got {})",
                    self.average_order_value
                ),
            });
        }
        Ok(())
    }

    /// Generator settings derived from this config
    pub fn generator(&self) -> GeneratorConfig {
        GeneratorConfig {
            seed: self.seed,
            average_order_value: self.average_order_value,
            ..GeneratorConfig::default()
        }
    }
}

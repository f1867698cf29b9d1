//! Configuration loading and parsing
//!
//! Every section is optional; command-line flags override file values.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use waveify_core::{MalformedLinePolicy, ParserConfig};

/// Main application configuration (loaded from waveify.toml)
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AppConfig {
    #[serde(default)]
    pub parse: ParserConfig,
    #[serde(default)]
    pub render: RenderConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RenderConfig {
    /// Terminal columns per time unit
    #[serde(default = "default_columns_per_unit")]
    pub columns_per_unit: usize,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            columns_per_unit: default_columns_per_unit(),
        }
    }
}

fn default_columns_per_unit() -> usize {
    4
}

/// Smallest resolution that still separates the two halves of a time unit
pub const MIN_COLUMNS_PER_UNIT: usize = 2;

impl AppConfig {
    /// Apply command-line overrides on top of the file values
    pub fn with_overrides(mut self, skip_malformed: bool, columns_per_unit: Option<usize>) -> Self {
        if skip_malformed {
            self.parse.on_malformed = MalformedLinePolicy::Skip;
        }
        if let Some(columns) = columns_per_unit {
            self.render.columns_per_unit = columns;
        }
        self
    }

    /// Check values that serde cannot
    pub fn validate(&self) -> Result<()> {
        if self.render.columns_per_unit < MIN_COLUMNS_PER_UNIT {
            anyhow::bail!(
                "render.columns_per_unit must be at least {}, got {}",
                MIN_COLUMNS_PER_UNIT,
                self.render.columns_per_unit
            );
        }
        Ok(())
    }
}

/// Load configuration from a TOML file
pub fn load_config(path: &Path) -> Result<AppConfig> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {:?}", path))?;

    let config: AppConfig = toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {:?}", path))?;

    config
        .validate()
        .with_context(|| format!("Invalid config file: {:?}", path))?;

    Ok(config)
}

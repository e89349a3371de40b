//! Library-wide defaults for widget props.
//!
//! Every widget works without a config. A `TrellisConfig` only changes the
//! defaults that builders start from (through their `with_config` methods);
//! explicit builder calls still override it.

use std::path::Path;
use std::time::Duration;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrellisConfig {
    pub search: SearchConfig,
    pub tooltip: TooltipConfig,
    pub breadcrumbs: BreadcrumbConfig,
    pub pagination: PaginationConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Quiet period before a typed query is committed.
    pub debounce_ms: u64,
    /// Queries shorter than this (in chars, after trimming) produce nothing.
    pub min_query_length: usize,
    pub max_suggestions: usize,
    pub history_limit: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            debounce_ms: 300,
            min_query_length: 2,
            max_suggestions: 8,
            history_limit: 5,
        }
    }
}

impl SearchConfig {
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TooltipConfig {
    pub show_delay_ms: u64,
    pub hide_delay_ms: u64,
    pub offset: f32,
    pub skidding: f32,
    pub flip: bool,
}

impl Default for TooltipConfig {
    fn default() -> Self {
        Self {
            show_delay_ms: 150,
            hide_delay_ms: 100,
            offset: 8.0,
            skidding: 0.0,
            flip: true,
        }
    }
}

impl TooltipConfig {
    pub fn show_delay(&self) -> Duration {
        Duration::from_millis(self.show_delay_ms)
    }

    pub fn hide_delay(&self) -> Duration {
        Duration::from_millis(self.hide_delay_ms)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BreadcrumbConfig {
    pub max_items: usize,
    pub separator: String,
}

impl Default for BreadcrumbConfig {
    fn default() -> Self {
        Self {
            max_items: 4,
            separator: "/".into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaginationConfig {
    pub max_visible: usize,
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self { max_visible: 7 }
    }
}

impl TrellisConfig {
    /// Parse and validate a JSON document. Missing fields take defaults.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        debug!("loaded config from {}", path.display());
        Self::from_json_str(&json)
    }

    /// Like `load`, but a missing file yields the defaults.
    pub fn load_optional(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            debug!("no config at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        Self::load(path)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.search.min_query_length == 0 {
            return Err(ConfigError::Invalid {
                field: "search.min_query_length",
                reason: "must be at least 1".into(),
            });
        }
        if self.search.max_suggestions == 0 {
            return Err(ConfigError::Invalid {
                field: "search.max_suggestions",
                reason: "must be at least 1".into(),
            });
        }
        if self.pagination.max_visible == 0 {
            return Err(ConfigError::Invalid {
                field: "pagination.max_visible",
                reason: "must be at least 1".into(),
            });
        }
        if !self.tooltip.offset.is_finite() || !self.tooltip.skidding.is_finite() {
            return Err(ConfigError::Invalid {
                field: "tooltip",
                reason: "offset and skidding must be finite".into(),
            });
        }
        Ok(())
    }
}

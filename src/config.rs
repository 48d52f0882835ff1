//! Dashboard configuration, loaded from JSON with per-field defaults.

use crate::chart::{ChartStyle, ChartVariant};
use crate::compute::DEFAULT_TOP_N;
use crate::store::Metric;
use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid {field}: {reason}")]
    Invalid { field: &'static str, reason: &'static str },
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DashboardConfig {
    /// Rows kept by the ranking charts.
    pub top_n: usize,
    pub variant: ChartVariant,
    pub default_continent: String,
    pub default_year: i32,
    pub default_map_metric: Metric,
    pub chart_height: u32,
    pub table_height: u32,
    /// Worker threads for concurrent recomputation. `None` shares rayon's global pool.
    pub workers: Option<usize>,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            top_n: DEFAULT_TOP_N,
            variant: ChartVariant::Bar,
            default_continent: "Asia".to_string(),
            default_year: 1952,
            default_map_metric: Metric::LifeExpectancy,
            chart_height: 600,
            table_height: 700,
            workers: None,
        }
    }
}

impl DashboardConfig {
    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json_str(&text)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.top_n == 0 {
            return Err(ConfigError::Invalid { field: "top_n", reason: "must be at least 1" });
        }
        if self.workers == Some(0) {
            return Err(ConfigError::Invalid { field: "workers", reason: "must be at least 1" });
        }
        Ok(())
    }

    pub fn chart_style(&self) -> ChartStyle {
        ChartStyle::new(self.variant, self.chart_height)
    }
}

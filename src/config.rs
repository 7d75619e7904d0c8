//! Dashboard configuration.
//!
//! Everything the presentation layer needs at start-up lives in one
//! [`DashboardConfig`] value handed to the app constructor.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse config: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// Source column names of the customer CSV.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnMapping {
    pub profession: String,
    pub province: String,
    pub gender: String,
    pub age: String,
    pub generation: String,
}

impl Default for ColumnMapping {
    fn default() -> Self {
        Self {
            profession: "Profession".to_string(),
            province: "province".to_string(),
            gender: "gender".to_string(),
            age: "age".to_string(),
            generation: "generation".to_string(),
        }
    }
}

/// Window and chart sizing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    pub window_width: f32,
    pub window_height: f32,
    pub min_width: f32,
    pub min_height: f32,
    pub chart_height: f32,
    /// Degrees of padding around the outermost provinces on the map.
    pub map_padding_degrees: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            window_width: 1400.0,
            window_height: 900.0,
            min_width: 1000.0,
            min_height: 700.0,
            chart_height: 320.0,
            map_padding_degrees: 2.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub title: String,
    pub description: String,
    pub customers_path: PathBuf,
    pub coordinates_path: PathBuf,
    pub columns: ColumnMapping,
    pub default_age_range: [u32; 2],
    pub layout: LayoutConfig,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            title: "Customer Demography Dashboard".to_string(),
            description: "Customer Demography Dashboard provides a comprehensive overview of \
                          key demographic characteristics of your customer base, offering \
                          valuable insights into their profiles."
                .to_string(),
            customers_path: PathBuf::from("data/customer.csv"),
            coordinates_path: PathBuf::from("data/coordinate.csv"),
            columns: ColumnMapping::default(),
            default_age_range: [20, 50],
            layout: LayoutConfig::default(),
        }
    }
}

impl DashboardConfig {
    /// Read a JSON config; missing fields take their defaults.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let [min, max] = self.default_age_range;
        if min > max {
            return Err(ConfigError::Invalid(format!(
                "default_age_range [{}, {}] has min above max",
                min, max
            )));
        }
        let layout = &self.layout;
        if layout.window_width <= 0.0
            || layout.window_height <= 0.0
            || layout.min_width <= 0.0
            || layout.min_height <= 0.0
            || layout.chart_height <= 0.0
        {
            return Err(ConfigError::Invalid(
                "layout sizes must be positive".to_string(),
            ));
        }
        if layout.map_padding_degrees < 0.0 {
            return Err(ConfigError::Invalid(
                "map_padding_degrees must not be negative".to_string(),
            ));
        }
        Ok(())
    }
}

//! Configuration file handling.
//!
//! This module handles loading and merging configuration from
//! `.patchviz.toml` files.

use crate::chart::histogram::MAX_BINS;
use crate::cli::{Args, OutputFormat};
use crate::error::VizError;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Default configuration file name.
pub const CONFIG_FILE: &str = ".patchviz.toml";

/// Accepted chart width and height, in pixels.
pub const MIN_IMAGE_SIZE: u32 = 100;
pub const MAX_IMAGE_SIZE: u32 = 10_000;

/// Root configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// General settings.
    #[serde(default)]
    pub general: GeneralConfig,

    /// Chart settings.
    #[serde(default)]
    pub charts: ChartsConfig,

    /// Report settings.
    #[serde(default)]
    pub report: ReportConfig,
}

/// General application settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Output directory. When unset, a `visualizations` directory next to
    /// the results is used.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_dir: Option<String>,
}

/// Chart rendering settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChartsConfig {
    /// Write chart files at all.
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Image width in pixels.
    #[serde(default = "default_width")]
    pub width: u32,

    /// Image height in pixels.
    #[serde(default = "default_height")]
    pub height: u32,

    /// Bins in the relevance score histogram.
    #[serde(default = "default_bins")]
    pub bins: usize,

    /// Bar fill colour.
    #[serde(default = "default_color")]
    pub color: String,
}

impl Default for ChartsConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            width: default_width(),
            height: default_height(),
            bins: default_bins(),
            color: default_color(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_width() -> u32 {
    800
}

fn default_height() -> u32 {
    500
}

fn default_bins() -> usize {
    20
}

fn default_color() -> String {
    "#4C72B0".to_string()
}

/// Report generation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Rows in the top-N tables and bar charts.
    #[serde(default = "default_top_n")]
    pub top_n: usize,

    /// Which summary files to write.
    #[serde(default)]
    pub format: OutputFormat,

    /// Report heading.
    #[serde(default = "default_title")]
    pub title: String,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            top_n: default_top_n(),
            format: OutputFormat::default(),
            title: default_title(),
        }
    }
}

fn default_top_n() -> usize {
    10
}

fn default_title() -> String {
    "Patch Results Summary".to_string()
}

impl Config {
    /// Load configuration from a file path.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Try to load configuration from the default location.
    ///
    /// Returns `Ok(None)` if the file doesn't exist, `Err` if it exists but can't be parsed.
    pub fn load_default() -> Result<Option<Self>> {
        let default_path = Path::new(CONFIG_FILE);

        if default_path.exists() {
            Ok(Some(Self::load(default_path)?))
        } else {
            Ok(None)
        }
    }

    /// Merge this configuration with CLI arguments.
    ///
    /// CLI arguments take precedence, but only when explicitly provided.
    pub fn merge_with_args(&mut self, args: &Args) {
        if let Some(ref output) = args.output {
            self.general.output_dir = Some(output.to_string_lossy().into_owned());
        }

        if let Some(top_n) = args.top_n {
            self.report.top_n = top_n;
        }
        if let Some(format) = args.format {
            self.report.format = format;
        }

        if let Some(bins) = args.bins {
            self.charts.bins = bins;
        }
        if args.no_charts {
            self.charts.enabled = false;
        }
    }

    /// Check values that may have come from the config file rather than
    /// through [`Args::validate`].
    pub fn validate(&self) -> std::result::Result<(), VizError> {
        if self.report.top_n == 0 {
            return Err(VizError::invalid("report.top_n must be at least 1"));
        }

        if !(1..=MAX_BINS).contains(&self.charts.bins) {
            return Err(VizError::invalid(format!(
                "charts.bins must be between 1 and {}",
                MAX_BINS
            )));
        }

        let size_range = MIN_IMAGE_SIZE..=MAX_IMAGE_SIZE;
        for (name, value) in [
            ("charts.width", self.charts.width),
            ("charts.height", self.charts.height),
        ] {
            if !size_range.contains(&value) {
                return Err(VizError::invalid(format!(
                    "{} must be between {} and {} pixels, got {}",
                    name, MIN_IMAGE_SIZE, MAX_IMAGE_SIZE, value
                )));
            }
        }

        Ok(())
    }

    /// Generate a default configuration file content.
    pub fn default_toml() -> String {
        let config = Config::default();
        toml::to_string_pretty(&config).unwrap_or_else(|_| String::new())
    }
}

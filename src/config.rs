//! # Analysis Configuration
//!
//! Tunables shared by the ingest, geometry and viewport modules, plus the
//! pacing of the scripted walkthrough. Defaults match the interactive tool;
//! power users can override them from a TOML file:
//!
//! ```toml
//! # thermotangent.toml
//! [analysis]
//! tangent_span_percent = 0.2
//! chart_padding_percent = 0.05
//! min_data_points = 3
//! tolerance_pixels = 10.0
//! derivative_anchor = "left"
//!
//! [walkthrough]
//! step_delay_ms = 500
//! zoom = [590.0, 670.0]
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::derivative::DerivativeAnchor;

/// Extra horizontal span added on each side of the viewport when clipping a tangent.
pub const TANGENT_SPAN_PERCENT: f64 = 0.15;

/// Vertical padding added above and below the visible data when autoscaling.
pub const CHART_PADDING_PERCENT: f64 = 0.05;

/// Minimum number of cleaned samples required to accept a dataset.
pub const MIN_DATA_POINTS: usize = 3;

/// Maximum pixel distance between a click and the nearest derivative point.
pub const TOLERANCE_PIXELS: f64 = 10.0;

/// Slopes (and slope differences) below this magnitude are treated as zero.
pub const SLOPE_EPSILON: f64 = 1e-10;

/// Two clip candidates closer than this in both axes are the same point.
pub const DEDUP_EPSILON: f64 = 1e-6;

/// Errors raised while loading or validating configuration
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// I/O error reading the configuration file
    #[error("Failed to read config file: {0}")]
    IoError(#[from] std::io::Error),

    /// TOML syntax or type error
    #[error("Failed to parse TOML configuration: {0}")]
    TomlError(#[from] toml::de::Error),

    /// A value is outside its accepted range
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Numerical settings for ingest, tangent clipping and autoscaling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Fraction of the viewport width added on each side of a tangent segment.
    pub tangent_span_percent: f64,

    /// Fraction of the visible Y range added as padding when autoscaling.
    pub chart_padding_percent: f64,

    /// Minimum number of samples that must survive validation.
    pub min_data_points: usize,

    /// Click tolerance on the derivative chart, in pixels.
    pub tolerance_pixels: f64,

    /// Which temperature a derivative point is plotted against.
    pub derivative_anchor: DerivativeAnchor,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            tangent_span_percent: TANGENT_SPAN_PERCENT,
            chart_padding_percent: CHART_PADDING_PERCENT,
            min_data_points: MIN_DATA_POINTS,
            tolerance_pixels: TOLERANCE_PIXELS,
            derivative_anchor: DerivativeAnchor::default(),
        }
    }
}

impl AnalysisConfig {
    /// Check that every value is usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_fraction("tangent_span_percent", self.tangent_span_percent)?;
        check_fraction("chart_padding_percent", self.chart_padding_percent)?;

        if self.min_data_points < 2 {
            return Err(ConfigError::Invalid(format!(
                "min_data_points must be >= 2, got {}",
                self.min_data_points
            )));
        }

        if !self.tolerance_pixels.is_finite() || self.tolerance_pixels < 0.0 {
            return Err(ConfigError::Invalid(format!(
                "tolerance_pixels must be a non-negative number, got {}",
                self.tolerance_pixels
            )));
        }

        Ok(())
    }
}

fn check_fraction(name: &str, value: f64) -> Result<(), ConfigError> {
    if !value.is_finite() || value < 0.0 {
        return Err(ConfigError::Invalid(format!(
            "{name} must be a non-negative number, got {value}"
        )));
    }
    Ok(())
}

/// Pacing and targets of the scripted two-tangent walkthrough.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WalkthroughConfig {
    /// Pause between major steps, in milliseconds.
    pub step_delay_ms: u64,

    /// How long a highlighted temperature range stays visible.
    pub highlight_duration_ms: u64,

    /// Pause before a simulated click.
    pub click_delay_ms: u64,

    /// X range both charts are zoomed to before the tangents are built.
    pub zoom: [f64; 2],

    /// Temperature near which the first (baseline) tangent is anchored.
    pub first_anchor_temperature: f64,

    /// Half width of the highlighted range around each anchor.
    pub highlight_half_width: f64,
}

impl Default for WalkthroughConfig {
    fn default() -> Self {
        Self {
            step_delay_ms: 2000,
            highlight_duration_ms: 1500,
            click_delay_ms: 800,
            zoom: [590.0, 670.0],
            first_anchor_temperature: 610.0,
            highlight_half_width: 10.0,
        }
    }
}

/// Root structure of a `thermotangent.toml` file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Numerical analysis settings.
    #[serde(default)]
    pub analysis: AnalysisConfig,

    /// Walkthrough pacing.
    #[serde(default)]
    pub walkthrough: WalkthroughConfig,
}

impl Config {
    /// Load and validate configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Parse and validate configuration from a TOML string.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(content)?;
        config.analysis.validate()?;
        Ok(config)
    }
}

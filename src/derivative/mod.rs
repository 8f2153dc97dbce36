//! # Derivative Engine
//!
//! Builds the two curves shown to the user from cleaned samples:
//!
//! - the main curve, signal against temperature, one point per sample;
//! - the derivative curve, `dSignal/dTime` against temperature, one point per
//!   adjacent sample pair with a positive time step. Each point also carries
//!   `dTemperature/dTime`, which turns the time derivative into a slope on the
//!   main curve.

use serde::{Deserialize, Serialize};

use crate::ingest::Sample;


/// Minimum number of derivative points needed to build tangents.
pub const MIN_DERIVATIVE_POINTS: usize = 2;

/// Errors that can occur while computing the derivative curve
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DerivativeError {
    /// Too few usable sample pairs
    #[error("Cannot compute derivative: {found} derivative points, at least {required} required")]
    InsufficientPoints {
        /// Derivative points produced
        found: usize,
        /// Minimum required
        required: usize,
    },
}

/// Temperature a derivative point is plotted against.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DerivativeAnchor {
    /// Mean temperature of the pair
    #[default]
    Midpoint,
    /// Temperature of the earlier sample
    Left,
}

/// Anything with plot coordinates.
pub trait PlotPoint {
    /// Horizontal coordinate
    fn x(&self) -> f64;
    /// Vertical coordinate
    fn y(&self) -> f64;
}

/// A point of the main curve: temperature on x, signal on y.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CurvePoint {
    /// Temperature
    pub x: f64,
    /// Signal
    pub y: f64,
}

impl CurvePoint {
    /// Create a new curve point.
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl PlotPoint for CurvePoint {
    fn x(&self) -> f64 {
        self.x
    }

    fn y(&self) -> f64 {
        self.y
    }
}

/// A point of the derivative curve.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DerivativePoint {
    /// Temperature representative of the interval
    pub x: f64,
    /// `dSignal/dTime`
    pub y: f64,
    /// `dTemperature/dTime`
    pub temp_gradient: f64,
}

impl DerivativePoint {
    /// Slope of the main curve over this interval, `dSignal/dTemperature`.
    ///
    /// `None` when the temperature did not change or the result is not finite.
    pub fn curve_slope(&self) -> Option<f64> {
        if self.temp_gradient == 0.0 || !self.temp_gradient.is_finite() {
            return None;
        }
        let slope = self.y / self.temp_gradient;
        slope.is_finite().then_some(slope)
    }
}

impl PlotPoint for DerivativePoint {
    fn x(&self) -> f64 {
        self.x
    }

    fn y(&self) -> f64 {
        self.y
    }
}

/// Main and derivative curves computed from one dataset.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DerivativeCurves {
    /// Signal against temperature, one per sample
    pub curve: Vec<CurvePoint>,
    /// Signal rate of change against temperature
    pub derivative: Vec<DerivativePoint>,
    /// Sample pairs skipped for a non-positive time step
    pub skipped_pairs: usize,
}

/// Computes curve and derivative points from cleaned samples.
#[derive(Debug, Clone, Copy, Default)]
pub struct DerivativeEngine {
    anchor: DerivativeAnchor,
}

impl DerivativeEngine {
    /// Create an engine placing derivative points at `anchor`.
    pub fn new(anchor: DerivativeAnchor) -> Self {
        Self { anchor }
    }

    /// Compute both curves, failing when fewer than two derivative points result.
    pub fn compute(&self, samples: &[Sample]) -> Result<DerivativeCurves, DerivativeError> {
        let curves = self.compute_unchecked(samples);

        if curves.derivative.len() < MIN_DERIVATIVE_POINTS {
            return Err(DerivativeError::InsufficientPoints {
                found: curves.derivative.len(),
                required: MIN_DERIVATIVE_POINTS,
            });
        }

        log::info!(
            "Computed {} curve points and {} derivative points",
            curves.curve.len(),
            curves.derivative.len()
        );
        Ok(curves)
    }

    /// Compute both curves without enforcing a minimum.
    pub fn compute_unchecked(&self, samples: &[Sample]) -> DerivativeCurves {
        let curve = samples
            .iter()
            .map(|s| CurvePoint::new(s.temperature, s.signal))
            .collect();

        let mut derivative = Vec::with_capacity(samples.len().saturating_sub(1));
        let mut skipped_pairs = 0;

        for pair in samples.windows(2) {
            let (a, b) = (&pair[0], &pair[1]);
            let dt = b.time - a.time;
            // Cannot happen after ingest, but samples may come from elsewhere.
            if dt <= 0.0 {
                skipped_pairs += 1;
                continue;
            }

            let x = match self.anchor {
                DerivativeAnchor::Midpoint => (a.temperature + b.temperature) / 2.0,
                DerivativeAnchor::Left => a.temperature,
            };

            derivative.push(DerivativePoint {
                x,
                y: (b.signal - a.signal) / dt,
                temp_gradient: (b.temperature - a.temperature) / dt,
            });
        }

        if skipped_pairs > 0 {
            log::warn!("Skipped {} sample pairs with non-positive time step", skipped_pairs);
        }

        DerivativeCurves {
            curve,
            derivative,
            skipped_pairs,
        }
    }
}

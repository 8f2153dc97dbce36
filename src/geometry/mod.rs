//! # Tangent Geometry
//!
//! Straight-line geometry on the main chart:
//!
//! - [`clip_tangent`] turns a slope and an anchor point into a two-point segment
//!   that spans the visible chart (plus a horizontal margin) at any zoom level;
//! - [`intersect`] finds where two tangents cross, which is the transition
//!   temperature estimate.
//!
//! Neither operation fails. A tangent outside the viewport still yields a
//! segment (tagged [`Clipping::Fallback`]) and parallel tangents yield `None`.

use serde::{Deserialize, Serialize};

pub use intersection::intersect;
pub use tangent::{clip_tangent, Clipping, TangentSegment};

mod intersection;
mod tangent;


/// A point in data space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    /// Horizontal coordinate (temperature)
    pub x: f64,
    /// Vertical coordinate (signal)
    pub y: f64,
}

impl Point {
    /// Create a new point.
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// The visible data-space rectangle of a chart.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    /// Left edge
    pub x_min: f64,
    /// Right edge
    pub x_max: f64,
    /// Bottom edge
    pub y_min: f64,
    /// Top edge
    pub y_max: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(0.0, 1.0, 0.0, 1.0)
    }
}

impl Viewport {
    /// Create a new viewport.
    pub fn new(x_min: f64, x_max: f64, y_min: f64, y_max: f64) -> Self {
        Self {
            x_min,
            x_max,
            y_min,
            y_max,
        }
    }

    /// Horizontal extent.
    pub fn width(&self) -> f64 {
        self.x_max - self.x_min
    }

    /// Vertical extent.
    pub fn height(&self) -> f64 {
        self.y_max - self.y_min
    }

    /// Copy with each axis ordered so that min <= max.
    pub fn normalized(&self) -> Self {
        Self::new(
            self.x_min.min(self.x_max),
            self.x_min.max(self.x_max),
            self.y_min.min(self.y_max),
            self.y_min.max(self.y_max),
        )
    }

    /// Whether `x` lies within the horizontal bounds (inclusive).
    pub fn contains_x(&self, x: f64) -> bool {
        x >= self.x_min && x <= self.x_max
    }

    /// Whether `point` lies within the rectangle (inclusive).
    pub fn contains(&self, point: Point) -> bool {
        self.contains_x(point.x) && point.y >= self.y_min && point.y <= self.y_max
    }

    /// Copy with new horizontal bounds.
    pub fn with_x(&self, x_min: f64, x_max: f64) -> Self {
        Self {
            x_min,
            x_max,
            ..*self
        }
    }

    /// Copy with new vertical bounds.
    pub fn with_y(&self, y_min: f64, y_max: f64) -> Self {
        Self {
            y_min,
            y_max,
            ..*self
        }
    }
}

/// A tangent line `y = slope * (x - anchor_x) + anchor_y`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TangentParams {
    /// Slope on the main curve (signal per degree)
    pub slope: f64,
    /// Anchor temperature, taken from the main curve
    pub anchor_x: f64,
    /// Anchor signal, taken from the main curve
    pub anchor_y: f64,
}

impl TangentParams {
    /// Create tangent parameters.
    pub fn new(slope: f64, anchor_x: f64, anchor_y: f64) -> Self {
        Self {
            slope,
            anchor_x,
            anchor_y,
        }
    }

    /// Evaluate the line at `x`.
    pub fn y_at(&self, x: f64) -> f64 {
        self.slope * (x - self.anchor_x) + self.anchor_y
    }

    /// Solve the line for `y`. Meaningless for a horizontal line.
    pub fn x_at(&self, y: f64) -> f64 {
        (y - self.anchor_y) / self.slope + self.anchor_x
    }
}

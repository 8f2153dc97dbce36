//! # Viewport Synchronisation
//!
//! The main chart and the derivative chart share their X range but scale Y
//! independently. Whenever the main chart is panned or zoomed, the new X range
//! is copied to the derivative chart and each chart's Y range is recomputed
//! from the points that are actually visible.
//!
//! Recomputation is a pure function of the stored points and the reported X
//! bounds, so repeated gestures never accumulate drift.

use serde::{Deserialize, Serialize};

pub use scale::{ChartScale, LinearScale};

use crate::config::CHART_PADDING_PERCENT;
use crate::derivative::PlotPoint;
use crate::geometry::Viewport;

mod scale;

#[cfg(test)]
mod tests;

/// Viewports of the two linked charts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ChartViewports {
    /// Signal against temperature
    pub main: Viewport,
    /// Derivative against temperature
    pub derivative: Viewport,
}

/// What happened to one chart's Y bounds during a sync.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum YRescale {
    /// New bounds were computed from the visible points
    Rescaled {
        /// New bottom edge
        y_min: f64,
        /// New top edge
        y_max: f64,
    },
    /// No visible points, or all visible points share one Y value;
    /// the previous bounds were kept
    Kept,
}

/// Per-chart result of a sync.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SyncOutcome {
    /// Main chart
    pub main: YRescale,
    /// Derivative chart
    pub derivative: YRescale,
}

/// Min and max Y of the points whose X lies in `[x_min, x_max]`.
pub fn visible_y_range<P: PlotPoint>(points: &[P], x_min: f64, x_max: f64) -> Option<(f64, f64)> {
    let mut range: Option<(f64, f64)> = None;
    for point in points {
        let x = point.x();
        if x < x_min || x > x_max {
            continue;
        }
        let y = point.y();
        range = Some(match range {
            Some((lo, hi)) => (lo.min(y), hi.max(y)),
            None => (y, y),
        });
    }
    range
}

/// Propagates X bounds between the charts and autoscales their Y bounds.
#[derive(Debug, Clone, Copy)]
pub struct ViewportSync {
    padding_percent: f64,
}

impl Default for ViewportSync {
    fn default() -> Self {
        Self::new(CHART_PADDING_PERCENT)
    }
}

impl ViewportSync {
    /// Create a sync padding autoscaled ranges by `padding_percent` of their height.
    pub fn new(padding_percent: f64) -> Self {
        Self { padding_percent }
    }

    /// Apply new main-chart X bounds to both charts and rescale their Y bounds.
    ///
    /// Only curve and derivative points take part in the Y scan; tangent
    /// segments never influence autoscaling.
    pub fn sync<C: PlotPoint, D: PlotPoint>(
        &self,
        viewports: &mut ChartViewports,
        x_min: f64,
        x_max: f64,
        curve: &[C],
        derivative: &[D],
    ) -> SyncOutcome {
        viewports.main = viewports.main.with_x(x_min, x_max);
        viewports.derivative = viewports.derivative.with_x(x_min, x_max);

        let outcome = SyncOutcome {
            main: self.rescale_y(&mut viewports.main, curve),
            derivative: self.rescale_y(&mut viewports.derivative, derivative),
        };

        log::debug!(
            "Synced X range [{}, {}]: main {:?}, derivative {:?}",
            x_min,
            x_max,
            outcome.main,
            outcome.derivative
        );
        outcome
    }

    /// Recompute `viewport`'s Y bounds from the points inside its X bounds.
    pub fn rescale_y<P: PlotPoint>(&self, viewport: &mut Viewport, points: &[P]) -> YRescale {
        match visible_y_range(points, viewport.x_min, viewport.x_max) {
            Some((lo, hi)) if hi > lo => {
                let pad = (hi - lo) * self.padding_percent;
                let (y_min, y_max) = (lo - pad, hi + pad);
                *viewport = viewport.with_y(y_min, y_max);
                YRescale::Rescaled { y_min, y_max }
            }
            _ => YRescale::Kept,
        }
    }

    /// Viewport covering every point, Y padded like an autoscale.
    ///
    /// Zero-width or zero-height extents are widened by one unit on each side.
    pub fn fit<P: PlotPoint>(&self, points: &[P]) -> Option<Viewport> {
        let (x_lo, x_hi) = extent(points.iter().map(PlotPoint::x))?;
        let (y_lo, y_hi) = extent(points.iter().map(PlotPoint::y))?;

        let (x_min, x_max) = widen(x_lo, x_hi, 0.0);
        let (y_min, y_max) = widen(y_lo, y_hi, self.padding_percent);
        Some(Viewport::new(x_min, x_max, y_min, y_max))
    }

    /// Fit both charts to their full data, sharing the main curve's X extent.
    pub fn fit_both<C: PlotPoint, D: PlotPoint>(
        &self,
        curve: &[C],
        derivative: &[D],
    ) -> Option<ChartViewports> {
        let main = self.fit(curve)?;
        let derivative = match self.fit(derivative) {
            Some(fitted) => fitted.with_x(main.x_min, main.x_max),
            None => main,
        };
        Some(ChartViewports { main, derivative })
    }
}

fn extent(values: impl Iterator<Item = f64>) -> Option<(f64, f64)> {
    values.fold(None, |acc, v| match acc {
        Some((lo, hi)) => Some((f64::min(lo, v), f64::max(hi, v))),
        None => Some((v, v)),
    })
}

fn widen(lo: f64, hi: f64, padding_percent: f64) -> (f64, f64) {
    if hi > lo {
        let pad = (hi - lo) * padding_percent;
        (lo - pad, hi + pad)
    } else {
        (lo - 1.0, hi + 1.0)
    }
}

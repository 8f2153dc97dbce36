//! # Analysis Session
//!
//! [`AnalysisSession`] owns everything an interactive analysis mutates: the
//! loaded [`Dataset`], the two chart viewports and the two tangent slots. The
//! caller holds the session and drives it with discrete events (a file load,
//! a click on the derivative chart, a pan/zoom gesture); each event runs to
//! completion before the next one.
//!
//! ## Example
//!
//! ```rust,no_run
//! use thermotangent::prelude::*;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut session = AnalysisSession::default();
//! session.load_csv_file("run.csv")?;
//!
//! session.click_derivative_at_temperature(610.0)?;
//! session.select_slot(1)?;
//! session.click_derivative_at_temperature(630.0)?;
//!
//! if let Some(point) = session.intersection() {
//!     println!("Transition at {:.1} °C", point.x);
//! }
//! # Ok(())
//! # }
//! ```

use std::io::Read;
use std::path::Path;

pub use error::SessionError;
pub use slots::{Tangent, TangentSlots, SLOT_COUNT};

use crate::config::AnalysisConfig;
use crate::derivative::{CurvePoint, DerivativeCurves, DerivativeEngine, DerivativePoint};
use crate::geometry::{Point, TangentParams, Viewport};
use crate::ingest::{parse_csv, read_csv_file, DataIngestor, IngestReport, RawRow, Sample};
use crate::viewport::{ChartScale, ChartViewports, SyncOutcome, ViewportSync};

mod error;
mod slots;


/// Index and distance of the element minimising `distance`.
///
/// Ties go to the earliest element; NaN distances never win.
fn nearest_by<T>(items: &[T], distance: impl Fn(&T) -> f64) -> Option<(usize, f64)> {
    let mut best: Option<(usize, f64)> = None;
    for (index, item) in items.iter().enumerate() {
        let d = distance(item);
        if d.is_nan() {
            continue;
        }
        if best.map_or(true, |(_, current)| d < current) {
            best = Some((index, d));
        }
    }
    best
}

/// One loaded input: cleaned samples plus the curves computed from them.
///
/// Immutable once built; a new load replaces it wholesale.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    ingest: IngestReport,
    curves: DerivativeCurves,
}

impl Dataset {
    /// Ingest `rows` and compute both curves.
    pub fn from_rows(rows: &[RawRow], config: &AnalysisConfig) -> Result<Self, SessionError> {
        let ingest = DataIngestor::new(config.min_data_points).ingest(rows)?;
        let curves = DerivativeEngine::new(config.derivative_anchor).compute(&ingest.samples)?;
        Ok(Self { ingest, curves })
    }

    /// Ingest summary of the load.
    pub fn report(&self) -> &IngestReport {
        &self.ingest
    }

    /// Cleaned samples.
    pub fn samples(&self) -> &[Sample] {
        &self.ingest.samples
    }

    /// Main curve points.
    pub fn curve(&self) -> &[CurvePoint] {
        &self.curves.curve
    }

    /// Derivative curve points.
    pub fn derivative(&self) -> &[DerivativePoint] {
        &self.curves.derivative
    }

    /// Lowest and highest temperature on the main curve.
    pub fn temperature_range(&self) -> (f64, f64) {
        self.curve()
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), p| {
                (lo.min(p.x), hi.max(p.x))
            })
    }

    /// Viewports showing all data, each chart's Y padded by `padding_percent`.
    pub fn data_extent(&self, padding_percent: f64) -> ChartViewports {
        ViewportSync::new(padding_percent)
            .fit_both(self.curve(), self.derivative())
            .unwrap_or_default()
    }

    /// Index of the derivative point whose temperature is nearest `x`.
    pub fn nearest_derivative_index(&self, x: f64) -> Option<usize> {
        nearest_by(self.derivative(), |p| (p.x - x).abs()).map(|(index, _)| index)
    }

    /// Curve point whose temperature is nearest `x`; the first one on ties.
    pub fn nearest_curve_point(&self, x: f64) -> Option<&CurvePoint> {
        nearest_by(self.curve(), |p| (p.x - x).abs()).map(|(index, _)| &self.curve()[index])
    }

    /// Index of the lowest derivative point with temperature in `[x_min, x_max]`.
    pub fn min_derivative_index_in(&self, x_min: f64, x_max: f64) -> Option<usize> {
        let mut best: Option<(usize, f64)> = None;
        for (index, point) in self.derivative().iter().enumerate() {
            if point.x < x_min || point.x > x_max {
                continue;
            }
            if best.map_or(true, |(_, y)| point.y < y) {
                best = Some((index, point.y));
            }
        }
        best.map(|(index, _)| index)
    }

    /// Tangent on the main curve matching derivative point `index`.
    ///
    /// The slope is `dSignal/dTemperature` of that interval; the anchor is the
    /// curve point nearest the derivative point's temperature.
    pub fn tangent_for_derivative(&self, index: usize) -> Result<TangentParams, SessionError> {
        let point = self.derivative().get(index).ok_or(SessionError::NoData)?;
        let slope = match point.curve_slope() {
            Some(slope) => slope,
            None if point.temp_gradient == 0.0 => {
                return Err(SessionError::ZeroTemperatureGradient { x: point.x })
            }
            None => {
                return Err(SessionError::UndefinedSlope {
                    x: point.x,
                    signal_rate: point.y,
                    temp_gradient: point.temp_gradient,
                })
            }
        };
        let anchor = self.nearest_curve_point(point.x).ok_or(SessionError::NoData)?;
        Ok(TangentParams::new(slope, anchor.x, anchor.y))
    }
}

/// Caller-owned state of one interactive analysis.
#[derive(Debug, Clone)]
pub struct AnalysisSession {
    config: AnalysisConfig,
    sync: ViewportSync,
    dataset: Option<Dataset>,
    viewports: ChartViewports,
    tangents: TangentSlots,
}

impl Default for AnalysisSession {
    fn default() -> Self {
        Self::new(AnalysisConfig::default())
    }
}

impl AnalysisSession {
    /// Create an empty session.
    pub fn new(config: AnalysisConfig) -> Self {
        Self {
            sync: ViewportSync::new(config.chart_padding_percent),
            config,
            dataset: None,
            viewports: ChartViewports::default(),
            tangents: TangentSlots::new(),
        }
    }

    /// Settings this session was created with.
    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// Ingest raw rows and replace the current dataset.
    ///
    /// On failure the previous dataset, viewports and tangents are kept.
    pub fn load_rows(&mut self, rows: &[RawRow]) -> Result<&Dataset, SessionError> {
        let dataset = Dataset::from_rows(rows, &self.config)?;
        Ok(self.load_dataset(dataset))
    }

    /// Parse CSV text and load it.
    pub fn load_csv<R: Read>(&mut self, reader: R) -> Result<&Dataset, SessionError> {
        let rows = parse_csv(reader)?;
        self.load_rows(&rows)
    }

    /// Read a CSV file and load it.
    pub fn load_csv_file<P: AsRef<Path>>(&mut self, path: P) -> Result<&Dataset, SessionError> {
        let rows = read_csv_file(path)?;
        self.load_rows(&rows)
    }

    /// Install an already computed dataset, fitting both charts and clearing
    /// both tangent slots.
    pub fn load_dataset(&mut self, dataset: Dataset) -> &Dataset {
        self.viewports = dataset.data_extent(self.config.chart_padding_percent);
        self.tangents = TangentSlots::new();
        log::info!(
            "Loaded dataset: {} samples, {} derivative points",
            dataset.samples().len(),
            dataset.derivative().len()
        );
        self.dataset.insert(dataset)
    }

    /// Currently loaded dataset.
    pub fn dataset(&self) -> Option<&Dataset> {
        self.dataset.as_ref()
    }

    fn require_dataset(&self) -> Result<&Dataset, SessionError> {
        self.dataset.as_ref().ok_or(SessionError::NoData)
    }

    /// Current chart viewports.
    pub fn viewports(&self) -> &ChartViewports {
        &self.viewports
    }

    /// Tangent slots.
    pub fn tangents(&self) -> &TangentSlots {
        &self.tangents
    }

    /// Replace the main viewport as reported by the renderer and re-clip the
    /// tangents against it. The derivative chart is left alone.
    pub fn set_main_viewport(&mut self, viewport: Viewport) {
        self.viewports.main = viewport;
        self.tangents
            .reclip(&self.viewports.main, self.config.tangent_span_percent);
    }

    /// Make `index` the slot the next tangent is drawn into.
    pub fn select_slot(&mut self, index: usize) -> Result<(), SessionError> {
        self.tangents.select(index)
    }

    /// Draw the tangent `y = slope * (x - anchor_x) + anchor_y` into the
    /// active slot, clipped to the current main viewport.
    pub fn draw_at(
        &mut self,
        slope: f64,
        anchor_x: f64,
        anchor_y: f64,
    ) -> Result<&Tangent, SessionError> {
        self.require_dataset()?;
        if !(slope.is_finite() && anchor_x.is_finite() && anchor_y.is_finite()) {
            return Err(SessionError::NonFiniteTangent {
                slope,
                anchor_x,
                anchor_y,
            });
        }
        Ok(self.draw(TangentParams::new(slope, anchor_x, anchor_y)))
    }

    fn draw(&mut self, params: TangentParams) -> &Tangent {
        self.tangents
            .draw(params, &self.viewports.main, self.config.tangent_span_percent)
    }

    /// Draw the tangent matching derivative point `index` into the active slot.
    pub fn draw_from_derivative(&mut self, index: usize) -> Result<&Tangent, SessionError> {
        let params = self.require_dataset()?.tangent_for_derivative(index)?;
        Ok(self.draw(params))
    }

    /// Resolve a click at horizontal pixel `pixel_x` on the derivative chart.
    ///
    /// `scale` converts derivative-chart values to pixels. The nearest point
    /// must lie within the configured pixel tolerance.
    pub fn click_derivative(
        &mut self,
        pixel_x: f64,
        scale: &dyn ChartScale,
    ) -> Result<&Tangent, SessionError> {
        let dataset = self.require_dataset()?;
        let (index, distance) = nearest_by(dataset.derivative(), |p| {
            (scale.pixel_for_x(p.x) - pixel_x).abs()
        })
        .ok_or(SessionError::NoData)?;

        let tolerance = self.config.tolerance_pixels;
        if distance > tolerance {
            log::debug!("Ignoring derivative click {:.1} px from the nearest point", distance);
            return Err(SessionError::OutOfTolerance {
                distance,
                tolerance,
            });
        }

        self.draw_from_derivative(index)
    }

    /// Data-space variant of [`click_derivative`](Self::click_derivative):
    /// uses the derivative point nearest temperature `x`, without a tolerance.
    pub fn click_derivative_at_temperature(&mut self, x: f64) -> Result<&Tangent, SessionError> {
        let index = self
            .require_dataset()?
            .nearest_derivative_index(x)
            .ok_or(SessionError::NoData)?;
        self.draw_from_derivative(index)
    }

    /// Empty slot `index`.
    pub fn clear(&mut self, index: usize) -> Result<(), SessionError> {
        self.tangents.clear(index).map(|_| ())
    }

    /// Empty both slots.
    pub fn clear_all(&mut self) {
        self.tangents.clear_all();
    }

    /// Where the two tangents cross, if both exist and are not parallel.
    pub fn intersection(&self) -> Option<Point> {
        self.tangents.intersection()
    }

    /// React to the main chart's X range changing: copy it to the derivative
    /// chart, autoscale both Y ranges and re-clip the tangents.
    pub fn on_main_x_range_changed(
        &mut self,
        x_min: f64,
        x_max: f64,
    ) -> Result<SyncOutcome, SessionError> {
        let dataset = self.dataset.as_ref().ok_or(SessionError::NoData)?;
        let outcome = self.sync.sync(
            &mut self.viewports,
            x_min,
            x_max,
            dataset.curve(),
            dataset.derivative(),
        );
        self.tangents
            .reclip(&self.viewports.main, self.config.tangent_span_percent);
        Ok(outcome)
    }

    /// Fit both charts to the full dataset again and re-clip the tangents.
    pub fn reset_zoom(&mut self) -> Result<ChartViewports, SessionError> {
        self.viewports = self
            .require_dataset()?
            .data_extent(self.config.chart_padding_percent);
        self.tangents
            .reclip(&self.viewports.main, self.config.tangent_span_percent);
        Ok(self.viewports)
    }
}

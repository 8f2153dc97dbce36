//! # Analysis Report
//!
//! Snapshot of a session's results for display or export: the ingest summary,
//! both tangents and the transition temperature where they cross.
//!
//! Numbers are rounded for display only (slope to 6 decimals, anchor
//! temperature to 2, anchor signal to 4, transition temperature to 1). A value
//! that is not finite is shown as `—`.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::Serialize;

#[cfg(feature = "colorized_output")]
use console::style;

use crate::geometry::Point;
use crate::session::{AnalysisSession, SessionError, Tangent};

/// Placeholder for values that cannot be displayed.
pub const MISSING: &str = "—";

/// Format `value` with `decimals` places, or [`MISSING`] when not finite.
pub fn format_number(value: f64, decimals: usize) -> String {
    if value.is_finite() {
        format!("{:.*}", decimals, value)
    } else {
        MISSING.to_string()
    }
}

/// One drawn tangent as reported.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TangentSummary {
    /// One-based slot number
    pub slot: usize,
    /// Slope, signal per °C
    pub slope: f64,
    /// Anchor temperature
    pub anchor_x: f64,
    /// Anchor signal
    pub anchor_y: f64,
}

impl TangentSummary {
    fn new(index: usize, tangent: &Tangent) -> Self {
        Self {
            slot: index + 1,
            slope: tangent.params.slope,
            anchor_x: tangent.params.anchor_x,
            anchor_y: tangent.params.anchor_y,
        }
    }

    fn describe(&self) -> String {
        format!(
            "slope {}, anchor ({}, {})",
            format_number(self.slope, 6),
            format_number(self.anchor_x, 2),
            format_number(self.anchor_y, 4)
        )
    }
}

/// Results of one analysis.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport {
    /// Where the data came from
    pub source: String,
    /// When the report was built
    pub generated_at: DateTime<Utc>,
    /// Samples kept after cleaning
    pub samples: usize,
    /// Rows dropped for invalid values
    pub invalid_rows: usize,
    /// Rows dropped for non-increasing time
    pub non_monotonic_rows: usize,
    /// Points on the derivative curve
    pub derivative_points: usize,
    /// Lowest and highest temperature
    pub temperature_range: (f64, f64),
    /// Tangents, one entry per slot
    pub tangents: Vec<Option<TangentSummary>>,
    /// Where the tangents cross
    pub transition: Option<Point>,
    /// Ingest warnings
    pub warnings: Vec<String>,
}

impl AnalysisReport {
    /// Build a report from the current state of `session`.
    pub fn from_session(
        source: impl Into<String>,
        session: &AnalysisSession,
    ) -> Result<Self, SessionError> {
        let dataset = session.dataset().ok_or(SessionError::NoData)?;
        let ingest = dataset.report();

        let tangents = session
            .tangents()
            .iter()
            .enumerate()
            .map(|(index, tangent)| tangent.map(|t| TangentSummary::new(index, t)))
            .collect();

        Ok(Self {
            source: source.into(),
            generated_at: Utc::now(),
            samples: dataset.samples().len(),
            invalid_rows: ingest.invalid_rows,
            non_monotonic_rows: ingest.non_monotonic_rows,
            derivative_points: dataset.derivative().len(),
            temperature_range: dataset.temperature_range(),
            tangents,
            transition: session.intersection(),
            warnings: ingest.warnings(),
        })
    }

    /// Transition temperature, if both tangents exist and cross.
    pub fn transition_temperature(&self) -> Option<f64> {
        self.transition.map(|p| p.x)
    }

    /// Pretty-printed JSON.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    fn transition_text(&self) -> String {
        match self.transition {
            Some(point) => format!("{} °C", format_number(point.x, 1)),
            None => MISSING.to_string(),
        }
    }

    /// Format the report with colors (requires console feature)
    pub fn format_colored(&self) -> String {
        #[cfg(feature = "colorized_output")]
        {
            let mut output = String::new();

            output.push_str(&format!("{}\n", style("Thermal Analysis Report").bold().cyan()));
            output.push_str(&format!("{}\n", style("=======================").cyan()));
            output.push_str(&format!("{}: {}\n", style("Source").bold(), self.source));
            output.push_str(&format!(
                "{}: {} kept ({} invalid, {} non-monotonic)\n",
                style("Samples").bold(),
                self.samples,
                self.invalid_rows,
                self.non_monotonic_rows
            ));
            output.push_str(&format!(
                "{}: {} .. {} °C\n",
                style("Temperature range").bold(),
                format_number(self.temperature_range.0, 2),
                format_number(self.temperature_range.1, 2)
            ));
            output.push_str(&format!(
                "{}: {}\n",
                style("Derivative points").bold(),
                self.derivative_points
            ));

            for warning in &self.warnings {
                output.push_str(&format!("{}: {}\n", style("WARNING").yellow().bold(), warning));
            }
            output.push('\n');

            for (index, tangent) in self.tangents.iter().enumerate() {
                let label = style(format!("Tangent {}", index + 1)).bold();
                match tangent {
                    Some(t) => {
                        output.push_str(&format!("{}: {}\n", label, style(t.describe()).green()))
                    }
                    None => output.push_str(&format!("{}: {}\n", label, style("not drawn").dim())),
                }
            }

            output.push('\n');
            let transition = if self.transition.is_some() {
                style(self.transition_text()).green().bold()
            } else {
                style(self.transition_text()).yellow()
            };
            output.push_str(&format!(
                "{}: {}\n",
                style("Transition temperature").bold(),
                transition
            ));

            output
        }

        #[cfg(not(feature = "colorized_output"))]
        {
            format!("{}", self)
        }
    }
}

impl fmt::Display for AnalysisReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Thermal Analysis Report")?;
        writeln!(f, "=======================")?;
        writeln!(f, "Source: {}", self.source)?;
        writeln!(
            f,
            "Samples: {} kept ({} invalid, {} non-monotonic)",
            self.samples, self.invalid_rows, self.non_monotonic_rows
        )?;
        writeln!(
            f,
            "Temperature range: {} .. {} °C",
            format_number(self.temperature_range.0, 2),
            format_number(self.temperature_range.1, 2)
        )?;
        writeln!(f, "Derivative points: {}", self.derivative_points)?;
        for warning in &self.warnings {
            writeln!(f, "WARNING: {}", warning)?;
        }
        writeln!(f)?;

        for (index, tangent) in self.tangents.iter().enumerate() {
            match tangent {
                Some(t) => writeln!(f, "Tangent {}: {}", index + 1, t.describe())?,
                None => writeln!(f, "Tangent {}: not drawn", index + 1)?,
            }
        }

        writeln!(f)?;
        writeln!(f, "Transition temperature: {}", self.transition_text())
    }
}

//! # Data Ingestion
//!
//! Turns raw table rows into validated `(time, temperature, signal)` samples.
//!
//! Contract enforced here:
//! - An optional header row is detected and skipped.
//! - A row is kept only if its first three values are finite numbers.
//! - Time is strictly increasing across kept rows; rows that go back in time
//!   (or repeat a timestamp) are dropped and counted.
//! - At least `min_data_points` samples must survive, otherwise the load fails
//!   with a [`ValidationError`] carrying the dropped-row counts.

use std::fmt;

use serde::{Deserialize, Serialize};

pub use error::{IngestError, ValidationError};
pub use reader::{parse_csv, read_csv_file, MIN_FIELDS};

use crate::config::MIN_DATA_POINTS;

mod error;
mod reader;

#[cfg(test)]
mod tests;

/// A single untyped table cell.
#[derive(Debug, Clone, PartialEq)]
pub enum RawValue {
    /// A value that parsed as a floating-point number (possibly NaN or infinite)
    Number(f64),
    /// Any other non-empty text
    Text(String),
    /// An empty cell
    Empty,
}

impl RawValue {
    /// Dynamically type a trimmed field.
    pub fn parse(field: &str) -> Self {
        let field = field.trim();
        if field.is_empty() {
            return RawValue::Empty;
        }
        match field.parse::<f64>() {
            Ok(value) => RawValue::Number(value),
            Err(_) => RawValue::Text(field.to_string()),
        }
    }

    /// The value as a finite number, if it is one.
    pub fn as_finite(&self) -> Option<f64> {
        match self {
            RawValue::Number(v) if v.is_finite() => Some(*v),
            _ => None,
        }
    }

    fn is_number(&self) -> bool {
        matches!(self, RawValue::Number(_))
    }

    fn is_text(&self) -> bool {
        matches!(self, RawValue::Text(_))
    }
}

impl From<f64> for RawValue {
    fn from(value: f64) -> Self {
        RawValue::Number(value)
    }
}

impl From<&str> for RawValue {
    fn from(value: &str) -> Self {
        RawValue::parse(value)
    }
}

/// One row of the input table.
pub type RawRow = Vec<RawValue>;

/// One validated measurement.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    /// Elapsed time
    pub time: f64,
    /// Sample temperature
    pub temperature: f64,
    /// Measured signal (e.g. DTA)
    pub signal: f64,
}

impl Sample {
    /// Create a new sample.
    pub fn new(time: f64, temperature: f64, signal: f64) -> Self {
        Self {
            time,
            temperature,
            signal,
        }
    }

    /// Build a sample from a row whose first three values are finite numbers.
    pub fn from_row(row: &[RawValue]) -> Option<Self> {
        if row.len() < 3 {
            return None;
        }
        Some(Self::new(
            row[0].as_finite()?,
            row[1].as_finite()?,
            row[2].as_finite()?,
        ))
    }
}

/// Outcome of a successful ingest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IngestReport {
    /// Cleaned, strictly time-increasing samples
    pub samples: Vec<Sample>,
    /// Rows handed to the ingestor, header included
    pub total_rows: usize,
    /// Whether the first row was recognised as a header and skipped
    pub header_skipped: bool,
    /// Rows dropped for missing or non-numeric values
    pub invalid_rows: usize,
    /// Rows dropped because time did not strictly increase
    pub non_monotonic_rows: usize,
}

impl IngestReport {
    /// Total rows dropped during cleaning (the header is not counted).
    pub fn dropped_rows(&self) -> usize {
        self.invalid_rows + self.non_monotonic_rows
    }

    /// One human-readable warning per non-empty category of dropped rows.
    pub fn warnings(&self) -> Vec<String> {
        let mut warnings = Vec::new();
        if self.invalid_rows > 0 {
            warnings.push(format!(
                "skipped {} rows with invalid data",
                self.invalid_rows
            ));
        }
        if self.non_monotonic_rows > 0 {
            warnings.push(format!(
                "skipped {} rows with non-monotonic time",
                self.non_monotonic_rows
            ));
        }
        warnings
    }
}

impl fmt::Display for IngestReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Kept {} of {} rows ({} invalid, {} non-monotonic{})",
            self.samples.len(),
            self.total_rows,
            self.invalid_rows,
            self.non_monotonic_rows,
            if self.header_skipped { ", header skipped" } else { "" }
        )
    }
}

/// Header heuristic: the first row has text that is not a number while every
/// value of the second row is numeric.
pub fn detect_header(rows: &[RawRow]) -> bool {
    if rows.len() < 2 {
        return false;
    }
    let first_has_text = rows[0].iter().any(RawValue::is_text);
    let second_all_numeric = rows[1].iter().all(RawValue::is_number);
    first_has_text && second_all_numeric
}

/// Validating converter from raw rows to samples.
#[derive(Debug, Clone)]
pub struct DataIngestor {
    min_data_points: usize,
}

impl Default for DataIngestor {
    fn default() -> Self {
        Self::new(MIN_DATA_POINTS)
    }
}

impl DataIngestor {
    /// Create an ingestor requiring at least `min_data_points` cleaned samples.
    pub fn new(min_data_points: usize) -> Self {
        Self { min_data_points }
    }

    /// Detect the header, check the column count and clean the rows.
    pub fn ingest(&self, rows: &[RawRow]) -> Result<IngestReport, IngestError> {
        let header_skipped = detect_header(rows);
        let data_rows = if header_skipped { &rows[1..] } else { rows };

        if let Some(first) = data_rows.first() {
            if first.len() < MIN_FIELDS {
                return Err(IngestError::TooFewColumns { found: first.len() });
            }
        }

        let report = self.clean(data_rows, rows.len(), header_skipped);

        if report.samples.len() < self.min_data_points {
            log::warn!("Rejecting input: {}", report);
            return Err(ValidationError::InsufficientData {
                valid: report.samples.len(),
                required: self.min_data_points,
                invalid_rows: report.invalid_rows,
                non_monotonic_rows: report.non_monotonic_rows,
            }
            .into());
        }

        for warning in report.warnings() {
            log::warn!("{}", warning);
        }
        log::info!("{}", report);

        Ok(report)
    }

    fn clean(&self, rows: &[RawRow], total_rows: usize, header_skipped: bool) -> IngestReport {
        let mut samples = Vec::with_capacity(rows.len());
        let mut invalid_rows = 0;
        let mut non_monotonic_rows = 0;
        let mut last_time = f64::NEG_INFINITY;

        for row in rows {
            let Some(sample) = Sample::from_row(row) else {
                invalid_rows += 1;
                continue;
            };

            if sample.time <= last_time {
                non_monotonic_rows += 1;
                continue;
            }

            last_time = sample.time;
            samples.push(sample);
        }

        IngestReport {
            samples,
            total_rows,
            header_skipped,
            invalid_rows,
            non_monotonic_rows,
        }
    }
}

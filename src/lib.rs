//! # thermotangent - Transition Temperatures by the Tangent Method
//!
//! `thermotangent` finds phase-transition temperatures in thermal analysis
//! recordings (DTA/DSC-style runs of time, temperature and signal). The
//! transition temperature is read off where two tangents to the signal curve
//! cross: one laid along the baseline, one along the steepest part of the
//! transition.
//!
//! ## Key Features
//!
//! - **Forgiving ingest**: CSV with or without a header; rows with missing or
//!   non-numeric values, or with time running backwards, are dropped and
//!   counted instead of failing the whole load.
//!
//! - **Derivative-guided tangents**: a tangent is chosen by picking a point on
//!   the derivative curve, which turns the signal's rate of change into a slope
//!   on the main curve.
//!
//! - **Zoom-stable geometry**: tangent segments are re-clipped from their line
//!   parameters whenever the view changes, so they always span the visible
//!   chart without drift.
//!
//! - **Linked viewports**: the derivative chart follows the main chart's X
//!   range and both charts autoscale Y from the points actually visible.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use thermotangent::prelude::*;
//!
//! let mut session = AnalysisSession::new(AnalysisConfig::default());
//! session.load_csv_file("melting_run.csv")?;
//!
//! // Baseline tangent, then the transition tangent
//! session.click_derivative_at_temperature(610.0)?;
//! session.select_slot(1)?;
//! session.click_derivative_at_temperature(632.0)?;
//!
//! let report = AnalysisReport::from_session("melting_run.csv", &session)?;
//! println!("{}", report);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Input Format
//!
//! Three comma-separated columns per row, in this order:
//!
//! | Column | Description |
//! |--------|-------------|
//! | time | Seconds since the start of the run, strictly increasing |
//! | temperature | Sample temperature, °C |
//! | signal | Measured signal (e.g. DTA µV) |
//!
//! Extra columns are ignored. A first row with text and a second row that is
//! fully numeric is treated as a header.
//!
//! ## Architecture
//!
//! - [`ingest`]: CSV parsing, header detection and row validation
//! - [`derivative`]: main curve and derivative curve computation
//! - [`geometry`]: tangent clipping and tangent intersection
//! - [`viewport`]: X-range propagation and Y autoscaling between the charts
//! - [`session`]: caller-owned analysis state and the tangent slots
//! - [`walkthrough`]: scripted two-tangent demonstration
//! - [`report`]: results summary as text or JSON
//! - [`sample`]: synthetic melting run for demos and tests
//! - [`config`]: tunables and TOML loading

// Documentation lints - enforce complete documentation for publication
#![deny(missing_docs)]
#![deny(rustdoc::missing_crate_level_docs)]

pub mod config;
pub mod derivative;
pub mod geometry;
pub mod ingest;
pub mod report;
pub mod sample;
pub mod session;
pub mod viewport;
pub mod walkthrough;

/// Re-export commonly used types for convenience
pub mod prelude {
    pub use crate::config::{AnalysisConfig, Config, ConfigError, WalkthroughConfig};
    pub use crate::derivative::{
        CurvePoint, DerivativeAnchor, DerivativeCurves, DerivativeEngine, DerivativeError,
        DerivativePoint,
    };
    pub use crate::geometry::{
        clip_tangent, intersect, Clipping, Point, TangentParams, TangentSegment, Viewport,
    };
    pub use crate::ingest::{
        parse_csv, read_csv_file, DataIngestor, IngestError, IngestReport, RawRow, RawValue,
        Sample, ValidationError,
    };
    pub use crate::report::AnalysisReport;
    pub use crate::session::{AnalysisSession, Dataset, SessionError, Tangent, TangentSlots};
    pub use crate::viewport::{
        ChartScale, ChartViewports, LinearScale, SyncOutcome, ViewportSync, YRescale,
    };
    pub use crate::walkthrough::{
        CancellationToken, InstantPacer, Pacer, StepEvent, ThreadPacer, Walkthrough,
        WalkthroughOutcome,
    };
}

use crate::derivative::DerivativeError;
use crate::ingest::IngestError;

/// Errors raised by session operations
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// An operation needs a loaded dataset
    #[error("No dataset loaded")]
    NoData,

    /// The input could not be ingested
    #[error("Ingest error: {0}")]
    Ingest(#[from] IngestError),

    /// The derivative curve could not be computed
    #[error("Derivative error: {0}")]
    Derivative(#[from] DerivativeError),

    /// A click landed too far from every derivative point
    #[error(
        "Click is {distance:.1} px from the nearest derivative point (tolerance {tolerance} px)"
    )]
    OutOfTolerance {
        /// Pixel distance to the nearest point
        distance: f64,
        /// Configured tolerance
        tolerance: f64,
    },

    /// The chosen derivative point has no temperature change, so no slope exists
    #[error("Cannot build a tangent at T={x:.2}: temperature gradient is zero")]
    ZeroTemperatureGradient {
        /// Temperature of the derivative point
        x: f64,
    },

    /// The derivative point has a non-finite gradient, or the slope overflows
    #[error(
        "Cannot build a tangent at T={x:.2}: slope is not finite \
         (dSignal/dt {signal_rate}, dT/dt {temp_gradient})"
    )]
    UndefinedSlope {
        /// Temperature of the derivative point
        x: f64,
        /// Signal change per unit time
        signal_rate: f64,
        /// Temperature change per unit time
        temp_gradient: f64,
    },

    /// Slope or anchor is NaN or infinite
    #[error("Tangent parameters must be finite (slope {slope}, anchor ({anchor_x}, {anchor_y}))")]
    NonFiniteTangent {
        /// Requested slope
        slope: f64,
        /// Requested anchor temperature
        anchor_x: f64,
        /// Requested anchor signal
        anchor_y: f64,
    },

    /// Slot index outside `0..2`
    #[error("Invalid tangent slot {0}, expected 0 or 1")]
    InvalidSlot(usize),
}

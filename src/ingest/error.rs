/// Errors that can occur while turning raw input into samples
#[derive(Debug, thiserror::Error)]
pub enum IngestError {
    /// I/O error reading the input file
    #[error("Failed to read file: {0}")]
    IoError(#[from] std::io::Error),

    /// The input stream could not be parsed as CSV
    #[error("CSV parsing error: {0}")]
    CsvError(#[from] csv::Error),

    /// The first data row does not carry time, temperature and signal columns
    #[error("Invalid format: expected 3 columns (time, temperature, signal), found {found}")]
    TooFewColumns {
        /// Number of columns in the first data row
        found: usize,
    },

    /// Too few rows survived validation
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

/// Raised when cleaning leaves fewer samples than required
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// Not enough valid, time-monotonic rows
    #[error(
        "Insufficient data after validation: {valid} valid samples, {required} required \
         ({invalid_rows} invalid rows, {non_monotonic_rows} non-monotonic rows skipped)"
    )]
    InsufficientData {
        /// Samples that passed validation
        valid: usize,
        /// Configured minimum
        required: usize,
        /// Rows dropped for missing or non-numeric values
        invalid_rows: usize,
        /// Rows dropped because time did not increase
        non_monotonic_rows: usize,
    },
}

//! Error types for the ombros-spi crate.

use chrono::NaiveDate;

/// Error type for all fallible operations in the ombros-spi crate.
///
/// Everything here is a client-correctable condition: the remedy is a
/// longer history, a smaller window, or waiting for more rainfall, never
/// a retry.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SpiError {
    /// Returned when too few rolling totals are defined for calibration.
    #[error("insufficient data: {n} rolling totals, need at least {min}")]
    InsufficientData {
        /// Number of defined rolling totals.
        n: usize,
        /// Minimum required.
        min: usize,
    },

    /// Returned when too few rolling totals are strictly positive.
    ///
    /// Zero-rainfall windows are real observations but cannot calibrate a
    /// gamma distribution, so they are excluded from the fit.
    #[error("insufficient positive data: {n} positive rolling totals, need at least {min}")]
    InsufficientPositiveData {
        /// Number of strictly positive rolling totals.
        n: usize,
        /// Minimum required.
        min: usize,
    },

    /// Returned when every positive rolling total is numerically identical.
    #[error("degenerate distribution: all positive rolling totals are identical")]
    DegenerateDistribution,

    /// Returned when the gamma maximum-likelihood fit does not converge or
    /// produces invalid parameters.
    #[error("gamma fit failed: {message}")]
    FitFailure {
        /// Description of the failure.
        message: String,
    },

    /// Returned when the transform leaves no defined SPI value.
    #[error("no valid SPI values after transform")]
    NoValidValues,

    /// Returned when a multi-scale request carries no scales.
    #[error("scales list is empty")]
    EmptyScales,

    /// Returned when a scale is outside the supported range.
    #[error("invalid scale: {scale_months} months (must be 1..=24)")]
    InvalidScale {
        /// The offending scale in months.
        scale_months: u32,
    },

    /// Returned when the forecast series has no dates after the requested
    /// end date, so there is nothing to blend forward.
    #[error("forecast series has no dates after {end_date}")]
    NoForecastAfter {
        /// End of the historical range.
        end_date: NaiveDate,
    },
}

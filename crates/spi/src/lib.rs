//! Standardized Precipitation Index computation core.
//!
//! SPI scores a precipitation total against the location's own history: fit
//! a gamma distribution to historical rolling totals, push each observed
//! total through the fitted CDF, and map the probability onto the standard
//! normal scale. The result is a dimensionless drought/wetness score
//! comparable across locations and window lengths.
//!
//! # Pipeline
//!
//! 1. **Roll** daily precipitation into trailing-window totals
//!    (`ombros-series`; windows touching a data gap stay undefined)
//! 2. **Calibrate** a gamma distribution (location 0) on the strictly
//!    positive totals via maximum likelihood
//! 3. **Map** each positive total: pgamma → clip → qnorm
//!
//! Totals of zero keep no SPI value: a measured dry spell is real data for
//! the record but has no meaningful quantile under a continuous
//! distribution anchored at zero.
//!
//! # Entry points
//!
//! - [`spi_for_window`] — one series, one window
//! - [`multi_scale_spi`] — one series, several windows, all-or-nothing
//! - [`blended_spi`] — observed history extended with forecast
//!   precipitation, calibrated on history alone

mod blend;
mod error;
pub(crate) mod fit;
pub(crate) mod gamma;
mod multi;
mod transform;

pub use blend::{blended_spi, BlendedSpi};
pub use error::SpiError;
pub use gamma::GammaParams;
pub use multi::{multi_scale_spi, ScaleSpi};
pub use transform::{spi_from_rolling_sums, SpiResult, CDF_EPS, MIN_SAMPLES};

use ombros_series::DailySeries;

/// Nominal month length used to convert scales to window lengths.
///
/// Scales are fixed 30-day blocks, not calendar months, so that a
/// "3-month" SPI means the same span everywhere in the record.
pub const DAYS_PER_MONTH: u32 = 30;

/// Computes the SPI series for a precipitation series at one window length.
///
/// Equivalent to `spi_from_rolling_sums(&precip.rolling_sum(window_days))`.
///
/// # Errors
///
/// See [`spi_from_rolling_sums`].
pub fn spi_for_window(precip: &DailySeries, window_days: usize) -> Result<SpiResult, SpiError> {
    spi_from_rolling_sums(&precip.rolling_sum(window_days))
}

//! Gap-aware daily time series for the ombros SPI service.
//!
//! The central type is [`DailySeries`], a sparse ordered mapping from
//! calendar date to value. Missing days are absent, not zero: rainfall
//! that was never measured must not look like a dry spell, so absence is
//! kept first-class through every transform.
//!
//! # Operations
//!
//! - [`DailySeries::rolling_sum`] — trailing calendar-window totals;
//!   windows touching a gap stay undefined.
//! - [`DailySeries::interpolate_daily`] — linear regularization onto a
//!   contiguous daily grid for forecasting.
//! - [`DailySeries::merge_preferring`] — combine observed history with
//!   forecast data, history winning on overlaps.

mod daily;
mod error;
mod regularize;
mod rolling;

pub use daily::DailySeries;
pub use error::SeriesError;

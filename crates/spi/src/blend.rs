//! SPI over blended observed and forecast precipitation.

use chrono::NaiveDate;
use ombros_series::DailySeries;
use tracing::debug;

use crate::error::SpiError;
use crate::transform::{apply, calibrate};
use crate::GammaParams;

/// SPI computed over history extended with forecast precipitation.
#[derive(Debug, Clone)]
pub struct BlendedSpi {
    latest: f64,
    latest_date: NaiveDate,
    history: DailySeries,
    outlook: DailySeries,
    params: GammaParams,
}

impl BlendedSpi {
    /// Last defined SPI value on or before the end date.
    pub fn latest(&self) -> f64 {
        self.latest
    }

    /// Date of the last defined historical SPI value.
    pub fn latest_date(&self) -> NaiveDate {
        self.latest_date
    }

    /// Historical SPI series (dates on or before the end date).
    pub fn history(&self) -> &DailySeries {
        &self.history
    }

    /// Forward SPI series (dates after the end date, at most the requested
    /// number of days).
    pub fn outlook(&self) -> &DailySeries {
        &self.outlook
    }

    /// The gamma parameters used for the whole blended series. Calibrated
    /// on historical windows only.
    pub fn params(&self) -> GammaParams {
        self.params
    }
}

/// Computes SPI over observed history extended with forecast precipitation.
///
/// The forecast contribution is limited to dates strictly after `end_date`
/// (truncated to `forecast_days` entries); on any overlapping date the
/// observed value wins. The gamma calibration uses only windows ending on
/// or before `end_date`, so forecast data never reshapes the reference
/// distribution it is scored against.
///
/// # Errors
///
/// [`SpiError::NoForecastAfter`] when the forecast carries no dates past
/// `end_date`, plus everything the calibration raises for the historical
/// windows.
pub fn blended_spi(
    history_precip: &DailySeries,
    forecast_precip: &DailySeries,
    window_days: usize,
    end_date: NaiveDate,
    forecast_days: usize,
) -> Result<BlendedSpi, SpiError> {
    let forecast_tail = forecast_precip.after(end_date).first_n(forecast_days);
    if forecast_tail.is_empty() {
        return Err(SpiError::NoForecastAfter { end_date });
    }

    let combined = history_precip.merge_preferring(&forecast_tail);
    let rolling_all = combined.rolling_sum(window_days);
    let rolling_hist = rolling_all.up_to(end_date);

    let params = calibrate(&rolling_hist)?;
    let spi_all = apply(&rolling_all, &params)?;

    let history = spi_all.up_to(end_date);
    let (latest_date, latest) = history.last_entry().ok_or(SpiError::NoValidValues)?;
    let outlook = spi_all.after(end_date).first_n(forecast_days);

    debug!(
        latest,
        n_history = history.len(),
        n_outlook = outlook.len(),
        "blended SPI computed"
    );

    Ok(BlendedSpi {
        latest,
        latest_date,
        history,
        outlook,
        params,
    })
}

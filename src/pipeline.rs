//! Request pipeline: fetch from the providers, run the computation core.
//!
//! Everything here is a straight line: one or two awaited fetches, then
//! pure computation. The functions take the provider traits rather than
//! concrete clients so the whole pipeline runs against fixtures in tests.

use chrono::{Duration, NaiveDate};
use ombros_series::DailySeries;
use ombros_spi::{
    blended_spi, multi_scale_spi, spi_for_window, BlendedSpi, ScaleSpi, SpiResult, DAYS_PER_MONTH,
};
use std::collections::BTreeMap;

use crate::clients::{ForecastPrecipProvider, HistoricalPrecipProvider};
use crate::error::ApiError;

/// Forecast fetches are requested in UTC so that provider day boundaries
/// line up with the historical record.
const FORECAST_TIMEZONE: &str = "UTC";

/// Start of the history window: `history_years` nominal 365-day years
/// before the end date.
pub fn history_start(end_date: NaiveDate, history_years: u32) -> NaiveDate {
    end_date - Duration::days(history_years as i64 * 365)
}

/// Window length in days for a scale in months.
pub fn window_days(scale_months: u32) -> usize {
    (scale_months * DAYS_PER_MONTH) as usize
}

/// Fetches the observed history for a point.
async fn fetch_history(
    historical: &dyn HistoricalPrecipProvider,
    lat: f64,
    lon: f64,
    end_date: NaiveDate,
    history_years: u32,
) -> Result<DailySeries, ApiError> {
    let start = history_start(end_date, history_years);
    let series = historical
        .fetch_daily_precipitation(lat, lon, start, end_date)
        .await?;
    tracing::debug!(n_days = series.len(), %start, %end_date, "fetched history");
    Ok(series)
}

/// Observed history → SPI series at one scale.
pub async fn current_spi(
    historical: &dyn HistoricalPrecipProvider,
    lat: f64,
    lon: f64,
    scale_months: u32,
    history_years: u32,
    end_date: NaiveDate,
) -> Result<SpiResult, ApiError> {
    let precip = fetch_history(historical, lat, lon, end_date, history_years).await?;
    Ok(spi_for_window(&precip, window_days(scale_months))?)
}

/// Observed history + forecast precipitation → blended SPI.
#[allow(clippy::too_many_arguments)]
pub async fn forecast_blend(
    historical: &dyn HistoricalPrecipProvider,
    forecast: &dyn ForecastPrecipProvider,
    lat: f64,
    lon: f64,
    scale_months: u32,
    history_years: u32,
    end_date: NaiveDate,
    forecast_days: u32,
) -> Result<BlendedSpi, ApiError> {
    let precip_hist = fetch_history(historical, lat, lon, end_date, history_years).await?;
    let precip_forecast = forecast
        .fetch_daily_forecast(lat, lon, forecast_days, FORECAST_TIMEZONE)
        .await?;

    Ok(blended_spi(
        &precip_hist,
        &precip_forecast,
        window_days(scale_months),
        end_date,
        forecast_days as usize,
    )?)
}

/// Observed history → (SPI, category) per scale, all-or-nothing.
pub async fn multi_scale(
    historical: &dyn HistoricalPrecipProvider,
    lat: f64,
    lon: f64,
    scales_months: &[u32],
    history_years: u32,
    end_date: NaiveDate,
) -> Result<BTreeMap<u32, ScaleSpi>, ApiError> {
    let precip = fetch_history(historical, lat, lon, end_date, history_years).await?;
    Ok(multi_scale_spi(&precip, scales_months)?)
}

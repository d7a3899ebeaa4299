//! Boundary clients for the upstream weather providers.
//!
//! Both providers sit behind async traits so that the request pipeline can
//! be exercised against fixtures. The real implementations are thin
//! reqwest clients with no retries and no caching; a provider problem surfaces
//! immediately as a [`ProviderError`] and maps to a 502.

pub mod meteostat;
pub mod open_meteo;

use async_trait::async_trait;
use chrono::NaiveDate;
use ombros_series::DailySeries;

/// Error type for the provider clients.
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    /// The request never produced a response.
    #[error("{provider} request failed: {source}")]
    Transport {
        /// Provider name for the log line.
        provider: &'static str,
        /// Underlying transport error.
        #[source]
        source: reqwest::Error,
    },

    /// The provider answered with a non-success status.
    #[error("{provider} returned status {status}: {body}")]
    Status {
        /// Provider name.
        provider: &'static str,
        /// HTTP status code.
        status: reqwest::StatusCode,
        /// Response body (possibly truncated).
        body: String,
    },

    /// The response decoded but violated the expected shape.
    #[error("{provider} response is malformed: {reason}")]
    Malformed {
        /// Provider name.
        provider: &'static str,
        /// Description of the shape violation.
        reason: String,
    },

    /// The provider answered successfully but with no usable data.
    #[error("{provider} returned no usable precipitation data")]
    Empty {
        /// Provider name.
        provider: &'static str,
    },

    /// The requested forecast length is outside the provider's range.
    #[error("forecast days out of range: {days} (supported 1..=16)")]
    DaysOutOfRange {
        /// The rejected value.
        days: u32,
    },
}

/// Source of observed daily precipitation history.
///
/// Contract: strictly increasing dates, missing days absent (never
/// zero-filled), negative readings clamped to zero at this boundary.
#[async_trait]
pub trait HistoricalPrecipProvider: Send + Sync {
    /// Fetches daily precipitation (mm) for a point over a date range.
    async fn fetch_daily_precipitation(
        &self,
        lat: f64,
        lon: f64,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<DailySeries, ProviderError>;
}

/// Source of forecast daily precipitation.
#[async_trait]
pub trait ForecastPrecipProvider: Send + Sync {
    /// Fetches the daily precipitation forecast (mm) for the next `days`
    /// days. `days` must be within 1..=16.
    async fn fetch_daily_forecast(
        &self,
        lat: f64,
        lon: f64,
        days: u32,
        timezone: &str,
    ) -> Result<DailySeries, ProviderError>;
}

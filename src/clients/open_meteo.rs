//! Open-Meteo client for forecast daily precipitation.

use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveDate;
use ombros_series::DailySeries;
use serde::Deserialize;

use super::{ForecastPrecipProvider, ProviderError};
use crate::config::Settings;

const PROVIDER: &str = "open-meteo";

/// Open-Meteo supports at most a 16-day daily forecast.
pub const MAX_FORECAST_DAYS: u32 = 16;

/// Client for the Open-Meteo daily forecast endpoint.
#[derive(Debug, Clone)]
pub struct OpenMeteoClient {
    http: reqwest::Client,
    base_url: String,
}

#[derive(Debug, Deserialize)]
struct ForecastResponse {
    daily: Option<DailyBlock>,
}

#[derive(Debug, Deserialize)]
struct DailyBlock {
    time: Option<Vec<NaiveDate>>,
    precipitation_sum: Option<Vec<Option<f64>>>,
}

impl OpenMeteoClient {
    /// Builds a client from the runtime settings.
    pub fn from_settings(settings: &Settings) -> Result<Self, ProviderError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(settings.http_timeout_secs))
            .build()
            .map_err(|source| ProviderError::Transport {
                provider: PROVIDER,
                source,
            })?;
        Ok(Self {
            http,
            base_url: settings.open_meteo_base_url.trim_end_matches('/').to_string(),
        })
    }
}

/// Validates the daily block and zips it into a series. Null entries are
/// dropped rather than zero-filled.
fn series_from_daily(daily: DailyBlock) -> Result<DailySeries, ProviderError> {
    let times = daily.time.ok_or_else(|| ProviderError::Malformed {
        provider: PROVIDER,
        reason: "daily block is missing 'time'".to_string(),
    })?;
    let sums = daily
        .precipitation_sum
        .ok_or_else(|| ProviderError::Malformed {
            provider: PROVIDER,
            reason: "daily block is missing 'precipitation_sum'".to_string(),
        })?;
    if times.len() != sums.len() {
        return Err(ProviderError::Malformed {
            provider: PROVIDER,
            reason: format!(
                "'time' has {} entries but 'precipitation_sum' has {}",
                times.len(),
                sums.len()
            ),
        });
    }

    let pairs = times
        .into_iter()
        .zip(sums)
        .filter_map(|(date, sum)| sum.map(|p| (date, p.max(0.0))));
    DailySeries::from_pairs(pairs).map_err(|e| ProviderError::Malformed {
        provider: PROVIDER,
        reason: e.to_string(),
    })
}

#[async_trait]
impl ForecastPrecipProvider for OpenMeteoClient {
    async fn fetch_daily_forecast(
        &self,
        lat: f64,
        lon: f64,
        days: u32,
        timezone: &str,
    ) -> Result<DailySeries, ProviderError> {
        if !(1..=MAX_FORECAST_DAYS).contains(&days) {
            return Err(ProviderError::DaysOutOfRange { days });
        }

        let url = format!("{}/v1/forecast", self.base_url);
        let response = self
            .http
            .get(&url)
            .query(&[
                ("latitude", lat.to_string()),
                ("longitude", lon.to_string()),
                ("daily", "precipitation_sum".to_string()),
                ("forecast_days", days.to_string()),
                ("timezone", timezone.to_string()),
                ("precipitation_unit", "mm".to_string()),
            ])
            .send()
            .await
            .map_err(|source| ProviderError::Transport {
                provider: PROVIDER,
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ProviderError::Status {
                provider: PROVIDER,
                status,
                body,
            });
        }

        let payload: ForecastResponse =
            response.json().await.map_err(|e| ProviderError::Malformed {
                provider: PROVIDER,
                reason: e.to_string(),
            })?;

        let daily = payload.daily.ok_or_else(|| ProviderError::Malformed {
            provider: PROVIDER,
            reason: "response has no 'daily' block".to_string(),
        })?;
        series_from_daily(daily)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn parse(value: serde_json::Value) -> ForecastResponse {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn parses_forecast_payload() {
        let payload = parse(json!({
            "latitude": 52.5,
            "longitude": 13.4,
            "daily": {
                "time": ["2024-07-01", "2024-07-02"],
                "precipitation_sum": [0.4, null]
            }
        }));
        let series = series_from_daily(payload.daily.unwrap()).unwrap();
        assert_eq!(series.len(), 1);
        assert_eq!(series.get(date(2024, 7, 1)), Some(0.4));
        assert_eq!(series.get(date(2024, 7, 2)), None);
    }

    #[test]
    fn missing_daily_fields_are_malformed() {
        let payload = parse(json!({
            "daily": { "time": ["2024-07-01"] }
        }));
        let err = series_from_daily(payload.daily.unwrap()).unwrap_err();
        assert!(matches!(err, ProviderError::Malformed { .. }));
    }

    #[test]
    fn length_mismatch_is_malformed() {
        let payload = parse(json!({
            "daily": {
                "time": ["2024-07-01", "2024-07-02"],
                "precipitation_sum": [0.4]
            }
        }));
        let err = series_from_daily(payload.daily.unwrap()).unwrap_err();
        assert!(matches!(err, ProviderError::Malformed { .. }));
    }

    #[test]
    fn absent_daily_block_detected() {
        let payload = parse(json!({"latitude": 52.5}));
        assert!(payload.daily.is_none());
    }
}

//! Meteostat point-data client for observed daily precipitation.

use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveDate;
use ombros_series::DailySeries;
use reqwest::header::{HeaderMap, HeaderValue};
use serde::Deserialize;

use super::{HistoricalPrecipProvider, ProviderError};
use crate::config::Settings;

const PROVIDER: &str = "meteostat";

/// Client for the Meteostat point/daily endpoint.
#[derive(Debug, Clone)]
pub struct MeteostatClient {
    http: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
}

/// One day of the Meteostat point/daily payload. Only precipitation is
/// read; a null or absent `prcp` means the day was not measured.
#[derive(Debug, Deserialize)]
struct DailyRecord {
    date: NaiveDate,
    #[serde(default)]
    prcp: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct DailyResponse {
    data: Vec<DailyRecord>,
}

impl MeteostatClient {
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
            base_url: settings.meteostat_base_url.trim_end_matches('/').to_string(),
            api_key: settings.meteostat_api_key.clone(),
        })
    }

    fn headers(&self) -> Result<HeaderMap, ProviderError> {
        let mut headers = HeaderMap::new();
        if let Some(key) = &self.api_key {
            let value = HeaderValue::from_str(key).map_err(|_| ProviderError::Malformed {
                provider: PROVIDER,
                reason: "api key is not a valid header value".to_string(),
            })?;
            headers.insert("x-api-key", value);
        }
        Ok(headers)
    }
}

/// Converts raw provider records into a precipitation series.
///
/// Days with a null precipitation reading are dropped: a gap in the
/// record must stay a gap, not become a years-long "no rain" signal.
/// Small negative readings (sensor rounding) are clamped to zero.
fn series_from_records(records: Vec<DailyRecord>) -> Result<DailySeries, ProviderError> {
    let pairs = records
        .into_iter()
        .filter_map(|r| r.prcp.map(|p| (r.date, p.max(0.0))));
    let series = DailySeries::from_pairs(pairs).map_err(|e| ProviderError::Malformed {
        provider: PROVIDER,
        reason: e.to_string(),
    })?;
    if series.is_empty() {
        return Err(ProviderError::Empty { provider: PROVIDER });
    }
    Ok(series)
}

#[async_trait]
impl HistoricalPrecipProvider for MeteostatClient {
    async fn fetch_daily_precipitation(
        &self,
        lat: f64,
        lon: f64,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<DailySeries, ProviderError> {
        let url = format!("{}/point/daily", self.base_url);
        let response = self
            .http
            .get(&url)
            .headers(self.headers()?)
            .query(&[
                ("lat", lat.to_string()),
                ("lon", lon.to_string()),
                ("start", start.to_string()),
                ("end", end.to_string()),
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

        let payload: DailyResponse =
            response.json().await.map_err(|e| ProviderError::Malformed {
                provider: PROVIDER,
                reason: e.to_string(),
            })?;

        series_from_records(payload.data)
    }
}

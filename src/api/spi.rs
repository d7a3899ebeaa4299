//! SPI endpoints.

use axum::extract::{Query, State};
use axum::routing::get;
use axum::{Json, Router};
use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use ombros_advisory::{classify, recommendations, Category, Framing};
use ombros_sarima::{forecast_index, DEFAULT_HORIZON};

use crate::api::validate_coords;
use crate::error::ApiError;
use crate::pipeline;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/by-coords", get(spi_by_coords))
        .route("/forecast-by-coords", get(spi_forecast_by_coords))
        .route("/multi-by-coords", get(spi_multi_by_coords))
        .route("/forecast-summary-by-coords", get(spi_forecast_summary))
}

fn default_scale_months() -> u32 {
    3
}

fn default_history_years() -> u32 {
    10
}

fn default_forecast_days() -> u32 {
    7
}

fn default_summary_days() -> u32 {
    30
}

fn today() -> NaiveDate {
    Utc::now().date_naive()
}

fn validate_range(name: &str, value: u32, min: u32, max: u32) -> Result<(), ApiError> {
    if (min..=max).contains(&value) {
        Ok(())
    } else {
        Err(ApiError::Validation(format!(
            "{name} must be within {min}..={max}, got {value}"
        )))
    }
}

/// Parses the `scales` query value: a comma-separated list of month
/// counts, defaulting to `1,3,6`.
fn parse_scales(raw: Option<&str>) -> Result<Vec<u32>, ApiError> {
    let raw = match raw {
        Some(s) if !s.trim().is_empty() => s,
        _ => return Ok(vec![1, 3, 6]),
    };
    raw.split(',')
        .map(|token| {
            token
                .trim()
                .parse::<u32>()
                .map_err(|_| ApiError::Validation(format!("invalid scale value: {token:?}")))
        })
        .collect()
}

// ---------------------------------------------------------------------
// Queries
// ---------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct SpiQuery {
    lat: f64,
    lon: f64,
    #[serde(default = "default_scale_months")]
    scale_months: u32,
    #[serde(default = "default_history_years")]
    history_years: u32,
    end_date: Option<NaiveDate>,
}

#[derive(Debug, Deserialize)]
pub struct ForecastQuery {
    lat: f64,
    lon: f64,
    #[serde(default = "default_scale_months")]
    scale_months: u32,
    #[serde(default = "default_history_years")]
    history_years: u32,
    #[serde(default = "default_forecast_days")]
    forecast_days: u32,
    end_date: Option<NaiveDate>,
}

#[derive(Debug, Deserialize)]
pub struct MultiQuery {
    lat: f64,
    lon: f64,
    scales: Option<String>,
    #[serde(default = "default_history_years")]
    history_years: u32,
    end_date: Option<NaiveDate>,
}

#[derive(Debug, Deserialize)]
pub struct SummaryQuery {
    lat: f64,
    lon: f64,
    #[serde(default = "default_scale_months")]
    scale_months: u32,
    #[serde(default = "default_history_years")]
    history_years: u32,
    #[serde(default = "default_summary_days")]
    forecast_days: u32,
    end_date: Option<NaiveDate>,
}

// ---------------------------------------------------------------------
// Responses
// ---------------------------------------------------------------------

#[derive(Debug, Serialize)]
pub struct SpiHistoryPoint {
    date: NaiveDate,
    spi: f64,
}

/// The seasonal-model forecast block attached to the base endpoint.
#[derive(Debug, Serialize)]
pub struct SeasonalForecastBlock {
    spi_30: f64,
    category: Category,
    recommendations: Vec<&'static str>,
}

#[derive(Debug, Serialize)]
pub struct SpiPointResponse {
    lat: f64,
    lon: f64,
    scale_months: u32,
    end_date: NaiveDate,
    spi: f64,
    category: Category,
    history: Vec<SpiHistoryPoint>,
    recommendations: Vec<&'static str>,
    forecast: SeasonalForecastBlock,
}

#[derive(Debug, Serialize)]
pub struct SpiForecastPoint {
    date: NaiveDate,
    spi: f64,
    category: Category,
    recommendations: Vec<&'static str>,
}

#[derive(Debug, Serialize)]
pub struct SpiForecastResponse {
    lat: f64,
    lon: f64,
    scale_months: u32,
    history_years: u32,
    end_date: NaiveDate,
    forecast_days: u32,
    latest_spi: f64,
    latest_category: Category,
    forecast: Vec<SpiForecastPoint>,
}

#[derive(Debug, Serialize)]
pub struct MultiScaleItem {
    scale_months: u32,
    spi: f64,
    category: Category,
}

#[derive(Debug, Serialize)]
pub struct MultiScaleResponse {
    lat: f64,
    lon: f64,
    end_date: NaiveDate,
    history_years: u32,
    items: Vec<MultiScaleItem>,
}

#[derive(Debug, Serialize)]
pub struct ForecastSummaryResponse {
    lat: f64,
    lon: f64,
    scale_months: u32,
    history_years: u32,
    forecast_days: u32,
    end_date: NaiveDate,
    latest_spi: f64,
    latest_category: Category,
    sarima_spi: f64,
    sarima_category: Category,
    sarima_recommendations: Vec<&'static str>,
}

// ---------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------

/// `GET /api/v1/spi/by-coords` — current SPI, history, recommendations,
/// and a 30-day seasonal-model forecast block.
async fn spi_by_coords(
    State(state): State<AppState>,
    Query(q): Query<SpiQuery>,
) -> Result<Json<SpiPointResponse>, ApiError> {
    validate_coords(q.lat, q.lon)?;
    validate_range("scale_months", q.scale_months, 1, 24)?;
    validate_range("history_years", q.history_years, 1, 50)?;
    let end_date = q.end_date.unwrap_or_else(today);

    let result = pipeline::current_spi(
        state.historical.as_ref(),
        q.lat,
        q.lon,
        q.scale_months,
        q.history_years,
        end_date,
    )
    .await?;

    let history = result
        .series()
        .iter()
        .map(|(date, spi)| SpiHistoryPoint { date, spi })
        .collect();

    let outlook = forecast_index(result.series(), DEFAULT_HORIZON);
    let forecast = SeasonalForecastBlock {
        spi_30: outlook.value(),
        category: classify(outlook.value()),
        recommendations: recommendations(outlook.value(), Framing::Forecast),
    };

    Ok(Json(SpiPointResponse {
        lat: q.lat,
        lon: q.lon,
        scale_months: q.scale_months,
        end_date,
        spi: result.latest(),
        category: classify(result.latest()),
        history,
        recommendations: recommendations(result.latest(), Framing::Current),
        forecast,
    }))
}

/// `GET /api/v1/spi/forecast-by-coords` — latest SPI plus a forward SPI
/// series derived from blended observed + forecast precipitation.
async fn spi_forecast_by_coords(
    State(state): State<AppState>,
    Query(q): Query<ForecastQuery>,
) -> Result<Json<SpiForecastResponse>, ApiError> {
    validate_coords(q.lat, q.lon)?;
    validate_range("scale_months", q.scale_months, 1, 24)?;
    validate_range("history_years", q.history_years, 1, 50)?;
    validate_range("forecast_days", q.forecast_days, 1, 16)?;
    let end_date = q.end_date.unwrap_or_else(today);

    let blended = pipeline::forecast_blend(
        state.historical.as_ref(),
        state.forecast.as_ref(),
        q.lat,
        q.lon,
        q.scale_months,
        q.history_years,
        end_date,
        q.forecast_days,
    )
    .await?;

    let forecast = blended
        .outlook()
        .iter()
        .map(|(date, spi)| SpiForecastPoint {
            date,
            spi,
            category: classify(spi),
            recommendations: recommendations(spi, Framing::Current),
        })
        .collect();

    Ok(Json(SpiForecastResponse {
        lat: q.lat,
        lon: q.lon,
        scale_months: q.scale_months,
        history_years: q.history_years,
        end_date,
        forecast_days: q.forecast_days,
        latest_spi: blended.latest(),
        latest_category: classify(blended.latest()),
        forecast,
    }))
}

/// `GET /api/v1/spi/multi-by-coords` — one (SPI, category) pair per
/// requested scale, against a single shared history.
async fn spi_multi_by_coords(
    State(state): State<AppState>,
    Query(q): Query<MultiQuery>,
) -> Result<Json<MultiScaleResponse>, ApiError> {
    validate_coords(q.lat, q.lon)?;
    validate_range("history_years", q.history_years, 1, 50)?;
    let scales = parse_scales(q.scales.as_deref())?;
    let end_date = q.end_date.unwrap_or_else(today);

    let multi = pipeline::multi_scale(
        state.historical.as_ref(),
        q.lat,
        q.lon,
        &scales,
        q.history_years,
        end_date,
    )
    .await?;

    let items = multi
        .into_iter()
        .map(|(scale_months, item)| MultiScaleItem {
            scale_months,
            spi: item.spi,
            category: item.category,
        })
        .collect();

    Ok(Json(MultiScaleResponse {
        lat: q.lat,
        lon: q.lon,
        end_date,
        history_years: q.history_years,
        items,
    }))
}

/// `GET /api/v1/spi/forecast-summary-by-coords` — latest SPI plus a single
/// seasonal-model forecast value at the requested horizon.
async fn spi_forecast_summary(
    State(state): State<AppState>,
    Query(q): Query<SummaryQuery>,
) -> Result<Json<ForecastSummaryResponse>, ApiError> {
    validate_coords(q.lat, q.lon)?;
    validate_range("scale_months", q.scale_months, 1, 24)?;
    validate_range("history_years", q.history_years, 1, 50)?;
    validate_range("forecast_days", q.forecast_days, 1, 60)?;
    let end_date = q.end_date.unwrap_or_else(today);

    let result = pipeline::current_spi(
        state.historical.as_ref(),
        q.lat,
        q.lon,
        q.scale_months,
        q.history_years,
        end_date,
    )
    .await?;

    let outlook = forecast_index(result.series(), q.forecast_days as usize);

    Ok(Json(ForecastSummaryResponse {
        lat: q.lat,
        lon: q.lon,
        scale_months: q.scale_months,
        history_years: q.history_years,
        forecast_days: q.forecast_days,
        end_date,
        latest_spi: result.latest(),
        latest_category: classify(result.latest()),
        sarima_spi: outlook.value(),
        sarima_category: classify(outlook.value()),
        sarima_recommendations: recommendations(outlook.value(), Framing::Forecast),
    }))
}

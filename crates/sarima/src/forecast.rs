//! Short-horizon SPI forecasting with a silent fallback.

use ombros_series::DailySeries;
use tracing::{debug, warn};

use crate::spec::SarimaSpec;

/// Default projection horizon in days.
pub const DEFAULT_HORIZON: usize = 30;

/// Season length of the fixed forecasting model, in days.
const SEASONAL_PERIOD: usize = 30;

/// Number of trailing observations averaged by the fallback estimator.
const FALLBACK_WINDOW: usize = 30;

/// Which estimator produced a forecast value.
///
/// The external contract is a bare scalar either way; the source exists so
/// the two paths stay distinguishable in logs and tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ForecastSource {
    /// The seasonal ARMA model fitted and projected successfully.
    Model,
    /// The model failed somewhere; the value is the trailing mean.
    FallbackMean,
}

/// A forecast index value together with the path that produced it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IndexForecast {
    value: f64,
    source: ForecastSource,
}

impl IndexForecast {
    /// The forecast SPI value.
    pub fn value(&self) -> f64 {
        self.value
    }

    /// Which estimator produced the value.
    pub fn source(&self) -> ForecastSource {
        self.source
    }

    /// `true` when the trailing-mean fallback produced the value.
    pub fn is_fallback(&self) -> bool {
        self.source == ForecastSource::FallbackMean
    }
}

/// Projects an SPI series `horizon` days past its last observation.
///
/// The series is first regularized onto a contiguous daily grid
/// (gaps linearly interpolated), then a seasonal ARMA model with the fixed
/// structure (1,0,1)×(1,0,1,30) is fitted by unconstrained maximum
/// likelihood and projected forward; the final projected value is the
/// forecast.
///
/// This function never fails: any model problem (too little data,
/// degenerate input, non-convergence, a non-finite projection) resolves
/// silently to the arithmetic mean of the last [`FALLBACK_WINDOW`]
/// regularized observations. Callers always get a usable number; the
/// [`ForecastSource`] records which path ran.
///
/// # Panics
///
/// Panics if `horizon` is zero.
pub fn forecast_index(series: &DailySeries, horizon: usize) -> IndexForecast {
    assert!(horizon > 0, "forecast_index: horizon must be positive");

    let regular = series.interpolate_daily();
    let values: Vec<f64> = regular.values().collect();

    let spec = SarimaSpec::new(1, 1).with_seasonal(1, 1, SEASONAL_PERIOD);
    match spec.fit(&values) {
        Ok(fit) => {
            let projected = fit.forecast(horizon);
            match projected.last() {
                Some(&value) if value.is_finite() => {
                    debug!(horizon, value, "seasonal model forecast");
                    return IndexForecast {
                        value,
                        source: ForecastSource::Model,
                    };
                }
                _ => warn!(horizon, "seasonal model projected a non-finite value"),
            }
        }
        Err(e) => {
            warn!(error = %e, n = values.len(), "seasonal model fit failed; using trailing mean");
        }
    }

    let tail = &values[values.len().saturating_sub(FALLBACK_WINDOW)..];
    IndexForecast {
        value: ombros_stats::mean(tail),
        source: ForecastSource::FallbackMean,
    }
}

//! The gamma→normal SPI transform.

use chrono::NaiveDate;
use ombros_series::DailySeries;
use statrs::distribution::{ContinuousCDF, Normal};
use tracing::debug;

use crate::error::SpiError;
use crate::fit::fit_gamma_mle;
use crate::gamma::{gamma_dist, GammaParams};

/// Minimum number of samples (defined or positive) for a calibration.
pub const MIN_SAMPLES: usize = 30;

/// CDF probabilities are clipped to `[CDF_EPS, 1 - CDF_EPS]` before the
/// inverse-normal step, guarding the singularities at 0 and 1.
pub const CDF_EPS: f64 = 1e-6;

/// A computed SPI series together with its latest value and the fitted
/// distribution.
#[derive(Debug, Clone)]
pub struct SpiResult {
    series: DailySeries,
    latest: f64,
    latest_date: NaiveDate,
    params: GammaParams,
}

impl SpiResult {
    /// The SPI series; dates whose rolling total was ≤ 0 or absent carry
    /// no entry.
    pub fn series(&self) -> &DailySeries {
        &self.series
    }

    /// The last defined SPI value in ascending date order.
    pub fn latest(&self) -> f64 {
        self.latest
    }

    /// Date of the last defined SPI value.
    pub fn latest_date(&self) -> NaiveDate {
        self.latest_date
    }

    /// The fitted gamma parameters behind the transform.
    pub fn params(&self) -> GammaParams {
        self.params
    }
}

/// Calibrates the gamma distribution on a rolling-total series.
///
/// The series itself is the "clean" sample; undefined windows are already
/// absent. Calibration then uses only the strictly positive subset:
/// zero-rainfall windows are genuine observations (and receive no SPI
/// value later), but a distribution whose density vanishes at zero cannot
/// be fitted to them.
///
/// # Errors
///
/// | Variant | Trigger |
/// |---------|---------|
/// | [`SpiError::InsufficientData`] | fewer than [`MIN_SAMPLES`] defined totals |
/// | [`SpiError::InsufficientPositiveData`] | fewer than [`MIN_SAMPLES`] positive totals |
/// | [`SpiError::DegenerateDistribution`] | all positive totals identical |
/// | [`SpiError::FitFailure`] | the optimizer did not converge |
pub(crate) fn calibrate(rolling: &DailySeries) -> Result<GammaParams, SpiError> {
    if rolling.len() < MIN_SAMPLES {
        return Err(SpiError::InsufficientData {
            n: rolling.len(),
            min: MIN_SAMPLES,
        });
    }

    let positive: Vec<f64> = rolling.values().filter(|v| *v > 0.0).collect();
    if positive.len() < MIN_SAMPLES {
        return Err(SpiError::InsufficientPositiveData {
            n: positive.len(),
            min: MIN_SAMPLES,
        });
    }
    if ombros_stats::count_distinct(&positive) == 1 {
        return Err(SpiError::DegenerateDistribution);
    }

    let params = fit_gamma_mle(&positive)?;
    debug!(
        shape = params.shape(),
        scale = params.scale(),
        n_positive = positive.len(),
        "calibrated gamma distribution"
    );
    Ok(params)
}

/// Maps every strictly positive rolling total through the fitted gamma CDF
/// and the inverse standard-normal CDF.
///
/// Totals ≤ 0 stay undefined in the output: assigning them the
/// distribution's lower bound would manufacture an artificial plateau of
/// extreme-drought scores.
pub(crate) fn apply(rolling: &DailySeries, params: &GammaParams) -> Result<DailySeries, SpiError> {
    let dist = gamma_dist(params)?;
    let normal = Normal::new(0.0, 1.0).expect("standard normal parameters are valid");

    let pairs = rolling.iter().filter(|(_, v)| *v > 0.0).map(|(d, v)| {
        let u = dist.cdf(v).clamp(CDF_EPS, 1.0 - CDF_EPS);
        (d, normal.inverse_cdf(u))
    });
    Ok(DailySeries::from_pairs(pairs)
        .expect("transform preserves unique dates and finite values"))
}

/// Computes the SPI series for a rolling-total series: calibrate, apply,
/// and read off the latest defined value.
///
/// # Errors
///
/// Everything [`calibrate`] raises, plus [`SpiError::NoValidValues`] when
/// the transform leaves no defined entry.
pub fn spi_from_rolling_sums(rolling: &DailySeries) -> Result<SpiResult, SpiError> {
    let params = calibrate(rolling)?;
    let series = apply(rolling, &params)?;
    let (latest_date, latest) = series.last_entry().ok_or(SpiError::NoValidValues)?;
    Ok(SpiResult {
        series,
        latest,
        latest_date,
        params,
    })
}

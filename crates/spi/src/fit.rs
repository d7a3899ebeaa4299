//! Maximum-likelihood gamma calibration for rolling precipitation totals.

use argmin::core::{CostFunction, Executor};
use argmin::solver::neldermead::NelderMead;
use statrs::function::gamma::ln_gamma;

use crate::error::SpiError;
use crate::gamma::GammaParams;

/// Fits a two-parameter gamma distribution (location fixed at zero) to
/// strictly positive values via maximum likelihood.
///
/// The scale is profiled out analytically (theta = mean / shape), leaving a
/// one-dimensional search over ln(shape) that Nelder-Mead minimises from a
/// method-of-moments start. Callers must pass at least two strictly
/// positive, non-identical values; the degenerate cases are rejected
/// upstream with their own error variants.
///
/// # Errors
///
/// Returns [`SpiError::FitFailure`] if the optimizer fails to converge or
/// converges to invalid parameters.
pub(crate) fn fit_gamma_mle(values: &[f64]) -> Result<GammaParams, SpiError> {
    let n = values.len() as f64;
    let mean = ombros_stats::mean(values);
    let var = ombros_stats::variance(values);
    let sum_ln: f64 = values.iter().map(|x| x.ln()).sum();

    if !mean.is_finite() || mean <= 0.0 || !sum_ln.is_finite() {
        return Err(SpiError::FitFailure {
            message: "calibration values must be strictly positive".to_string(),
        });
    }

    // Method-of-moments start; falls back to shape 1 when the moment
    // estimate is unusable.
    let k0 = GammaParams::from_moments(mean, var)
        .map(|p| p.shape())
        .unwrap_or(1.0);

    let simplex = vec![vec![k0.ln()], vec![k0.ln() + 0.5]];
    let cost = GammaNll { n, mean, sum_ln };

    let solver = NelderMead::new(simplex)
        .with_sd_tolerance(1e-10)
        .map_err(|e| SpiError::FitFailure {
            message: e.to_string(),
        })?;
    let result = Executor::new(cost, solver)
        .configure(|state| state.max_iters(500))
        .run()
        .map_err(|e| SpiError::FitFailure {
            message: e.to_string(),
        })?;

    let best = result
        .state()
        .best_param
        .as_ref()
        .ok_or_else(|| SpiError::FitFailure {
            message: "optimizer returned no parameters".to_string(),
        })?;

    let shape = best[0].exp();
    let scale = mean / shape;
    GammaParams::new(shape, scale).ok_or_else(|| SpiError::FitFailure {
        message: format!("optimizer converged to invalid parameters (shape={shape}, scale={scale})"),
    })
}

/// Cost function for argmin: negative gamma log-likelihood with the scale
/// profiled out, parameterised by ln(shape).
struct GammaNll {
    n: f64,
    mean: f64,
    sum_ln: f64,
}

impl CostFunction for GammaNll {
    type Param = Vec<f64>;
    type Output = f64;

    fn cost(&self, params: &Self::Param) -> Result<Self::Output, argmin::core::Error> {
        let k = params[0].exp();
        if !k.is_finite() || k <= 1e-8 || k >= 1e8 {
            return Ok(f64::MAX);
        }
        let theta = self.mean / k;
        // With theta = mean/k, sum(x)/theta reduces to n*k.
        let nll =
            self.n * k * theta.ln() + self.n * ln_gamma(k) + (1.0 - k) * self.sum_ln + self.n * k;
        if nll.is_finite() {
            Ok(nll)
        } else {
            Ok(f64::MAX)
        }
    }
}

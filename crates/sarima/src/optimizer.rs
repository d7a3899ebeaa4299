//! Nelder-Mead optimizer for seasonal ARMA maximum-likelihood estimation.
//!
//! Wraps the `argmin` crate to minimize the negative concentrated
//! log-likelihood over the raw coefficient vector. The coefficients enter
//! the likelihood untransformed: the search may leave the
//! stationary/invertible region, and the filter simply scores whatever it
//! is handed.
//!
//! **Not part of the public API.**

use argmin::core::{CostFunction, Executor};
use argmin::solver::neldermead::NelderMead;

use crate::error::SarimaError;
use crate::fit::SarimaFit;
use crate::kalman;
use crate::spec::SarimaSpec;
use crate::state_space::StateSpace;

/// Splits the flat optimizer vector into the four coefficient groups in
/// the order (ar, ma, seasonal_ar, seasonal_ma).
fn split_params<'a>(
    spec: &SarimaSpec,
    params: &'a [f64],
) -> (&'a [f64], &'a [f64], &'a [f64], &'a [f64]) {
    let (ar, rest) = params.split_at(spec.p());
    let (ma, rest) = rest.split_at(spec.q());
    let (sar, sma) = rest.split_at(spec.seasonal_p());
    (ar, ma, sar, sma)
}

/// Fits a seasonal ARMA model to data via exact MLE.
///
/// The pipeline: validate, center on the sample mean, optimize the
/// concentrated log-likelihood with Nelder-Mead, then run a full Kalman
/// pass at the optimum for sigma², residuals, and the forecasting state.
pub(crate) fn fit_sarima(spec: SarimaSpec, data: &[f64]) -> Result<SarimaFit, SarimaError> {
    // 1. Validate
    if data.is_empty() {
        return Err(SarimaError::EmptyData);
    }
    if data.iter().any(|x| !x.is_finite()) {
        return Err(SarimaError::NonFiniteData);
    }
    let min_len = spec.ar_order().max(spec.ma_order()).max(1) + 1;
    if data.len() < min_len {
        return Err(SarimaError::InsufficientData {
            n: data.len(),
            min: min_len,
        });
    }
    let min_val = data.iter().cloned().fold(f64::INFINITY, f64::min);
    let max_val = data.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    if (max_val - min_val).abs() < f64::EPSILON {
        return Err(SarimaError::ConstantData);
    }

    // 2. Center on the sample mean
    let n = data.len() as f64;
    let mean = data.iter().sum::<f64>() / n;
    let centered: Vec<f64> = data.iter().map(|x| x - mean).collect();

    // 3. White-noise fast path, nothing to optimize
    let dim = spec.n_params();
    if dim == 0 {
        let ss = StateSpace::from_coeffs(&spec, &[], &[], &[], &[]);
        let output = kalman::filter(&ss, &centered)?;
        return Ok(SarimaFit::new(
            spec,
            vec![],
            vec![],
            vec![],
            vec![],
            output,
            ss,
            mean,
        ));
    }

    // 4. Simplex: origin plus one 0.5-perturbed vertex per coefficient
    let mut simplex: Vec<Vec<f64>> = Vec::with_capacity(dim + 1);
    simplex.push(vec![0.0; dim]);
    for i in 0..dim {
        let mut vertex = vec![0.0; dim];
        vertex[i] = 0.5;
        simplex.push(vertex);
    }

    let cost = SarimaCost {
        data: &centered,
        spec,
    };

    let solver = NelderMead::new(simplex)
        .with_sd_tolerance(1e-8)
        .map_err(|_| SarimaError::OptimizationFailed)?;
    let result = Executor::new(cost, solver)
        .configure(|state| state.max_iters(500))
        .run()
        .map_err(|_| SarimaError::OptimizationFailed)?;

    let best_params = result
        .state()
        .best_param
        .as_ref()
        .ok_or(SarimaError::OptimizationFailed)?;
    let best_cost = result.state().best_cost;
    if !best_cost.is_finite() || best_cost == f64::MAX {
        return Err(SarimaError::OptimizationFailed);
    }

    // 5. Full Kalman pass at the optimum
    let (ar, ma, sar, sma) = split_params(&spec, best_params);
    let ss = StateSpace::from_coeffs(&spec, ar, ma, sar, sma);
    let output = kalman::filter(&ss, &centered)?;

    Ok(SarimaFit::new(
        spec,
        ar.to_vec(),
        ma.to_vec(),
        sar.to_vec(),
        sma.to_vec(),
        output,
        ss,
        mean,
    ))
}

/// Cost function for argmin: negative concentrated log-likelihood.
struct SarimaCost<'a> {
    data: &'a [f64],
    spec: SarimaSpec,
}

impl CostFunction for SarimaCost<'_> {
    type Param = Vec<f64>;
    type Output = f64;

    fn cost(&self, params: &Self::Param) -> Result<Self::Output, argmin::core::Error> {
        let (ar, ma, sar, sma) = split_params(&self.spec, params);
        let ss = StateSpace::from_coeffs(&self.spec, ar, ma, sar, sma);

        match kalman::concentrated_loglik(&ss, self.data) {
            Ok(loglik) if loglik.is_finite() => Ok(-loglik),
            _ => Ok(f64::MAX),
        }
    }
}

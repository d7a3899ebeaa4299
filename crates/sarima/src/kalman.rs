//! Kalman filter for seasonal ARMA likelihood evaluation.
//!
//! A univariate filter over the companion state space from
//! [`crate::state_space`], evaluating the exact Gaussian log-likelihood by
//! prediction-error decomposition. The innovation variance is concentrated
//! out: the filter runs with unit noise variance and recovers sigma² as the
//! mean scaled squared innovation afterwards.
//!
//! Because the parameter space is unconstrained, the state covariance is
//! initialized as a large-kappa diagonal (approximate diffuse) rather than
//! the stationary solution, which need not exist.
//!
//! **Not part of the public API.**

use ndarray::{Array1, Array2};

use crate::error::SarimaError;
use crate::state_space::StateSpace;

/// Approximate-diffuse initial state variance.
const KAPPA: f64 = 1e6;

/// Innovation variances below this are treated as filter breakdown.
const MIN_VARIANCE: f64 = 1e-12;

/// Full filter output for a converged parameter vector.
pub(crate) struct KalmanOutput {
    /// Concentrated innovation variance estimate.
    pub(crate) sigma2: f64,
    /// Maximised Gaussian log-likelihood.
    pub(crate) log_likelihood: f64,
    /// One-step-ahead prediction residuals.
    pub(crate) residuals: Vec<f64>,
    /// Predicted state for the first post-sample step.
    pub(crate) final_state: Array1<f64>,
}

/// Evaluates the concentrated log-likelihood only (optimizer hot path).
pub(crate) fn concentrated_loglik(ss: &StateSpace, data: &[f64]) -> Result<f64, SarimaError> {
    run(ss, data, false).map(|out| out.log_likelihood)
}

/// Runs the full filter, keeping residuals and the final predicted state.
pub(crate) fn filter(ss: &StateSpace, data: &[f64]) -> Result<KalmanOutput, SarimaError> {
    run(ss, data, true)
}

fn run(ss: &StateSpace, data: &[f64], keep_residuals: bool) -> Result<KalmanOutput, SarimaError> {
    let n = data.len();
    let r = ss.dim();
    let t = ss.transition();

    let mut a = Array1::<f64>::zeros(r);
    let mut p = Array2::<f64>::eye(r) * KAPPA;

    let mut sum_ln_f = 0.0;
    let mut sum_sq = 0.0;
    let mut residuals = if keep_residuals {
        Vec::with_capacity(n)
    } else {
        Vec::new()
    };

    for &y in data {
        let v = y - a[0];
        let f = p[[0, 0]];
        if !f.is_finite() || f < MIN_VARIANCE {
            return Err(SarimaError::FilterDiverged);
        }
        sum_ln_f += f.ln();
        sum_sq += v * v / f;
        if keep_residuals {
            residuals.push(v);
        }

        // Gain K = T·P·Z / F with observation vector Z = e₀.
        let pz = p.column(0).to_owned();
        let k = t.dot(&pz) / f;

        // a' = T·a + K·v
        let mut a_next = t.dot(&a);
        a_next.scaled_add(v, &k);
        a = a_next;

        // P' = T·P·Tᵀ − K·F·Kᵀ + R·Rᵀ, resymmetrized against drift.
        let tp = t.dot(&p);
        let mut p_next = tp.dot(&t.t()) + ss.rrt();
        for i in 0..r {
            for j in 0..r {
                p_next[[i, j]] -= f * k[i] * k[j];
            }
        }
        for i in 0..r {
            for j in (i + 1)..r {
                let m = 0.5 * (p_next[[i, j]] + p_next[[j, i]]);
                p_next[[i, j]] = m;
                p_next[[j, i]] = m;
            }
        }
        p = p_next;
    }

    let nf = n as f64;
    let sigma2 = sum_sq / nf;
    if !sigma2.is_finite() || sigma2 <= 0.0 {
        return Err(SarimaError::FilterDiverged);
    }
    let log_likelihood =
        -0.5 * nf * ((2.0 * std::f64::consts::PI).ln() + 1.0 + sigma2.ln()) - 0.5 * sum_ln_f;

    Ok(KalmanOutput {
        sigma2,
        log_likelihood,
        residuals,
        final_state: a,
    })
}

//! Fitted seasonal ARMA model results.

use ndarray::Array1;

use crate::kalman::KalmanOutput;
use crate::spec::SarimaSpec;
use crate::state_space::StateSpace;

/// A fitted seasonal ARMA model produced by [`SarimaSpec::fit()`].
///
/// Carries the estimated coefficient groups, the concentrated innovation
/// variance, residuals, log-likelihood, and everything needed to project
/// the series forward: the companion state space and the predicted state
/// for the first post-sample step.
#[derive(Clone, Debug)]
pub struct SarimaFit {
    spec: SarimaSpec,
    ar: Vec<f64>,
    ma: Vec<f64>,
    seasonal_ar: Vec<f64>,
    seasonal_ma: Vec<f64>,
    sigma2: f64,
    residuals: Vec<f64>,
    log_likelihood: f64,
    state_space: StateSpace,
    final_state: Array1<f64>,
    mean: f64,
}

impl SarimaFit {
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn new(
        spec: SarimaSpec,
        ar: Vec<f64>,
        ma: Vec<f64>,
        seasonal_ar: Vec<f64>,
        seasonal_ma: Vec<f64>,
        output: KalmanOutput,
        state_space: StateSpace,
        mean: f64,
    ) -> Self {
        Self {
            spec,
            ar,
            ma,
            seasonal_ar,
            seasonal_ma,
            sigma2: output.sigma2,
            residuals: output.residuals,
            log_likelihood: output.log_likelihood,
            state_space,
            final_state: output.final_state,
            mean,
        }
    }

    /// Returns the [`SarimaSpec`] that produced this fit.
    pub fn spec(&self) -> SarimaSpec {
        self.spec
    }

    /// Non-seasonal AR coefficients (`phi`).
    pub fn ar(&self) -> &[f64] {
        &self.ar
    }

    /// Non-seasonal MA coefficients (`theta`).
    pub fn ma(&self) -> &[f64] {
        &self.ma
    }

    /// Seasonal AR coefficients (`Phi`).
    pub fn seasonal_ar(&self) -> &[f64] {
        &self.seasonal_ar
    }

    /// Seasonal MA coefficients (`Theta`).
    pub fn seasonal_ma(&self) -> &[f64] {
        &self.seasonal_ma
    }

    /// Concentrated innovation variance (`sigma2`).
    pub fn sigma2(&self) -> f64 {
        self.sigma2
    }

    /// One-step-ahead prediction residuals.
    pub fn residuals(&self) -> &[f64] {
        &self.residuals
    }

    /// Maximised log-likelihood.
    pub fn log_likelihood(&self) -> f64 {
        self.log_likelihood
    }

    /// Estimated mean of the fitted data.
    ///
    /// The model is fitted to centred observations; forecasts from
    /// [`SarimaFit::forecast()`] have this mean added back.
    pub fn mean(&self) -> f64 {
        self.mean
    }

    /// Akaike Information Criterion: `2k − 2·loglik` with
    /// `k = n_params + 1` (coefficients plus the innovation variance).
    pub fn aic(&self) -> f64 {
        let k = (self.spec.n_params() + 1) as f64;
        2.0 * k - 2.0 * self.log_likelihood
    }

    /// Projects the fitted model `horizon` steps past the last
    /// observation, returning one value per step.
    ///
    /// The projection iterates the companion transition on the final
    /// predicted state; step `j` is `Z·Tʲ⁻¹·a` plus the sample mean.
    pub fn forecast(&self, horizon: usize) -> Vec<f64> {
        let t = self.state_space.transition();
        let mut state = self.final_state.clone();
        let mut out = Vec::with_capacity(horizon);
        for _ in 0..horizon {
            out.push(state[0] + self.mean);
            state = t.dot(&state);
        }
        out
    }
}

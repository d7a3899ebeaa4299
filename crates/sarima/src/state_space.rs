//! State-space representation of a seasonal ARMA model.
//!
//! The multiplicative lag polynomials
//!
//! ```text
//! (1 - φ₁B - …)(1 - Φ₁Bˢ - …) y[t] = (1 + θ₁B + …)(1 + Θ₁Bˢ + …) e[t]
//! ```
//!
//! are expanded into plain ARMA coefficient vectors of order `p + s·P` and
//! `q + s·Q`, then cast in companion form:
//!
//! ```text
//! x[t+1] = T · x[t] + R · e[t]      (state transition)
//! y[t]   = x[t][0]                   (observation)
//! ```
//!
//! **Not part of the public API.**

use ndarray::{Array1, Array2, Axis};

use crate::spec::SarimaSpec;

/// Multiplies two lag polynomials given as full coefficient vectors
/// (constant term first).
fn poly_mul(a: &[f64], b: &[f64]) -> Vec<f64> {
    let mut out = vec![0.0; a.len() + b.len() - 1];
    for (i, &ai) in a.iter().enumerate() {
        for (j, &bj) in b.iter().enumerate() {
            out[i + j] += ai * bj;
        }
    }
    out
}

/// Builds the coefficient vector of `1 + sign·c₁·B^s + sign·c₂·B^{2s} + …`.
fn lag_poly(coeffs: &[f64], period: usize, sign: f64) -> Vec<f64> {
    let mut poly = vec![0.0; coeffs.len() * period + 1];
    poly[0] = 1.0;
    for (i, &c) in coeffs.iter().enumerate() {
        poly[(i + 1) * period] = sign * c;
    }
    poly
}

/// Expands the multiplicative AR polynomials into a single coefficient
/// vector `φ*` with `y[t] = Σ φ*ᵢ y[t-i] + …`.
pub(crate) fn expand_ar(spec: &SarimaSpec, ar: &[f64], seasonal_ar: &[f64]) -> Vec<f64> {
    let product = poly_mul(
        &lag_poly(ar, 1, -1.0),
        &lag_poly(seasonal_ar, spec.period(), -1.0),
    );
    product.iter().skip(1).map(|c| -c).collect()
}

/// Expands the multiplicative MA polynomials into a single coefficient
/// vector `θ*` with `y[t] = e[t] + Σ θ*ⱼ e[t-j] + …`.
pub(crate) fn expand_ma(spec: &SarimaSpec, ma: &[f64], seasonal_ma: &[f64]) -> Vec<f64> {
    let product = poly_mul(
        &lag_poly(ma, 1, 1.0),
        &lag_poly(seasonal_ma, spec.period(), 1.0),
    );
    product.iter().skip(1).copied().collect()
}

/// Companion-form state space for an expanded ARMA model.
///
/// Holds the transition matrix `T`, noise input vector `R`, and
/// precomputed `R·Rᵀ` for the Kalman filter. State dimension is
/// `r = max(p*, q* + 1)` with a minimum of 1, where `p*`/`q*` are the
/// expanded polynomial orders.
#[derive(Clone, Debug)]
pub(crate) struct StateSpace {
    r: usize,
    t: Array2<f64>,
    rrt: Array2<f64>,
}

impl StateSpace {
    /// Builds the state space for `spec` at the given raw coefficients.
    ///
    /// The coefficient slices must match the spec's orders; this is
    /// guaranteed upstream by the optimizer's parameter split.
    pub(crate) fn from_coeffs(
        spec: &SarimaSpec,
        ar: &[f64],
        ma: &[f64],
        seasonal_ar: &[f64],
        seasonal_ma: &[f64],
    ) -> Self {
        let phi = expand_ar(spec, ar, seasonal_ar);
        let theta = expand_ma(spec, ma, seasonal_ma);

        let p = phi.len();
        let q = theta.len();
        let r = p.max(q + 1).max(1);

        // Companion transition: first column carries the AR coefficients,
        // the superdiagonal shifts the state.
        let mut t = Array2::zeros((r, r));
        for (i, &c) in phi.iter().enumerate() {
            t[[i, 0]] = c;
        }
        for i in 0..r.saturating_sub(1) {
            t[[i, i + 1]] = 1.0;
        }

        // Noise input R = [1, θ*₁, …, θ*_q, 0, …].
        let mut r_vec = Array1::zeros(r);
        r_vec[0] = 1.0;
        for (j, &c) in theta.iter().enumerate() {
            r_vec[j + 1] = c;
        }

        let r_col = r_vec.view().insert_axis(Axis(1));
        let r_row = r_vec.view().insert_axis(Axis(0));
        let rrt = r_col.dot(&r_row);

        Self { r, t, rrt }
    }

    /// State dimension.
    pub(crate) fn dim(&self) -> usize {
        self.r
    }

    /// Transition matrix `T` (r×r) in companion form.
    pub(crate) fn transition(&self) -> &Array2<f64> {
        &self.t
    }

    /// Precomputed `R·Rᵀ` (r×r).
    pub(crate) fn rrt(&self) -> &Array2<f64> {
        &self.rrt
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn poly_mul_basic() {
        // (1 + 2B)(1 + 3B) = 1 + 5B + 6B²
        let out = poly_mul(&[1.0, 2.0], &[1.0, 3.0]);
        assert_eq!(out, vec![1.0, 5.0, 6.0]);
    }

    #[test]
    fn expand_ar_non_seasonal_passthrough() {
        let spec = SarimaSpec::new(2, 0);
        let phi = expand_ar(&spec, &[0.5, -0.3], &[]);
        assert_eq!(phi.len(), 2);
        assert_abs_diff_eq!(phi[0], 0.5, epsilon = 1e-12);
        assert_abs_diff_eq!(phi[1], -0.3, epsilon = 1e-12);
    }

    #[test]
    fn expand_ar_multiplicative() {
        // (1 - 0.5B)(1 - 0.3B⁴) → φ* = [0.5, 0, 0, 0.3, -0.15]
        let spec = SarimaSpec::new(1, 0).with_seasonal(1, 0, 4);
        let phi = expand_ar(&spec, &[0.5], &[0.3]);
        assert_eq!(phi.len(), 5);
        assert_abs_diff_eq!(phi[0], 0.5, epsilon = 1e-12);
        assert_abs_diff_eq!(phi[1], 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(phi[2], 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(phi[3], 0.3, epsilon = 1e-12);
        assert_abs_diff_eq!(phi[4], -0.15, epsilon = 1e-12);
    }

    #[test]
    fn expand_ma_multiplicative() {
        // (1 + 0.4B)(1 + 0.2B⁴) → θ* = [0.4, 0, 0, 0.2, 0.08]
        let spec = SarimaSpec::new(0, 1).with_seasonal(0, 1, 4);
        let theta = expand_ma(&spec, &[0.4], &[0.2]);
        assert_eq!(theta.len(), 5);
        assert_abs_diff_eq!(theta[0], 0.4, epsilon = 1e-12);
        assert_abs_diff_eq!(theta[3], 0.2, epsilon = 1e-12);
        assert_abs_diff_eq!(theta[4], 0.08, epsilon = 1e-12);
    }

    #[test]
    fn expand_empty_orders() {
        let spec = SarimaSpec::new(0, 0);
        assert!(expand_ar(&spec, &[], &[]).is_empty());
        assert!(expand_ma(&spec, &[], &[]).is_empty());
    }

    #[test]
    fn white_noise_dimension_one() {
        let spec = SarimaSpec::new(0, 0);
        let ss = StateSpace::from_coeffs(&spec, &[], &[], &[], &[]);
        assert_eq!(ss.dim(), 1);
        assert_abs_diff_eq!(ss.transition()[[0, 0]], 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(ss.rrt()[[0, 0]], 1.0, epsilon = 1e-12);
    }

    #[test]
    fn arma11_companion_form() {
        let spec = SarimaSpec::new(1, 1);
        let ss = StateSpace::from_coeffs(&spec, &[0.7], &[0.3], &[], &[]);
        assert_eq!(ss.dim(), 2);

        // T = [[0.7, 1.0], [0.0, 0.0]]
        assert_abs_diff_eq!(ss.transition()[[0, 0]], 0.7, epsilon = 1e-12);
        assert_abs_diff_eq!(ss.transition()[[0, 1]], 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(ss.transition()[[1, 0]], 0.0, epsilon = 1e-12);

        // RRᵀ for R = [1.0, 0.3]
        assert_abs_diff_eq!(ss.rrt()[[0, 0]], 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(ss.rrt()[[0, 1]], 0.3, epsilon = 1e-12);
        assert_abs_diff_eq!(ss.rrt()[[1, 1]], 0.09, epsilon = 1e-12);
    }

    #[test]
    fn seasonal_dimension() {
        // (1,0,1)×(1,0,1)₄: p* = 5, q* = 5 → r = max(5, 6) = 6.
        let spec = SarimaSpec::new(1, 1).with_seasonal(1, 1, 4);
        let ss = StateSpace::from_coeffs(&spec, &[0.5], &[0.4], &[0.3], &[0.2]);
        assert_eq!(ss.dim(), 6);

        // AR column carries the expanded coefficients.
        assert_abs_diff_eq!(ss.transition()[[0, 0]], 0.5, epsilon = 1e-12);
        assert_abs_diff_eq!(ss.transition()[[3, 0]], 0.3, epsilon = 1e-12);
        assert_abs_diff_eq!(ss.transition()[[4, 0]], -0.15, epsilon = 1e-12);
    }

    #[test]
    fn rrt_is_symmetric_rank_one() {
        let spec = SarimaSpec::new(1, 1).with_seasonal(0, 1, 3);
        let ss = StateSpace::from_coeffs(&spec, &[0.5], &[0.4], &[], &[0.2]);
        let rrt = ss.rrt();
        for i in 0..ss.dim() {
            for j in 0..ss.dim() {
                assert_abs_diff_eq!(rrt[[i, j]], rrt[[j, i]], epsilon = 1e-12);
            }
        }
    }

    #[test]
    fn send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<StateSpace>();
    }
}

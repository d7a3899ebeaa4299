//! Error types for the ombros-sarima crate.

/// Error type for all fallible operations in the ombros-sarima crate.
///
/// These never cross the forecasting boundary: the SPI forecast wrapper
/// resolves every one of them through its trailing-mean fallback.
#[derive(Debug, Clone, thiserror::Error)]
pub enum SarimaError {
    /// Returned when the input data is empty.
    #[error("input data is empty")]
    EmptyData,

    /// Returned when the input data has fewer observations than the model's
    /// longest lag requires.
    #[error("insufficient data: got {n} observations, need at least {min}")]
    InsufficientData {
        /// Number of observations provided.
        n: usize,
        /// Minimum number of observations required.
        min: usize,
    },

    /// Returned when the input data contains non-finite values.
    #[error("input data contains non-finite values")]
    NonFiniteData,

    /// Returned when the input data has zero variance.
    #[error("input data is constant (zero variance)")]
    ConstantData,

    /// Returned when the optimization algorithm fails to converge.
    #[error("optimisation failed to converge")]
    OptimizationFailed,

    /// Returned when the Kalman recursion produces a non-positive or
    /// non-finite innovation variance.
    #[error("kalman filter diverged (degenerate innovation variance)")]
    FilterDiverged,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_empty_data() {
        assert_eq!(SarimaError::EmptyData.to_string(), "input data is empty");
    }

    #[test]
    fn error_insufficient_data() {
        let err = SarimaError::InsufficientData { n: 5, min: 32 };
        assert_eq!(
            err.to_string(),
            "insufficient data: got 5 observations, need at least 32"
        );
    }

    #[test]
    fn error_non_finite_data() {
        assert_eq!(
            SarimaError::NonFiniteData.to_string(),
            "input data contains non-finite values"
        );
    }

    #[test]
    fn error_constant_data() {
        assert_eq!(
            SarimaError::ConstantData.to_string(),
            "input data is constant (zero variance)"
        );
    }

    #[test]
    fn error_optimization_failed() {
        assert_eq!(
            SarimaError::OptimizationFailed.to_string(),
            "optimisation failed to converge"
        );
    }

    #[test]
    fn error_filter_diverged() {
        assert_eq!(
            SarimaError::FilterDiverged.to_string(),
            "kalman filter diverged (degenerate innovation variance)"
        );
    }

    #[test]
    fn error_is_std_error() {
        fn assert_impl<T: std::error::Error>() {}
        assert_impl::<SarimaError>();
    }

    #[test]
    fn error_is_send_and_sync() {
        fn assert_impl<T: Send + Sync>() {}
        assert_impl::<SarimaError>();
    }
}

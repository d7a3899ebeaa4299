//! Error types for the ombros-series crate.

use chrono::NaiveDate;

/// Error type for all fallible operations in the ombros-series crate.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SeriesError {
    /// Returned when a value is NaN or infinite.
    #[error("non-finite value for {date}")]
    NonFiniteValue {
        /// Date carrying the offending value.
        date: NaiveDate,
    },

    /// Returned when the same date appears more than once in the input.
    #[error("duplicate date: {date}")]
    DuplicateDate {
        /// The repeated date.
        date: NaiveDate,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn error_non_finite() {
        let e = SeriesError::NonFiniteValue {
            date: date(2020, 1, 1),
        };
        assert_eq!(e.to_string(), "non-finite value for 2020-01-01");
    }

    #[test]
    fn error_duplicate_date() {
        let e = SeriesError::DuplicateDate {
            date: date(2020, 6, 15),
        };
        assert_eq!(e.to_string(), "duplicate date: 2020-06-15");
    }

    #[test]
    fn error_is_std_error() {
        fn assert_impl<T: std::error::Error>() {}
        assert_impl::<SeriesError>();
    }

    #[test]
    fn error_is_send_and_sync() {
        fn assert_impl<T: Send + Sync>() {}
        assert_impl::<SeriesError>();
    }
}

//! Sparse daily series keyed by calendar date.

use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::error::SeriesError;

/// An ordered, immutable mapping from calendar date to a finite value.
///
/// Days that carry no observation are simply absent; absence is a distinct
/// state from a measured zero, and every transform in this workspace
/// preserves that distinction. The same container carries raw precipitation
/// (mm/day), rolling precipitation totals, and SPI scores.
///
/// Construction validates the input once; afterwards the series is
/// read-only. The `BTreeMap` backing gives ascending-date iteration for
/// free.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DailySeries {
    points: BTreeMap<NaiveDate, f64>,
}

impl DailySeries {
    /// Creates an empty series.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a series from `(date, value)` pairs.
    ///
    /// Input order does not matter; entries are stored in ascending date
    /// order. Values must be finite and each date may appear at most once.
    ///
    /// # Errors
    ///
    /// | Variant | Trigger |
    /// |---------|---------|
    /// | [`SeriesError::NonFiniteValue`] | any value is NaN or infinite |
    /// | [`SeriesError::DuplicateDate`] | the same date appears twice |
    pub fn from_pairs<I>(pairs: I) -> Result<Self, SeriesError>
    where
        I: IntoIterator<Item = (NaiveDate, f64)>,
    {
        let mut points = BTreeMap::new();
        for (date, value) in pairs {
            if !value.is_finite() {
                return Err(SeriesError::NonFiniteValue { date });
            }
            if points.insert(date, value).is_some() {
                return Err(SeriesError::DuplicateDate { date });
            }
        }
        Ok(Self { points })
    }

    /// Number of defined entries.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Returns `true` if the series has no entries.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Earliest date with a defined value.
    pub fn first_date(&self) -> Option<NaiveDate> {
        self.points.keys().next().copied()
    }

    /// Latest date with a defined value.
    pub fn last_date(&self) -> Option<NaiveDate> {
        self.points.keys().next_back().copied()
    }

    /// Value at `date`, or `None` when the day is absent.
    pub fn get(&self, date: NaiveDate) -> Option<f64> {
        self.points.get(&date).copied()
    }

    /// Last `(date, value)` entry in ascending date order.
    pub fn last_entry(&self) -> Option<(NaiveDate, f64)> {
        self.points.iter().next_back().map(|(d, v)| (*d, *v))
    }

    /// Iterates entries in ascending date order.
    pub fn iter(&self) -> impl Iterator<Item = (NaiveDate, f64)> + '_ {
        self.points.iter().map(|(d, v)| (*d, *v))
    }

    /// Iterates values in ascending date order.
    pub fn values(&self) -> impl Iterator<Item = f64> + '_ {
        self.points.values().copied()
    }

    /// Entries with date `<= cutoff`, as a new series.
    pub fn up_to(&self, cutoff: NaiveDate) -> Self {
        Self {
            points: self
                .points
                .range(..=cutoff)
                .map(|(d, v)| (*d, *v))
                .collect(),
        }
    }

    /// Entries with date strictly `> cutoff`, as a new series.
    pub fn after(&self, cutoff: NaiveDate) -> Self {
        Self {
            points: self
                .points
                .iter()
                .filter(|(d, _)| **d > cutoff)
                .map(|(d, v)| (*d, *v))
                .collect(),
        }
    }

    /// The first `n` entries in ascending date order, as a new series.
    pub fn first_n(&self, n: usize) -> Self {
        Self {
            points: self.points.iter().take(n).map(|(d, v)| (*d, *v)).collect(),
        }
    }

    /// Merges two series, keeping `self`'s value wherever both define the
    /// same date.
    ///
    /// Used to combine observed history with forecast data: the observed
    /// value wins on overlapping dates so that a provider's forecast for an
    /// already-measured day never displaces the measurement.
    pub fn merge_preferring(&self, other: &Self) -> Self {
        let mut points = other.points.clone();
        for (d, v) in &self.points {
            points.insert(*d, *v);
        }
        Self { points }
    }

    pub(crate) fn from_map(points: BTreeMap<NaiveDate, f64>) -> Self {
        Self { points }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn from_pairs_orders_by_date() {
        let s = DailySeries::from_pairs(vec![
            (date(2020, 1, 3), 3.0),
            (date(2020, 1, 1), 1.0),
            (date(2020, 1, 2), 2.0),
        ])
        .unwrap();
        let dates: Vec<NaiveDate> = s.iter().map(|(d, _)| d).collect();
        assert_eq!(
            dates,
            vec![date(2020, 1, 1), date(2020, 1, 2), date(2020, 1, 3)]
        );
    }

    #[test]
    fn from_pairs_rejects_nan() {
        let err = DailySeries::from_pairs(vec![(date(2020, 1, 1), f64::NAN)]).unwrap_err();
        assert!(matches!(err, SeriesError::NonFiniteValue { .. }));
    }

    #[test]
    fn from_pairs_rejects_infinity() {
        let err = DailySeries::from_pairs(vec![(date(2020, 1, 1), f64::INFINITY)]).unwrap_err();
        assert!(matches!(err, SeriesError::NonFiniteValue { .. }));
    }

    #[test]
    fn from_pairs_rejects_duplicate() {
        let err = DailySeries::from_pairs(vec![
            (date(2020, 1, 1), 1.0),
            (date(2020, 1, 1), 2.0),
        ])
        .unwrap_err();
        assert_eq!(
            err,
            SeriesError::DuplicateDate {
                date: date(2020, 1, 1)
            }
        );
    }

    #[test]
    fn empty_series() {
        let s = DailySeries::new();
        assert!(s.is_empty());
        assert_eq!(s.len(), 0);
        assert_eq!(s.first_date(), None);
        assert_eq!(s.last_date(), None);
        assert_eq!(s.last_entry(), None);
    }

    #[test]
    fn accessors() {
        let s = DailySeries::from_pairs(vec![
            (date(2020, 1, 1), 1.0),
            (date(2020, 1, 5), 5.0),
        ])
        .unwrap();
        assert_eq!(s.len(), 2);
        assert_eq!(s.first_date(), Some(date(2020, 1, 1)));
        assert_eq!(s.last_date(), Some(date(2020, 1, 5)));
        assert_eq!(s.get(date(2020, 1, 5)), Some(5.0));
        assert_eq!(s.get(date(2020, 1, 3)), None);
        assert_eq!(s.last_entry(), Some((date(2020, 1, 5), 5.0)));
    }

    #[test]
    fn up_to_is_inclusive() {
        let s = DailySeries::from_pairs((1..=5).map(|d| (date(2020, 1, d), d as f64))).unwrap();
        let head = s.up_to(date(2020, 1, 3));
        assert_eq!(head.len(), 3);
        assert_eq!(head.last_date(), Some(date(2020, 1, 3)));
    }

    #[test]
    fn after_is_exclusive() {
        let s = DailySeries::from_pairs((1..=5).map(|d| (date(2020, 1, d), d as f64))).unwrap();
        let tail = s.after(date(2020, 1, 3));
        assert_eq!(tail.len(), 2);
        assert_eq!(tail.first_date(), Some(date(2020, 1, 4)));
    }

    #[test]
    fn first_n_truncates() {
        let s = DailySeries::from_pairs((1..=5).map(|d| (date(2020, 1, d), d as f64))).unwrap();
        let head = s.first_n(2);
        assert_eq!(head.len(), 2);
        assert_eq!(head.last_date(), Some(date(2020, 1, 2)));
        assert_eq!(s.first_n(10).len(), 5);
    }

    #[test]
    fn merge_prefers_self_on_overlap() {
        let hist = DailySeries::from_pairs(vec![
            (date(2020, 1, 1), 1.0),
            (date(2020, 1, 2), 2.0),
        ])
        .unwrap();
        let fcst = DailySeries::from_pairs(vec![
            (date(2020, 1, 2), 99.0),
            (date(2020, 1, 3), 3.0),
        ])
        .unwrap();
        let merged = hist.merge_preferring(&fcst);
        assert_eq!(merged.len(), 3);
        assert_eq!(merged.get(date(2020, 1, 2)), Some(2.0));
        assert_eq!(merged.get(date(2020, 1, 3)), Some(3.0));
    }

    #[test]
    fn series_is_clone_send_sync() {
        fn assert_impl<T: Clone + Send + Sync>() {}
        assert_impl::<DailySeries>();
    }
}

//! End-to-end gap semantics: absence must survive aggregation and only
//! disappear at the explicit regularization step.

use chrono::{Duration, NaiveDate};
use ombros_series::DailySeries;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// A year of daily rainfall with a two-week outage in June.
fn series_with_outage() -> DailySeries {
    let start = date(2020, 1, 1);
    DailySeries::from_pairs(
        (0..366)
            .map(|i| start + Duration::days(i))
            .filter(|d| !(*d >= date(2020, 6, 10) && *d <= date(2020, 6, 23)))
            .map(|d| (d, 1.5)),
    )
    .unwrap()
}

#[test]
fn outage_blanks_every_overlapping_window() {
    let series = series_with_outage();
    let rolled = series.rolling_sum(30);

    // Any window ending within [outage start, outage end + 29] overlaps the
    // outage and must be undefined.
    let mut d = date(2020, 6, 10);
    let last_blank = date(2020, 6, 23) + Duration::days(29);
    while d <= last_blank {
        assert_eq!(rolled.get(d), None, "window ending {d} overlaps outage");
        d += Duration::days(1);
    }

    // The day after the blank span is fully covered again.
    let recovered = last_blank + Duration::days(1);
    assert_eq!(rolled.get(recovered), Some(45.0));
}

#[test]
fn defined_windows_are_exact_sums() {
    let series = series_with_outage();
    let rolled = series.rolling_sum(30);
    for (_, v) in rolled.iter() {
        assert!((v - 45.0).abs() < 1e-9, "partial sum leaked: {v}");
    }
}

#[test]
fn regularization_bridges_the_outage() {
    let series = series_with_outage();
    let filled = series.interpolate_daily();

    // Every day between the endpoints is now defined.
    assert_eq!(filled.len(), 366);
    // The constant series interpolates to the same constant.
    assert_eq!(filled.get(date(2020, 6, 15)), Some(1.5));
}

#[test]
fn merge_then_roll_uses_observed_values() {
    let hist = DailySeries::from_pairs(
        (0..10).map(|i| (date(2020, 1, 1) + Duration::days(i), 2.0)),
    )
    .unwrap();
    // Forecast overlaps the last observed day with a different value.
    let forecast = DailySeries::from_pairs(
        (9..13).map(|i| (date(2020, 1, 1) + Duration::days(i), 8.0)),
    )
    .unwrap();

    let combined = hist.merge_preferring(&forecast);
    let rolled = combined.rolling_sum(5);

    // Window ending on the overlap day must use the observed 2.0.
    assert_eq!(rolled.get(date(2020, 1, 10)), Some(10.0));
    // Window ending inside the forecast mixes 2.0 and 8.0 days.
    assert_eq!(rolled.get(date(2020, 1, 12)), Some(2.0 * 3.0 + 8.0 * 2.0));
}

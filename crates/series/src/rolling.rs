//! Trailing-window aggregation with gap propagation.

use std::collections::BTreeMap;

use chrono::Duration;

use crate::daily::DailySeries;

impl DailySeries {
    /// Computes the trailing `window_days` sum for every entry.
    ///
    /// The window for a date `d` covers the calendar days
    /// `d - window_days + 1 ..= d`. An output entry is defined only when
    /// every calendar day of its window carries a value; a window touching
    /// any absent day is absent in the output, never a partial sum. In
    /// particular the first `window_days - 1` entries of a dense series are
    /// undefined.
    ///
    /// # Panics
    ///
    /// Panics if `window_days` is zero.
    pub fn rolling_sum(&self, window_days: usize) -> DailySeries {
        assert!(window_days > 0, "rolling_sum: window_days must be positive");

        let entries: Vec<_> = self.iter().collect();
        let mut prefix = Vec::with_capacity(entries.len() + 1);
        let mut acc = 0.0;
        prefix.push(acc);
        for (_, v) in &entries {
            acc += v;
            prefix.push(acc);
        }

        let mut out = BTreeMap::new();
        // Length of the run of consecutive calendar days ending at index i.
        let mut run = 0usize;
        for (i, (d, _)) in entries.iter().enumerate() {
            run = if i > 0 && entries[i - 1].0 + Duration::days(1) == *d {
                run + 1
            } else {
                1
            };
            if run >= window_days {
                // The last `window_days` observations are consecutive days,
                // so they are exactly the calendar window ending at `d`.
                out.insert(*d, prefix[i + 1] - prefix[i + 1 - window_days]);
            }
        }
        DailySeries::from_map(out)
    }
}

//! Regularization onto a contiguous daily grid.

use std::collections::BTreeMap;

use chrono::Duration;

use crate::daily::DailySeries;

impl DailySeries {
    /// Resamples the series onto a strictly daily grid between its first
    /// and last date, filling gaps by linear interpolation between the
    /// nearest defined neighbours.
    ///
    /// Forecasting models assume evenly spaced observations; this is the
    /// regularization step applied to an SPI series before fitting. No
    /// extrapolation happens beyond the observed range, so an empty or
    /// single-entry series is returned unchanged.
    pub fn interpolate_daily(&self) -> DailySeries {
        let entries: Vec<_> = self.iter().collect();
        if entries.len() < 2 {
            return self.clone();
        }

        let mut out = BTreeMap::new();
        for pair in entries.windows(2) {
            let (d0, v0) = pair[0];
            let (d1, v1) = pair[1];
            let span = (d1 - d0).num_days();
            out.insert(d0, v0);
            for offset in 1..span {
                let frac = offset as f64 / span as f64;
                out.insert(d0 + Duration::days(offset), v0 + (v1 - v0) * frac);
            }
        }
        let (last_date, last_value) = entries[entries.len() - 1];
        out.insert(last_date, last_value);
        DailySeries::from_map(out)
    }
}

//! SPI across several window lengths against one shared series.

use std::collections::{BTreeMap, BTreeSet};

use ombros_advisory::{classify, Category};
use ombros_series::DailySeries;
use tracing::debug;

use crate::error::SpiError;
use crate::spi_for_window;
use crate::DAYS_PER_MONTH;

/// Latest SPI value and its severity category for one window length.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScaleSpi {
    /// Latest SPI value at this scale.
    pub spi: f64,
    /// Severity category of that value.
    pub category: Category,
}

/// Computes the latest SPI and category for each requested scale.
///
/// Scales are deduplicated and processed in ascending order, each running
/// the full rolling → calibrate → transform pipeline against the same
/// immutable precipitation series. The scales are independent, so callers
/// may parallelise across them; nothing here requires an ordering.
///
/// One failing scale fails the whole call: callers ask for a fixed set of
/// comparable windows, and a partial mapping would be misleading.
///
/// # Errors
///
/// [`SpiError::EmptyScales`] for an empty request,
/// [`SpiError::InvalidScale`] for a scale outside 1..=24 months, and
/// whatever the per-scale pipeline raises.
pub fn multi_scale_spi(
    precip: &DailySeries,
    scales_months: &[u32],
) -> Result<BTreeMap<u32, ScaleSpi>, SpiError> {
    if scales_months.is_empty() {
        return Err(SpiError::EmptyScales);
    }

    let unique: BTreeSet<u32> = scales_months.iter().copied().collect();

    let mut out = BTreeMap::new();
    for scale in unique {
        if !(1..=24).contains(&scale) {
            return Err(SpiError::InvalidScale {
                scale_months: scale,
            });
        }
        let window_days = (scale * DAYS_PER_MONTH) as usize;
        let result = spi_for_window(precip, window_days)?;
        debug!(scale, spi = result.latest(), "computed scale");
        out.insert(
            scale,
            ScaleSpi {
                spi: result.latest(),
                category: classify(result.latest()),
            },
        );
    }
    Ok(out)
}

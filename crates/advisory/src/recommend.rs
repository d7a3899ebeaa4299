//! Advisory statements keyed by SPI severity band.

use crate::category::{classify, Category};

/// Whether the advice addresses observed conditions or a forecast period.
///
/// Both framings use the same band boundaries; the forecast variant phrases
/// statements as planning guidance rather than immediate action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Framing {
    /// Advice for conditions currently on the ground.
    Current,
    /// Anticipatory advice for a forecast period.
    Forecast,
}

/// Returns the ordered advisory statements for an SPI value.
///
/// The list is never empty: every band carries 2–3 statements in fixed
/// priority order, covering irrigation priority, deferral of costly
/// operations, soil-compaction risk, disease monitoring, and planning
/// horizon as appropriate for the band.
pub fn recommendations(spi: f64, framing: Framing) -> Vec<&'static str> {
    let category = classify(spi);
    match framing {
        Framing::Current => current_statements(category),
        Framing::Forecast => forecast_statements(category),
    }
    .to_vec()
}

fn current_statements(category: Category) -> &'static [&'static str] {
    match category {
        Category::ExtremeDrought => &[
            "Extreme moisture deficit. Focus on conserving soil moisture: \
             minimise machinery passes, skip non-essential tillage and keep \
             crop residue on the surface.",
            "Where irrigation is available, verify actual soil moisture and \
             switch to priority watering of the most valuable fields instead \
             of spreading water evenly.",
            "Reconsider late high-cost operations such as top dressing and \
             spraying; their payoff drops sharply under severe drought.",
        ],
        Category::SevereDrought => &[
            "Severe drought: precipitation over the period is well below \
             normal. Step up monitoring of crop and soil condition, \
             especially through sensitive growth stages.",
            "If irrigating, adjust the watering schedule to favour fields in \
             key yield-forming stages.",
            "Avoid heavy tillage that dries out the topsoil further.",
        ],
        Category::ModerateDrought => &[
            "Moderate moisture deficit: rainfall is noticeably below usual. \
             Check soil moisture more often and watch for early signs of \
             crop stress.",
            "When planning fertiliser applications and treatments, expect \
             reduced effectiveness under limited moisture.",
            "Limit unnecessary machinery passes to protect soil structure.",
        ],
        Category::MildDry => &[
            "Conditions are slightly drier than normal. No serious stress \
             yet, but keep soil moisture under closer watch.",
            "Decide in advance which fields and operations take priority if \
             the moisture supply keeps falling.",
        ],
        Category::NearNormal => &[
            "Moisture is close to the statistical norm for this period. \
             Standard cropping practice can continue.",
            "Record current soil moisture and crop condition as a baseline \
             for comparing future dry or wet spells.",
        ],
        Category::MildWet => &[
            "Conditions are slightly wetter than usual. Mostly favourable, \
             but heavy soils carry a higher compaction risk under machinery.",
            "Check field trafficability before moving equipment in, to avoid \
             rutting and structural damage.",
        ],
        Category::ModerateWet => &[
            "Precipitation is above normal. On waterlogged patches, check \
             root condition and canopy ventilation.",
            "Fungal disease risk rises in these conditions; keep up scouting \
             and preventive treatments.",
        ],
        Category::ExtremeWet => &[
            "Very wet conditions: precipitation is far above normal, with \
             standing water possible in low-lying spots.",
            "Keep heavy machinery off the fields until the soil dries, to \
             avoid long-lasting compaction.",
            "Intensify monitoring of diseases and root condition, especially \
             on poorly drained ground.",
        ],
    }
}

fn forecast_statements(category: Category) -> &'static [&'static str] {
    match category {
        Category::ExtremeDrought => &[
            "The outlook points to a very strong moisture deficit. Decide \
             now which fields get priority for water and resources, and \
             adjust work plans for a likely yield reduction.",
            "Review costly operations such as treatments and top dressing \
             whose payoff collapses under severe drought; postpone or scale \
             them back.",
        ],
        Category::SevereDrought => &[
            "A strong moisture deficit is expected. Assess in advance \
             whether water, machinery and labour can cover intensified \
             irrigation or a reshuffled field schedule.",
            "Agree a dry-year scenario ahead of time: which fields get extra \
             attention and which stay on baseline practice.",
        ],
        Category::ModerateDrought => &[
            "A moderate moisture deficit is forecast. Work out priorities \
             now: which plots are most sensitive to under-watering, and \
             when.",
            "Prepare a contingency plan for shifting irrigation and \
             postponing field work if the weather confirms the forecast.",
        ],
        Category::MildDry => &[
            "The outlook trends drier. Not critical yet, but be ready to \
             tighten up if the trend continues.",
            "Identify which activities would be cut first if the deficit \
             deepens, such as some treatments and late top dressing.",
        ],
        Category::NearNormal => &[
            "Forecast moisture supply is near normal. Work can be planned as \
             usual.",
            "Keep an eye on forecast updates; a swing toward drought or \
             waterlogging is easier to absorb with early adjustments.",
        ],
        Category::MildWet => &[
            "Slightly elevated precipitation is expected. Usually \
             unproblematic, but build slack into the field schedule for rain \
             delays.",
            "Frequent rain narrows the windows when machinery can enter \
             fields without damaging the soil.",
        ],
        Category::ModerateWet => &[
            "A wetter-than-normal period is forecast. Plan how to use short \
             dry windows for the critical operations.",
            "Provide for extra disease scouting; wet spells usually bring \
             higher infection pressure.",
        ],
        Category::ExtremeWet => &[
            "Very wet conditions are possible, with standing water on some \
             days. Budget for weather downtime when scheduling field work.",
            "Watch poorly drained plots closely: they face the highest risk \
             of plant loss and root damage.",
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn never_empty_in_either_framing() {
        for &x in &[-5.0, -2.0, -1.5, -1.0, -0.5, 0.0, 0.5, 1.0, 1.5, 5.0] {
            assert!(!recommendations(x, Framing::Current).is_empty());
            assert!(!recommendations(x, Framing::Forecast).is_empty());
        }
    }

    #[test]
    fn statement_counts_stay_between_one_and_four() {
        for &x in &[-3.0, -1.7, -1.2, -0.7, 0.0, 0.7, 1.2, 3.0] {
            for framing in [Framing::Current, Framing::Forecast] {
                let n = recommendations(x, framing).len();
                assert!((1..=4).contains(&n), "spi={x}: {n} statements");
            }
        }
    }

    #[test]
    fn framings_differ_for_same_band() {
        let current = recommendations(-2.5, Framing::Current);
        let forecast = recommendations(-2.5, Framing::Forecast);
        assert_ne!(current, forecast);
    }

    #[test]
    fn same_band_same_statements() {
        // Two values in the same band yield identical advice.
        assert_eq!(
            recommendations(-1.6, Framing::Current),
            recommendations(-1.9, Framing::Current)
        );
    }

    #[test]
    fn order_is_stable() {
        let a = recommendations(0.0, Framing::Current);
        let b = recommendations(0.0, Framing::Current);
        assert_eq!(a, b);
    }

    #[test]
    fn extreme_drought_mentions_irrigation_priority() {
        let recs = recommendations(-2.5, Framing::Current).join(" ");
        assert!(recs.contains("priority watering"));
    }

    #[test]
    fn wet_bands_mention_compaction() {
        let recs = recommendations(0.7, Framing::Current).join(" ");
        assert!(recs.contains("compaction"));
    }
}

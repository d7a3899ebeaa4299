//! SPI severity categories.

use serde::Serialize;

/// One of eight ordered drought/wetness severity categories.
///
/// The bands are half-open intervals partitioning the real line; every SPI
/// value falls into exactly one. The same scale classifies observed and
/// forecast values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Category {
    /// spi <= -2.0
    #[serde(rename = "extreme drought")]
    ExtremeDrought,
    /// -2.0 < spi <= -1.5
    #[serde(rename = "severe drought")]
    SevereDrought,
    /// -1.5 < spi <= -1.0
    #[serde(rename = "moderate drought")]
    ModerateDrought,
    /// -1.0 < spi <= -0.5
    #[serde(rename = "mild dry conditions")]
    MildDry,
    /// -0.5 < spi < 0.5
    #[serde(rename = "near-normal")]
    NearNormal,
    /// 0.5 <= spi < 1.0
    #[serde(rename = "mild wet conditions")]
    MildWet,
    /// 1.0 <= spi < 1.5
    #[serde(rename = "moderate wet conditions")]
    ModerateWet,
    /// spi >= 1.5
    #[serde(rename = "extreme wet conditions")]
    ExtremeWet,
}

impl Category {
    /// Human-readable label, identical to the serialized form.
    pub fn label(self) -> &'static str {
        match self {
            Category::ExtremeDrought => "extreme drought",
            Category::SevereDrought => "severe drought",
            Category::ModerateDrought => "moderate drought",
            Category::MildDry => "mild dry conditions",
            Category::NearNormal => "near-normal",
            Category::MildWet => "mild wet conditions",
            Category::ModerateWet => "moderate wet conditions",
            Category::ExtremeWet => "extreme wet conditions",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Maps an SPI value to its severity category.
///
/// Dry-side boundaries are inclusive from below (spi = -1.5 is severe
/// drought), wet-side boundaries inclusive from above (spi = 1.0 is
/// moderate wet).
pub fn classify(spi: f64) -> Category {
    if spi <= -2.0 {
        Category::ExtremeDrought
    } else if spi <= -1.5 {
        Category::SevereDrought
    } else if spi <= -1.0 {
        Category::ModerateDrought
    } else if spi <= -0.5 {
        Category::MildDry
    } else if spi < 0.5 {
        Category::NearNormal
    } else if spi < 1.0 {
        Category::MildWet
    } else if spi < 1.5 {
        Category::ModerateWet
    } else {
        Category::ExtremeWet
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn boundary_values_land_in_specified_bands() {
        assert_eq!(classify(-2.0), Category::ExtremeDrought);
        assert_eq!(classify(-1.5), Category::SevereDrought);
        assert_eq!(classify(-1.0), Category::ModerateDrought);
        assert_eq!(classify(-0.5), Category::MildDry);
        assert_eq!(classify(0.5), Category::MildWet);
        assert_eq!(classify(1.0), Category::ModerateWet);
        assert_eq!(classify(1.5), Category::ExtremeWet);
    }

    #[test]
    fn interior_values() {
        assert_eq!(classify(-3.7), Category::ExtremeDrought);
        assert_eq!(classify(-1.7), Category::SevereDrought);
        assert_eq!(classify(-1.2), Category::ModerateDrought);
        assert_eq!(classify(-0.7), Category::MildDry);
        assert_eq!(classify(0.0), Category::NearNormal);
        assert_eq!(classify(0.7), Category::MildWet);
        assert_eq!(classify(1.2), Category::ModerateWet);
        assert_eq!(classify(4.1), Category::ExtremeWet);
    }

    #[test]
    fn just_inside_boundaries() {
        assert_eq!(classify(-2.0 + 1e-9), Category::SevereDrought);
        assert_eq!(classify(-1.5 + 1e-9), Category::ModerateDrought);
        assert_eq!(classify(0.5 - 1e-9), Category::NearNormal);
        assert_eq!(classify(1.5 - 1e-9), Category::ModerateWet);
    }

    #[test]
    fn classify_is_deterministic() {
        for &x in &[-2.5, -1.1, 0.0, 0.9, 2.3] {
            assert_eq!(classify(x), classify(x));
        }
    }

    #[test]
    fn categories_are_ordered_dry_to_wet() {
        assert!(Category::ExtremeDrought < Category::SevereDrought);
        assert!(Category::SevereDrought < Category::NearNormal);
        assert!(Category::NearNormal < Category::ExtremeWet);
    }

    #[test]
    fn display_matches_label() {
        assert_eq!(Category::NearNormal.to_string(), "near-normal");
        assert_eq!(Category::ExtremeDrought.to_string(), "extreme drought");
    }
}

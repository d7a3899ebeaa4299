//! SPI severity classification and agronomic recommendations.
//!
//! Two pure functions over a scalar SPI value:
//!
//! - [`classify`] maps the value onto one of eight ordered
//!   [`Category`] bands with fixed thresholds.
//! - [`recommendations`] renders the band into ordered advisory
//!   statements, with a [`Framing`] flag selecting between advice for
//!   observed conditions and anticipatory advice for a forecast period.
//!
//! Both functions are total and deterministic; neither holds state.

mod category;
mod recommend;

pub use category::{classify, Category};
pub use recommend::{recommendations, Framing};

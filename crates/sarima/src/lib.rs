//! # ombros-sarima
//!
//! Seasonal ARMA(p,q)×(P,Q)_s fitting via state-space maximum likelihood
//! (Kalman filter), plus the SPI forecast wrapper used by the service.
//!
//! ## Typestate Workflow
//!
//! ```text
//! SarimaSpec::new(p, q)
//!     .with_seasonal(P, Q, s)   ──.fit(&data)?──►  SarimaFit
//!                                                   ├─ .ar() / .ma()
//!                                                   ├─ .seasonal_ar() / .seasonal_ma()
//!                                                   ├─ .sigma2() / .log_likelihood() / .aic()
//!                                                   └─ .forecast(horizon)
//! ```
//!
//! ## Forecasting SPI
//!
//! [`forecast_index`] regularizes an SPI series onto a daily grid, fits the
//! fixed (1,0,1)×(1,0,1,30) structure without stationarity or
//! invertibility constraints, and projects a configurable horizon. It
//! never errors: any model failure resolves to the mean of the last 30
//! regularized observations, with the chosen path recorded in
//! [`ForecastSource`].
//!
//! ## Mathematical Glossary
//!
//! | Symbol | Accessor | Meaning |
//! |--------|----------|---------|
//! | phi | [`SarimaFit::ar()`] | AR coefficients: weights on past observations |
//! | theta | [`SarimaFit::ma()`] | MA coefficients: weights on past forecast errors |
//! | Phi, Theta | seasonal accessors | the same at multiples of the season length |
//! | sigma2 | [`SarimaFit::sigma2()`] | Innovation (white-noise) variance |

mod error;
mod fit;
mod forecast;
mod spec;

pub(crate) mod kalman;
pub(crate) mod optimizer;
pub(crate) mod state_space;

pub use error::SarimaError;
pub use fit::SarimaFit;
pub use forecast::{forecast_index, ForecastSource, IndexForecast, DEFAULT_HORIZON};
pub use spec::SarimaSpec;

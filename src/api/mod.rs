//! HTTP surface: routing, shared validation, health check.

pub mod fields;
pub mod spi;

use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::error::ApiError;
use crate::state::AppState;

/// Builds the full application router.
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health))
        .nest("/api/v1/spi", spi::routes())
        .nest("/api/v1/fields", fields::routes())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

#[derive(Serialize)]
struct Health {
    status: &'static str,
}

async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

/// Checks that a coordinate pair is a real point on the globe.
pub(crate) fn validate_coords(lat: f64, lon: f64) -> Result<(), ApiError> {
    if !(-90.0..=90.0).contains(&lat) {
        return Err(ApiError::Validation(format!(
            "lat must be within -90..=90, got {lat}"
        )));
    }
    if !(-180.0..=180.0).contains(&lon) {
        return Err(ApiError::Validation(format!(
            "lon must be within -180..=180, got {lon}"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coords_inside_bounds() {
        assert!(validate_coords(0.0, 0.0).is_ok());
        assert!(validate_coords(-90.0, 180.0).is_ok());
        assert!(validate_coords(90.0, -180.0).is_ok());
    }

    #[test]
    fn coords_outside_bounds() {
        assert!(validate_coords(90.5, 0.0).is_err());
        assert!(validate_coords(0.0, -180.5).is_err());
        assert!(validate_coords(f64::NAN, 0.0).is_err());
    }
}

//! Field registry endpoints.
//!
//! A small keyed store of saved field locations so the frontend can
//! re-query SPI for named places. In-memory only; records live and die
//! with the process.

use axum::extract::{Path, State};
use axum::routing::get;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::api::validate_coords;
use crate::error::ApiError;
use crate::state::AppState;

/// Coarse soil class, used by the advisory texts' compaction guidance.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SoilType {
    Light,
    #[default]
    Medium,
    Heavy,
}

/// A saved field location.
#[derive(Debug, Clone, Serialize)]
pub struct FieldRecord {
    pub id: Uuid,
    pub name: String,
    pub lat: f64,
    pub lon: f64,
    pub area_ha: Option<f64>,
    pub has_irrigation: bool,
    pub soil_type: SoilType,
}

/// Request body for creating a field.
#[derive(Debug, Deserialize)]
pub struct NewField {
    pub name: String,
    pub lat: f64,
    pub lon: f64,
    #[serde(default)]
    pub area_ha: Option<f64>,
    #[serde(default)]
    pub has_irrigation: bool,
    #[serde(default)]
    pub soil_type: SoilType,
}

#[derive(Debug, Serialize)]
pub struct DeletedResponse {
    status: &'static str,
    id: Uuid,
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_fields).post(create_field))
        .route("/:field_id", get(get_field).delete(delete_field))
}

/// `GET /api/v1/fields` — all saved fields, ordered by name.
async fn list_fields(State(state): State<AppState>) -> Json<Vec<FieldRecord>> {
    let fields = state.fields.read().await;
    let mut records: Vec<FieldRecord> = fields.values().cloned().collect();
    records.sort_by(|a, b| a.name.cmp(&b.name));
    Json(records)
}

/// `POST /api/v1/fields` — save a new field.
async fn create_field(
    State(state): State<AppState>,
    Json(new_field): Json<NewField>,
) -> Result<Json<FieldRecord>, ApiError> {
    validate_coords(new_field.lat, new_field.lon)?;
    if new_field.name.trim().is_empty() {
        return Err(ApiError::Validation("field name must be non-empty".to_string()));
    }

    let record = FieldRecord {
        id: Uuid::new_v4(),
        name: new_field.name,
        lat: new_field.lat,
        lon: new_field.lon,
        area_ha: new_field.area_ha,
        has_irrigation: new_field.has_irrigation,
        soil_type: new_field.soil_type,
    };
    state.fields.write().await.insert(record.id, record.clone());
    Ok(Json(record))
}

/// `GET /api/v1/fields/{id}` — one field by id.
async fn get_field(
    State(state): State<AppState>,
    Path(field_id): Path<Uuid>,
) -> Result<Json<FieldRecord>, ApiError> {
    state
        .fields
        .read()
        .await
        .get(&field_id)
        .cloned()
        .map(Json)
        .ok_or_else(|| ApiError::NotFound("field".to_string()))
}

/// `DELETE /api/v1/fields/{id}` — remove a field.
async fn delete_field(
    State(state): State<AppState>,
    Path(field_id): Path<Uuid>,
) -> Result<Json<DeletedResponse>, ApiError> {
    state
        .fields
        .write()
        .await
        .remove(&field_id)
        .map(|record| {
            Json(DeletedResponse {
                status: "deleted",
                id: record.id,
            })
        })
        .ok_or_else(|| ApiError::NotFound("field".to_string()))
}

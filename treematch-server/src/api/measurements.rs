//! Soil measurement endpoints
//!
//! - GET|POST /soil_measurements/soil_measurements
//! - GET|PUT|DELETE /soil_measurements/:id
//!
//! The provider-backed lookups under `/soil_measurements/` live in
//! `recommendations.rs`.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use treematch_common::db::SoilMeasurement;

use super::MessageResponse;
use crate::db::measurements::{self, NewSoilMeasurement, SoilMeasurementUpdate};
use crate::{ApiError, ApiResult, AppState};

#[derive(Debug, Default, Deserialize)]
pub struct SoilMeasurementPayload {
    pub property_id: Option<i64>,
    pub location_id: Option<i64>,
    pub value: Option<f64>,
    pub depth: Option<String>,
    pub uncertainty_50: Option<String>,
    pub uncertainty_68: Option<String>,
    pub uncertainty_90: Option<String>,
}

impl SoilMeasurementPayload {
    fn into_new(self) -> ApiResult<NewSoilMeasurement> {
        match (self.property_id, self.location_id, self.value, self.depth) {
            (Some(property_id), Some(location_id), Some(value), Some(depth)) => {
                Ok(NewSoilMeasurement {
                    property_id,
                    location_id,
                    value,
                    depth,
                    uncertainty_50: self.uncertainty_50,
                    uncertainty_68: self.uncertainty_68,
                    uncertainty_90: self.uncertainty_90,
                })
            }
            _ => Err(ApiError::BadRequest(
                "Invalid input, missing property_id, location_id, value, or depth".to_string(),
            )),
        }
    }

    fn into_update(self) -> SoilMeasurementUpdate {
        SoilMeasurementUpdate {
            property_id: self.property_id,
            location_id: self.location_id,
            value: self.value,
            depth: self.depth,
            uncertainty_50: self.uncertainty_50,
            uncertainty_68: self.uncertainty_68,
            uncertainty_90: self.uncertainty_90,
        }
    }
}

pub async fn list_measurements(
    State(state): State<AppState>,
) -> ApiResult<Json<Vec<SoilMeasurement>>> {
    Ok(Json(measurements::list_measurements(&state.db).await?))
}

pub async fn create_measurement(
    State(state): State<AppState>,
    Json(payload): Json<SoilMeasurementPayload>,
) -> ApiResult<(StatusCode, Json<SoilMeasurement>)> {
    let new_measurement = payload.into_new()?;
    let created = measurements::create_measurement(&state.db, &new_measurement).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn get_measurement(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<Json<SoilMeasurement>> {
    measurements::get_measurement(&state.db, id)
        .await?
        .map(Json)
        .ok_or_else(|| not_found(id))
}

pub async fn update_measurement(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<SoilMeasurementPayload>,
) -> ApiResult<Json<SoilMeasurement>> {
    measurements::update_measurement(&state.db, id, &payload.into_update())
        .await?
        .map(Json)
        .ok_or_else(|| not_found(id))
}

pub async fn delete_measurement(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<Json<MessageResponse>> {
    let deleted = measurements::delete_measurement(&state.db, id)
        .await?
        .ok_or_else(|| not_found(id))?;

    Ok(Json(MessageResponse::new(format!(
        "Soil Measurement {} deleted successfully",
        deleted.id
    ))))
}

fn not_found(id: i64) -> ApiError {
    ApiError::NotFound(format!("Soil measurement {} not found", id))
}

pub fn measurement_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/soil_measurements/soil_measurements",
            get(list_measurements).post(create_measurement),
        )
        .route(
            "/soil_measurements/:id",
            get(get_measurement)
                .put(update_measurement)
                .delete(delete_measurement),
        )
}

//! Soil sampling location endpoints
//!
//! - GET|POST /soil_locations/locations
//! - GET|PUT|DELETE /soil_locations/:id (DELETE answers 204 with no body)

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use treematch_common::db::SoilLocation;

use crate::db::locations::{self, NewSoilLocation, SoilLocationUpdate};
use crate::{ApiError, ApiResult, AppState};

#[derive(Debug, Default, Deserialize)]
pub struct SoilLocationPayload {
    pub name: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

impl SoilLocationPayload {
    fn into_new(self) -> ApiResult<NewSoilLocation> {
        match (self.name, self.latitude, self.longitude) {
            (Some(name), Some(latitude), Some(longitude)) => Ok(NewSoilLocation {
                name,
                latitude,
                longitude,
            }),
            _ => Err(ApiError::BadRequest(
                "Invalid input, missing name, latitude, or longitude".to_string(),
            )),
        }
    }

    fn into_update(self) -> SoilLocationUpdate {
        SoilLocationUpdate {
            name: self.name,
            latitude: self.latitude,
            longitude: self.longitude,
        }
    }
}

pub async fn list_locations(State(state): State<AppState>) -> ApiResult<Json<Vec<SoilLocation>>> {
    Ok(Json(locations::list_locations(&state.db).await?))
}

pub async fn create_location(
    State(state): State<AppState>,
    Json(payload): Json<SoilLocationPayload>,
) -> ApiResult<(StatusCode, Json<SoilLocation>)> {
    let new_location = payload.into_new()?;
    let created = locations::create_location(&state.db, &new_location).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn get_location(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<Json<SoilLocation>> {
    locations::get_location(&state.db, id)
        .await?
        .map(Json)
        .ok_or_else(|| not_found(id))
}

pub async fn update_location(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<SoilLocationPayload>,
) -> ApiResult<Json<SoilLocation>> {
    locations::update_location(&state.db, id, &payload.into_update())
        .await?
        .map(Json)
        .ok_or_else(|| not_found(id))
}

pub async fn delete_location(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<StatusCode> {
    if locations::delete_location(&state.db, id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found(id))
    }
}

fn not_found(id: i64) -> ApiError {
    ApiError::NotFound(format!("Soil location {} not found", id))
}

pub fn location_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/soil_locations/locations",
            get(list_locations).post(create_location),
        )
        .route(
            "/soil_locations/:id",
            get(get_location).put(update_location).delete(delete_location),
        )
}

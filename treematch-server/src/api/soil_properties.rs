//! Soil property catalog endpoints
//!
//! - GET|POST /soil_properties/soil_properties
//! - GET|PUT|DELETE /soil_properties/:id

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use treematch_common::db::SoilProperty;

use super::MessageResponse;
use crate::db::soil_properties::{self, NewSoilProperty, SoilPropertyUpdate};
use crate::{ApiError, ApiResult, AppState};

#[derive(Debug, Default, Deserialize)]
pub struct SoilPropertyPayload {
    pub property_name: Option<String>,
    pub description: Option<String>,
    pub theme: Option<String>,
    pub unit: Option<String>,
    pub uncertainty: Option<bool>,
    pub value_type: Option<String>,
}

impl SoilPropertyPayload {
    fn into_new(self) -> ApiResult<NewSoilProperty> {
        match (
            self.property_name,
            self.description,
            self.theme,
            self.unit,
            self.uncertainty,
            self.value_type,
        ) {
            (
                Some(property_name),
                Some(description),
                Some(theme),
                Some(unit),
                Some(uncertainty),
                Some(value_type),
            ) => Ok(NewSoilProperty {
                property_name,
                description,
                theme,
                unit,
                uncertainty,
                value_type,
            }),
            _ => Err(ApiError::BadRequest(
                "Invalid input, missing property_name, description, theme, unit, uncertainty, or value_type"
                    .to_string(),
            )),
        }
    }

    fn into_update(self) -> SoilPropertyUpdate {
        SoilPropertyUpdate {
            property_name: self.property_name,
            description: self.description,
            theme: self.theme,
            unit: self.unit,
            uncertainty: self.uncertainty,
            value_type: self.value_type,
        }
    }
}

pub async fn list_soil_properties(
    State(state): State<AppState>,
) -> ApiResult<Json<Vec<SoilProperty>>> {
    Ok(Json(soil_properties::list_soil_properties(&state.db).await?))
}

pub async fn create_soil_property(
    State(state): State<AppState>,
    Json(payload): Json<SoilPropertyPayload>,
) -> ApiResult<(StatusCode, Json<SoilProperty>)> {
    let new_property = payload.into_new()?;
    let created = soil_properties::create_soil_property(&state.db, &new_property).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn get_soil_property(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<Json<SoilProperty>> {
    soil_properties::get_soil_property(&state.db, id)
        .await?
        .map(Json)
        .ok_or_else(|| not_found(id))
}

pub async fn update_soil_property(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<SoilPropertyPayload>,
) -> ApiResult<Json<SoilProperty>> {
    soil_properties::update_soil_property(&state.db, id, &payload.into_update())
        .await?
        .map(Json)
        .ok_or_else(|| not_found(id))
}

pub async fn delete_soil_property(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<Json<MessageResponse>> {
    let deleted = soil_properties::delete_soil_property(&state.db, id)
        .await?
        .ok_or_else(|| not_found(id))?;

    Ok(Json(MessageResponse::new(format!(
        "Soil Property {} deleted successfully",
        deleted.property_name
    ))))
}

fn not_found(id: i64) -> ApiError {
    ApiError::NotFound(format!("Soil property {} not found", id))
}

pub fn soil_property_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/soil_properties/soil_properties",
            get(list_soil_properties).post(create_soil_property),
        )
        .route(
            "/soil_properties/:id",
            get(get_soil_property)
                .put(update_soil_property)
                .delete(delete_soil_property),
        )
}

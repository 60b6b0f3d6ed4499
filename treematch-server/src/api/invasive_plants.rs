//! Invasive plant endpoints
//!
//! - GET|POST /invasive_plants/invasive_plants
//! - GET|PUT|DELETE /invasive_plants/:id

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use treematch_common::db::InvasivePlant;

use super::MessageResponse;
use crate::db::invasive_plants::{self, InvasivePlantUpdate, NewInvasivePlant};
use crate::{ApiError, ApiResult, AppState};

#[derive(Debug, Default, Deserialize)]
pub struct InvasivePlantPayload {
    pub common_name: Option<String>,
    pub scientific_name: Option<String>,
    pub category: Option<String>,
}

impl InvasivePlantPayload {
    fn into_new(self) -> ApiResult<NewInvasivePlant> {
        match (self.scientific_name, self.common_name, self.category) {
            (Some(scientific_name), Some(common_name), Some(category)) => Ok(NewInvasivePlant {
                common_name,
                scientific_name,
                category,
            }),
            _ => Err(ApiError::BadRequest(
                "Invalid input, missing scientific_name, common_name, or category".to_string(),
            )),
        }
    }

    fn into_update(self) -> InvasivePlantUpdate {
        InvasivePlantUpdate {
            common_name: self.common_name,
            scientific_name: self.scientific_name,
            category: self.category,
        }
    }
}

pub async fn list_invasive_plants(
    State(state): State<AppState>,
) -> ApiResult<Json<Vec<InvasivePlant>>> {
    Ok(Json(invasive_plants::list_invasive_plants(&state.db).await?))
}

pub async fn create_invasive_plant(
    State(state): State<AppState>,
    Json(payload): Json<InvasivePlantPayload>,
) -> ApiResult<(StatusCode, Json<InvasivePlant>)> {
    let new_plant = payload.into_new()?;
    let created = invasive_plants::create_invasive_plant(&state.db, &new_plant).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn get_invasive_plant(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<Json<InvasivePlant>> {
    invasive_plants::get_invasive_plant(&state.db, id)
        .await?
        .map(Json)
        .ok_or_else(|| not_found(id))
}

pub async fn update_invasive_plant(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<InvasivePlantPayload>,
) -> ApiResult<Json<InvasivePlant>> {
    invasive_plants::update_invasive_plant(&state.db, id, &payload.into_update())
        .await?
        .map(Json)
        .ok_or_else(|| not_found(id))
}

pub async fn delete_invasive_plant(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<Json<MessageResponse>> {
    let deleted = invasive_plants::delete_invasive_plant(&state.db, id)
        .await?
        .ok_or_else(|| not_found(id))?;

    Ok(Json(MessageResponse::new(format!(
        "Invasive Plant {} deleted successfully",
        deleted.common_name
    ))))
}

fn not_found(id: i64) -> ApiError {
    ApiError::NotFound(format!("Invasive plant {} not found", id))
}

pub fn invasive_plant_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/invasive_plants/invasive_plants",
            get(list_invasive_plants).post(create_invasive_plant),
        )
        .route(
            "/invasive_plants/:id",
            get(get_invasive_plant)
                .put(update_invasive_plant)
                .delete(delete_invasive_plant),
        )
}

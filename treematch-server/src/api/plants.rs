//! Plant endpoints
//!
//! - GET  /plants/welcome
//! - GET  /plants/plants, POST /plants/plants
//! - GET|PUT|DELETE /plants/plant/:id

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use treematch_common::db::Plant;

use super::MessageResponse;
use crate::db::plants::{self, NewPlant, PlantUpdate};
use crate::{ApiError, ApiResult, AppState};

/// Create/update body; every field optional so missing ones give a 400, not a 422
#[derive(Debug, Default, Deserialize)]
pub struct PlantPayload {
    pub title: Option<String>,
    pub description: Option<String>,
}

impl PlantPayload {
    fn into_new(self) -> ApiResult<NewPlant> {
        match (self.title, self.description) {
            (Some(title), Some(description)) => Ok(NewPlant { title, description }),
            _ => Err(ApiError::BadRequest(
                "Invalid input, missing title or description".to_string(),
            )),
        }
    }

    fn into_update(self) -> PlantUpdate {
        PlantUpdate {
            title: self.title,
            description: self.description,
        }
    }
}

/// GET /plants/welcome
pub async fn welcome() -> Json<MessageResponse> {
    Json(MessageResponse::new("Hello, Welcome to TreeMatch!"))
}

pub async fn list_plants(State(state): State<AppState>) -> ApiResult<Json<Vec<Plant>>> {
    Ok(Json(plants::list_plants(&state.db).await?))
}

pub async fn create_plant(
    State(state): State<AppState>,
    Json(payload): Json<PlantPayload>,
) -> ApiResult<(StatusCode, Json<Plant>)> {
    let new_plant = payload.into_new()?;
    let created = plants::create_plant(&state.db, &new_plant).await?;
    tracing::info!(id = created.id, title = %created.title, "Plant created");
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn get_plant(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<Json<Plant>> {
    plants::get_plant(&state.db, id)
        .await?
        .map(Json)
        .ok_or_else(|| not_found(id))
}

pub async fn update_plant(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<PlantPayload>,
) -> ApiResult<Json<Plant>> {
    plants::update_plant(&state.db, id, &payload.into_update())
        .await?
        .map(Json)
        .ok_or_else(|| not_found(id))
}

pub async fn delete_plant(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<Json<MessageResponse>> {
    let deleted = plants::delete_plant(&state.db, id)
        .await?
        .ok_or_else(|| not_found(id))?;

    Ok(Json(MessageResponse::new(format!(
        "Plant {} deleted successfully",
        deleted.title
    ))))
}

fn not_found(id: i64) -> ApiError {
    ApiError::NotFound(format!("Plant {} not found", id))
}

pub fn plant_routes() -> Router<AppState> {
    Router::new()
        .route("/plants/welcome", get(welcome))
        .route("/plants/plants", get(list_plants).post(create_plant))
        .route(
            "/plants/plant/:id",
            get(get_plant).put(update_plant).delete(delete_plant),
        )
}

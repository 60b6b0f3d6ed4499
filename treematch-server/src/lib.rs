//! treematch-server library
//!
//! HTTP service for the TreeMatch plant/soil application: CRUD over plants,
//! invasive plants and the soil catalog, plus soil recommendations backed by
//! the external soil property provider.

use axum::Router;
use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub mod api;
pub mod db;
pub mod error;
pub mod services;

pub use crate::error::{ApiError, ApiResult};

use crate::services::{RecommendationEngine, SoilPropertySource};

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db: SqlitePool,
    /// Soil property provider (HTTP client in production)
    pub soil_source: Arc<dyn SoilPropertySource>,
    /// Report builder over `soil_source`
    pub engine: RecommendationEngine,
    /// Service startup timestamp for uptime tracking
    pub startup_time: DateTime<Utc>,
}

impl AppState {
    pub fn new(db: SqlitePool, soil_source: Arc<dyn SoilPropertySource>) -> Self {
        Self {
            db,
            engine: RecommendationEngine::new(soil_source.clone()),
            soil_source,
            startup_time: Utc::now(),
        }
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .merge(api::plant_routes())
        .merge(api::invasive_plant_routes())
        .merge(api::soil_property_routes())
        .merge(api::location_routes())
        .merge(api::measurement_routes())
        .merge(api::recommendation_routes())
        .merge(api::health_routes())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::very_permissive())
        .with_state(state)
}

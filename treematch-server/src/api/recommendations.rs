//! Provider-backed soil endpoints
//!
//! - GET /soil_measurements/get_soil_property: raw provider passthrough
//! - GET /soil_measurements/recommendation: classify a value, or build a report
//! - GET /soil_measurements/thresholds: the threshold table

use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use treematch_common::thresholds::{self, Band, PropertyThresholds, THRESHOLD_TABLE};

use crate::services::{Report, DEFAULT_REPORT_PROPERTIES};
use crate::{ApiError, ApiResult, AppState};

/// Query for GET /soil_measurements/get_soil_property
#[derive(Debug, Default, Deserialize)]
pub struct SoilPropertyQuery {
    pub latitude: Option<String>,
    pub longitude: Option<String>,
    pub property_name: Option<String>,
    pub depth: Option<String>,
}

/// GET /soil_measurements/get_soil_property
///
/// Returns the provider's JSON unchanged. Any provider failure answers `{}`.
pub async fn get_soil_property(
    State(state): State<AppState>,
    Query(query): Query<SoilPropertyQuery>,
) -> ApiResult<Json<serde_json::Value>> {
    let (Some(latitude), Some(longitude), Some(property_name), Some(depth)) = (
        query.latitude,
        query.longitude,
        query.property_name,
        query.depth,
    ) else {
        return Err(ApiError::BadRequest("Missing required parameters".to_string()));
    };

    let latitude = parse_coordinate("latitude", &latitude)?;
    let longitude = parse_coordinate("longitude", &longitude)?;

    match state
        .soil_source
        .fetch_raw(latitude, longitude, &property_name, &depth)
        .await
    {
        Ok(body) => Ok(Json(body)),
        Err(e) => {
            tracing::warn!(property = %property_name, error = %e, "Soil property passthrough failed");
            Ok(Json(serde_json::json!({})))
        }
    }
}

/// Query for GET /soil_measurements/recommendation
#[derive(Debug, Default, Deserialize)]
pub struct RecommendationQuery {
    pub latitude: Option<String>,
    pub longitude: Option<String>,
    pub property_name: Option<String>,
    pub value: Option<String>,
    /// Comma-separated property names for a report
    pub properties: Option<String>,
}

/// Direct classification of a caller-supplied value
#[derive(Debug, Serialize)]
pub struct DirectRecommendation {
    pub property_name: String,
    pub value: f64,
    pub band: Option<Band>,
    pub recommendation: String,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum RecommendationResponse {
    Direct(DirectRecommendation),
    Report(Report),
}

/// GET /soil_measurements/recommendation
///
/// With `property_name` and `value`, classifies that value without contacting
/// the provider. Otherwise builds a report for `properties` (or the default
/// set) at the coordinate.
pub async fn get_recommendation(
    State(state): State<AppState>,
    Query(query): Query<RecommendationQuery>,
) -> ApiResult<Json<RecommendationResponse>> {
    let latitude = required_coordinate("latitude", query.latitude.as_deref())?;
    let longitude = required_coordinate("longitude", query.longitude.as_deref())?;

    match (query.property_name, query.value) {
        (Some(property_name), Some(value)) => {
            let value: f64 = value.trim().parse().map_err(|_| {
                ApiError::BadRequest(format!("Invalid value: {}", value))
            })?;

            let classification = thresholds::classify(&property_name, value);
            Ok(Json(RecommendationResponse::Direct(DirectRecommendation {
                band: classification.band(),
                recommendation: classification.to_string(),
                property_name,
                value,
            })))
        }
        (None, None) => {
            let properties = parse_property_list(query.properties.as_deref());
            tracing::info!(latitude, longitude, properties = ?properties, "Building soil report");

            let report = state
                .engine
                .build_report(latitude, longitude, &properties)
                .await;
            Ok(Json(RecommendationResponse::Report(report)))
        }
        _ => Err(ApiError::BadRequest(
            "property_name and value must be given together".to_string(),
        )),
    }
}

/// GET /soil_measurements/thresholds
pub async fn get_thresholds() -> Json<&'static [PropertyThresholds]> {
    Json(THRESHOLD_TABLE)
}

fn required_coordinate(name: &str, raw: Option<&str>) -> ApiResult<f64> {
    match raw {
        Some(raw) => parse_coordinate(name, raw),
        None => Err(ApiError::BadRequest(format!("Missing required parameter: {}", name))),
    }
}

fn parse_coordinate(name: &str, raw: &str) -> ApiResult<f64> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| ApiError::BadRequest(format!("Invalid {}: {}", name, raw)))
}

/// Split `a,b,c` into names; empty or absent input gives the default set
fn parse_property_list(raw: Option<&str>) -> Vec<String> {
    let names: Vec<String> = raw
        .unwrap_or_default()
        .split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect();

    if names.is_empty() {
        DEFAULT_REPORT_PROPERTIES.iter().map(|s| s.to_string()).collect()
    } else {
        names
    }
}

pub fn recommendation_routes() -> Router<AppState> {
    Router::new()
        .route("/soil_measurements/get_soil_property", get(get_soil_property))
        .route("/soil_measurements/recommendation", get(get_recommendation))
        .route("/soil_measurements/thresholds", get(get_thresholds))
}

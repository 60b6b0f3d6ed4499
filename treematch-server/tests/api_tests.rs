//! Integration tests for treematch-server API endpoints
//!
//! Tests cover:
//! - Health and welcome endpoints
//! - CRUD for plants, invasive plants, soil properties, locations, measurements
//! - Direct classification and report recommendations
//! - Raw soil property passthrough
//!
//! The soil provider is replaced by an in-process stub.

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use serde_json::{json, Value};
use sqlx::{sqlite::SqlitePoolOptions, SqlitePool};
use std::collections::HashMap;
use std::sync::Arc;
use tower::util::ServiceExt; // for `oneshot` method
use treematch_server::services::{SoilApiError, SoilPropertySource};
use treematch_server::{build_router, AppState};

/// Stub provider: fixed values per property, listed properties fail
#[derive(Default)]
struct StubSoilSource {
    values: HashMap<String, f64>,
    failing: Vec<String>,
}

impl StubSoilSource {
    fn with_value(mut self, property_name: &str, value: f64) -> Self {
        self.values.insert(property_name.to_string(), value);
        self
    }

    fn failing(mut self, property_name: &str) -> Self {
        self.failing.push(property_name.to_string());
        self
    }
}

#[async_trait]
impl SoilPropertySource for StubSoilSource {
    async fn fetch_raw(
        &self,
        _latitude: f64,
        _longitude: f64,
        property_name: &str,
        depth: &str,
    ) -> Result<Value, SoilApiError> {
        if self.failing.iter().any(|p| p == property_name) {
            return Err(SoilApiError::ApiError(503, "unavailable".to_string()));
        }
        let entries = match self.values.get(property_name) {
            Some(value) => json!([{"value": {"value": value, "unit": null}, "depth": {"value": depth}}]),
            None => json!([]),
        };
        Ok(json!({"property": {property_name: entries}}))
    }

    async fn fetch_value(
        &self,
        _latitude: f64,
        _longitude: f64,
        property_name: &str,
    ) -> Result<Option<f64>, SoilApiError> {
        if self.failing.iter().any(|p| p == property_name) {
            return Err(SoilApiError::NetworkError("connection refused".to_string()));
        }
        Ok(self.values.get(property_name).copied())
    }
}

/// Test helper: In-memory database with schema
async fn setup_test_db() -> SqlitePool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("Should create in-memory database");
    treematch_common::db::init_schema(&pool)
        .await
        .expect("Should create schema");
    pool
}

async fn setup_app_with(source: StubSoilSource) -> axum::Router {
    let db = setup_test_db().await;
    build_router(AppState::new(db, Arc::new(source)))
}

async fn setup_app() -> axum::Router {
    setup_app_with(StubSoilSource::default()).await
}

fn test_request(method: &str, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

/// Test helper: Extract JSON body from response
async fn extract_json(body: Body) -> Value {
    let bytes = axum::body::to_bytes(body, usize::MAX)
        .await
        .expect("Should read body");
    serde_json::from_slice(&bytes).expect("Should parse JSON")
}

/// Send a request and return status plus parsed body (Null for empty bodies)
async fn send(app: &axum::Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Should read body");
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("Should parse JSON")
    };
    (status, body)
}

// =============================================================================
// Health / welcome
// =============================================================================

#[tokio::test]
async fn test_health_endpoint() {
    let app = setup_app().await;

    let response = app.oneshot(test_request("GET", "/health")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = extract_json(response.into_body()).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["module"], "treematch-server");
    assert!(body["version"].is_string());
    assert!(body["uptime_seconds"].is_u64());
}

#[tokio::test]
async fn test_welcome() {
    let app = setup_app().await;
    let (status, body) = send(&app, test_request("GET", "/plants/welcome")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"message": "Hello, Welcome to TreeMatch!"}));
}

// =============================================================================
// Plants
// =============================================================================

#[tokio::test]
async fn test_plant_crud_flow() {
    let app = setup_app().await;

    let (status, created) = send(
        &app,
        json_request(
            "POST",
            "/plants/plants",
            json!({"title": "Grevillea", "description": "Shade tree"}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let id = created["id"].as_i64().unwrap();
    assert_eq!(created["title"], "Grevillea");

    let (status, list) = send(&app, test_request("GET", "/plants/plants")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(list.as_array().unwrap().len(), 1);

    // Omitted fields keep their stored values
    let (status, updated) = send(
        &app,
        json_request("PUT", &format!("/plants/plant/{}", id), json!({"description": "Windbreak"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["title"], "Grevillea");
    assert_eq!(updated["description"], "Windbreak");

    let (status, body) = send(&app, test_request("DELETE", &format!("/plants/plant/{}", id))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Plant Grevillea deleted successfully");

    let (status, body) = send(&app, test_request("GET", &format!("/plants/plant/{}", id))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["code"], "NOT_FOUND");
}

#[tokio::test]
async fn test_plant_create_missing_field() {
    let app = setup_app().await;
    let (status, body) = send(
        &app,
        json_request("POST", "/plants/plants", json!({"title": "Grevillea"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "BAD_REQUEST");
}

#[tokio::test]
async fn test_missing_plant_update_and_delete() {
    let app = setup_app().await;

    let (status, _) = send(
        &app,
        json_request("PUT", "/plants/plant/42", json!({"title": "x"})),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, test_request("DELETE", "/plants/plant/42")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

// =============================================================================
// Invasive plants
// =============================================================================

#[tokio::test]
async fn test_invasive_plant_flow() {
    let app = setup_app().await;

    let (status, created) = send(
        &app,
        json_request(
            "POST",
            "/invasive_plants/invasive_plants",
            json!({
                "common_name": "Lantana",
                "scientific_name": "Lantana camara",
                "category": "1b"
            }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let id = created["id"].as_i64().unwrap();

    let (status, fetched) = send(&app, test_request("GET", &format!("/invasive_plants/{}", id))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["scientific_name"], "Lantana camara");

    let (status, body) = send(&app, test_request("DELETE", &format!("/invasive_plants/{}", id))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Invasive Plant Lantana deleted successfully");

    let (status, _) = send(
        &app,
        json_request(
            "POST",
            "/invasive_plants/invasive_plants",
            json!({"common_name": "Lantana"}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

// =============================================================================
// Soil catalog: properties, locations, measurements
// =============================================================================

async fn create_property_and_location(app: &axum::Router) -> (i64, i64) {
    let (status, property) = send(
        app,
        json_request(
            "POST",
            "/soil_properties/soil_properties",
            json!({
                "property_name": "ph",
                "description": "Soil pH",
                "theme": "chemical",
                "unit": "",
                "uncertainty": true,
                "value_type": "float"
            }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, location) = send(
        app,
        json_request(
            "POST",
            "/soil_locations/locations",
            json!({"name": "Nairobi", "latitude": -1.2921, "longitude": 36.8219}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    (
        property["id"].as_i64().unwrap(),
        location["id"].as_i64().unwrap(),
    )
}

#[tokio::test]
async fn test_soil_property_flow() {
    let app = setup_app().await;
    let (property_id, _) = create_property_and_location(&app).await;

    let (status, updated) = send(
        &app,
        json_request(
            "PUT",
            &format!("/soil_properties/{}", property_id),
            json!({"uncertainty": false}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["uncertainty"], false);
    assert_eq!(updated["property_name"], "ph");

    let (status, body) = send(
        &app,
        test_request("DELETE", &format!("/soil_properties/{}", property_id)),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Soil Property ph deleted successfully");
}

#[tokio::test]
async fn test_location_delete_returns_no_content() {
    let app = setup_app().await;
    let (_, location_id) = create_property_and_location(&app).await;

    let (status, body) = send(
        &app,
        test_request("DELETE", &format!("/soil_locations/{}", location_id)),
    )
    .await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert_eq!(body, Value::Null);

    let (status, _) = send(
        &app,
        test_request("DELETE", &format!("/soil_locations/{}", location_id)),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_measurement_flow() {
    let app = setup_app().await;
    let (property_id, location_id) = create_property_and_location(&app).await;

    let (status, created) = send(
        &app,
        json_request(
            "POST",
            "/soil_measurements/soil_measurements",
            json!({
                "property_id": property_id,
                "location_id": location_id,
                "value": 6.1,
                "depth": "0-20",
                "uncertainty_50": "5.9-6.3"
            }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let id = created["id"].as_i64().unwrap();
    assert_eq!(created["value"], 6.1);
    assert_eq!(created["uncertainty_68"], Value::Null);

    let (status, list) = send(&app, test_request("GET", "/soil_measurements/soil_measurements")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(list.as_array().unwrap().len(), 1);

    let (status, body) = send(
        &app,
        test_request("DELETE", &format!("/soil_measurements/{}", id)),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], format!("Soil Measurement {} deleted successfully", id));
}

#[tokio::test]
async fn test_measurement_unknown_reference_is_bad_request() {
    let app = setup_app().await;

    let (status, body) = send(
        &app,
        json_request(
            "POST",
            "/soil_measurements/soil_measurements",
            json!({"property_id": 99, "location_id": 98, "value": 1.0, "depth": "0-20"}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["error"]["message"],
        "Soil property or location reference is invalid or still in use"
    );
}

#[tokio::test]
async fn test_referenced_location_cannot_be_deleted() {
    let app = setup_app().await;
    let (property_id, location_id) = create_property_and_location(&app).await;

    let (status, _) = send(
        &app,
        json_request(
            "POST",
            "/soil_measurements/soil_measurements",
            json!({
                "property_id": property_id,
                "location_id": location_id,
                "value": 1.3,
                "depth": "0-20"
            }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, _) = send(
        &app,
        test_request("DELETE", &format!("/soil_locations/{}", location_id)),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

// =============================================================================
// Recommendations
// =============================================================================

#[tokio::test]
async fn test_direct_recommendation() {
    let app = setup_app().await;

    let (status, body) = send(
        &app,
        test_request(
            "GET",
            "/soil_measurements/recommendation?latitude=-1.28&longitude=36.82&property_name=ph&value=5.5",
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["property_name"], "ph");
    assert_eq!(body["value"], 5.5);
    assert_eq!(body["band"], "low");
    assert_eq!(body["recommendation"], "Low pH (acidic soil). Apply lime to raise pH.");
}

#[tokio::test]
async fn test_direct_recommendation_unknown_and_out_of_range() {
    let app = setup_app().await;

    let (_, body) = send(
        &app,
        test_request(
            "GET",
            "/soil_measurements/recommendation?latitude=0&longitude=0&property_name=ph&value=20",
        ),
    )
    .await;
    assert_eq!(body["recommendation"], "Value 20 is out of range for ph");
    assert_eq!(body["band"], Value::Null);

    let (_, body) = send(
        &app,
        test_request(
            "GET",
            "/soil_measurements/recommendation?latitude=0&longitude=0&property_name=salinity&value=1",
        ),
    )
    .await;
    assert_eq!(body["recommendation"], "No thresholds defined for salinity");
}

#[tokio::test]
async fn test_recommendation_parameter_errors() {
    let app = setup_app().await;

    for uri in [
        "/soil_measurements/recommendation?latitude=1&longitude=2&value=5",
        "/soil_measurements/recommendation?latitude=1&longitude=2&property_name=ph",
        "/soil_measurements/recommendation?longitude=2",
        "/soil_measurements/recommendation?latitude=abc&longitude=2",
        "/soil_measurements/recommendation?latitude=1&longitude=2&property_name=ph&value=high",
    ] {
        let (status, _) = send(&app, test_request("GET", uri)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{}", uri);
    }
}

#[tokio::test]
async fn test_default_report() {
    let app = setup_app_with(
        StubSoilSource::default()
            .with_value("ph", 6.5)
            .with_value("bulk_density", 1.6),
    )
    .await;

    let (status, body) = send(
        &app,
        test_request("GET", "/soil_measurements/recommendation?latitude=-1.28&longitude=36.82"),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({
            "ph": {
                "value": 6.5,
                "recommendation": "Ideal pH range for most crops."
            },
            "bulk_density": {
                "value": 1.6,
                "recommendation": "High bulk density. Aerate soil and add organic matter to alleviate compaction."
            }
        })
    );
}

#[tokio::test]
async fn test_report_with_failing_property() {
    let app = setup_app_with(
        StubSoilSource::default()
            .with_value("ph", 7.5)
            .failing("clay_content"),
    )
    .await;

    let (status, body) = send(
        &app,
        test_request(
            "GET",
            "/soil_measurements/recommendation?latitude=1&longitude=2&properties=clay_content,ph,sand_content",
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let object = body.as_object().unwrap();
    assert_eq!(object.len(), 3);
    assert_eq!(body["clay_content"], json!({"value": null, "recommendation": null}));
    assert_eq!(body["sand_content"], json!({"value": null, "recommendation": null}));
    assert_eq!(body["ph"]["value"], 7.5);
}

#[tokio::test]
async fn test_thresholds_endpoint() {
    let app = setup_app().await;
    let (status, body) = send(&app, test_request("GET", "/soil_measurements/thresholds")).await;
    assert_eq!(status, StatusCode::OK);

    let table = body.as_array().unwrap();
    assert_eq!(table.len(), 9);
    assert_eq!(table[0]["property_name"], "ph");
    assert_eq!(table[0]["low"], json!({"min": 0.0, "max": 5.5}));
}

// =============================================================================
// Raw passthrough
// =============================================================================

#[tokio::test]
async fn test_get_soil_property_passthrough() {
    let app = setup_app_with(StubSoilSource::default().with_value("ph", 6.2)).await;

    let (status, body) = send(
        &app,
        test_request(
            "GET",
            "/soil_measurements/get_soil_property?latitude=-1.28&longitude=36.82&property_name=ph&depth=20-50",
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["property"]["ph"][0]["value"]["value"], 6.2);
    assert_eq!(body["property"]["ph"][0]["depth"]["value"], "20-50");
}

#[tokio::test]
async fn test_get_soil_property_failure_is_empty_object() {
    let app = setup_app_with(StubSoilSource::default().failing("ph")).await;

    let (status, body) = send(
        &app,
        test_request(
            "GET",
            "/soil_measurements/get_soil_property?latitude=1&longitude=2&property_name=ph&depth=0-20",
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({}));
}

#[tokio::test]
async fn test_get_soil_property_missing_parameter() {
    let app = setup_app().await;

    let (status, body) = send(
        &app,
        test_request(
            "GET",
            "/soil_measurements/get_soil_property?latitude=1&longitude=2&property_name=ph",
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["message"], "Missing required parameters");
}

//! Soil measurement database operations
//!
//! `property_id` and `location_id` reference `soil_properties` and
//! `locations`; SQLite enforces them, and a dangling id surfaces as a
//! foreign key violation from create/update.

use sqlx::SqlitePool;
use treematch_common::db::SoilMeasurement;
use treematch_common::Result;

const COLUMNS: &str =
    "id, property_id, location_id, value, depth, uncertainty_50, uncertainty_68, uncertainty_90";

#[derive(Debug, Clone)]
pub struct NewSoilMeasurement {
    pub property_id: i64,
    pub location_id: i64,
    pub value: f64,
    pub depth: String,
    pub uncertainty_50: Option<String>,
    pub uncertainty_68: Option<String>,
    pub uncertainty_90: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct SoilMeasurementUpdate {
    pub property_id: Option<i64>,
    pub location_id: Option<i64>,
    pub value: Option<f64>,
    pub depth: Option<String>,
    pub uncertainty_50: Option<String>,
    pub uncertainty_68: Option<String>,
    pub uncertainty_90: Option<String>,
}

pub async fn list_measurements(pool: &SqlitePool) -> Result<Vec<SoilMeasurement>> {
    let rows = sqlx::query_as::<_, SoilMeasurement>(&format!(
        "SELECT {} FROM soil_measurements ORDER BY id",
        COLUMNS
    ))
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

pub async fn get_measurement(pool: &SqlitePool, id: i64) -> Result<Option<SoilMeasurement>> {
    let row = sqlx::query_as::<_, SoilMeasurement>(&format!(
        "SELECT {} FROM soil_measurements WHERE id = ?",
        COLUMNS
    ))
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(row)
}

pub async fn create_measurement(
    pool: &SqlitePool,
    measurement: &NewSoilMeasurement,
) -> Result<SoilMeasurement> {
    let created = sqlx::query_as::<_, SoilMeasurement>(&format!(
        r#"
        INSERT INTO soil_measurements
            (property_id, location_id, value, depth, uncertainty_50, uncertainty_68, uncertainty_90)
        VALUES (?, ?, ?, ?, ?, ?, ?)
        RETURNING {}
        "#,
        COLUMNS
    ))
    .bind(measurement.property_id)
    .bind(measurement.location_id)
    .bind(measurement.value)
    .bind(&measurement.depth)
    .bind(&measurement.uncertainty_50)
    .bind(&measurement.uncertainty_68)
    .bind(&measurement.uncertainty_90)
    .fetch_one(pool)
    .await?;

    Ok(created)
}

pub async fn update_measurement(
    pool: &SqlitePool,
    id: i64,
    update: &SoilMeasurementUpdate,
) -> Result<Option<SoilMeasurement>> {
    let updated = sqlx::query_as::<_, SoilMeasurement>(&format!(
        r#"
        UPDATE soil_measurements SET
            property_id = COALESCE(?, property_id),
            location_id = COALESCE(?, location_id),
            value = COALESCE(?, value),
            depth = COALESCE(?, depth),
            uncertainty_50 = COALESCE(?, uncertainty_50),
            uncertainty_68 = COALESCE(?, uncertainty_68),
            uncertainty_90 = COALESCE(?, uncertainty_90)
        WHERE id = ?
        RETURNING {}
        "#,
        COLUMNS
    ))
    .bind(update.property_id)
    .bind(update.location_id)
    .bind(update.value)
    .bind(&update.depth)
    .bind(&update.uncertainty_50)
    .bind(&update.uncertainty_68)
    .bind(&update.uncertainty_90)
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(updated)
}

pub async fn delete_measurement(pool: &SqlitePool, id: i64) -> Result<Option<SoilMeasurement>> {
    let deleted = sqlx::query_as::<_, SoilMeasurement>(&format!(
        "DELETE FROM soil_measurements WHERE id = ? RETURNING {}",
        COLUMNS
    ))
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(deleted)
}

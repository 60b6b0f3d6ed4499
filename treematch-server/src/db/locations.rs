//! Soil location database operations

use sqlx::SqlitePool;
use treematch_common::db::SoilLocation;
use treematch_common::Result;

#[derive(Debug, Clone)]
pub struct NewSoilLocation {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Debug, Clone, Default)]
pub struct SoilLocationUpdate {
    pub name: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

pub async fn list_locations(pool: &SqlitePool) -> Result<Vec<SoilLocation>> {
    let rows = sqlx::query_as::<_, SoilLocation>(
        "SELECT id, name, latitude, longitude FROM locations ORDER BY id",
    )
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

pub async fn get_location(pool: &SqlitePool, id: i64) -> Result<Option<SoilLocation>> {
    let row = sqlx::query_as::<_, SoilLocation>(
        "SELECT id, name, latitude, longitude FROM locations WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(row)
}

pub async fn create_location(pool: &SqlitePool, location: &NewSoilLocation) -> Result<SoilLocation> {
    let created = sqlx::query_as::<_, SoilLocation>(
        r#"
        INSERT INTO locations (name, latitude, longitude)
        VALUES (?, ?, ?)
        RETURNING id, name, latitude, longitude
        "#,
    )
    .bind(&location.name)
    .bind(location.latitude)
    .bind(location.longitude)
    .fetch_one(pool)
    .await?;

    Ok(created)
}

pub async fn update_location(
    pool: &SqlitePool,
    id: i64,
    update: &SoilLocationUpdate,
) -> Result<Option<SoilLocation>> {
    let updated = sqlx::query_as::<_, SoilLocation>(
        r#"
        UPDATE locations SET
            name = COALESCE(?, name),
            latitude = COALESCE(?, latitude),
            longitude = COALESCE(?, longitude)
        WHERE id = ?
        RETURNING id, name, latitude, longitude
        "#,
    )
    .bind(&update.name)
    .bind(update.latitude)
    .bind(update.longitude)
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(updated)
}

pub async fn delete_location(pool: &SqlitePool, id: i64) -> Result<bool> {
    let result = sqlx::query("DELETE FROM locations WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}

//! Soil property catalog database operations

use sqlx::SqlitePool;
use treematch_common::db::SoilProperty;
use treematch_common::Result;

const COLUMNS: &str = "id, property_name, description, theme, unit, uncertainty, value_type";

#[derive(Debug, Clone)]
pub struct NewSoilProperty {
    pub property_name: String,
    pub description: String,
    pub theme: String,
    pub unit: String,
    pub uncertainty: bool,
    pub value_type: String,
}

#[derive(Debug, Clone, Default)]
pub struct SoilPropertyUpdate {
    pub property_name: Option<String>,
    pub description: Option<String>,
    pub theme: Option<String>,
    pub unit: Option<String>,
    pub uncertainty: Option<bool>,
    pub value_type: Option<String>,
}

pub async fn list_soil_properties(pool: &SqlitePool) -> Result<Vec<SoilProperty>> {
    let rows = sqlx::query_as::<_, SoilProperty>(&format!(
        "SELECT {} FROM soil_properties ORDER BY id",
        COLUMNS
    ))
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

pub async fn get_soil_property(pool: &SqlitePool, id: i64) -> Result<Option<SoilProperty>> {
    let row = sqlx::query_as::<_, SoilProperty>(&format!(
        "SELECT {} FROM soil_properties WHERE id = ?",
        COLUMNS
    ))
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(row)
}

pub async fn create_soil_property(
    pool: &SqlitePool,
    property: &NewSoilProperty,
) -> Result<SoilProperty> {
    let created = sqlx::query_as::<_, SoilProperty>(&format!(
        r#"
        INSERT INTO soil_properties (property_name, description, theme, unit, uncertainty, value_type)
        VALUES (?, ?, ?, ?, ?, ?)
        RETURNING {}
        "#,
        COLUMNS
    ))
    .bind(&property.property_name)
    .bind(&property.description)
    .bind(&property.theme)
    .bind(&property.unit)
    .bind(property.uncertainty)
    .bind(&property.value_type)
    .fetch_one(pool)
    .await?;

    Ok(created)
}

pub async fn update_soil_property(
    pool: &SqlitePool,
    id: i64,
    update: &SoilPropertyUpdate,
) -> Result<Option<SoilProperty>> {
    let updated = sqlx::query_as::<_, SoilProperty>(&format!(
        r#"
        UPDATE soil_properties SET
            property_name = COALESCE(?, property_name),
            description = COALESCE(?, description),
            theme = COALESCE(?, theme),
            unit = COALESCE(?, unit),
            uncertainty = COALESCE(?, uncertainty),
            value_type = COALESCE(?, value_type)
        WHERE id = ?
        RETURNING {}
        "#,
        COLUMNS
    ))
    .bind(&update.property_name)
    .bind(&update.description)
    .bind(&update.theme)
    .bind(&update.unit)
    .bind(update.uncertainty)
    .bind(&update.value_type)
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(updated)
}

pub async fn delete_soil_property(pool: &SqlitePool, id: i64) -> Result<Option<SoilProperty>> {
    let deleted = sqlx::query_as::<_, SoilProperty>(&format!(
        "DELETE FROM soil_properties WHERE id = ? RETURNING {}",
        COLUMNS
    ))
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(deleted)
}

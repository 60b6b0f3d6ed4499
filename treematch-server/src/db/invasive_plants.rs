//! Invasive plant database operations

use sqlx::SqlitePool;
use treematch_common::db::InvasivePlant;
use treematch_common::Result;

const COLUMNS: &str = "id, common_name, scientific_name, category";

#[derive(Debug, Clone)]
pub struct NewInvasivePlant {
    pub common_name: String,
    pub scientific_name: String,
    pub category: String,
}

#[derive(Debug, Clone, Default)]
pub struct InvasivePlantUpdate {
    pub common_name: Option<String>,
    pub scientific_name: Option<String>,
    pub category: Option<String>,
}

pub async fn list_invasive_plants(pool: &SqlitePool) -> Result<Vec<InvasivePlant>> {
    let rows = sqlx::query_as::<_, InvasivePlant>(&format!(
        "SELECT {} FROM invasive_plants ORDER BY id",
        COLUMNS
    ))
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

pub async fn get_invasive_plant(pool: &SqlitePool, id: i64) -> Result<Option<InvasivePlant>> {
    let row = sqlx::query_as::<_, InvasivePlant>(&format!(
        "SELECT {} FROM invasive_plants WHERE id = ?",
        COLUMNS
    ))
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(row)
}

pub async fn create_invasive_plant(
    pool: &SqlitePool,
    plant: &NewInvasivePlant,
) -> Result<InvasivePlant> {
    let created = sqlx::query_as::<_, InvasivePlant>(&format!(
        r#"
        INSERT INTO invasive_plants (common_name, scientific_name, category)
        VALUES (?, ?, ?)
        RETURNING {}
        "#,
        COLUMNS
    ))
    .bind(&plant.common_name)
    .bind(&plant.scientific_name)
    .bind(&plant.category)
    .fetch_one(pool)
    .await?;

    Ok(created)
}

pub async fn update_invasive_plant(
    pool: &SqlitePool,
    id: i64,
    update: &InvasivePlantUpdate,
) -> Result<Option<InvasivePlant>> {
    let updated = sqlx::query_as::<_, InvasivePlant>(&format!(
        r#"
        UPDATE invasive_plants SET
            common_name = COALESCE(?, common_name),
            scientific_name = COALESCE(?, scientific_name),
            category = COALESCE(?, category)
        WHERE id = ?
        RETURNING {}
        "#,
        COLUMNS
    ))
    .bind(&update.common_name)
    .bind(&update.scientific_name)
    .bind(&update.category)
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(updated)
}

pub async fn delete_invasive_plant(pool: &SqlitePool, id: i64) -> Result<Option<InvasivePlant>> {
    let deleted = sqlx::query_as::<_, InvasivePlant>(&format!(
        "DELETE FROM invasive_plants WHERE id = ? RETURNING {}",
        COLUMNS
    ))
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(deleted)
}

//! Plant database operations

use sqlx::SqlitePool;
use treematch_common::db::Plant;
use treematch_common::Result;

#[derive(Debug, Clone)]
pub struct NewPlant {
    pub title: String,
    pub description: String,
}

/// Fields to change; `None` keeps the stored value
#[derive(Debug, Clone, Default)]
pub struct PlantUpdate {
    pub title: Option<String>,
    pub description: Option<String>,
}

pub async fn list_plants(pool: &SqlitePool) -> Result<Vec<Plant>> {
    let plants = sqlx::query_as::<_, Plant>("SELECT id, title, description FROM plants ORDER BY id")
        .fetch_all(pool)
        .await?;

    Ok(plants)
}

pub async fn get_plant(pool: &SqlitePool, id: i64) -> Result<Option<Plant>> {
    let plant = sqlx::query_as::<_, Plant>("SELECT id, title, description FROM plants WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await?;

    Ok(plant)
}

pub async fn create_plant(pool: &SqlitePool, plant: &NewPlant) -> Result<Plant> {
    let created = sqlx::query_as::<_, Plant>(
        r#"
        INSERT INTO plants (title, description)
        VALUES (?, ?)
        RETURNING id, title, description
        "#,
    )
    .bind(&plant.title)
    .bind(&plant.description)
    .fetch_one(pool)
    .await?;

    Ok(created)
}

pub async fn update_plant(pool: &SqlitePool, id: i64, update: &PlantUpdate) -> Result<Option<Plant>> {
    let updated = sqlx::query_as::<_, Plant>(
        r#"
        UPDATE plants SET
            title = COALESCE(?, title),
            description = COALESCE(?, description)
        WHERE id = ?
        RETURNING id, title, description
        "#,
    )
    .bind(&update.title)
    .bind(&update.description)
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(updated)
}

/// Delete a plant, returning the removed row
pub async fn delete_plant(pool: &SqlitePool, id: i64) -> Result<Option<Plant>> {
    let deleted = sqlx::query_as::<_, Plant>(
        "DELETE FROM plants WHERE id = ? RETURNING id, title, description",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(deleted)
}

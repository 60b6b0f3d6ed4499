//! Database initialization tests

use treematch_common::db::init::init_database;

async fn table_names(pool: &sqlx::SqlitePool) -> Vec<String> {
    sqlx::query_scalar(
        "SELECT name FROM sqlite_master WHERE type = 'table' AND name NOT LIKE 'sqlite_%' ORDER BY name",
    )
    .fetch_all(pool)
    .await
    .unwrap()
}

#[tokio::test]
async fn test_database_creation_when_missing() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("data").join("treematch.db");

    let result = init_database(&db_path).await;
    assert!(result.is_ok(), "Database initialization failed: {:?}", result.err());
    assert!(db_path.exists(), "Database file was not created");
}

#[tokio::test]
async fn test_all_tables_created() {
    let dir = tempfile::tempdir().unwrap();
    let pool = init_database(&dir.path().join("treematch.db")).await.unwrap();

    let tables = table_names(&pool).await;
    for expected in [
        "invasive_plants",
        "locations",
        "plants",
        "soil_measurements",
        "soil_properties",
    ] {
        assert!(tables.iter().any(|t| t == expected), "Should have table: {}", expected);
    }
}

#[tokio::test]
async fn test_reopening_existing_database_keeps_rows() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("treematch.db");

    let pool = init_database(&db_path).await.unwrap();
    sqlx::query("INSERT INTO plants (title, description) VALUES ('Baobab', 'Large tree')")
        .execute(&pool)
        .await
        .unwrap();
    pool.close().await;

    let reopened = init_database(&db_path).await.unwrap();
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM plants")
        .fetch_one(&reopened)
        .await
        .unwrap();
    assert_eq!(count, 1);
}

#[tokio::test]
async fn test_measurement_foreign_keys_enforced() {
    let dir = tempfile::tempdir().unwrap();
    let pool = init_database(&dir.path().join("treematch.db")).await.unwrap();

    let result = sqlx::query(
        "INSERT INTO soil_measurements (value, depth, property_id, location_id) VALUES (6.1, '0-20', 42, 42)",
    )
    .execute(&pool)
    .await;

    let err = treematch_common::Error::from(result.unwrap_err());
    assert!(err.is_foreign_key_violation(), "unexpected error: {}", err);
}

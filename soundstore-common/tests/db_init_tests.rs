//! Integration tests for file-backed database initialization

use soundstore_common::config::database_path;
use soundstore_common::db::init::init_database;
use tempfile::TempDir;

#[tokio::test]
async fn test_database_creation_when_missing() {
    let dir = TempDir::new().unwrap();
    // Nested root folder that does not exist yet
    let db_path = database_path(&dir.path().join("nested").join("root"));

    let result = init_database(&db_path).await;

    assert!(result.is_ok(), "Database initialization failed: {:?}", result.err());
    assert!(db_path.exists(), "Database file was not created");
}

#[tokio::test]
async fn test_database_opens_existing_and_keeps_rows() {
    let dir = TempDir::new().unwrap();
    let db_path = database_path(dir.path());

    let pool = init_database(&db_path).await.unwrap();
    sqlx::query("INSERT INTO tags (label) VALUES ('ambient')")
        .execute(&pool)
        .await
        .unwrap();
    pool.close().await;

    // Second open must not recreate or wipe tables
    let pool = init_database(&db_path).await.unwrap();
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM tags")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(count, 1);
}

#[tokio::test]
async fn test_file_database_uses_wal_and_foreign_keys() {
    let dir = TempDir::new().unwrap();
    let pool = init_database(&database_path(dir.path())).await.unwrap();

    let mode: String = sqlx::query_scalar("PRAGMA journal_mode")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(mode.to_lowercase(), "wal");

    let fk: i64 = sqlx::query_scalar("PRAGMA foreign_keys")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(fk, 1);
}

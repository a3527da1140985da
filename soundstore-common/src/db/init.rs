//! Database initialization
//!
//! Creates the catalog schema on first run and opens existing databases
//! without touching their contents. All table creation is idempotent.

use crate::Result;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info};

/// Busy timeout applied to every connection (milliseconds)
pub const BUSY_TIMEOUT_MS: u64 = 5000;

/// Per-connection settings shared by file and in-memory databases
///
/// PRAGMAs issued through a pool only reach one connection, so foreign keys
/// and the busy timeout are set on the connect options instead.
fn base_options() -> SqliteConnectOptions {
    SqliteConnectOptions::new()
        .foreign_keys(true)
        .busy_timeout(Duration::from_millis(BUSY_TIMEOUT_MS))
}

/// Initialize database connection and create tables if needed
pub async fn init_database(db_path: &Path) -> Result<SqlitePool> {
    let newly_created = !db_path.exists();

    // Create parent directory if it doesn't exist
    if let Some(parent) = db_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    // WAL allows concurrent readers with one writer
    let options = base_options()
        .filename(db_path)
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Wal);

    let pool = SqlitePoolOptions::new()
        .max_connections(10)
        .connect_with(options)
        .await?;

    if newly_created {
        info!("Initialized new database: {}", db_path.display());
    } else {
        info!("Opened existing database: {}", db_path.display());
    }

    create_schema(&pool).await?;

    Ok(pool)
}

/// Initialize an in-memory database with the full schema
///
/// The pool is pinned to a single connection that never expires, since every
/// SQLite in-memory connection owns a separate database.
pub async fn init_memory_database() -> Result<SqlitePool> {
    let options = base_options().in_memory(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .min_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect_with(options)
        .await?;

    create_schema(&pool).await?;

    Ok(pool)
}

/// Create all catalog tables and indexes
pub async fn create_schema(pool: &SqlitePool) -> Result<()> {
    create_tags_table(pool).await?;
    create_sounds_table(pool).await?;

    // Linking tables
    create_sound_tags_table(pool).await?;

    debug!("Catalog schema ready");
    Ok(())
}

async fn create_tags_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS tags (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            label TEXT NOT NULL UNIQUE
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

async fn create_sounds_table(pool: &SqlitePool) -> Result<()> {
    // Implicit rowid is kept: it breaks rank ties in insertion order
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS sounds (
            id TEXT PRIMARY KEY,
            title TEXT NOT NULL,
            price REAL NOT NULL,
            uploaded_on TIMESTAMP NOT NULL,
            rank INTEGER NOT NULL DEFAULT 0
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_sounds_rank ON sounds(rank DESC)")
        .execute(pool)
        .await?;

    Ok(())
}

async fn create_sound_tags_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS sound_tags (
            sound_id TEXT NOT NULL REFERENCES sounds(id) ON DELETE CASCADE,
            tag_id INTEGER NOT NULL REFERENCES tags(id) ON DELETE RESTRICT,
            PRIMARY KEY (sound_id, tag_id)
        )
        "#,
    )
    .execute(pool)
    .await?;

    // Reverse lookup for the all-tags filter
    sqlx::query("CREATE INDEX IF NOT EXISTS idx_sound_tags_tag ON sound_tags(tag_id)")
        .execute(pool)
        .await?;

    Ok(())
}

//! Catalog persistence
//!
//! Write-side statements and entity loads. Functions take a
//! `&mut SqliteConnection` so the service can run them inside one
//! transaction; read projections live in `query`.

use sqlx::{Sqlite, SqlitePool, Transaction};

pub mod sounds;
pub mod tags;

/// Begin a transaction that takes the write lock up front
///
/// Deferred transactions that read before writing fail with BUSY once
/// another writer commits in between; `BEGIN IMMEDIATE` waits on
/// `busy_timeout` instead.
pub async fn begin_write(pool: &SqlitePool) -> Result<Transaction<'static, Sqlite>, sqlx::Error> {
    pool.begin_with("BEGIN IMMEDIATE").await
}

#[cfg(test)]
mod tests {
    use super::*;
    use soundstore_common::db::init_memory_database;

    #[tokio::test]
    async fn test_begin_write_commits_and_rolls_back() {
        let pool = init_memory_database().await.unwrap();

        let mut tx = begin_write(&pool).await.unwrap();
        tags::insert_tag(&mut tx, "kept").await.unwrap();
        tx.commit().await.unwrap();

        let mut tx = begin_write(&pool).await.unwrap();
        tags::insert_tag(&mut tx, "dropped").await.unwrap();
        tx.rollback().await.unwrap();

        let labels: Vec<String> = tags::list_tags(&pool)
            .await
            .unwrap()
            .into_iter()
            .map(|t| t.label)
            .collect();
        assert_eq!(labels, vec!["kept"]);
    }
}

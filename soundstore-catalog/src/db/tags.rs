//! Tag database operations

use sqlx::{SqliteConnection, SqlitePool};
use uuid::Uuid;

use crate::models::{Tag, TagId};

/// Load one tag; `None` when absent
pub async fn find_tag(conn: &mut SqliteConnection, id: TagId) -> Result<Option<Tag>, sqlx::Error> {
    sqlx::query_as::<_, Tag>("SELECT id, label FROM tags WHERE id = ?")
        .bind(id)
        .fetch_optional(conn)
        .await
}

/// All tags ordered by id
pub async fn list_tags(pool: &SqlitePool) -> Result<Vec<Tag>, sqlx::Error> {
    sqlx::query_as::<_, Tag>("SELECT id, label FROM tags ORDER BY id")
        .fetch_all(pool)
        .await
}

/// Insert a tag; the store assigns the id
///
/// A duplicate label surfaces as a unique-violation database error.
pub async fn insert_tag(conn: &mut SqliteConnection, label: &str) -> Result<Tag, sqlx::Error> {
    let result = sqlx::query("INSERT INTO tags (label) VALUES (?)")
        .bind(label)
        .execute(conn)
        .await?;

    Ok(Tag {
        id: result.last_insert_rowid(),
        label: label.to_string(),
    })
}

/// Tags attached to a sound, ordered by id
pub async fn tags_for_sound(
    conn: &mut SqliteConnection,
    sound_id: Uuid,
) -> Result<Vec<Tag>, sqlx::Error> {
    sqlx::query_as::<_, Tag>(
        r#"
        SELECT t.id, t.label
        FROM tags t
        JOIN sound_tags st ON st.tag_id = t.id
        WHERE st.sound_id = ?
        ORDER BY t.id
        "#,
    )
    .bind(sound_id.to_string())
    .fetch_all(conn)
    .await
}

//! Sound database operations
//!
//! Statements are generated from the mapping profiles, so the column list
//! of every insert/update matches the field table.

use sqlx::{QueryBuilder, Sqlite, SqliteConnection};
use uuid::Uuid;

use crate::db::tags::tags_for_sound;
use crate::mapping::{self, FieldSource, STORE_PROFILE, UPDATE_PROFILE};
use crate::models::{Sound, Tag};
use crate::query::SoundQuery;

/// Load the full entity (scalars + tag set); `None` when absent
pub async fn load_sound(conn: &mut SqliteConnection, id: Uuid) -> Result<Option<Sound>, sqlx::Error> {
    let mut qb = SoundQuery::new().id(id).build(&STORE_PROFILE);
    let row = qb.build().fetch_optional(&mut *conn).await?;

    let Some(row) = row else {
        return Ok(None);
    };

    let mut sound: Sound = mapping::decode_row(&STORE_PROFILE, &row)?;
    sound.tags = tags_for_sound(conn, id).await?;
    Ok(Some(sound))
}

/// Insert the sound row and one association row per tag
pub async fn insert_sound(conn: &mut SqliteConnection, sound: &Sound) -> Result<(), sqlx::Error> {
    let mut qb: QueryBuilder<'_, Sqlite> = QueryBuilder::new("INSERT INTO sounds (");
    let mut columns = qb.separated(", ");
    for field in STORE_PROFILE.fields() {
        columns.push(field.column());
    }
    qb.push(") VALUES (");

    let mut first = true;
    for field in STORE_PROFILE.fields() {
        if let Some(value) = sound.value(field) {
            if !first {
                qb.push(", ");
            }
            first = false;
            mapping::push_bind_value(&mut qb, value);
        }
    }
    qb.push(")");
    qb.build().execute(&mut *conn).await?;

    attach_tags(conn, sound.id, &sound.tags).await
}

async fn attach_tags(conn: &mut SqliteConnection, sound_id: Uuid, tags: &[Tag]) -> Result<(), sqlx::Error> {
    for tag in tags {
        sqlx::query("INSERT INTO sound_tags (sound_id, tag_id) VALUES (?, ?)")
            .bind(sound_id.to_string())
            .bind(tag.id)
            .execute(&mut *conn)
            .await?;
    }
    Ok(())
}

/// Write the update profile's fields of an already-loaded entity
///
/// Returns false when no row matched.
pub async fn update_sound(conn: &mut SqliteConnection, sound: &Sound) -> Result<bool, sqlx::Error> {
    let mut qb: QueryBuilder<'_, Sqlite> = QueryBuilder::new("UPDATE sounds SET ");

    let mut first = true;
    for field in UPDATE_PROFILE.fields() {
        let Some(value) = sound.value(field) else {
            continue;
        };
        if !first {
            qb.push(", ");
        }
        first = false;
        qb.push(field.column()).push(" = ");
        mapping::push_bind_value(&mut qb, value);
    }

    qb.push(" WHERE id = ").push_bind(sound.id.to_string());
    let result = qb.build().execute(conn).await?;

    Ok(result.rows_affected() > 0)
}

/// Delete a sound; association rows go with it, tags stay
///
/// Returns false when no row matched.
pub async fn delete_sound(conn: &mut SqliteConnection, id: Uuid) -> Result<bool, sqlx::Error> {
    sqlx::query("DELETE FROM sound_tags WHERE sound_id = ?")
        .bind(id.to_string())
        .execute(&mut *conn)
        .await?;

    let result = sqlx::query("DELETE FROM sounds WHERE id = ?")
        .bind(id.to_string())
        .execute(conn)
        .await?;

    Ok(result.rows_affected() > 0)
}

//! Catalog use cases
//!
//! Each mutating use case runs in one write transaction (`BEGIN IMMEDIATE`).
//! Returning early drops the transaction, which rolls back anything already
//! issued, so no partial write is ever visible.

use soundstore_common::{time, uuid_utils};
use sqlx::SqlitePool;
use std::collections::BTreeSet;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::db;
use crate::dto::{CreateSoundDto, CreateTagDto, ListSoundDto, ReadSoundDto, TagDto, UpdateSoundDto};
use crate::error::{CatalogError, CatalogResult};
use crate::mapping::{self, CREATE_PROFILE, UPDATE_PROFILE};
use crate::models::TagId;
use crate::query;

/// Catalog service over a SQLite pool
///
/// Holds no state besides the pool; cheap to clone per request.
#[derive(Clone)]
pub struct CatalogService {
    db: SqlitePool,
}

impl CatalogService {
    pub fn new(db: SqlitePool) -> Self {
        Self { db }
    }

    /// Sounds carrying every tag in `tag_ids`, rank descending
    ///
    /// Empty result is a valid outcome, never `NotFound`.
    pub async fn list_sounds(&self, tag_ids: &BTreeSet<TagId>) -> CatalogResult<Vec<ListSoundDto>> {
        let sounds = query::list_sounds(&self.db, tag_ids).await?;
        debug!("Listed {} sounds (filter: {:?})", sounds.len(), tag_ids);
        Ok(sounds)
    }

    pub async fn get_sound(&self, id: Uuid) -> CatalogResult<ReadSoundDto> {
        query::read_sound(&self.db, id)
            .await?
            .ok_or_else(|| sound_not_found(id))
    }

    /// Create a sound with its finalized tag set
    ///
    /// Tags are resolved one at a time; the first unknown id aborts the
    /// whole create before the sound row is written.
    pub async fn create_sound(&self, mut input: CreateSoundDto) -> CatalogResult<ReadSoundDto> {
        if input.uploaded_on.is_none() {
            input.uploaded_on = Some(time::now());
        }

        let mut sound = mapping::construct(&CREATE_PROFILE, &input, uuid_utils::generate());

        let mut tx = db::begin_write(&self.db).await?;

        for tag_id in &input.tags {
            match db::tags::find_tag(&mut tx, *tag_id).await? {
                Some(tag) => sound.tags.push(tag),
                None => {
                    warn!("Rejecting sound '{}': tag {} does not exist", sound.title, tag_id);
                    return Err(CatalogError::NotFound(format!("Tag {}", tag_id)));
                }
            }
        }

        db::sounds::insert_sound(&mut tx, &sound).await?;
        tx.commit().await?;

        info!(
            "Created sound {} '{}' with {} tags",
            sound.id,
            sound.title,
            sound.tags.len()
        );

        Ok(mapping::to_read_dto(&sound))
    }

    /// Overwrite scalar fields; the tag set is not touched
    pub async fn update_sound(&self, id: Uuid, input: UpdateSoundDto) -> CatalogResult<()> {
        // Checked before any storage access
        if input.id != id {
            return Err(CatalogError::BadRequest(format!(
                "Id's must match (path {}, body {})",
                id, input.id
            )));
        }

        let mut tx = db::begin_write(&self.db).await?;

        let mut sound = db::sounds::load_sound(&mut tx, id)
            .await?
            .ok_or_else(|| sound_not_found(id))?;

        mapping::merge(&UPDATE_PROFILE, &input, &mut sound);

        if !db::sounds::update_sound(&mut tx, &sound).await? {
            return Err(sound_not_found(id));
        }
        tx.commit().await?;

        info!("Updated sound {}", id);
        Ok(())
    }

    /// Remove a sound and its associations; tags are kept
    pub async fn delete_sound(&self, id: Uuid) -> CatalogResult<()> {
        let mut tx = db::begin_write(&self.db).await?;

        if !db::sounds::delete_sound(&mut tx, id).await? {
            return Err(sound_not_found(id));
        }
        tx.commit().await?;

        info!("Deleted sound {}", id);
        Ok(())
    }

    pub async fn list_tags(&self) -> CatalogResult<Vec<TagDto>> {
        let tags = db::tags::list_tags(&self.db).await?;
        Ok(tags.iter().map(TagDto::from).collect())
    }

    /// Create a tag; labels are unique
    pub async fn create_tag(&self, input: CreateTagDto) -> CatalogResult<TagDto> {
        let mut tx = db::begin_write(&self.db).await?;

        let tag = match db::tags::insert_tag(&mut tx, &input.label).await {
            Ok(tag) => tag,
            Err(sqlx::Error::Database(err)) if err.is_unique_violation() => {
                return Err(CatalogError::Conflict(format!(
                    "Tag '{}' already exists",
                    input.label
                )));
            }
            Err(e) => return Err(e.into()),
        };
        tx.commit().await?;

        info!("Created tag {} '{}'", tag.id, tag.label);
        Ok(TagDto::from(&tag))
    }
}

fn sound_not_found(id: Uuid) -> CatalogError {
    CatalogError::NotFound(format!("Sound {}", id))
}

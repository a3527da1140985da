//! Read queries over the catalog
//!
//! `SoundQuery` composes predicates and renders them into a single SQL
//! statement, so filtering runs inside SQLite rather than over loaded rows.
//!
//! The tag filter is relational division: a sound matches when no requested
//! tag *that exists in the store* is missing from its association rows.
//!
//! ```sql
//! NOT EXISTS (
//!     SELECT 1 FROM tags ft WHERE ft.id IN (...)
//!     AND NOT EXISTS (
//!         SELECT 1 FROM sound_tags fst
//!         WHERE fst.sound_id = s.id AND fst.tag_id = ft.id))
//! ```
//!
//! Resolving ids against `tags` inside the query drops unknown ids; they can
//! never disqualify a sound. Sounds carrying extra tags still match.

use sqlx::{QueryBuilder, Sqlite, SqlitePool};
use std::collections::BTreeSet;
use tracing::debug;
use uuid::Uuid;

use crate::dto::{ListSoundDto, ReadSoundDto};
use crate::mapping::{self, MappingProfile, LIST_PROFILE, READ_PROFILE, SOUND_ALIAS};
use crate::models::TagId;

/// Composable read query over `sounds`
///
/// Results are always ordered by rank descending, ties in insertion order.
#[derive(Debug, Clone, Default)]
pub struct SoundQuery {
    id: Option<Uuid>,
    all_tags: BTreeSet<TagId>,
}

impl SoundQuery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Restrict to one sound
    pub fn id(mut self, id: Uuid) -> Self {
        self.id = Some(id);
        self
    }

    /// Require every given tag (superset match); repeated calls accumulate
    pub fn all_tags<I>(mut self, tag_ids: I) -> Self
    where
        I: IntoIterator<Item = TagId>,
    {
        self.all_tags.extend(tag_ids);
        self
    }

    /// Render the query with the select list of `profile`
    pub fn build(&self, profile: &MappingProfile) -> QueryBuilder<'static, Sqlite> {
        let mut qb = QueryBuilder::new("SELECT ");
        qb.push(mapping::select_list(profile));
        qb.push(format!(" FROM sounds {}", SOUND_ALIAS));

        let mut clause = " WHERE ";

        if let Some(id) = self.id {
            qb.push(clause)
                .push(format!("{}.id = ", SOUND_ALIAS))
                .push_bind(id.to_string());
            clause = " AND ";
        }

        if !self.all_tags.is_empty() {
            qb.push(clause);
            push_all_tags_predicate(&mut qb, &self.all_tags);
        }

        qb.push(format!(
            " ORDER BY {alias}.rank DESC, {alias}.rowid ASC",
            alias = SOUND_ALIAS
        ));
        qb
    }
}

/// Every existing tag in `tag_ids` must be attached to the sound
fn push_all_tags_predicate(qb: &mut QueryBuilder<'static, Sqlite>, tag_ids: &BTreeSet<TagId>) {
    qb.push("NOT EXISTS (SELECT 1 FROM tags ft WHERE ft.id IN (");
    let mut ids = qb.separated(", ");
    for tag_id in tag_ids {
        ids.push_bind(*tag_id);
    }
    qb.push(format!(
        ") AND NOT EXISTS (SELECT 1 FROM sound_tags fst \
         WHERE fst.sound_id = {}.id AND fst.tag_id = ft.id))",
        SOUND_ALIAS
    ));
}

/// List sounds carrying all of `required_tags` (all sounds when empty)
pub async fn list_sounds(
    pool: &SqlitePool,
    required_tags: &BTreeSet<TagId>,
) -> Result<Vec<ListSoundDto>, sqlx::Error> {
    let mut qb = SoundQuery::new()
        .all_tags(required_tags.iter().copied())
        .build(&LIST_PROFILE);

    debug!(
        profile = LIST_PROFILE.name,
        sql = qb.sql(),
        tags = ?required_tags,
        "Listing sounds"
    );

    qb.build_query_as::<ListSoundDto>().fetch_all(pool).await
}

/// Read one sound; `None` when absent
pub async fn read_sound(pool: &SqlitePool, id: Uuid) -> Result<Option<ReadSoundDto>, sqlx::Error> {
    let mut qb = SoundQuery::new().id(id).build(&READ_PROFILE);
    debug!(profile = READ_PROFILE.name, sql = qb.sql(), %id, "Reading sound");

    qb.build_query_as::<ReadSoundDto>().fetch_optional(pool).await
}

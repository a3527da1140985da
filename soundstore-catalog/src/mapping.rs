//! Entity <-> DTO field correspondence
//!
//! One table (`SOUND_FIELDS`) names every scalar field of a sound and the
//! column backing it. A `MappingProfile` selects the fields a given shape
//! carries; exclusions are part of the profile, never per-call code.
//!
//! The same profiles drive three directions:
//! - projection: the SQL select list, so rows come out of the store already
//!   shaped as DTOs (`select_list` + `FromRow`)
//! - construction: create DTO -> new entity (`construct`)
//! - merge: update DTO -> loaded entity, in place (`merge`)
//!
//! Everything here is pure data shaping: no I/O, no validation.

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, QueryBuilder, Row, Sqlite};
use uuid::Uuid;

use crate::dto::{CreateSoundDto, ListSoundDto, ReadSoundDto, TagDto, UpdateSoundDto};
use crate::models::Sound;

/// Table alias for `sounds` in every generated query
pub const SOUND_ALIAS: &str = "s";

/// Column alias carrying the projected tag set as JSON
pub const TAGS_COLUMN: &str = "tags";

/// Scalar fields of a sound
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundField {
    Id,
    Title,
    Price,
    UploadedOn,
    Rank,
}

/// Field correspondence table, in column order
pub const SOUND_FIELDS: &[SoundField] = &[
    SoundField::Id,
    SoundField::Title,
    SoundField::Price,
    SoundField::UploadedOn,
    SoundField::Rank,
];

impl SoundField {
    /// Backing column in the `sounds` table
    pub const fn column(self) -> &'static str {
        match self {
            SoundField::Id => "id",
            SoundField::Title => "title",
            SoundField::Price => "price",
            SoundField::UploadedOn => "uploaded_on",
            SoundField::Rank => "rank",
        }
    }
}

/// A single field value, tagged by the field it belongs to
#[derive(Debug, Clone, PartialEq)]
pub enum SoundValue {
    Id(Uuid),
    Title(String),
    Price(f64),
    UploadedOn(DateTime<Utc>),
    Rank(i64),
}

/// How a shape carries the sound's tag set
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagShape {
    /// Not mapped; tags are attached by explicit id lookups
    Excluded,
    /// Label strings only
    Labels,
    /// `{id, label}` objects
    Full,
}

/// Field selection for one entity/DTO shape
#[derive(Debug, Clone, Copy)]
pub struct MappingProfile {
    pub name: &'static str,
    pub ignore: &'static [SoundField],
    pub tags: TagShape,
}

impl MappingProfile {
    /// Scalar fields carried by this profile, in table order
    pub fn fields(&self) -> impl Iterator<Item = SoundField> + '_ {
        SOUND_FIELDS
            .iter()
            .copied()
            .filter(move |field| self.includes(*field))
    }

    pub fn includes(&self, field: SoundField) -> bool {
        !self.ignore.contains(&field)
    }
}

/// Full scalar row of the `sounds` table (insert, entity load)
pub const STORE_PROFILE: MappingProfile = MappingProfile {
    name: "store",
    ignore: &[],
    tags: TagShape::Excluded,
};

/// Create input -> entity. Id is server-assigned.
pub const CREATE_PROFILE: MappingProfile = MappingProfile {
    name: "create",
    ignore: &[SoundField::Id],
    tags: TagShape::Excluded,
};

/// Update input -> entity. Id is immutable; the tag set is left alone.
pub const UPDATE_PROFILE: MappingProfile = MappingProfile {
    name: "update",
    ignore: &[SoundField::Id],
    tags: TagShape::Excluded,
};

/// Entity -> single read output
pub const READ_PROFILE: MappingProfile = MappingProfile {
    name: "read",
    ignore: &[],
    tags: TagShape::Full,
};

/// Entity -> list output
pub const LIST_PROFILE: MappingProfile = MappingProfile {
    name: "list",
    ignore: &[],
    tags: TagShape::Labels,
};

/// Anything fields can be read from
///
/// `None` means the source does not provide the field, which leaves the
/// target's current value in place.
pub trait FieldSource {
    fn value(&self, field: SoundField) -> Option<SoundValue>;
}

/// Anything fields can be written to
pub trait FieldTarget {
    fn apply(&mut self, value: SoundValue);
}

/// Copy every field of `profile` that `source` provides onto `target`
pub fn transform<S, T>(profile: &MappingProfile, source: &S, target: &mut T)
where
    S: FieldSource + ?Sized,
    T: FieldTarget + ?Sized,
{
    for field in profile.fields() {
        if let Some(value) = source.value(field) {
            target.apply(value);
        }
    }
}

/// Build a new entity from an input shape
pub fn construct<S: FieldSource + ?Sized>(profile: &MappingProfile, source: &S, id: Uuid) -> Sound {
    let mut sound = Sound {
        id,
        ..Sound::default()
    };
    transform(profile, source, &mut sound);
    sound
}

/// Overwrite an already-loaded entity in place
pub fn merge<S: FieldSource + ?Sized>(profile: &MappingProfile, source: &S, sound: &mut Sound) {
    transform(profile, source, sound);
}

/// In-memory entity -> read output
pub fn to_read_dto(sound: &Sound) -> ReadSoundDto {
    let mut dto = ReadSoundDto::default();
    transform(&READ_PROFILE, sound, &mut dto);
    dto.tags = sound.tags.iter().map(TagDto::from).collect();
    dto
}

// ============================================================================
// Projection (SQL side)
// ============================================================================

/// Select list for a profile, aliased so rows decode by column name
pub fn select_list(profile: &MappingProfile) -> String {
    let mut columns: Vec<String> = profile
        .fields()
        .map(|field| format!("{}.{} AS {}", SOUND_ALIAS, field.column(), field.column()))
        .collect();

    let tag_value = match profile.tags {
        TagShape::Excluded => None,
        TagShape::Labels => Some("t.label"),
        TagShape::Full => Some("json_object('id', t.id, 'label', t.label)"),
    };

    if let Some(value) = tag_value {
        // json_group_array over zero rows yields '[]', never NULL
        columns.push(format!(
            "(SELECT json_group_array({value}) FROM sound_tags st \
             JOIN tags t ON t.id = st.tag_id \
             WHERE st.sound_id = {alias}.id) AS {tags}",
            value = value,
            alias = SOUND_ALIAS,
            tags = TAGS_COLUMN,
        ));
    }

    columns.join(", ")
}

/// Bind one field value in its stored representation
///
/// Ids are stored as hyphenated text.
pub fn push_bind_value(qb: &mut QueryBuilder<'_, Sqlite>, value: SoundValue) {
    match value {
        SoundValue::Id(id) => qb.push_bind(id.to_string()),
        SoundValue::Title(title) => qb.push_bind(title),
        SoundValue::Price(price) => qb.push_bind(price),
        SoundValue::UploadedOn(uploaded_on) => qb.push_bind(uploaded_on),
        SoundValue::Rank(rank) => qb.push_bind(rank),
    };
}

fn decode_value(row: &SqliteRow, field: SoundField) -> Result<SoundValue, sqlx::Error> {
    let column = field.column();
    let value = match field {
        SoundField::Id => {
            let raw: String = row.try_get(column)?;
            let id = Uuid::parse_str(&raw).map_err(|e| sqlx::Error::ColumnDecode {
                index: column.to_string(),
                source: Box::new(e),
            })?;
            SoundValue::Id(id)
        }
        SoundField::Title => SoundValue::Title(row.try_get(column)?),
        SoundField::Price => SoundValue::Price(row.try_get(column)?),
        SoundField::UploadedOn => SoundValue::UploadedOn(row.try_get(column)?),
        SoundField::Rank => SoundValue::Rank(row.try_get(column)?),
    };
    Ok(value)
}

/// Decode the scalar fields of a projected row
pub fn decode_row<T>(profile: &MappingProfile, row: &SqliteRow) -> Result<T, sqlx::Error>
where
    T: FieldTarget + Default,
{
    let mut target = T::default();
    for field in profile.fields() {
        target.apply(decode_value(row, field)?);
    }
    Ok(target)
}

fn decode_json_column<T: DeserializeOwned>(row: &SqliteRow, column: &str) -> Result<T, sqlx::Error> {
    let raw: String = row.try_get(column)?;
    serde_json::from_str(&raw).map_err(|e| sqlx::Error::ColumnDecode {
        index: column.to_string(),
        source: Box::new(e),
    })
}

impl<'r> FromRow<'r, SqliteRow> for ReadSoundDto {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        let mut dto: ReadSoundDto = decode_row(&READ_PROFILE, row)?;
        dto.tags = decode_json_column(row, TAGS_COLUMN)?;
        Ok(dto)
    }
}

impl<'r> FromRow<'r, SqliteRow> for ListSoundDto {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        let mut dto: ListSoundDto = decode_row(&LIST_PROFILE, row)?;
        dto.tags = decode_json_column(row, TAGS_COLUMN)?;
        Ok(dto)
    }
}

// ============================================================================
// Field access per shape
// ============================================================================

impl FieldSource for Sound {
    fn value(&self, field: SoundField) -> Option<SoundValue> {
        Some(match field {
            SoundField::Id => SoundValue::Id(self.id),
            SoundField::Title => SoundValue::Title(self.title.clone()),
            SoundField::Price => SoundValue::Price(self.price),
            SoundField::UploadedOn => SoundValue::UploadedOn(self.uploaded_on),
            SoundField::Rank => SoundValue::Rank(self.rank),
        })
    }
}

impl FieldTarget for Sound {
    fn apply(&mut self, value: SoundValue) {
        match value {
            SoundValue::Id(id) => self.id = id,
            SoundValue::Title(title) => self.title = title,
            SoundValue::Price(price) => self.price = price,
            SoundValue::UploadedOn(uploaded_on) => self.uploaded_on = uploaded_on,
            SoundValue::Rank(rank) => self.rank = rank,
        }
    }
}

impl FieldSource for CreateSoundDto {
    fn value(&self, field: SoundField) -> Option<SoundValue> {
        match field {
            SoundField::Id => None,
            SoundField::Title => Some(SoundValue::Title(self.title.clone())),
            SoundField::Price => Some(SoundValue::Price(self.price)),
            SoundField::UploadedOn => self.uploaded_on.map(SoundValue::UploadedOn),
            SoundField::Rank => self.rank.map(SoundValue::Rank),
        }
    }
}

impl FieldSource for UpdateSoundDto {
    fn value(&self, field: SoundField) -> Option<SoundValue> {
        match field {
            SoundField::Id => Some(SoundValue::Id(self.id)),
            SoundField::Title => Some(SoundValue::Title(self.title.clone())),
            SoundField::Price => Some(SoundValue::Price(self.price)),
            SoundField::UploadedOn => Some(SoundValue::UploadedOn(self.uploaded_on)),
            SoundField::Rank => self.rank.map(SoundValue::Rank),
        }
    }
}

impl FieldTarget for ReadSoundDto {
    fn apply(&mut self, value: SoundValue) {
        match value {
            SoundValue::Id(id) => self.id = id,
            SoundValue::Title(title) => self.title = title,
            SoundValue::Price(price) => self.price = price,
            SoundValue::UploadedOn(uploaded_on) => self.uploaded_on = uploaded_on,
            SoundValue::Rank(rank) => self.rank = rank,
        }
    }
}

impl FieldTarget for ListSoundDto {
    fn apply(&mut self, value: SoundValue) {
        match value {
            SoundValue::Id(id) => self.id = id,
            SoundValue::Title(title) => self.title = title,
            SoundValue::Price(price) => self.price = price,
            SoundValue::UploadedOn(uploaded_on) => self.uploaded_on = uploaded_on,
            SoundValue::Rank(rank) => self.rank = rank,
        }
    }
}

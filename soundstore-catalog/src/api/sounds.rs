//! Sound endpoints
//!
//! Thin adapters: extract, validate, call the catalog service, render.

use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use std::collections::BTreeSet;
use uuid::Uuid;

use crate::api::validation::{validate_create_sound, validate_update_sound};
use crate::dto::{CreateSoundDto, ListSoundDto, ReadSoundDto, UpdateSoundDto};
use crate::error::{CatalogError, CatalogResult};
use crate::models::TagId;
use crate::AppState;

/// Repeatable query key selecting required tags
pub const TAG_QUERY_KEY: &str = "tag_id";

/// Collect `tag_id` values from raw query pairs; other keys are ignored
pub fn parse_tag_filter(pairs: &[(String, String)]) -> CatalogResult<BTreeSet<TagId>> {
    pairs
        .iter()
        .filter(|(key, _)| key == TAG_QUERY_KEY)
        .map(|(_, value)| {
            value.trim().parse::<TagId>().map_err(|_| {
                CatalogError::Validation(format!("{} must be an integer, got '{}'", TAG_QUERY_KEY, value))
            })
        })
        .collect()
}

/// GET /sounds?tag_id=1&tag_id=2
pub async fn list_sounds(
    State(state): State<AppState>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> CatalogResult<Json<Vec<ListSoundDto>>> {
    let tag_ids = parse_tag_filter(&pairs)?;
    Ok(Json(state.catalog.list_sounds(&tag_ids).await?))
}

/// GET /sounds/:id
pub async fn get_sound(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> CatalogResult<Json<ReadSoundDto>> {
    Ok(Json(state.catalog.get_sound(id).await?))
}

/// POST /sounds
///
/// 201 with a `Location` header pointing at GET /sounds/:id.
pub async fn create_sound(
    State(state): State<AppState>,
    Json(input): Json<CreateSoundDto>,
) -> CatalogResult<impl IntoResponse> {
    validate_create_sound(&input)?;
    let sound = state.catalog.create_sound(input).await?;
    let location = format!("/sounds/{}", sound.id);

    Ok((StatusCode::CREATED, [(header::LOCATION, location)], Json(sound)))
}

/// PUT /sounds/:id
pub async fn update_sound(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(input): Json<UpdateSoundDto>,
) -> CatalogResult<StatusCode> {
    validate_update_sound(&input)?;
    state.catalog.update_sound(id, input).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /sounds/:id
pub async fn delete_sound(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> CatalogResult<StatusCode> {
    state.catalog.delete_sound(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(raw: &[(&str, &str)]) -> Vec<(String, String)> {
        raw.iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_parse_tag_filter_collects_and_dedupes() {
        let ids = parse_tag_filter(&pairs(&[("tag_id", "2"), ("tag_id", "1"), ("tag_id", "2")])).unwrap();
        assert_eq!(ids, BTreeSet::from([1, 2]));
    }

    #[test]
    fn test_parse_tag_filter_ignores_other_keys() {
        let ids = parse_tag_filter(&pairs(&[("sort", "price"), ("tag_id", "5")])).unwrap();
        assert_eq!(ids, BTreeSet::from([5]));
    }

    #[test]
    fn test_parse_tag_filter_empty() {
        assert!(parse_tag_filter(&[]).unwrap().is_empty());
    }

    #[test]
    fn test_parse_tag_filter_rejects_non_integer() {
        let err = parse_tag_filter(&pairs(&[("tag_id", "drums")])).unwrap_err();
        assert!(matches!(err, CatalogError::Validation(_)));
    }
}

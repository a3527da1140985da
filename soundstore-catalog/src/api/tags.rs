//! Tag endpoints

use axum::{extract::State, http::StatusCode, Json};

use crate::api::validation::validate_create_tag;
use crate::dto::{CreateTagDto, TagDto};
use crate::error::CatalogResult;
use crate::AppState;

/// GET /tags
pub async fn list_tags(State(state): State<AppState>) -> CatalogResult<Json<Vec<TagDto>>> {
    Ok(Json(state.catalog.list_tags().await?))
}

/// POST /tags
pub async fn create_tag(
    State(state): State<AppState>,
    Json(input): Json<CreateTagDto>,
) -> CatalogResult<(StatusCode, Json<TagDto>)> {
    validate_create_tag(&input)?;
    let tag = state.catalog.create_tag(input).await?;
    Ok((StatusCode::CREATED, Json(tag)))
}

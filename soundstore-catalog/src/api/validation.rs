//! Request validation
//!
//! Shape checks on incoming payloads. Failures map to `CatalogError::Validation`
//! and never reach the service.

use crate::dto::{CreateSoundDto, CreateTagDto, UpdateSoundDto};
use crate::error::{CatalogError, CatalogResult};

fn require_non_blank(field: &str, value: &str) -> CatalogResult<()> {
    if value.trim().is_empty() {
        return Err(CatalogError::Validation(format!("{} must not be blank", field)));
    }
    Ok(())
}

fn require_price(price: f64) -> CatalogResult<()> {
    if !price.is_finite() || price < 0.0 {
        return Err(CatalogError::Validation(
            "price must be a non-negative number".to_string(),
        ));
    }
    Ok(())
}

pub fn validate_create_sound(input: &CreateSoundDto) -> CatalogResult<()> {
    require_non_blank("title", &input.title)?;
    require_price(input.price)
}

pub fn validate_update_sound(input: &UpdateSoundDto) -> CatalogResult<()> {
    require_non_blank("title", &input.title)?;
    require_price(input.price)
}

pub fn validate_create_tag(input: &CreateTagDto) -> CatalogResult<()> {
    require_non_blank("label", &input.label)
}

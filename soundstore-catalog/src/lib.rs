//! soundstore-catalog library
//!
//! CRUD over audio-sample records ("sounds") and their tags, with an
//! all-tags list filter. Layers, leaves first:
//! - `db`: write-side statements against SQLite
//! - `query`: filtered, ordered read projections
//! - `mapping`: entity <-> DTO field correspondence
//! - `service`: use cases and error semantics
//! - `api`: axum handlers

use axum::Router;
use sqlx::SqlitePool;
use tower_http::trace::TraceLayer;

pub mod api;
pub mod db;
pub mod dto;
pub mod error;
pub mod mapping;
pub mod models;
pub mod query;
pub mod service;

pub use error::{CatalogError, CatalogResult};
pub use service::CatalogService;

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    pub catalog: CatalogService,
}

impl AppState {
    /// Create new application state
    pub fn new(db: SqlitePool) -> Self {
        Self {
            catalog: CatalogService::new(db),
        }
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    use axum::routing::get;

    let catalog = Router::new()
        .route("/sounds", get(api::list_sounds).post(api::create_sound))
        .route(
            "/sounds/:id",
            get(api::get_sound)
                .put(api::update_sound)
                .delete(api::delete_sound),
        )
        .route("/tags", get(api::list_tags).post(api::create_tag));

    Router::new()
        .merge(catalog)
        .merge(api::health_routes())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

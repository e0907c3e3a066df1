//! Read-only catalog route handlers.
//!
//! Listing and detail endpoints for the three collections. Writes go
//! through back-office tooling, not this service.

use axum::{
    Json,
    extract::{Path, State},
};
use tracing::instrument;

use hemline_core::{ItemRef, SourceKind};

use crate::error::{AppError, Result};
use crate::models::catalog::CatalogEntry;
use crate::state::AppState;

async fn list(state: &AppState, source: SourceKind) -> Result<Json<Vec<CatalogEntry>>> {
    let repo = crate::db::CatalogRepository::new(state.pool());
    Ok(Json(repo.list(source).await?))
}

async fn show(state: &AppState, source: SourceKind, id: i32) -> Result<Json<CatalogEntry>> {
    let repo = crate::db::CatalogRepository::new(state.pool());
    let entry = repo
        .get_entry(source, ItemRef::new(id))
        .await?
        .ok_or_else(|| AppError::NotFound(format!("{source} {id}")))?;
    Ok(Json(entry))
}

#[instrument(skip(state))]
pub async fn list_products(State(state): State<AppState>) -> Result<Json<Vec<CatalogEntry>>> {
    list(&state, SourceKind::Product).await
}

#[instrument(skip(state))]
pub async fn show_product(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<CatalogEntry>> {
    show(&state, SourceKind::Product, id).await
}

#[instrument(skip(state))]
pub async fn list_top_sellers(State(state): State<AppState>) -> Result<Json<Vec<CatalogEntry>>> {
    list(&state, SourceKind::TopSeller).await
}

#[instrument(skip(state))]
pub async fn show_top_seller(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<CatalogEntry>> {
    show(&state, SourceKind::TopSeller, id).await
}

#[instrument(skip(state))]
pub async fn list_dress_styles(State(state): State<AppState>) -> Result<Json<Vec<CatalogEntry>>> {
    list(&state, SourceKind::DressStyle).await
}

#[instrument(skip(state))]
pub async fn show_dress_style(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<CatalogEntry>> {
    show(&state, SourceKind::DressStyle, id).await
}

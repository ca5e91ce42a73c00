// src/handlers/artwork.rs

use axum::{
    Json,
    extract::{Path, State},
    response::IntoResponse,
};

use sqlx::SqlitePool;
use std::sync::Arc;

use crate::{
    db::artworks::SqliteRecordStore,
    error::AppError,
    handlers::ensure_genre,
    quiz::{curated::CuratedCatalog, store::RecordStore},
};

/// Lists all artworks of a genre, newest first.
pub async fn list_artworks(
    State(pool): State<SqlitePool>,
    State(curated): State<Arc<CuratedCatalog>>,
    Path(genre): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    ensure_genre(&curated, &genre)?;

    let artworks = SqliteRecordStore::new(pool, genre)
        .list_newest_first()
        .await
        .map_err(|e| {
            tracing::error!("Failed to list artworks: {:?}", e);
            AppError::InternalServerError(e.to_string())
        })?;

    Ok(Json(artworks))
}

/// Retrieves a single artwork by ID within a genre.
pub async fn get_artwork(
    State(pool): State<SqlitePool>,
    State(curated): State<Arc<CuratedCatalog>>,
    Path((genre, id)): Path<(String, i64)>,
) -> Result<impl IntoResponse, AppError> {
    ensure_genre(&curated, &genre)?;

    let artwork = SqliteRecordStore::new(pool, genre)
        .fetch_by_id(id)
        .await?
        .ok_or(AppError::NotFound("Artwork not found".to_string()))?;

    Ok(Json(artwork))
}

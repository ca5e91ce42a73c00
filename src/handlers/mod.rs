// src/handlers/mod.rs

pub mod artwork;
pub mod quiz;

use crate::{error::AppError, quiz::curated::CuratedCatalog};

/// Rejects genres the curated catalog does not know about.
pub(crate) fn ensure_genre(curated: &CuratedCatalog, genre: &str) -> Result<(), AppError> {
    if curated.has_genre(genre) {
        Ok(())
    } else {
        Err(AppError::NotFound("Genre not found".to_string()))
    }
}

// src/handlers/quiz.rs

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use rand::{SeedableRng, rngs::StdRng};
use sqlx::SqlitePool;
use std::sync::Arc;
use validator::Validate;

use crate::{
    db::{artworks::SqliteRecordStore, attempts, sessions::SqliteSession},
    error::AppError,
    handlers::ensure_genre,
    models::quiz_result::SubmitResultRequest,
    quiz::{QuizEngine, curated::CuratedCatalog},
    state::AppState,
    utils::session::SessionId,
};

/// Generates a four-choice quiz from the genre's pool.
///
/// * Avoids the artworks this session saw most recently.
/// * Echoes the session identity in the `x-session-id` response header.
pub async fn multiple_choice(
    State(state): State<AppState>,
    Path(genre): Path<String>,
    session_id: SessionId,
) -> Result<impl IntoResponse, AppError> {
    ensure_genre(&state.curated, &genre)?;

    let store = SqliteRecordStore::new(state.pool.clone(), genre.as_str());
    let session = SqliteSession::new(state.pool.clone(), session_id.0.as_str());
    let engine = QuizEngine::new(&store, &state.curated, &genre)
        .with_history_capacity(state.config.history_capacity);
    let mut rng = StdRng::from_entropy();

    let quiz = engine
        .build_multiple_choice_quiz(&session, &mut rng)
        .await
        .map_err(|e| {
            tracing::warn!("Failed to build {} quiz: {}", genre, e);
            AppError::from(e)
        })?;

    Ok((session_id.header(), Json(quiz)))
}

/// Generates a quiz whose answer is an artwork previously answered incorrectly.
pub async fn review(
    State(state): State<AppState>,
    Path(genre): Path<String>,
    session_id: SessionId,
) -> Result<impl IntoResponse, AppError> {
    ensure_genre(&state.curated, &genre)?;

    let missed = attempts::missed_artwork_ids(&state.pool, &genre)
        .await
        .map_err(|e| {
            tracing::error!("Failed to fetch missed artworks: {:?}", e);
            AppError::InternalServerError(e.to_string())
        })?;

    let store = SqliteRecordStore::new(state.pool.clone(), genre.as_str());
    let session = SqliteSession::new(state.pool.clone(), session_id.0.as_str());
    let engine = QuizEngine::new(&store, &state.curated, &genre)
        .with_history_capacity(state.config.history_capacity);
    let mut rng = StdRng::from_entropy();

    let quiz = engine
        .build_review_quiz(&session, &missed, &mut rng)
        .await
        .map_err(|e| {
            tracing::warn!("Failed to build {} review quiz: {}", genre, e);
            AppError::from(e)
        })?;

    Ok((session_id.header(), Json(quiz)))
}

/// Records the outcome of an answered quiz.
///
/// Correctness is decided here by comparing the trimmed answers.
pub async fn submit_result(
    State(pool): State<SqlitePool>,
    State(curated): State<Arc<CuratedCatalog>>,
    Path(genre): Path<String>,
    Json(req): Json<SubmitResultRequest>,
) -> Result<impl IntoResponse, AppError> {
    ensure_genre(&curated, &genre)?;

    if let Err(validation_errors) = req.validate() {
        return Err(AppError::BadRequest(validation_errors.to_string()));
    }

    let id = attempts::insert_attempt(&pool, &genre, &req)
        .await
        .map_err(|e| {
            tracing::error!("Failed to record quiz result: {:?}", e);
            AppError::InternalServerError(e.to_string())
        })?;

    Ok((
        StatusCode::CREATED,
        Json(serde_json::json!({
            "id": id,
            "is_correct": req.is_correct(),
            "message": "Result recorded"
        })),
    ))
}

/// Returns overall, per-field and recent attempt statistics for a genre.
pub async fn get_stats(
    State(pool): State<SqlitePool>,
    State(curated): State<Arc<CuratedCatalog>>,
    Path(genre): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    ensure_genre(&curated, &genre)?;

    let stats = attempts::stats(&pool, &genre).await.map_err(|e| {
        tracing::error!("Failed to compute quiz stats: {:?}", e);
        AppError::InternalServerError(e.to_string())
    })?;

    Ok(Json(stats))
}

/// Deletes every recorded attempt of a genre.
pub async fn reset_results(
    State(pool): State<SqlitePool>,
    State(curated): State<Arc<CuratedCatalog>>,
    Path(genre): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    ensure_genre(&curated, &genre)?;

    let removed = attempts::reset(&pool, &genre).await?;
    tracing::info!("Reset {} quiz results for {}", removed, genre);

    Ok(Json(serde_json::json!({
        "removed": removed,
        "message": "Quiz results reset"
    })))
}

// src/routes.rs

use axum::{
    Router,
    http::{HeaderValue, Method, header},
    routing::{get, post},
};
use tower_http::{
    cors::CorsLayer, services::ServeDir, set_header::SetResponseHeaderLayer, trace::TraceLayer,
};

use crate::{
    handlers::{artwork, quiz},
    state::AppState,
    utils::session::SESSION_HEADER,
};

// Uploaded images may be hot-linked from anywhere.
const CONTENT_SECURITY_POLICY: &str = "default-src 'self'; img-src * data: https:; connect-src 'self'";

/// Assembles the main application router.
///
/// * Every catalog route is scoped by a `{genre}` path segment.
/// * Serves uploaded images under `/uploads`.
/// * Applies global middleware (Trace, CORS, security headers).
pub fn create_router(state: AppState) -> Router {
    let origins = [
        HeaderValue::from_static("http://localhost:3000"),
        HeaderValue::from_static("http://127.0.0.1:3000"),
    ];

    let cors = CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE, SESSION_HEADER.clone()])
        .expose_headers([SESSION_HEADER.clone()]);

    let artwork_routes = Router::new()
        .route("/api/{genre}/artworks", get(artwork::list_artworks))
        .route("/api/{genre}/artworks/{id}", get(artwork::get_artwork));

    let quiz_routes = Router::new()
        .route("/api/{genre}/quiz/multiple-choice", get(quiz::multiple_choice))
        .route("/api/{genre}/quiz/review", get(quiz::review))
        .route("/api/{genre}/quiz/submit", post(quiz::submit_result))
        .route("/api/{genre}/quiz/stats", get(quiz::get_stats))
        .route("/api/{genre}/quiz/reset", post(quiz::reset_results));

    Router::new()
        .merge(artwork_routes)
        .merge(quiz_routes)
        .nest_service("/uploads", ServeDir::new(&state.config.upload_dir))
        // Global Middleware (applied from outside in)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(SetResponseHeaderLayer::overriding(
            header::X_CONTENT_TYPE_OPTIONS,
            HeaderValue::from_static("nosniff"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::X_FRAME_OPTIONS,
            HeaderValue::from_static("DENY"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::X_XSS_PROTECTION,
            HeaderValue::from_static("1; mode=block"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::CONTENT_SECURITY_POLICY,
            HeaderValue::from_static(CONTENT_SECURITY_POLICY),
        ))
        .with_state(state)
}

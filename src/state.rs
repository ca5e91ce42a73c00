use std::sync::Arc;

use crate::config::Config;
use crate::quiz::curated::CuratedCatalog;
use axum::extract::FromRef;
use sqlx::SqlitePool;

#[derive(Clone)]
pub struct AppState {
    pub pool: SqlitePool,
    pub config: Config,
    pub curated: Arc<CuratedCatalog>,
}

impl FromRef<AppState> for SqlitePool {
    fn from_ref(state: &AppState) -> Self {
        state.pool.clone()
    }
}

impl FromRef<AppState> for Arc<CuratedCatalog> {
    fn from_ref(state: &AppState) -> Self {
        state.curated.clone()
    }
}

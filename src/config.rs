// src/config.rs

use std::env;
use std::path::PathBuf;
use dotenvy::dotenv;

/// Number of choices presented by every multiple-choice quiz.
pub const QUIZ_CHOICE_COUNT: usize = 4;

/// Minimum number of records in a pool before any quiz can be built.
pub const MIN_POOL_SIZE: i64 = QUIZ_CHOICE_COUNT as i64;

/// The image field is only offered when this many records carry an image.
pub const MIN_IMAGE_RECORDS: i64 = QUIZ_CHOICE_COUNT as i64;

/// Default size of the per-session recent-draw window.
pub const DEFAULT_HISTORY_CAPACITY: usize = 5;

/// Session key under which the recent-draw window is stored.
pub const HISTORY_SESSION_KEY: &str = "quiz_history";

/// Number of attempts returned in the "recent results" part of the statistics.
pub const STATS_RECENT_LIMIT: i64 = 10;

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub rust_log: String,
    pub bind_addr: String,
    pub history_capacity: usize,
    pub upload_dir: PathBuf,
    /// Optional JSON file replacing the built-in curated fallback catalog.
    pub curated_fallbacks_path: Option<PathBuf>,
}

impl Config {
    pub fn from_env() -> Self {
        dotenv().ok();

        let database_url = env::var("DATABASE_URL")
            .unwrap_or_else(|_| "sqlite://art.db?mode=rwc".to_string());

        let rust_log = env::var("RUST_LOG")
            .unwrap_or_else(|_| "info".to_string());

        let bind_addr = env::var("BIND_ADDR")
            .unwrap_or_else(|_| "0.0.0.0:3000".to_string());

        let history_capacity = env::var("HISTORY_CAPACITY")
            .ok()
            .and_then(|v| v.parse::<usize>().ok())
            .filter(|v| *v > 0)
            .unwrap_or(DEFAULT_HISTORY_CAPACITY);

        let upload_dir = env::var("UPLOAD_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("uploads"));

        let curated_fallbacks_path = env::var("CURATED_FALLBACKS_PATH")
            .ok()
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from);

        Self {
            database_url,
            rust_log,
            bind_addr,
            history_capacity,
            upload_dir,
            curated_fallbacks_path,
        }
    }
}

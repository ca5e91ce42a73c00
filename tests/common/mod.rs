// tests/common/mod.rs

use std::sync::Arc;

use art_quiz::{config::Config, db, quiz::curated::CuratedCatalog, routes, state::AppState};
use sqlx::SqlitePool;

pub struct TestApp {
    pub address: String,
    pub pool: SqlitePool,
}

/// Spawns the app on a random port against a fresh in-memory database.
pub async fn spawn_app() -> TestApp {
    // A single connection keeps every query on the same in-memory database.
    let pool = db::connect("sqlite::memory:", 1)
        .await
        .expect("Failed to open in-memory SQLite");

    db::migrate(&pool).await.expect("Failed to migrate database");

    let config = Config {
        database_url: "sqlite::memory:".to_string(),
        rust_log: "error".to_string(),
        bind_addr: "127.0.0.1:0".to_string(),
        history_capacity: 5,
        upload_dir: std::env::temp_dir(),
        curated_fallbacks_path: None,
    };

    let state = AppState {
        pool: pool.clone(),
        config,
        curated: Arc::new(CuratedCatalog::default()),
    };
    let app = routes::create_router(state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind random port");
    let port = listener.local_addr().unwrap().port();
    let address = format!("http://127.0.0.1:{}", port);

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    TestApp { address, pool }
}

/// Inserts an artwork and returns its id.
pub async fn seed_artwork(
    pool: &SqlitePool,
    genre: &str,
    author: &str,
    title: &str,
    style: &str,
    image_filename: Option<&str>,
) -> i64 {
    sqlx::query(
        "INSERT INTO artworks (genre, author, title, style, image_filename) VALUES (?, ?, ?, ?, ?)",
    )
    .bind(genre)
    .bind(author)
    .bind(title)
    .bind(style)
    .bind(image_filename)
    .execute(pool)
    .await
    .expect("Failed to seed artwork")
    .last_insert_rowid()
}

/// Five western artworks, none with an image.
pub async fn seed_western(pool: &SqlitePool) -> Vec<i64> {
    let rows = [
        ("モネ", "睡蓮", "印象派"),
        ("ピカソ", "ゲルニカ", "キュビスム"),
        ("ゴッホ", "星月夜", "ポスト印象派"),
        ("フェルメール", "真珠の耳飾りの少女", "バロック"),
        ("ダリ", "記憶の固執", "シュルレアリスム"),
    ];
    let mut ids = Vec::new();
    for (author, title, style) in rows {
        ids.push(seed_artwork(pool, "western", author, title, style, None).await);
    }
    ids
}

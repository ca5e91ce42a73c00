// src/main.rs

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use art_quiz::config::Config;
use art_quiz::quiz::curated::CuratedCatalog;
use art_quiz::routes;
use art_quiz::state::AppState;
use art_quiz::db;
use dotenvy::dotenv;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    // Load .env file (if present)
    dotenv().ok();

    // Load configuration from environment
    let config = Config::from_env();

    let file_appender = tracing_appender::rolling::daily("logs", "art-quiz.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);
    let env_filter = EnvFilter::new(&config.rust_log);
    let stdout_layer = fmt::layer().with_writer(std::io::stdout).with_target(false);
    let file_layer = fmt::layer().with_writer(non_blocking).with_ansi(false);

    // Initialize Tracing (Logging)
    tracing_subscriber::registry()
        .with(env_filter)
        .with(stdout_layer)
        .with(file_layer)
        .init();

    // Initialize Database Pool with Retry
    let mut retry_count = 0;
    let pool = loop {
        match db::connect(&config.database_url, 5).await {
            Ok(pool) => break pool,
            Err(e) => {
                retry_count += 1;
                if retry_count > 5 {
                    panic!("Failed to open database after 5 retries: {}", e);
                }
                tracing::warn!("Database not ready, retrying in 2s... (Attempt {})", retry_count);
                tokio::time::sleep(Duration::from_secs(2)).await;
            }
        }
    };

    tracing::info!("Database connected...");

    // Run Migrations Automatically
    tracing::info!("Running migrations...");
    db::migrate(&pool)
        .await
        .expect("Failed to run database migrations");
    tracing::info!("Migrations applied successfully.");

    let curated = match &config.curated_fallbacks_path {
        Some(path) => CuratedCatalog::from_json_file(path)
            .unwrap_or_else(|e| panic!("Failed to load curated fallbacks from {}: {}", path.display(), e)),
        None => CuratedCatalog::default(),
    };
    tracing::info!("Serving genres: {}", curated.genres().collect::<Vec<_>>().join(", "));

    // Create AppState
    let state = AppState {
        pool: pool.clone(),
        config: config.clone(),
        curated: Arc::new(curated),
    };

    // Create the Axum application router
    let app = routes::create_router(state);

    // Bind to the listening address
    let addr: SocketAddr = config
        .bind_addr
        .parse()
        .expect("BIND_ADDR must be a socket address");
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind listener");

    // Start the server
    axum::serve(listener, app).await.expect("Server error");
}

//! Emberfall Engine - Main entry point.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::http::header::HeaderName;
use axum::http::{HeaderValue, Method};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use emberfall_engine::app::{App, Repositories};
use emberfall_engine::infrastructure::clock::SystemClock;
use emberfall_engine::infrastructure::ports::ClockPort;
use emberfall_engine::infrastructure::sqlite::{
    connect, SqliteArchetypeRepo, SqliteCandleRepo, SqliteChapterRepo, SqliteCharacterRepo,
    SqliteCultureRepo, SqliteEventRepo, SqliteHeritageRepo, SqliteSettingsRepo, SqliteSkillRepo,
    SqliteUserRepo,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment from the repo root (the engine may be run from
    // `crates/engine`).
    load_dotenv_from_repo_root();

    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "emberfall_engine=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Emberfall Engine");

    // Load configuration
    let db_path = std::env::var("DATABASE_PATH").unwrap_or_else(|_| "emberfall.db".into());
    let server_host = std::env::var("SERVER_HOST").unwrap_or_else(|_| "0.0.0.0".into());
    let server_port: u16 = std::env::var("SERVER_PORT")
        .or_else(|_| std::env::var("PORT"))
        .unwrap_or_else(|_| "3000".into())
        .parse()
        .unwrap_or(3000);

    // Clock for repositories and use cases
    let clock: Arc<dyn ClockPort> = Arc::new(SystemClock::new());

    // Open the database and construct the repositories (each ensures its
    // own tables).
    tracing::info!(db_path = %db_path, "Opening SQLite database");
    let pool = connect(&db_path).await?;
    let repos = Repositories {
        user: Arc::new(SqliteUserRepo::new(pool.clone()).await?),
        chapter: Arc::new(SqliteChapterRepo::new(pool.clone()).await?),
        heritage: Arc::new(SqliteHeritageRepo::new(pool.clone()).await?),
        culture: Arc::new(SqliteCultureRepo::new(pool.clone()).await?),
        archetype: Arc::new(SqliteArchetypeRepo::new(pool.clone()).await?),
        skill: Arc::new(SqliteSkillRepo::new(pool.clone()).await?),
        character: Arc::new(SqliteCharacterRepo::new(pool.clone(), clock.clone()).await?),
        candle: Arc::new(SqliteCandleRepo::new(pool.clone()).await?),
        event: Arc::new(SqliteEventRepo::new(pool.clone()).await?),
        settings: Arc::new(SqliteSettingsRepo::new(pool, clock.clone()).await?),
    };

    // Create application and warm the reference-data cache
    let app = Arc::new(App::new(repos, clock));
    app.reference.reload().await?;

    // Build router
    let mut router = emberfall_engine::api::http::routes()
        .with_state(app)
        .layer(TraceLayer::new_for_http());

    if let Some(cors) = build_cors_layer_from_env() {
        router = router.layer(cors);
    }

    // Start server
    let addr: SocketAddr = format!("{server_host}:{server_port}").parse()?;
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router).await?;

    Ok(())
}

fn load_dotenv_from_repo_root() {
    let repo_root = std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..");

    // Prefer local overrides.
    for filename in [".env.local", ".env"] {
        let path = repo_root.join(filename);
        if path.exists() {
            let _ = dotenvy::from_path(path);
        }
    }
}

fn build_cors_layer_from_env() -> Option<CorsLayer> {
    let allowed_origins = std::env::var("CORS_ALLOWED_ORIGINS")
        .ok()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty());

    let allowed_origins = allowed_origins?;

    let mut cors = CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        // Clients send X-User-Id and JSON content types, both of which
        // trigger CORS preflights.
        .allow_headers([
            HeaderName::from_static("x-user-id"),
            axum::http::header::CONTENT_TYPE,
        ]);

    if allowed_origins == "*" {
        cors = cors.allow_origin(Any);
    } else {
        let origins: Vec<HeaderValue> = allowed_origins
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .filter_map(|s| HeaderValue::from_str(s).ok())
            .collect();

        if origins.is_empty() {
            return None;
        }

        cors = cors.allow_origin(origins);
    }

    Some(cors)
}

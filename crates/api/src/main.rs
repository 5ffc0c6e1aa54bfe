// Course Library API server
// Decision: Configuration comes from the environment (optionally a .env file)
// Decision: In-memory storage with sample data when no database is configured

use anyhow::{Context, Result};
use courselib_api::build_app;
use courselib_api::config::{ApiConfig, DEFAULT_LOG_FILTER};
use courselib_api::storage::StorageBackend;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    // A missing .env file is fine; real environment variables still apply
    dotenvy::dotenv().ok();

    // Configure via RUST_LOG (default: "courselib_api=debug,tower_http=debug")
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| DEFAULT_LOG_FILTER.into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("courselib-api starting...");

    let config = ApiConfig::from_env();

    // Initialize storage
    let db = match &config.database_url {
        Some(database_url) => {
            let db = StorageBackend::postgres(database_url)
                .await
                .context("Failed to connect to database")?;
            tracing::info!("Connected to database, migrations applied");
            db
        }
        None => {
            tracing::warn!("DATABASE_URL not set, using in-memory storage with sample data");
            StorageBackend::in_memory_with_sample_data()
        }
    };

    if !config.api_prefix.is_empty() {
        tracing::info!(prefix = %config.api_prefix, "API prefix configured");
    }
    if config.cors_origins.is_empty() {
        tracing::info!("CORS not configured (same-origin requests only)");
    } else {
        tracing::info!(origins = ?config.cors_origins, "CORS origins configured");
    }

    let app = build_app(Arc::new(db), &config);

    // Start HTTP server
    let listener = tokio::net::TcpListener::bind(&config.listen_addr)
        .await
        .context("Failed to bind to address")?;
    tracing::info!("HTTP server listening on {}", config.listen_addr);

    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}

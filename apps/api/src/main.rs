mod config;
mod db;
mod errors;
mod llm_client;
mod models;
mod pdf_text;
mod resumes;
mod routes;
mod state;
#[cfg(test)]
mod test_support;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::http::HeaderValue;
use tower_http::{
    cors::{AllowHeaders, AllowMethods, CorsLayer},
    trace::TraceLayer,
};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::db::{connect_with_retry, reset_schema, PoolSettings};
use crate::llm_client::{CandidateChain, GeminiClient};
use crate::resumes::storage::prepare_upload_dir;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting resume API v{}", env!("CARGO_PKG_VERSION"));

    prepare_upload_dir(&config.upload_dir).await?;

    // Initialize PostgreSQL
    let db = connect_with_retry(
        &config.database_url,
        PoolSettings {
            max_connections: config.db_max_connections,
            attempts: config.db_connect_attempts,
            delay: config.db_connect_delay,
        },
    )
    .await?;
    reset_schema(&db, config.reset_schema_on_startup).await?;

    // Initialize LLM client
    if config.google_api_key.is_none() {
        warn!("GOOGLE_API_KEY is not set; every upload will fail at the LLM step");
    }
    let gemini = GeminiClient::new(&config.gemini_api_base, config.google_api_key.clone());
    let llm = CandidateChain::new(
        Arc::new(gemini),
        config.llm_models.clone(),
        config.llm_timeout,
    );
    info!("LLM client initialized (models: {})", llm.models().join(", "));

    let cors = build_cors(&config)?;

    let state = AppState {
        db,
        llm,
        config: config.clone(),
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors);

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Single allowed origin with credentials; methods and headers mirror the request.
fn build_cors(config: &Config) -> Result<CorsLayer> {
    let origin = HeaderValue::from_str(&config.cors_allowed_origin)
        .context("CORS_ALLOWED_ORIGIN is not a valid header value")?;
    Ok(CorsLayer::new()
        .allow_origin(origin)
        .allow_credentials(true)
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request()))
}

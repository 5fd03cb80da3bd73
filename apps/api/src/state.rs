use sqlx::PgPool;

use crate::config::Config;
use crate::llm_client::CandidateChain;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    /// Ordered Gemini model fallback used by the upload pipeline.
    pub llm: CandidateChain,
    pub config: Config,
}

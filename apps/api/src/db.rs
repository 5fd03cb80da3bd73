use std::time::Duration;

use anyhow::{bail, Result};
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tracing::{info, warn};

const DROP_RESUMES_TABLE: &str = "DROP TABLE IF EXISTS resumes";

const CREATE_RESUMES_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS resumes (
    id SERIAL PRIMARY KEY,
    filename TEXT NOT NULL,
    uploaded_at TIMESTAMPTZ NOT NULL DEFAULT CURRENT_TIMESTAMP,
    display_name TEXT,
    email TEXT,
    phone TEXT,
    linkedin TEXT,
    portfolio TEXT,
    summary TEXT,
    work_experience JSONB NOT NULL DEFAULT '[]'::jsonb,
    education JSONB NOT NULL DEFAULT '[]'::jsonb,
    technical_skills JSONB NOT NULL DEFAULT '[]'::jsonb,
    soft_skills JSONB NOT NULL DEFAULT '[]'::jsonb,
    projects JSONB NOT NULL DEFAULT '[]'::jsonb,
    certifications JSONB NOT NULL DEFAULT '[]'::jsonb,
    resume_rating INTEGER,
    improvement_areas TEXT,
    upskill_suggestions JSONB NOT NULL DEFAULT '[]'::jsonb,
    llm_raw TEXT
)
"#;

/// Pool sizing and startup retry policy.
#[derive(Debug, Clone, Copy)]
pub struct PoolSettings {
    pub max_connections: u32,
    pub attempts: u32,
    pub delay: Duration,
}

/// Creates a PostgreSQL connection pool, retrying while the database comes up.
/// Exhausting every attempt is fatal.
pub async fn connect_with_retry(database_url: &str, settings: PoolSettings) -> Result<PgPool> {
    info!("Connecting to PostgreSQL...");

    for attempt in 1..=settings.attempts {
        match PgPoolOptions::new()
            .min_connections(1)
            .max_connections(settings.max_connections)
            .connect(database_url)
            .await
        {
            Ok(pool) => {
                info!("PostgreSQL connection pool established (attempt {attempt})");
                return Ok(pool);
            }
            Err(e) => {
                warn!(
                    "PostgreSQL connect attempt {attempt}/{} failed: {e}",
                    settings.attempts
                );
                if attempt < settings.attempts {
                    tokio::time::sleep(settings.delay).await;
                }
            }
        }
    }

    bail!(
        "Failed to connect to PostgreSQL after {} attempts",
        settings.attempts
    )
}

/// Ensures the `resumes` table exists.
///
/// With `drop_existing` the table is dropped first, so every stored résumé is
/// discarded on each process start.
pub async fn reset_schema(pool: &PgPool, drop_existing: bool) -> Result<()> {
    if drop_existing {
        sqlx::query(DROP_RESUMES_TABLE).execute(pool).await?;
        warn!("Dropped existing resumes table; previously stored records are gone");
    }
    sqlx::query(CREATE_RESUMES_TABLE).execute(pool).await?;
    info!("resumes table ready");
    Ok(())
}

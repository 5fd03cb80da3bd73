use sqlx::PgPool;
use tracing::info;

use crate::models::resume::{NewResume, ResumeRecord, ResumeSummary};

/// Full-record projection with column names aliased to the API field names.
const RECORD_COLUMNS: &str = "id, filename AS file_name, uploaded_at, display_name AS name, \
    email, phone, linkedin AS linkedin_url, portfolio AS portfolio_url, summary, \
    work_experience, education, technical_skills, soft_skills, projects, certifications, \
    resume_rating, improvement_areas, upskill_suggestions, llm_raw";

/// Inserts one résumé and returns the stored row, generated id included.
pub async fn insert_resume(pool: &PgPool, resume: &NewResume) -> Result<ResumeRecord, sqlx::Error> {
    let sql = format!(
        r#"
        INSERT INTO resumes (
            filename, display_name, email, phone, linkedin, portfolio, summary,
            work_experience, education, technical_skills, soft_skills, projects, certifications,
            resume_rating, improvement_areas, upskill_suggestions, llm_raw
        ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17)
        RETURNING {RECORD_COLUMNS}
        "#
    );

    let record = sqlx::query_as::<_, ResumeRecord>(&sql)
        .bind(&resume.file_name)
        .bind(&resume.name)
        .bind(&resume.email)
        .bind(&resume.phone)
        .bind(&resume.linkedin_url)
        .bind(&resume.portfolio_url)
        .bind(&resume.summary)
        .bind(&resume.work_experience)
        .bind(&resume.education)
        .bind(&resume.technical_skills)
        .bind(&resume.soft_skills)
        .bind(&resume.projects)
        .bind(&resume.certifications)
        .bind(resume.resume_rating)
        .bind(&resume.improvement_areas)
        .bind(&resume.upskill_suggestions)
        .bind(&resume.llm_raw)
        .fetch_one(pool)
        .await?;

    info!(
        "Inserted resume {} ({}) at {}",
        record.id, record.file_name, record.uploaded_at
    );
    Ok(record)
}

/// Returns every stored résumé, newest first, as summary rows.
pub async fn list_resumes(pool: &PgPool) -> Result<Vec<ResumeSummary>, sqlx::Error> {
    sqlx::query_as::<_, ResumeSummary>(
        r#"
        SELECT id, filename AS file_name, display_name AS name, email, phone, resume_rating
        FROM resumes
        ORDER BY id DESC
        "#,
    )
    .fetch_all(pool)
    .await
}

pub async fn get_resume(pool: &PgPool, id: i32) -> Result<Option<ResumeRecord>, sqlx::Error> {
    let sql = format!("SELECT {RECORD_COLUMNS} FROM resumes WHERE id = $1");
    sqlx::query_as::<_, ResumeRecord>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await
}

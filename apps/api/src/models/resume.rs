use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;
use sqlx::FromRow;

/// One stored résumé. Immutable once inserted.
///
/// JSON-typed columns hold whatever list the model returned, normalised to an
/// array; entry shapes follow the prompt template but are not enforced.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct ResumeRecord {
    pub id: i32,
    pub file_name: String,
    #[serde(skip_serializing)]
    pub uploaded_at: DateTime<Utc>,
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub linkedin_url: Option<String>,
    pub portfolio_url: Option<String>,
    pub summary: Option<String>,
    /// `[{role, company, duration, description: [..]}]`
    pub work_experience: Value,
    /// `[{degree, institution, graduation_year}]`
    pub education: Value,
    pub technical_skills: Value,
    pub soft_skills: Value,
    /// `[{name, description}]`
    pub projects: Value,
    pub certifications: Value,
    pub resume_rating: Option<i32>,
    pub improvement_areas: Option<String>,
    pub upskill_suggestions: Value,
    pub llm_raw: Option<String>,
}

/// Row projection served by the list endpoint.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct ResumeSummary {
    pub id: i32,
    pub file_name: String,
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub resume_rating: Option<i32>,
}

/// Insert payload: everything except the generated id and timestamp.
#[derive(Debug, Clone, PartialEq)]
pub struct NewResume {
    pub file_name: String,
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub linkedin_url: Option<String>,
    pub portfolio_url: Option<String>,
    pub summary: Option<String>,
    pub work_experience: Value,
    pub education: Value,
    pub technical_skills: Value,
    pub soft_skills: Value,
    pub projects: Value,
    pub certifications: Value,
    pub resume_rating: Option<i32>,
    pub improvement_areas: Option<String>,
    pub upskill_suggestions: Value,
    pub llm_raw: Option<String>,
}

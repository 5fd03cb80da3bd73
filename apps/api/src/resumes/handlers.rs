//! Axum route handlers for the résumé API.

use axum::{
    extract::{multipart::MultipartError, Multipart, Path, State},
    http::StatusCode,
    Json,
};
use bytes::Bytes;
use tracing::{debug, info, warn};

use crate::errors::AppError;
use crate::llm_client::ExtractionOutcome;
use crate::models::resume::{ResumeRecord, ResumeSummary};
use crate::pdf_text::extract_text_from_path;
use crate::resumes::mapping::map_to_new_resume;
use crate::resumes::prompts::build_prompt;
use crate::resumes::repository::{get_resume, insert_resume, list_resumes};
use crate::resumes::storage::{is_pdf_filename, save_upload};
use crate::state::AppState;

/// Multipart field expected to carry the PDF.
const FILE_FIELD: &str = "file";

struct UploadedFile {
    file_name: String,
    data: Bytes,
}

/// POST /upload
///
/// Stores the PDF, extracts its text, asks the model for structured fields
/// and persists the result. Returns the stored record.
pub async fn handle_upload(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<ResumeRecord>, AppError> {
    let upload = read_upload(multipart).await?;

    if !is_pdf_filename(&upload.file_name) {
        return Err(AppError::Validation("Only PDF resumes supported".to_string()));
    }

    let path = save_upload(&state.config.upload_dir, &upload.file_name, &upload.data).await?;
    info!("Received {} ({} bytes)", upload.file_name, upload.data.len());

    let text = tokio::task::spawn_blocking(move || extract_text_from_path(&path))
        .await
        .map_err(|e| AppError::Internal(anyhow::anyhow!("PDF extraction task failed: {e}")))?
        .map_err(|e| {
            warn!("{}: {e}", upload.file_name);
            AppError::Validation("Could not extract text from PDF".to_string())
        })?;

    if text.trim().is_empty() {
        return Err(AppError::Validation(
            "Could not extract text from PDF".to_string(),
        ));
    }

    let prompt = build_prompt(&text);
    let (fields, raw) = match state.llm.extract(&prompt).await {
        ExtractionOutcome::Parsed { fields, raw } => (fields, raw),
        ExtractionOutcome::Failed { error, last_raw } => {
            debug!("last raw model output: {last_raw:?}");
            return Err(AppError::Llm {
                reason: error,
                file_name: upload.file_name,
            });
        }
    };

    let new_resume = map_to_new_resume(&upload.file_name, &fields, &raw);
    let record = insert_resume(&state.db, &new_resume).await?;

    Ok(Json(record))
}

/// GET /resumes
pub async fn handle_list_resumes(
    State(state): State<AppState>,
) -> Result<Json<Vec<ResumeSummary>>, AppError> {
    Ok(Json(list_resumes(&state.db).await?))
}

/// GET /resumes/:id
pub async fn handle_get_resume(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<ResumeRecord>, AppError> {
    get_resume(&state.db, id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound("Not found".to_string()))
}

/// Pulls the PDF out of the form: the `file` field, or failing that the
/// first field that carries a filename.
async fn read_upload(mut multipart: Multipart) -> Result<UploadedFile, AppError> {
    let mut fallback: Option<UploadedFile> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| multipart_error("Failed to read form field", e))?
    {
        let is_file_field = field.name() == Some(FILE_FIELD);
        let Some(file_name) = field.file_name().map(String::from) else {
            continue;
        };
        if !is_file_field && fallback.is_some() {
            continue;
        }

        let data = field
            .bytes()
            .await
            .map_err(|e| multipart_error("Failed to read file data", e))?;
        let upload = UploadedFile { file_name, data };

        if is_file_field {
            return Ok(upload);
        }
        fallback = Some(upload);
    }

    fallback.ok_or_else(|| AppError::Validation("No file uploaded".to_string()))
}

/// Body-limit overflows keep their 413; anything else is a malformed form.
fn multipart_error(context: &str, e: MultipartError) -> AppError {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge(format!("{context}: upload exceeds the size limit"))
    } else {
        AppError::Validation(format!("{context}: {e}"))
    }
}

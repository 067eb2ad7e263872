//! Axum route handlers for the Screening API.

use axum::{
    extract::{Multipart, State},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::document::read_pdf_bytes;
use crate::errors::AppError;
use crate::screening::decision::DecisionAgent;
use crate::screening::jd_analyzer::JdAnalyzerAgent;
use crate::screening::resume_parser::{ResumeParserAgent, ResumeSource};
use crate::screening::{Record, ScreeningError};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct ParseResumeRequest {
    pub resume_text: String,
}

#[derive(Debug, Deserialize)]
pub struct AnalyzeJdRequest {
    pub jd_text: String,
}

#[derive(Debug, Deserialize)]
pub struct ScreenRequest {
    pub resume_text: String,
    pub jd_text: String,
}

#[derive(Debug, Serialize)]
pub struct ScreenResponse {
    pub resume: Record,
    pub job: Record,
    pub verdict: Record,
}

/// Pre-parsed records in whatever shape the caller has them.
#[derive(Debug, Deserialize)]
pub struct DecideRequest {
    pub resume: Value,
    pub job: Value,
}

fn require_text(value: &str, field: &str) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/resumes/parse
pub async fn handle_parse_resume(
    State(state): State<AppState>,
    Json(request): Json<ParseResumeRequest>,
) -> Result<Json<Record>, AppError> {
    require_text(&request.resume_text, "resume_text")?;

    let record = ResumeParserAgent::new(state.llm.as_ref())
        .run(ResumeSource::Text(&request.resume_text))
        .await?;

    Ok(Json(record))
}

/// POST /api/v1/resumes/upload
///
/// Multipart upload with the resume PDF in a field named `file`.
pub async fn handle_upload_resume(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<Record>, AppError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Invalid multipart body: {e}")))?
    {
        if field.name() != Some("file") {
            continue;
        }

        let bytes = field
            .bytes()
            .await
            .map_err(|e| AppError::Validation(format!("Failed to read upload: {e}")))?;
        let text = read_pdf_bytes(bytes.to_vec())
            .await
            .map_err(ScreeningError::from)?;

        let record = ResumeParserAgent::new(state.llm.as_ref())
            .parse_text(&text)
            .await?;
        return Ok(Json(record));
    }

    Err(AppError::Validation(
        "multipart field 'file' is required".to_string(),
    ))
}

/// POST /api/v1/jobs/analyze
pub async fn handle_analyze_jd(
    State(state): State<AppState>,
    Json(request): Json<AnalyzeJdRequest>,
) -> Result<Json<Record>, AppError> {
    require_text(&request.jd_text, "jd_text")?;

    let record = JdAnalyzerAgent::new(state.llm.as_ref())
        .run(&request.jd_text)
        .await?;

    Ok(Json(record))
}

/// POST /api/v1/screen
///
/// Full pipeline for one pair: analyze JD → parse resume → decide.
pub async fn handle_screen(
    State(state): State<AppState>,
    Json(request): Json<ScreenRequest>,
) -> Result<Json<ScreenResponse>, AppError> {
    require_text(&request.jd_text, "jd_text")?;
    require_text(&request.resume_text, "resume_text")?;

    let llm = state.llm.as_ref();
    let job = JdAnalyzerAgent::new(llm).run(&request.jd_text).await?;
    let resume = ResumeParserAgent::new(llm)
        .run(ResumeSource::Text(&request.resume_text))
        .await?;
    let verdict = DecisionAgent::new(llm)
        .run(&Value::Object(resume.clone()), &Value::Object(job.clone()))
        .await?;

    Ok(Json(ScreenResponse {
        resume,
        job,
        verdict,
    }))
}

/// POST /api/v1/decide
pub async fn handle_decide(
    State(state): State<AppState>,
    Json(request): Json<DecideRequest>,
) -> Result<Json<Record>, AppError> {
    let verdict = DecisionAgent::new(state.llm.as_ref())
        .run(&request.resume, &request.job)
        .await?;

    Ok(Json(verdict))
}

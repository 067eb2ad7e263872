//! Resume Parser — extracts skills and experience from resume text.

use std::path::Path;

use serde_json::Value;

use crate::document::{ensure_viable, read_document};
use crate::llm_client::LlmBackend;
use crate::screening::prompts::{
    RESUME_PARSE_PROMPT_TEMPLATE, RESUME_PARSE_SYSTEM, RESUME_RETRY_PROMPT_TEMPLATE,
};
use crate::screening::{extract_with_retry, truncate_chars, Record, ResponseError, ScreeningError};

/// Resume text sent on the first attempt.
pub const RESUME_TEXT_LIMIT: usize = 6000;
/// Resume text sent with the simplified retry prompt.
pub const RESUME_RETRY_TEXT_LIMIT: usize = 4000;

/// Where resume text comes from.
#[derive(Debug, Clone, Copy)]
pub enum ResumeSource<'a> {
    /// A document on disk (PDF or plain text).
    Path(&'a Path),
    /// Text that has already been extracted.
    Text(&'a str),
}

pub struct ResumeParserAgent<'a> {
    llm: &'a dyn LlmBackend,
}

impl<'a> ResumeParserAgent<'a> {
    pub fn new(llm: &'a dyn LlmBackend) -> Self {
        Self { llm }
    }

    /// Reads the source and parses it. Unreadable or too-short text is a
    /// `Document` error and no LLM call is made.
    pub async fn run(&self, source: ResumeSource<'_>) -> Result<Record, ScreeningError> {
        let text = match source {
            ResumeSource::Path(path) => read_document(path.to_path_buf()).await?,
            ResumeSource::Text(text) => ensure_viable(text)?.to_string(),
        };
        self.parse_text(&text).await
    }

    /// Parses already-extracted resume text.
    pub async fn parse_text(&self, text: &str) -> Result<Record, ScreeningError> {
        let prompt =
            RESUME_PARSE_PROMPT_TEMPLATE.replace("{resume_text}", truncate_chars(text, RESUME_TEXT_LIMIT));

        extract_with_retry(
            self.llm,
            "resume_parser",
            RESUME_PARSE_SYSTEM,
            &prompt,
            || {
                RESUME_RETRY_PROMPT_TEMPLATE
                    .replace("{resume_text}", truncate_chars(text, RESUME_RETRY_TEXT_LIMIT))
            },
            accept_resume,
        )
        .await
    }
}

/// Greedy acceptance: either skills or experience is enough to work with.
pub fn accept_resume(record: &Record) -> Result<(), ResponseError> {
    if has_entries(record.get("technical_skills")) || has_entries(record.get("work_experience")) {
        Ok(())
    } else {
        Err(ResponseError::SchemaRejected(
            "neither technical_skills nor work_experience has entries".to_string(),
        ))
    }
}

/// Non-empty list, or a non-empty mapping of skill groups.
fn has_entries(value: Option<&Value>) -> bool {
    match value {
        Some(Value::Array(items)) => !items.is_empty(),
        Some(Value::Object(groups)) => !groups.is_empty(),
        _ => false,
    }
}

// Candidate screening: resume parsing, job-description analysis, match decision.
// All LLM calls go through the `LlmBackend` handed to each agent.

pub mod decision;
pub mod handlers;
pub mod jd_analyzer;
pub mod normalizer;
pub mod prompts;
pub mod resume_parser;
pub mod schema;
pub mod skills;

use serde_json::{Map, Value};
use thiserror::Error;
use tracing::debug;

use crate::document::DocumentError;
use crate::llm_client::{LlmBackend, LlmError};
use crate::screening::normalizer::{normalize, try_normalize};

/// A normalized model response: always a JSON object, never a list.
pub type Record = Map<String, Value>;

/// Why a model response was not usable. Both kinds are recoverable
/// through the agents' single retry and never leave an agent.
#[derive(Debug, Error)]
pub enum ResponseError {
    #[error("{0}")]
    Malformed(String),

    #[error("schema rejected: {0}")]
    SchemaRejected(String),
}

/// Terminal failures for one unit of work. Callers decide how to report them.
#[derive(Debug, Error)]
pub enum ScreeningError {
    #[error("LLM error: {0}")]
    Transport(#[from] LlmError),

    #[error("Document error: {0}")]
    Document(#[from] DocumentError),
}

impl ScreeningError {
    /// Renders the failure as an `{"error": ...}` record.
    pub fn into_record(self) -> Record {
        error_record(self.to_string())
    }
}

pub fn error_record(message: impl Into<String>) -> Record {
    let mut record = Record::new();
    record.insert("error".to_string(), Value::String(message.into()));
    record
}

/// Acceptance check run on the first normalized response.
pub type Acceptance = fn(&Record) -> Result<(), ResponseError>;

/// The shared draft → parse → accept-or-retry flow.
///
/// A transport failure on either call is returned as-is and never retried
/// here. A rejected first response triggers exactly one call with the
/// simplified prompt, whose normalized output is final whatever it holds.
pub(crate) async fn extract_with_retry<F>(
    llm: &dyn LlmBackend,
    agent: &'static str,
    system: &str,
    prompt: &str,
    retry_prompt: F,
    accept: Acceptance,
) -> Result<Record, ScreeningError>
where
    F: FnOnce() -> String + Send,
{
    let raw = llm.invoke(prompt, Some(system), true).await?;

    let rejection = match try_normalize(&raw).and_then(|record| accept(&record).map(|()| record)) {
        Ok(record) => return Ok(record),
        Err(rejection) => rejection,
    };

    debug!(agent, %rejection, "first attempt rejected, retrying with simplified prompt");

    let raw = llm.invoke(&retry_prompt(), Some(system), true).await?;
    Ok(normalize(&raw))
}

/// First `max_chars` characters of `text`, cut on a char boundary.
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

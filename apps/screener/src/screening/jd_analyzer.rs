//! JD Analyzer — extracts required/preferred skills and seniority from a job description.

use serde_json::Value;

use crate::llm_client::LlmBackend;
use crate::screening::prompts::{
    JD_ANALYZE_PROMPT_TEMPLATE, JD_ANALYZE_SYSTEM, JD_RETRY_PROMPT_TEMPLATE,
};
use crate::screening::schema::{validate, JD_CONTRACT};
use crate::screening::{extract_with_retry, truncate_chars, Record, ResponseError, ScreeningError};

/// Job-description text sent to the model, on both attempts.
pub const JD_TEXT_LIMIT: usize = 4000;

pub struct JdAnalyzerAgent<'a> {
    llm: &'a dyn LlmBackend,
}

impl<'a> JdAnalyzerAgent<'a> {
    pub fn new(llm: &'a dyn LlmBackend) -> Self {
        Self { llm }
    }

    pub async fn run(&self, jd_text: &str) -> Result<Record, ScreeningError> {
        let jd_text = truncate_chars(jd_text, JD_TEXT_LIMIT);
        let prompt = JD_ANALYZE_PROMPT_TEMPLATE.replace("{jd_text}", jd_text);

        extract_with_retry(
            self.llm,
            "jd_analyzer",
            JD_ANALYZE_SYSTEM,
            &prompt,
            || JD_RETRY_PROMPT_TEMPLATE.replace("{jd_text}", jd_text),
            accept_jd,
        )
        .await
    }
}

/// Any list under `required_skills` is taken as-is, even an empty one.
/// Otherwise the record must satisfy the full job-description contract.
pub fn accept_jd(record: &Record) -> Result<(), ResponseError> {
    if matches!(record.get("required_skills"), Some(Value::Array(_))) {
        return Ok(());
    }

    if validate(&Value::Object(record.clone()), &JD_CONTRACT) {
        Ok(())
    } else {
        Err(ResponseError::SchemaRejected(
            "required_skills is not a list".to_string(),
        ))
    }
}

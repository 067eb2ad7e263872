use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use anyhow::{Context, Result};

use crate::llm_client::DEFAULT_MODEL;

/// Application configuration loaded from environment variables.
/// Fails at startup if the LLM credential is missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub gemini_api_key: String,
    pub gemini_model: String,
    pub llm_max_attempts: u32,
    pub llm_retry_base: Duration,
    pub pace_between_calls: Duration,
    pub pace_between_evaluations: Duration,
    pub jd_dir: PathBuf,
    pub resume_dir: PathBuf,
    pub output_dir: PathBuf,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key lookup; `from_env` passes the process environment.
    pub fn from_vars(var: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let gemini_api_key = var("GEMINI_API_KEY")
            .filter(|key| !key.trim().is_empty())
            .context("Required environment variable 'GEMINI_API_KEY' is not set")?;

        Ok(Config {
            gemini_api_key,
            gemini_model: var("GEMINI_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            llm_max_attempts: parse_var(&var, "LLM_MAX_ATTEMPTS", 3)?,
            llm_retry_base: Duration::from_millis(parse_var(&var, "LLM_RETRY_BASE_MS", 2000)?),
            pace_between_calls: Duration::from_millis(parse_var(
                &var,
                "PACE_BETWEEN_CALLS_MS",
                2000,
            )?),
            pace_between_evaluations: Duration::from_millis(parse_var(
                &var,
                "PACE_BETWEEN_EVALUATIONS_MS",
                10_000,
            )?),
            jd_dir: var("JD_DIR")
                .unwrap_or_else(|| "data/job_descriptions".to_string())
                .into(),
            resume_dir: var("RESUME_DIR")
                .unwrap_or_else(|| "data/resumes".to_string())
                .into(),
            output_dir: var("OUTPUT_DIR")
                .unwrap_or_else(|| "data/sample_outputs".to_string())
                .into(),
            port: parse_var(&var, "PORT", 8080)?,
            rust_log: var("RUST_LOG").unwrap_or_else(|| "info".to_string()),
        })
    }
}

fn parse_var<T>(var: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match var(key) {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("{key} must be a valid {}", std::any::type_name::<T>())),
        None => Ok(default),
    }
}

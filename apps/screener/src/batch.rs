//! Batch screening — every resume against every job description on disk.
//!
//! Flow per job description: analyze once → for each resume: parse → decide →
//! write `result_<resume>_<jd>.json`. Resumes are re-parsed for each job
//! description. A failure for one resume is logged, written as an error
//! record, and the batch moves on.

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::llm_client::LlmBackend;
use crate::pacing::Pacer;
use crate::screening::decision::{match_score, DecisionAgent};
use crate::screening::jd_analyzer::JdAnalyzerAgent;
use crate::screening::resume_parser::{ResumeParserAgent, ResumeSource};
use crate::screening::{Record, ScreeningError};

const JD_EXTENSIONS: &[&str] = &["txt"];
const RESUME_EXTENSIONS: &[&str] = &["pdf", "txt"];

#[derive(Debug, Clone)]
pub struct BatchOptions {
    pub jd_dir: PathBuf,
    pub resume_dir: PathBuf,
    pub output_dir: PathBuf,
    /// Minimum spacing between agent calls.
    pub call_spacing: Duration,
    /// Pause after each resume evaluation, successful or not.
    pub evaluation_pause: Duration,
}

#[derive(Debug, Clone, Serialize)]
pub struct BatchSummary {
    pub run_id: Uuid,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub job_descriptions: usize,
    pub resumes: usize,
    pub evaluated: usize,
    pub failed: usize,
    pub skipped_job_descriptions: usize,
    /// Result files written more than once in this run (e.g. `jane.pdf` and `jane.txt`).
    pub overwritten: usize,
}

pub async fn run_batch(llm: &dyn LlmBackend, options: &BatchOptions) -> Result<BatchSummary> {
    let run_id = Uuid::new_v4();
    let started_at = Utc::now();

    let jd_files = list_inputs(&options.jd_dir, JD_EXTENSIONS)?;
    let resume_files = list_inputs(&options.resume_dir, RESUME_EXTENSIONS)?;

    let mut summary = BatchSummary {
        run_id,
        started_at,
        finished_at: started_at,
        job_descriptions: jd_files.len(),
        resumes: resume_files.len(),
        evaluated: 0,
        failed: 0,
        skipped_job_descriptions: 0,
        overwritten: 0,
    };

    if jd_files.is_empty() || resume_files.is_empty() {
        warn!(
            "Missing input files: {} job descriptions in {}, {} resumes in {}",
            jd_files.len(),
            options.jd_dir.display(),
            resume_files.len(),
            options.resume_dir.display()
        );
        summary.finished_at = Utc::now();
        return Ok(summary);
    }

    tokio::fs::create_dir_all(&options.output_dir)
        .await
        .with_context(|| format!("Failed to create {}", options.output_dir.display()))?;

    info!(
        %run_id,
        "Starting screening: {} resumes x {} job descriptions",
        resume_files.len(),
        jd_files.len()
    );

    let jd_agent = JdAnalyzerAgent::new(llm);
    let resume_agent = ResumeParserAgent::new(llm);
    let decision_agent = DecisionAgent::new(llm);

    let mut calls = Pacer::new(options.call_spacing);
    let evaluations = Pacer::new(options.evaluation_pause);
    let mut written: HashSet<PathBuf> = HashSet::new();

    for jd_path in &jd_files {
        info!("Analyzing job description: {}", jd_path.display());

        let jd_text = match tokio::fs::read_to_string(jd_path).await {
            Ok(text) => text,
            Err(e) => {
                error!("Failed to read {}: {e}", jd_path.display());
                summary.skipped_job_descriptions += 1;
                continue;
            }
        };

        calls.ready().await;
        let jd_record = match jd_agent.run(&jd_text).await {
            Ok(record) => Value::Object(record),
            Err(e) => {
                error!("Failed to analyze {}: {e}", jd_path.display());
                summary.skipped_job_descriptions += 1;
                continue;
            }
        };

        for resume_path in &resume_files {
            info!("Evaluating resume: {}", resume_path.display());

            let outcome = evaluate(
                &resume_agent,
                &decision_agent,
                &mut calls,
                resume_path,
                &jd_record,
            )
            .await;

            let output_path = options
                .output_dir
                .join(output_file_name(resume_path, jd_path));

            let artifact = match outcome {
                Ok(verdict) => {
                    summary.evaluated += 1;
                    info!(
                        "Evaluated {} (match_score: {})",
                        resume_path.display(),
                        match_score(&verdict)
                            .map(|s| format!("{s:.2}"))
                            .unwrap_or_else(|| "n/a".to_string())
                    );
                    println!("\n--- EVALUATION RESULT ---");
                    println!(
                        "{}",
                        serde_json::to_string_pretty(&verdict).unwrap_or_default()
                    );
                    verdict
                }
                Err(e) => {
                    summary.failed += 1;
                    warn!("Failed to evaluate {}: {e}", resume_path.display());
                    e.into_record()
                }
            };

            if !written.insert(output_path.clone()) {
                summary.overwritten += 1;
                warn!(
                    "{} was already written in this run and will be overwritten by {}",
                    output_path.display(),
                    resume_path.display()
                );
            }

            if let Err(e) = write_artifact(&output_path, &artifact).await {
                error!("{e:#}");
            }

            evaluations.pause().await;
        }
    }

    summary.finished_at = Utc::now();
    info!(
        %run_id,
        evaluated = summary.evaluated,
        failed = summary.failed,
        overwritten = summary.overwritten,
        skipped_job_descriptions = summary.skipped_job_descriptions,
        "Screening finished"
    );

    Ok(summary)
}

async fn evaluate(
    resume_agent: &ResumeParserAgent<'_>,
    decision_agent: &DecisionAgent<'_>,
    calls: &mut Pacer,
    resume_path: &Path,
    jd_record: &Value,
) -> Result<Record, ScreeningError> {
    calls.ready().await;
    let resume_record = resume_agent.run(ResumeSource::Path(resume_path)).await?;

    calls.ready().await;
    decision_agent
        .run(&Value::Object(resume_record), jd_record)
        .await
}

async fn write_artifact(path: &Path, record: &Record) -> Result<()> {
    let body = serde_json::to_vec_pretty(record)?;
    tokio::fs::write(path, body)
        .await
        .with_context(|| format!("Failed to write {}", path.display()))
}

/// Files in `dir` whose extension is one of `extensions`, sorted by name.
fn list_inputs(dir: &Path, extensions: &[&str]) -> Result<Vec<PathBuf>> {
    let entries = std::fs::read_dir(dir)
        .with_context(|| format!("Failed to list {}", dir.display()))?;

    let mut files = Vec::new();
    for entry in entries {
        let path = entry?.path();
        let matches = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| extensions.contains(&e));
        if matches && path.is_file() {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

/// `result_<resume>_<jd>.json`, each name cut at its first `.`.
fn output_file_name(resume_path: &Path, jd_path: &Path) -> String {
    format!("result_{}_{}.json", base_name(resume_path), base_name(jd_path))
}

fn base_name(path: &Path) -> &str {
    path.file_name()
        .and_then(|n| n.to_str())
        .and_then(|n| n.split('.').next())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm_client::testing::ScriptedLlm;
    use serde_json::json;
    use std::fs;

    const JD: &str = "Platform Engineer. Requires: Cloud experience, Database experience.";
    const RESUME: &str = "Jordan Park — Site Reliability Engineer. Skills: AWS, PostgreSQL, \
        Terraform. Ran multi-region Postgres clusters on AWS for four years.";

    struct Dirs {
        _root: tempfile::TempDir,
        options: BatchOptions,
    }

    fn dirs() -> Dirs {
        let root = tempfile::tempdir().unwrap();
        let jd_dir = root.path().join("job_descriptions");
        let resume_dir = root.path().join("resumes");
        fs::create_dir_all(&jd_dir).unwrap();
        fs::create_dir_all(&resume_dir).unwrap();
        let options = BatchOptions {
            jd_dir,
            resume_dir,
            output_dir: root.path().join("out"),
            call_spacing: Duration::ZERO,
            evaluation_pause: Duration::ZERO,
        };
        Dirs {
            _root: root,
            options,
        }
    }

    #[test]
    fn test_output_file_name_uses_first_segment() {
        let name = output_file_name(
            Path::new("/data/resumes/jane.doe.pdf"),
            Path::new("/data/jds/backend.txt"),
        );
        assert_eq!(name, "result_jane_backend.json");
    }

    #[test]
    fn test_list_inputs_filters_and_sorts() {
        let d = dirs();
        for name in ["b.pdf", "a.txt", "notes.docx", "c.PDF"] {
            fs::write(d.options.resume_dir.join(name), RESUME).unwrap();
        }
        let files = list_inputs(&d.options.resume_dir, RESUME_EXTENSIONS).unwrap();
        let names: Vec<&str> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_str().unwrap())
            .collect();
        assert_eq!(names, vec!["a.txt", "b.pdf"]);
    }

    #[test]
    fn test_missing_directory_is_an_error() {
        assert!(list_inputs(Path::new("/nonexistent/jds"), JD_EXTENSIONS).is_err());
    }

    #[tokio::test]
    async fn test_empty_inputs_do_no_work() {
        let d = dirs();
        fs::write(d.options.jd_dir.join("backend.txt"), JD).unwrap();
        let llm = ScriptedLlm::new();

        let summary = run_batch(&llm, &d.options).await.unwrap();
        assert_eq!(summary.job_descriptions, 1);
        assert_eq!(summary.resumes, 0);
        assert_eq!(summary.evaluated, 0);
        assert_eq!(llm.call_count(), 0);
        assert!(!d.options.output_dir.exists());
    }

    #[tokio::test]
    async fn test_failed_resume_does_not_stop_batch() {
        let d = dirs();
        fs::write(d.options.jd_dir.join("backend.txt"), JD).unwrap();
        fs::write(d.options.resume_dir.join("a_short.txt"), "Too short").unwrap();
        fs::write(d.options.resume_dir.join("b_jordan.txt"), RESUME).unwrap();

        let llm = ScriptedLlm::new()
            .reply(r#"{"required_skills": ["Cloud experience", "Database experience"]}"#)
            .reply(r#"{"technical_skills": ["AWS", "PostgreSQL", "Terraform"]}"#)
            .reply(r#"{"match_score": 0.92, "recommendation": "Advance", "requires_human": false,
                      "confidence": 0.85, "reasoning_summary": "Cloud and database intent met."}"#);

        let summary = run_batch(&llm, &d.options).await.unwrap();
        assert_eq!(summary.evaluated, 1);
        assert_eq!(summary.failed, 1);
        assert_eq!(llm.call_count(), 3);

        let written = fs::read_to_string(d.options.output_dir.join("result_b_jordan_backend.json"))
            .unwrap();
        let verdict: Value = serde_json::from_str(&written).unwrap();
        assert_eq!(verdict["match_score"], json!(0.92));

        let failure =
            fs::read_to_string(d.options.output_dir.join("result_a_short_backend.json")).unwrap();
        let failure: Value = serde_json::from_str(&failure).unwrap();
        assert!(failure["error"]
            .as_str()
            .unwrap()
            .starts_with("Document error: extracted text too short"));

        let decision_prompt = &llm.calls()[2].prompt;
        assert!(decision_prompt.contains(r#"["Cloud experience", "Database experience"]"#));
        assert!(decision_prompt.contains(r#"["AWS", "PostgreSQL", "Terraform"]"#));
    }

    #[tokio::test]
    async fn test_resumes_are_reparsed_per_job_description() {
        let d = dirs();
        fs::write(d.options.jd_dir.join("backend.txt"), JD).unwrap();
        fs::write(d.options.jd_dir.join("data.txt"), JD).unwrap();
        fs::write(d.options.resume_dir.join("jordan.txt"), RESUME).unwrap();

        let mut llm = ScriptedLlm::new();
        for _ in 0..2 {
            llm = llm
                .reply(r#"{"required_skills": ["Cloud experience"]}"#)
                .reply(r#"{"technical_skills": ["AWS"]}"#)
                .reply(r#"{"match_score": 0.9}"#);
        }

        let summary = run_batch(&llm, &d.options).await.unwrap();
        assert_eq!(summary.evaluated, 2);
        assert_eq!(llm.call_count(), 6);
        assert!(d.options.output_dir.join("result_jordan_backend.json").exists());
        assert!(d.options.output_dir.join("result_jordan_data.json").exists());
    }

    #[tokio::test]
    async fn test_jd_transport_failure_skips_that_job_description() {
        let d = dirs();
        fs::write(d.options.jd_dir.join("backend.txt"), JD).unwrap();
        fs::write(d.options.resume_dir.join("jordan.txt"), RESUME).unwrap();

        let llm = ScriptedLlm::new().fail(503);
        let summary = run_batch(&llm, &d.options).await.unwrap();
        assert_eq!(summary.skipped_job_descriptions, 1);
        assert_eq!(summary.evaluated, 0);
        assert_eq!(llm.call_count(), 1);
    }

    #[tokio::test]
    async fn test_same_stem_resumes_are_flagged_as_overwritten() {
        let d = dirs();
        fs::write(d.options.jd_dir.join("backend.txt"), JD).unwrap();
        fs::write(d.options.resume_dir.join("jordan.pdf"), "Too short").unwrap();
        fs::write(d.options.resume_dir.join("jordan.txt"), RESUME).unwrap();

        let llm = ScriptedLlm::new()
            .reply(r#"{"required_skills": ["Cloud experience"]}"#)
            .reply(r#"{"technical_skills": ["AWS"]}"#)
            .reply(r#"{"match_score": 0.9}"#);

        let summary = run_batch(&llm, &d.options).await.unwrap();
        assert_eq!(summary.failed, 1);
        assert_eq!(summary.evaluated, 1);
        assert_eq!(summary.overwritten, 1);

        let written =
            fs::read_to_string(d.options.output_dir.join("result_jordan_backend.json")).unwrap();
        let verdict: Value = serde_json::from_str(&written).unwrap();
        assert_eq!(verdict["match_score"], json!(0.9));
    }

    #[tokio::test]
    async fn test_distinct_stems_are_not_flagged() {
        let d = dirs();
        fs::write(d.options.jd_dir.join("backend.txt"), JD).unwrap();
        fs::write(d.options.resume_dir.join("jordan.txt"), RESUME).unwrap();

        let llm = ScriptedLlm::new()
            .reply(r#"{"required_skills": ["Cloud experience"]}"#)
            .reply(r#"{"technical_skills": ["AWS"]}"#)
            .reply(r#"{"match_score": 0.9}"#);

        let summary = run_batch(&llm, &d.options).await.unwrap();
        assert_eq!(summary.overwritten, 0);
    }

    #[tokio::test]
    async fn test_unparseable_verdict_is_still_written() {
        let d = dirs();
        fs::write(d.options.jd_dir.join("backend.txt"), JD).unwrap();
        fs::write(d.options.resume_dir.join("jordan.txt"), RESUME).unwrap();

        let llm = ScriptedLlm::new()
            .reply(r#"{"required_skills": ["Cloud experience"]}"#)
            .reply(r#"{"technical_skills": ["AWS"]}"#)
            .reply("I think this candidate is a good fit.");

        let summary = run_batch(&llm, &d.options).await.unwrap();
        assert_eq!(summary.evaluated, 1);
        let written =
            fs::read_to_string(d.options.output_dir.join("result_jordan_backend.json")).unwrap();
        let verdict: Value = serde_json::from_str(&written).unwrap();
        assert_eq!(verdict["match_score"], json!(0.0));
    }
}

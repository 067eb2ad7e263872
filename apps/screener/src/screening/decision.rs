//! Decision Agent — asks the model whether a candidate's skills meet a job's requirements.
//!
//! Scoring itself is delegated: this module only resolves the two skill
//! lists, renders the matching policy into the prompt, and normalizes the
//! verdict. There is no retry; an unparseable verdict becomes a zero score.

use serde_json::{json, Value};

use crate::llm_client::LlmBackend;
use crate::screening::normalizer::try_normalize;
use crate::screening::prompts::{DECISION_PROMPT_TEMPLATE, DECISION_SYSTEM};
use crate::screening::skills::resolve_skills;
use crate::screening::{Record, ScreeningError};

/// Budget for each rendered skill list in the prompt.
pub const SKILL_LIST_LIMIT: usize = 4000;
/// Minimum score the prompt asks for when requirement intent is met.
pub const INTENT_MATCH_THRESHOLD: f64 = 0.8;

pub struct DecisionAgent<'a> {
    llm: &'a dyn LlmBackend,
}

impl<'a> DecisionAgent<'a> {
    pub fn new(llm: &'a dyn LlmBackend) -> Self {
        Self { llm }
    }

    /// Produces a match verdict for one resume against one job description.
    /// Both inputs may be any JSON value; see `sanitize_input`.
    pub async fn run(&self, resume: &Value, jd: &Value) -> Result<Record, ScreeningError> {
        let jd_skills = resolve_skills(&sanitize_input(jd));
        let candidate_skills = resolve_skills(&sanitize_input(resume));

        let prompt = build_decision_prompt(&jd_skills, &candidate_skills);
        let raw = self.llm.invoke(&prompt, Some(DECISION_SYSTEM), true).await?;

        Ok(try_normalize(&raw).unwrap_or_else(|e| zero_verdict(&e.to_string())))
    }
}

/// Mappings pass through; a list contributes its first element; anything
/// else (or an empty list) becomes an empty record.
pub fn sanitize_input(value: &Value) -> Record {
    match value {
        Value::Object(map) => map.clone(),
        Value::Array(items) => items
            .first()
            .and_then(Value::as_object)
            .cloned()
            .unwrap_or_default(),
        _ => Record::new(),
    }
}

pub fn build_decision_prompt(jd_skills: &[String], candidate_skills: &[String]) -> String {
    DECISION_PROMPT_TEMPLATE
        .replace("{jd_skills}", &render_skills(jd_skills, SKILL_LIST_LIMIT))
        .replace(
            "{candidate_skills}",
            &render_skills(candidate_skills, SKILL_LIST_LIMIT),
        )
        .replace("{intent_threshold}", &INTENT_MATCH_THRESHOLD.to_string())
}

/// Renders `["a", "b"]`, dropping trailing skills that would push the
/// rendering past `limit` characters.
fn render_skills(skills: &[String], limit: usize) -> String {
    let mut rendered = Vec::new();
    let mut used = 2;

    for skill in skills {
        let quoted = Value::String(skill.clone()).to_string();
        let cost = quoted.chars().count() + if rendered.is_empty() { 0 } else { 2 };
        if used + cost > limit {
            break;
        }
        used += cost;
        rendered.push(quoted);
    }

    format!("[{}]", rendered.join(", "))
}

fn zero_verdict(message: &str) -> Record {
    let mut verdict = Record::new();
    verdict.insert("match_score".to_string(), json!(0.0));
    verdict.insert(
        "reasoning_summary".to_string(),
        Value::String(format!("Error: {message}")),
    );
    verdict
}

/// The verdict's `match_score`, when the model supplied a number.
pub fn match_score(verdict: &Record) -> Option<f64> {
    verdict.get("match_score").and_then(Value::as_f64)
}

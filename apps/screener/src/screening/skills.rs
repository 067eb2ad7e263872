//! Skill resolver — finds the list of skill strings in a loosely shaped record.
//!
//! Models name the skills field differently from call to call, so resolution
//! is an ordered list of strategies. The first strategy that applies wins,
//! even if it yields an empty list.

use serde_json::Value;

use crate::screening::Record;

pub type SkillList = Vec<String>;

type Strategy = fn(&Record) -> Option<SkillList>;

/// Fixed priority order. Resume records use `technical_skills`, analyzed job
/// descriptions use `required_skills`.
const STRATEGIES: &[Strategy] = &[
    from_technical_skills,
    from_required_skills,
    from_generic_skills,
    from_first_string_list,
];

pub fn resolve_skills(record: &Record) -> SkillList {
    STRATEGIES
        .iter()
        .find_map(|strategy| strategy(record))
        .unwrap_or_default()
}

pub fn from_technical_skills(record: &Record) -> Option<SkillList> {
    record.get("technical_skills").map(flatten)
}

/// Job-description skills are expected to be flat already. Anything else is
/// kept as text so the requirements still reach the prompt: a mapping of
/// lists is flattened, any other non-empty mapping becomes its JSON text.
pub fn from_required_skills(record: &Record) -> Option<SkillList> {
    record.get("required_skills").map(|value| match value {
        Value::Array(items) => items.iter().filter_map(skill_text).collect(),
        Value::Object(groups) => {
            let flat = flatten(value);
            if flat.is_empty() && !groups.is_empty() {
                vec![value.to_string()]
            } else {
                flat
            }
        }
        Value::String(s) if s.trim().is_empty() => Vec::new(),
        other => skill_text(other).into_iter().collect(),
    })
}

pub fn from_generic_skills(record: &Record) -> Option<SkillList> {
    record.get("skills").map(flatten)
}

/// Last resort: the first non-empty list whose first element is a string.
pub fn from_first_string_list(record: &Record) -> Option<SkillList> {
    record.values().find_map(|value| match value.as_array() {
        Some(items) if items.first().is_some_and(Value::is_string) => {
            Some(items.iter().filter_map(skill_text).collect())
        }
        _ => None,
    })
}

/// Lists pass through; a mapping contributes every list-valued entry in key
/// order; anything else contributes nothing.
fn flatten(value: &Value) -> SkillList {
    match value {
        Value::Array(items) => items.iter().filter_map(skill_text).collect(),
        Value::Object(groups) => groups
            .values()
            .filter_map(Value::as_array)
            .flatten()
            .filter_map(skill_text)
            .collect(),
        _ => Vec::new(),
    }
}

fn skill_text(item: &Value) -> Option<String> {
    match item {
        Value::String(s) => Some(s.clone()),
        Value::Null => None,
        other => Some(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(value: Value) -> Record {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_nested_technical_skills_flatten_in_key_order() {
        let r = record(json!({"technical_skills": {"languages": ["Python"], "tools": ["Git"]}}));
        assert_eq!(resolve_skills(&r), vec!["Python", "Git"]);
    }

    #[test]
    fn test_nested_flatten_drops_non_list_values() {
        let r = record(json!({
            "technical_skills": {
                "summary": "full-stack",
                "frontend": ["React", "TypeScript"],
                "years": 5,
                "backend": ["Django"]
            }
        }));
        assert_eq!(resolve_skills(&r), vec!["React", "TypeScript", "Django"]);
    }

    #[test]
    fn test_required_skills_used_unchanged() {
        let r = record(json!({"required_skills": ["SQL", "AWS"]}));
        assert_eq!(resolve_skills(&r), vec!["SQL", "AWS"]);
    }

    #[test]
    fn test_required_skills_mapping_keeps_its_lists() {
        let r = record(json!({"required_skills": {"must_have": ["AWS", "PostgreSQL"], "level": "Senior"}}));
        assert_eq!(resolve_skills(&r), vec!["AWS", "PostgreSQL"]);
    }

    #[test]
    fn test_required_skills_mapping_without_lists_becomes_text() {
        let r = record(json!({"required_skills": {"primary": "Kubernetes"}}));
        assert_eq!(resolve_skills(&r), vec![r#"{"primary":"Kubernetes"}"#]);
        assert!(resolve_skills(&record(json!({"required_skills": {}}))).is_empty());
    }

    #[test]
    fn test_required_skills_scalars() {
        assert_eq!(
            resolve_skills(&record(json!({"required_skills": "Terraform"}))),
            vec!["Terraform"]
        );
        assert!(resolve_skills(&record(json!({"required_skills": "  "}))).is_empty());
        assert!(resolve_skills(&record(json!({"required_skills": null}))).is_empty());
    }

    #[test]
    fn test_heuristic_skips_non_string_lists() {
        let r = record(json!({"other": [1, 2, 3], "notes": ["React"]}));
        assert_eq!(resolve_skills(&r), vec!["React"]);
    }

    #[test]
    fn test_empty_record_resolves_to_empty() {
        assert!(resolve_skills(&Record::new()).is_empty());
    }

    #[test]
    fn test_technical_skills_beats_required_skills() {
        let r = record(json!({"required_skills": ["Java"], "technical_skills": ["Kotlin"]}));
        assert_eq!(resolve_skills(&r), vec!["Kotlin"]);
    }

    #[test]
    fn test_present_but_empty_key_still_wins() {
        let r = record(json!({"technical_skills": [], "keywords": ["Rust"]}));
        assert!(resolve_skills(&r).is_empty());
    }

    #[test]
    fn test_generic_skills_key_flattens() {
        let r = record(json!({"skills": {"cloud": ["AWS"], "data": ["Postgres", "Redis"]}}));
        assert_eq!(resolve_skills(&r), vec!["AWS", "Postgres", "Redis"]);
    }

    #[test]
    fn test_heuristic_skips_lists_of_objects() {
        let r = record(json!({
            "work_experience": [{"role": "Engineer"}],
            "certifications": ["CKA"]
        }));
        assert_eq!(resolve_skills(&r), vec!["CKA"]);
    }

    #[test]
    fn test_heuristic_none_when_no_string_list() {
        let r = record(json!({"name": "Ada", "scores": [0.5], "empty": []}));
        assert_eq!(from_first_string_list(&r), None);
        assert!(resolve_skills(&r).is_empty());
    }

    #[test]
    fn test_each_strategy_ignores_records_without_its_key() {
        let r = record(json!({"notes": ["React"]}));
        assert_eq!(from_technical_skills(&r), None);
        assert_eq!(from_required_skills(&r), None);
        assert_eq!(from_generic_skills(&r), None);
        assert_eq!(from_first_string_list(&r), Some(vec!["React".to_string()]));
    }

    #[test]
    fn test_scalar_technical_skills_yields_empty() {
        let r = record(json!({"technical_skills": "Rust, Go"}));
        assert!(resolve_skills(&r).is_empty());
    }
}

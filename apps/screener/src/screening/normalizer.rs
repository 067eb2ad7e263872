//! Response normalizer — turns raw model text into a JSON object record.
//!
//! Models wrap JSON in markdown fences, prepend prose, return arrays, or
//! truncate output. `normalize` never fails: anything it cannot recover
//! becomes an `{"error": ...}` record.

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

use crate::screening::{error_record, Record, ResponseError};

pub const NO_JSON_FOUND: &str = "No JSON found in response";
pub const DEEP_PARSE_FAILED: &str = "Deep JSON parsing failed";
pub const NOT_AN_OBJECT: &str = "Response JSON is not an object";

/// A ```json opener (plus one whitespace char) or a closing fence (plus one
/// preceding whitespace char), wherever they appear.
static CODE_FENCE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"```json\s?|\s?```").expect("code fence pattern is valid"));

/// Normalizes raw model text, folding every failure into an error record.
pub fn normalize(raw: &str) -> Record {
    try_normalize(raw).unwrap_or_else(|e| error_record(e.to_string()))
}

/// Strict parse first, then the greedy first-`{`..last-`}` region.
/// Only those two candidates are tried.
pub fn try_normalize(raw: &str) -> Result<Record, ResponseError> {
    let unfenced = CODE_FENCE.replace_all(raw, "");
    let text = unfenced.trim();

    let value = match serde_json::from_str::<Value>(text) {
        Ok(value) => value,
        Err(_) => {
            let region = brace_region(text)
                .ok_or_else(|| ResponseError::Malformed(NO_JSON_FOUND.to_string()))?;
            serde_json::from_str::<Value>(region)
                .map_err(|_| ResponseError::Malformed(DEEP_PARSE_FAILED.to_string()))?
        }
    };

    into_record(value)
}

/// Text from the first `{` through the last `}`, if the last follows the first.
fn brace_region(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    (end > start).then(|| &text[start..=end])
}

/// Top-level arrays collapse to their first element, or `{}` when empty.
fn into_record(value: Value) -> Result<Record, ResponseError> {
    match value {
        Value::Object(map) => Ok(map),
        Value::Array(items) => match items.into_iter().next() {
            None => Ok(Record::new()),
            Some(Value::Object(map)) => Ok(map),
            Some(_) => Err(ResponseError::Malformed(NOT_AN_OBJECT.to_string())),
        },
        _ => Err(ResponseError::Malformed(NOT_AN_OBJECT.to_string())),
    }
}

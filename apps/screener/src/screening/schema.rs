//! Declarative required-key / required-type contracts for normalized records.

use serde_json::Value;

/// Runtime type of a JSON value. `Null` is a type of its own, and integers
/// and floats are distinct: no coercion happens between kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    Null,
    Boolean,
    Integer,
    Float,
    String,
    Sequence,
    Mapping,
}

impl ValueKind {
    pub fn of(value: &Value) -> Self {
        match value {
            Value::Null => ValueKind::Null,
            Value::Bool(_) => ValueKind::Boolean,
            Value::Number(n) if n.is_f64() => ValueKind::Float,
            Value::Number(_) => ValueKind::Integer,
            Value::String(_) => ValueKind::String,
            Value::Array(_) => ValueKind::Sequence,
            Value::Object(_) => ValueKind::Mapping,
        }
    }
}

/// One required key and the kinds it may hold.
#[derive(Debug, Clone, Copy)]
pub struct FieldRule<'a> {
    pub key: &'a str,
    pub accepts: &'a [ValueKind],
}

#[derive(Debug, Clone, Copy)]
pub struct SchemaContract<'a> {
    pub fields: &'a [FieldRule<'a>],
}

/// Shape of a fully analyzed job description.
pub const JD_CONTRACT: SchemaContract<'static> = SchemaContract {
    fields: &[
        FieldRule {
            key: "required_skills",
            accepts: &[ValueKind::Sequence],
        },
        FieldRule {
            key: "preferred_skills",
            accepts: &[ValueKind::Sequence],
        },
        FieldRule {
            key: "seniority",
            accepts: &[ValueKind::String],
        },
    ],
};

/// True when `value` is a mapping holding every contract key with an accepted
/// kind. Keys outside the contract are ignored.
pub fn validate(value: &Value, contract: &SchemaContract<'_>) -> bool {
    let Some(record) = value.as_object() else {
        return false;
    };

    contract.fields.iter().all(|rule| {
        record
            .get(rule.key)
            .is_some_and(|v| rule.accepts.contains(&ValueKind::of(v)))
    })
}

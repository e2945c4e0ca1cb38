//! Structured response decoding.
//!
//! Model replies are untrusted text. Nothing downstream touches a reply until it has been
//! located, validated against a [`ResponseShape`] and converted into a typed value here.

mod extract;
pub mod shape;

pub use shape::{FieldKind, FieldSpec, ResponseShape};

use crate::errors::DecodeError;
use crate::model::{Rationale, Verdict, VerdictLabel};
use jsonschema::Draft;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;

const MAX_VIOLATIONS: usize = 10;

/// Replies above this size are rejected before any JSON scan.
pub const MAX_REPLY_BYTES: usize = 64 * 1024;

/// Locates the reply object for `shape` and validates it against the shape schema.
///
/// Objects that carry none of the shape's fields are treated as noise. When several
/// candidate objects remain and they disagree, the reply is rejected as ambiguous, as is a
/// candidate that repeats a shape field with different values.
pub fn decode_value(raw: &str, shape: &ResponseShape) -> Result<Value, DecodeError> {
    if raw.len() > MAX_REPLY_BYTES {
        return Err(DecodeError::Malformed {
            shape: shape.name().to_string(),
            detail: format!(
                "reply is {} bytes, limit is {MAX_REPLY_BYTES}",
                raw.len()
            ),
        });
    }

    let objects = extract::json_objects(raw);
    if objects.is_empty() {
        return Err(DecodeError::NoJson {
            shape: shape.name().to_string(),
        });
    }

    let mut candidates: Vec<Value> = Vec::new();
    for obj in &objects {
        let carries_field = obj
            .value
            .as_object()
            .map(|m| m.keys().any(|k| shape.has_field(k)))
            .unwrap_or(false);
        if !carries_field {
            continue;
        }
        if let Some(field) = obj.conflicting_keys.iter().find(|k| shape.has_field(k)) {
            return Err(DecodeError::DuplicateField {
                shape: shape.name().to_string(),
                field: field.clone(),
            });
        }
        if !candidates.contains(&obj.value) {
            candidates.push(obj.value.clone());
        }
    }

    let selected = match candidates.len() {
        0 => objects
            .into_iter()
            .next()
            .map(|o| o.value)
            .unwrap_or(Value::Null),
        1 => candidates.remove(0),
        count => {
            return Err(DecodeError::Ambiguous {
                shape: shape.name().to_string(),
                count,
            })
        }
    };

    validate(&selected, shape)?;
    Ok(selected)
}

fn validate(value: &Value, shape: &ResponseShape) -> Result<(), DecodeError> {
    let validator = jsonschema::options()
        .with_draft(Draft::Draft202012)
        .build(&shape.json_schema())
        .map_err(|e| DecodeError::Malformed {
            shape: shape.name().to_string(),
            detail: format!("shape schema does not compile: {e}"),
        })?;

    if validator.is_valid(value) {
        return Ok(());
    }

    let violations: Vec<String> = validator
        .iter_errors(value)
        .take(MAX_VIOLATIONS)
        .map(|e| e.to_string())
        .collect();
    Err(DecodeError::SchemaViolation {
        shape: shape.name().to_string(),
        violations,
    })
}

/// Decodes `raw` into any serde type after shape validation.
pub fn decode<T: DeserializeOwned>(raw: &str, shape: &ResponseShape) -> Result<T, DecodeError> {
    let value = decode_value(raw, shape)?;
    serde_json::from_value(value).map_err(|e| DecodeError::Malformed {
        shape: shape.name().to_string(),
        detail: e.to_string(),
    })
}

#[derive(Deserialize)]
struct VerdictReply {
    missing: Vec<String>,
    verdict: String,
}

#[derive(Deserialize)]
struct ReasonReply {
    reason: String,
}

/// Decodes a `{missing, verdict}` reply. The verdict literal is matched case-insensitively.
pub fn decode_verdict(raw: &str) -> Result<Verdict, DecodeError> {
    let reply: VerdictReply = decode(raw, &ResponseShape::verdict())?;
    let label: VerdictLabel = reply.verdict.parse()?;
    Ok(Verdict {
        missing_elements: reply.missing,
        label,
    })
}

pub fn decode_rationale(raw: &str) -> Result<Rationale, DecodeError> {
    let reply: ReasonReply = decode(raw, &ResponseShape::reason())?;
    Ok(Rationale {
        reason: reply.reason,
    })
}

//! Structural checks for model output before it is trusted as an
//! [`AnalysisResult`](crate::AnalysisResult).
//!
//! The model is only asked for a shape in prose, so every key and type is
//! verified here and the first mismatch is reported with its JSON path.

use serde_json::{Map, Value};
use thiserror::Error;

use crate::types::ContentType;

/// A mismatch between the model output and the expected notes structure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("model output does not match notes schema at '{path}': expected {expected}")]
pub struct SchemaViolation {
    pub path: String,
    pub expected: String,
}

impl SchemaViolation {
    fn new(path: impl Into<String>, expected: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            expected: expected.into(),
        }
    }
}

/// Validate that `value` has the notes shape. Unknown extra keys are allowed.
pub fn validate_analysis(value: &Value) -> Result<(), SchemaViolation> {
    let root = expect_object(value, "$")?;

    expect_string(root, "topic", "topic")?;
    expect_string(root, "summary", "summary")?;

    for (i, section) in expect_array(root, "sections", "sections")?.iter().enumerate() {
        validate_section(section, &format!("sections[{i}]"))?;
    }
    for (i, card) in expect_array(root, "flashcards", "flashcards")?.iter().enumerate() {
        let path = format!("flashcards[{i}]");
        let card = expect_object(card, &path)?;
        expect_string(card, "question", &format!("{path}.question"))?;
        expect_string(card, "answer", &format!("{path}.answer"))?;
    }
    Ok(())
}

fn validate_section(value: &Value, path: &str) -> Result<(), SchemaViolation> {
    let section = expect_object(value, path)?;
    expect_string(section, "title", &format!("{path}.title"))?;
    expect_string(section, "content", &format!("{path}.content"))?;

    let ct_path = format!("{path}.content_type");
    let content_type = expect_string(section, "content_type", &ct_path)?;
    if ContentType::parse(content_type).is_none() {
        let allowed: Vec<_> = ContentType::ALL.iter().map(|c| c.as_str()).collect();
        return Err(SchemaViolation::new(
            ct_path,
            format!("one of {}", allowed.join(", ")),
        ));
    }

    let kp_path = format!("{path}.key_points");
    for (i, point) in expect_array(section, "key_points", &kp_path)?.iter().enumerate() {
        if !point.is_string() {
            return Err(SchemaViolation::new(format!("{kp_path}[{i}]"), "a string"));
        }
    }
    Ok(())
}

fn expect_object<'a>(value: &'a Value, path: &str) -> Result<&'a Map<String, Value>, SchemaViolation> {
    value
        .as_object()
        .ok_or_else(|| SchemaViolation::new(path, "an object"))
}

fn expect_string<'a>(
    obj: &'a Map<String, Value>,
    key: &str,
    path: &str,
) -> Result<&'a str, SchemaViolation> {
    obj.get(key)
        .and_then(Value::as_str)
        .ok_or_else(|| SchemaViolation::new(path, "a string"))
}

fn expect_array<'a>(
    obj: &'a Map<String, Value>,
    key: &str,
    path: &str,
) -> Result<&'a Vec<Value>, SchemaViolation> {
    obj.get(key)
        .and_then(Value::as_array)
        .ok_or_else(|| SchemaViolation::new(path, "an array"))
}

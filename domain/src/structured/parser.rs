//! Decoding of single-object JSON replies.
//!
//! Missing fields, and fields of the wrong type, fall back to a default
//! (`""`, `false`, `0`). Only text that is not a JSON object at all is an
//! error.

use crate::core::error::DomainError;
use crate::util::truncate_str;
use serde_json::{Map, Value};

/// Raw text kept in a [`DomainError::ParseError`]
const MAX_RAW_IN_ERROR: usize = 500;

/// A decoded JSON object from a model reply
#[derive(Debug, Clone, PartialEq)]
pub struct StructuredObject {
    fields: Map<String, Value>,
}

impl StructuredObject {
    /// Parse model output into an object.
    ///
    /// Code fences (` ```json ... ``` `) and a leading `<think>...</think>`
    /// block are removed first; some servers add them even when JSON mode is
    /// requested.
    pub fn parse(raw: &str) -> Result<Self, DomainError> {
        let cleaned = strip_delimiters(raw);
        let value: Value =
            serde_json::from_str(cleaned).map_err(|e| DomainError::ParseError {
                error: e.to_string(),
                raw: truncate_str(raw, MAX_RAW_IN_ERROR).to_string(),
            })?;

        match value {
            Value::Object(fields) => Ok(Self { fields }),
            other => Err(DomainError::NotAnObject(
                truncate_str(&other.to_string(), MAX_RAW_IN_ERROR).to_string(),
            )),
        }
    }

    pub fn from_map(fields: Map<String, Value>) -> Self {
        Self { fields }
    }

    /// Text field. Numbers are accepted as their decimal text (ids are
    /// often numeric); anything else yields `""`.
    pub fn text(&self, key: &str) -> String {
        match self.fields.get(key) {
            Some(Value::String(s)) => s.trim().to_string(),
            Some(Value::Number(n)) => n.to_string(),
            _ => String::new(),
        }
    }

    /// Boolean field; only a JSON `true` counts
    pub fn flag(&self, key: &str) -> bool {
        matches!(self.fields.get(key), Some(Value::Bool(true)))
    }

    /// Integer field. Floats are truncated and numeric strings parsed;
    /// anything else yields `0`.
    pub fn integer(&self, key: &str) -> i64 {
        match self.fields.get(key) {
            Some(Value::Number(n)) => n
                .as_i64()
                .or_else(|| n.as_f64().map(|f| f as i64))
                .unwrap_or(0),
            Some(Value::String(s)) => {
                let s = s.trim();
                s.parse::<i64>()
                    .ok()
                    .or_else(|| s.parse::<f64>().ok().map(|f| f as i64))
                    .unwrap_or(0)
            }
            _ => 0,
        }
    }

    /// Fields other than `known`, in key order
    pub fn extra_fields(&self, known: &[&str]) -> Vec<(String, Value)> {
        self.fields
            .iter()
            .filter(|(k, _)| !known.contains(&k.as_str()))
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }
}

/// Remove wrappers that are not part of the JSON payload
fn strip_delimiters(raw: &str) -> &str {
    let mut text = raw.trim();

    if text.starts_with("<think>")
        && let Some(end) = text.find("</think>")
    {
        text = text[end + "</think>".len()..].trim();
    }

    if let Some(rest) = text.strip_prefix("```") {
        // Drop the language tag line (```json)
        let rest = match rest.find('\n') {
            Some(newline) => &rest[newline + 1..],
            None => rest,
        };
        let rest = rest.trim_end();
        text = rest.strip_suffix("```").unwrap_or(rest).trim();
    }

    text
}

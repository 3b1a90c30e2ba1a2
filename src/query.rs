//! Query-string encoding for parameter structs.
//!
//! Parameter structs are serialized through serde and flattened into
//! `(key, value)` pairs. Field names come from the serde name (so
//! `#[serde(rename)]` picks the query key), `None` fields are dropped,
//! and sequence fields repeat their key once per element.

use serde::Serialize;
use serde_json::Value;

use crate::error::{ListmonkError, Result};

/// Flatten a parameter object into ordered query pairs.
///
/// Keys are emitted in lexical order; values of a sequence keep their
/// original order. Nested objects have no query representation and are
/// rejected.
pub(crate) fn encode<Q: Serialize + ?Sized>(params: &Q) -> Result<Vec<(String, String)>> {
    let value =
        serde_json::to_value(params).map_err(|e| ListmonkError::QueryEncode(e.to_string()))?;

    let map = match value {
        Value::Null => return Ok(Vec::new()),
        Value::Object(map) => map,
        other => {
            return Err(ListmonkError::QueryEncode(format!(
                "expected a struct of named fields, got {}",
                kind(&other)
            )))
        }
    };

    let mut pairs = Vec::with_capacity(map.len());
    for (key, value) in map {
        match value {
            Value::Null => {}
            Value::Array(items) => {
                for item in items {
                    if let Some(text) = scalar(&key, item)? {
                        pairs.push((key.clone(), text));
                    }
                }
            }
            other => {
                if let Some(text) = scalar(&key, other)? {
                    pairs.push((key, text));
                }
            }
        }
    }

    Ok(pairs)
}

fn scalar(key: &str, value: Value) -> Result<Option<String>> {
    match value {
        Value::Null => Ok(None),
        Value::Bool(b) => Ok(Some(b.to_string())),
        Value::Number(n) => Ok(Some(n.to_string())),
        Value::String(s) => Ok(Some(s)),
        other => Err(ListmonkError::QueryEncode(format!(
            "field '{key}' is {} and cannot be sent as a query parameter",
            kind(&other)
        ))),
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a sequence",
        Value::Object(_) => "an object",
    }
}

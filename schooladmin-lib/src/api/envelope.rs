//! Response envelope unwrapping.
//!
//! The backend wraps collections as `{status, data: {data: [...]}, total}`
//! or `{status, data: [...], total}`. Errors come back as
//! `{status: "error", message}`, sometimes with HTTP 200.

use serde::de::DeserializeOwned;
use serde_json::Map;
use serde_json::Value;

use crate::error::ApiError;

/// Deepest `data` nesting followed when looking for the record array.
const MAX_DEPTH: usize = 8;

/// An unwrapped collection response.
#[derive(Debug, Clone, PartialEq)]
pub struct Envelope {
    records: Vec<Value>,
    total: Option<u64>,
}

impl Envelope {
    /// Unwraps a response body.
    ///
    /// Returns [`ApiError::Envelope`] for an error envelope. A body without
    /// any record array is an empty collection, not an error.
    pub fn from_value(body: Value) -> Result<Self, ApiError> {
        if let Some(message) = error_message(&body) {
            return Err(ApiError::envelope(message));
        }

        let mut total = None;
        let mut current = body;
        for _ in 0..MAX_DEPTH {
            match current {
                Value::Array(records) => return Ok(Self { records, total }),
                Value::Object(mut map) => {
                    if total.is_none() {
                        total = read_total(&map);
                    }
                    match map.remove("data") {
                        Some(inner) => current = inner,
                        None => break,
                    }
                }
                _ => break,
            }
        }

        Ok(Self {
            records: Vec::new(),
            total,
        })
    }

    /// Parses and unwraps a raw response body.
    pub fn from_body(body: &str) -> Result<Self, ApiError> {
        let value: Value = serde_json::from_str(body)
            .map_err(|e| ApiError::parse_with_body(e.to_string(), body))?;
        Self::from_value(value)
    }

    /// Returns the raw records.
    pub fn records(&self) -> &[Value] {
        &self.records
    }

    /// Returns the declared total, if the envelope carried a positive one.
    pub fn declared_total(&self) -> Option<u64> {
        self.total.filter(|t| *t > 0)
    }

    /// Returns the declared total, falling back to the number of records.
    pub fn total_or_len(&self) -> u64 {
        self.declared_total().unwrap_or(self.records.len() as u64)
    }

    /// Deserializes the records, returning them with [`total_or_len`](Self::total_or_len).
    pub fn decode<R: DeserializeOwned>(self) -> Result<(Vec<R>, u64), ApiError> {
        let total = self.total_or_len();
        let records = serde_json::from_value(Value::Array(self.records))
            .map_err(|e| ApiError::parse(format!("invalid record: {}", e)))?;
        Ok((records, total))
    }
}

fn error_message(body: &Value) -> Option<String> {
    let map = body.as_object()?;
    if map.get("status").and_then(Value::as_str) != Some("error") {
        return None;
    }
    Some(
        map.get("message")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string(),
    )
}

fn read_total(map: &Map<String, Value>) -> Option<u64> {
    ["total", "results"]
        .iter()
        .filter_map(|key| map.get(*key))
        .find_map(|value| match value {
            Value::Number(n) => n.as_u64(),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        })
}

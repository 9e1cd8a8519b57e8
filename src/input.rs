//! Token file reading
//!
//! Accepts the JSON shapes legacy exports come in: a bare array, an object
//! with a `tokens` array, an object whose first array value is used, an
//! object with a single `token` string, or a bare JSON string.

use crate::error::{AppError, AppResult};
use serde_json::Value;
use std::path::Path;

/// Read credential strings from a JSON file, preserving order
pub fn read_tokens(path: &Path) -> AppResult<Vec<String>> {
    let contents = std::fs::read_to_string(path)
        .map_err(|e| AppError::Input(format!("cannot read {}: {}", path.display(), e)))?;
    let value: Value = serde_json::from_str(&contents)?;

    let tokens = extract_tokens(&value);
    tracing::info!(count = tokens.len(), file = %path.display(), "Tokens loaded");
    Ok(tokens)
}

fn extract_tokens(value: &Value) -> Vec<String> {
    match value {
        Value::Array(items) => collect_strings(items),
        Value::Object(map) => {
            if let Some(Value::Array(items)) = map.get("tokens") {
                return collect_strings(items);
            }
            // first array value in the object, whatever its key
            for candidate in map.values() {
                if let Value::Array(items) = candidate {
                    return collect_strings(items);
                }
            }
            if let Some(Value::String(token)) = map.get("token") {
                let token = token.trim();
                if !token.is_empty() {
                    return vec![token.to_string()];
                }
            }
            Vec::new()
        }
        Value::String(token) => {
            let token = token.trim();
            if token.is_empty() {
                Vec::new()
            } else {
                vec![token.to_string()]
            }
        }
        _ => Vec::new(),
    }
}

fn collect_strings(items: &[Value]) -> Vec<String> {
    items
        .iter()
        .filter_map(|item| item.as_str())
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

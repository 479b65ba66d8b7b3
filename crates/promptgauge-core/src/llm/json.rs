//! Salvage helpers for JSON embedded in model output.

use std::sync::LazyLock;

use regex::Regex;

static JSON_FENCE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)```json(.*?)```").expect("fence pattern is valid"));

/// Extracts the first plausible JSON object from model output.
///
/// Tries a ```json fenced block first, then falls back to the span from the
/// first `{` to the last `}`.
pub fn extract_json_object(text: &str) -> Option<String> {
    if text.trim().is_empty() {
        return None;
    }

    if let Some(caps) = JSON_FENCE.captures(text) {
        return Some(caps[1].trim().to_string());
    }

    let start = text.find('{')?;
    let end = text.rfind('}')?;
    if end <= start {
        return None;
    }
    Some(text[start..=end].to_string())
}

/// Parses `content` as a JSON object, salvaging fenced or embedded objects
/// when direct parsing fails. Returns `None` when nothing object-shaped can
/// be recovered.
pub fn parse_object_lossy(content: &str) -> Option<serde_json::Value> {
    if let Ok(value) = serde_json::from_str::<serde_json::Value>(content) {
        if value.is_object() {
            return Some(value);
        }
    }

    let candidate = extract_json_object(content)?;
    match serde_json::from_str::<serde_json::Value>(&candidate) {
        Ok(value) if value.is_object() => Some(value),
        _ => None,
    }
}

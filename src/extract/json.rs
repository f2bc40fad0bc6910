// Strict-stage helpers for `--json` output
#![allow(dead_code)]

use crate::extract::text::lenient_u64;
use serde_json::Value;

const MAX_PAYLOAD_ATTEMPTS: usize = 8;

/// Parse the JSON document in `text`.
///
/// The CLI sometimes prints a version-mismatch notice before the document,
/// so when the whole text is not JSON each suffix starting at a line that
/// opens with `{` or `[` is tried. Only objects and arrays count.
pub fn json_payload(text: &str) -> Option<Value> {
    let trimmed = text.trim();
    let line_starts = std::iter::once(0).chain(
        trimmed
            .match_indices('\n')
            .map(|(i, _)| i + 1)
            .filter(|&i| i < trimmed.len()),
    );

    line_starts
        .filter(|&i| trimmed[i..].starts_with(['{', '[']))
        .take(MAX_PAYLOAD_ATTEMPTS)
        .find_map(|i| {
            serde_json::from_str::<Value>(&trimmed[i..])
                .ok()
                .filter(|value| value.is_object() || value.is_array())
        })
}

/// Numbers arrive as JSON numbers or as decimal strings
pub fn json_u64(value: Option<&Value>) -> u64 {
    match value {
        Some(Value::Number(n)) => n.as_u64().unwrap_or(0),
        Some(Value::String(s)) => lenient_u64(s),
        _ => 0,
    }
}

pub fn json_string(value: Option<&Value>) -> Option<String> {
    value.and_then(Value::as_str).map(str::to_string)
}

//! Pulls the embedded JSON object out of free-form model output.
//!
//! The match is greedy: it spans from the first `{` to the last `}` in the
//! text. Prose with stray braces around the object therefore yields a
//! substring that fails to decode, and the result is `None` even if a valid
//! object sits somewhere inside. Callers treat that as a failed candidate.

use std::sync::OnceLock;

use regex::Regex;
use serde_json::{Map, Value};

fn object_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\{[\s\S]*\}").expect("static regex is valid"))
}

/// Returns the decoded object, or `None` when there is no brace-delimited
/// region, the region is not valid JSON, or it decodes to a non-object.
pub fn extract_json_object(raw: &str) -> Option<Map<String, Value>> {
    if raw.is_empty() {
        return None;
    }
    let region = object_pattern().find(raw)?;
    match serde_json::from_str::<Value>(region.as_str()) {
        Ok(Value::Object(map)) => Some(map),
        _ => None,
    }
}

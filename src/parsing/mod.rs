//! Tolerant helpers for reading structured data out of free-form model output.
//!
//! Nothing here returns an error: malformed output degrades to `None` and each caller
//! decides its own fallback.


use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;

static CODE_FENCE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^\s*```[A-Za-z0-9_-]*\s*$|```").expect("valid fence regex"));

static JSON_SPAN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)(\{.*\}|\[.*\])").expect("valid json span regex"));

/// Removes Markdown code-fence markers (```` ``` ```` and ```` ```json ````), keeping the body.
pub fn strip_code_fences(text: &str) -> String {
    CODE_FENCE.replace_all(text.trim(), "").trim().to_string()
}

/// Finds and parses the first JSON object or array embedded in `text`.
///
/// The widest bracketed span is tried first. If that does not parse (e.g. trailing prose
/// contains a stray brace), the first complete JSON value starting at the first bracket
/// is used instead.
pub fn extract_json(text: &str) -> Option<Value> {
    let cleaned = strip_code_fences(text);
    let span = JSON_SPAN.find(&cleaned)?;

    if let Ok(value) = serde_json::from_str::<Value>(span.as_str()) {
        return Some(value);
    }

    serde_json::Deserializer::from_str(&cleaned[span.start()..])
        .into_iter::<Value>()
        .next()
        .and_then(Result::ok)
}

/// Returns the trimmed first capture group of `pattern` in `text`, if non-empty.
pub fn capture_field<'t>(pattern: &Regex, text: &'t str) -> Option<&'t str> {
    pattern
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim())
        .filter(|s| !s.is_empty())
}

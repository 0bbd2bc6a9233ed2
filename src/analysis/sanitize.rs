//! Extract a JSON object from free-form model output
//!
//! Generative models wrap JSON in markdown fences, prepend explanations, or
//! append closing remarks. The provider makes no formatting promise, so every
//! style has to be tolerated.

use serde_json::Value;

const FENCE: &str = "```";

/// Return the substring of `raw` holding a parseable JSON object.
///
/// Tries, in order:
/// 1. For fenced text, the span from the first `{` to the last `}`, or the
///    text with its fence markers stripped when there are no braces
///    (or, for unfenced text, the trimmed text as-is)
/// 2. The first `{` to last `}` span of the original input
///
/// Returns `None` when no attempt yields a JSON object. Never panics.
pub fn sanitize(raw: &str) -> Option<String> {
    let trimmed = raw.trim();

    let candidate = if trimmed.starts_with(FENCE) {
        brace_span(trimmed).unwrap_or_else(|| strip_fences(trimmed))
    } else {
        trimmed
    };

    if parses_as_object(candidate) {
        return Some(candidate.to_string());
    }

    brace_span(raw)
        .filter(|span| parses_as_object(span))
        .map(str::to_string)
}

/// Like [`sanitize`], but hand back the parsed object.
pub fn sanitize_value(raw: &str) -> Option<Value> {
    sanitize(raw).and_then(|s| serde_json::from_str(&s).ok())
}

fn parses_as_object(text: &str) -> bool {
    matches!(serde_json::from_str::<Value>(text), Ok(Value::Object(_)))
}

/// First `{` through last `}`, inclusive, when both exist in that order.
fn brace_span(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    (start < end).then(|| &text[start..=end])
}

/// Drop a leading fence (with its language tag) and a trailing fence.
fn strip_fences(text: &str) -> &str {
    let without_open = match text.strip_prefix(FENCE) {
        Some(rest) => match rest.find('\n') {
            Some(newline) => &rest[newline + 1..],
            None => rest.trim_start_matches(|c: char| c.is_ascii_alphanumeric()),
        },
        None => text,
    };
    without_open
        .trim_end()
        .trim_end_matches(FENCE)
        .trim()
}

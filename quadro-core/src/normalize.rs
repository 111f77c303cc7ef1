//! Response normalization: fence stripping and JSON decoding.
//!
//! The upstream agent answers in free text that may wrap its data in
//! Markdown code fences. Normalization removes the wrapping, keeps the
//! wrapped content byte-for-byte, and tries to decode the remainder as
//! JSON. Decode failure is a recognized outcome, never an error.

use crate::payload::canonicalize_keys;
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

/// Outcome of normalizing one raw agent response.
#[derive(Debug, Clone, PartialEq)]
pub enum NormalizedResponse {
    /// The cleaned text decoded to a list or mapping; stat keys are already
    /// canonical.
    Structured(Value),
    /// Not structured; the cleaned text is the answer itself.
    Text(String),
}

// Matches one fenced block: opening fence with an optional language tag,
// non-greedy body (may span lines), closing fence. Unterminated fences are
// left alone and fall through to the text path.
static FENCE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"```[A-Za-z0-9_+\-]*[ \t]*\r?\n?((?s).*?)```").expect("valid fence pattern")
});

/// Remove code-fence delimiters, keeping fenced content intact, and trim
/// surrounding whitespace.
pub fn strip_fences(raw: &str) -> String {
    FENCE.replace_all(raw, "$1").trim().to_string()
}

/// Normalize raw agent output into a structured payload or plain text.
///
/// Scalars that happen to decode (a bare number, a quoted string) are still
/// treated as text: only lists and mappings can go on to classification.
pub fn normalize(raw: &str) -> NormalizedResponse {
    let cleaned = strip_fences(raw);
    match serde_json::from_str::<Value>(&cleaned) {
        Ok(value @ (Value::Array(_) | Value::Object(_))) => {
            NormalizedResponse::Structured(canonicalize_keys(value))
        }
        _ => NormalizedResponse::Text(cleaned),
    }
}

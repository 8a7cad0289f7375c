use once_cell::sync::Lazy;
use regex::Regex;

// Opening marker with optional `json` tag, line break, lazily matched body, line break, closing marker.
static FENCED_BLOCK: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?is)```(?:json)?\r?\n(.*?)\r?\n```").expect("valid fence pattern")
});

/// Return the body of the first complete fenced block, or the input when there is none.
pub fn strip_code_fence(text: &str) -> &str {
    FENCED_BLOCK
        .captures(text)
        .and_then(|captures| captures.get(1))
        .map_or(text, |body| body.as_str())
}

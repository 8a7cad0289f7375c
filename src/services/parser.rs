use serde_json::Value;

/// Strictly parse `text` as a JSON value.
///
/// Failure is an expected outcome for free-form completions, so the error is
/// handed back to the caller instead of being converted into a `PlannerError`.
pub fn parse_structured(text: &str) -> Result<Value, serde_json::Error> {
    serde_json::from_str(text)
}

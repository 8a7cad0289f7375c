use std::time::Duration;

use async_trait::async_trait;
use serde_json::{json, Value};
use tracing::debug;

use crate::{
    core::generator::TextGenerator,
    error::{PlannerError, Result},
};

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(120);

#[derive(Clone, Debug)]
pub struct GeminiClient {
    api_key: String,
    base_url: String,
    model: String,
    timeout: Duration,
}

impl GeminiClient {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Send one `generateContent` request and return the first candidate's text.
    pub async fn generate_content(&self, prompt: &str) -> Result<String> {
        let client = reqwest::Client::builder()
            .timeout(self.timeout)
            .build()
            .map_err(|err| PlannerError::Upstream(format!("Failed to build HTTP client: {err}")))?;

        let request_url = build_generate_url(&self.base_url, &self.model);
        debug!(target: "trip_planner::gemini", url = %request_url, "sending generateContent request");

        let response = client
            .post(&request_url)
            .header("x-goog-api-key", &self.api_key)
            .header("Content-Type", "application/json")
            .json(&GenerateContentRequest::new(prompt).into_value())
            .send()
            .await
            .map_err(|err| PlannerError::Upstream(format!("HTTP request failed: {err}")))?;

        let status = response.status();
        let response_text = response
            .text()
            .await
            .map_err(|err| PlannerError::Upstream(format!("Failed to read response: {err}")))?;

        let response_json = match serde_json::from_str::<Value>(&response_text) {
            Ok(value) => value,
            Err(_) if !status.is_success() => {
                return Err(PlannerError::Upstream(format!(
                    "HTTP {} error: {}",
                    status, response_text
                )));
            }
            Err(err) => {
                return Err(PlannerError::Upstream(format!("Failed to parse JSON: {err}")));
            }
        };

        if !status.is_success() {
            let api_message = api_error_message(&response_json).unwrap_or(response_text);
            return Err(PlannerError::Upstream(format!(
                "HTTP {} error: {}",
                status, api_message
            )));
        }

        if response_json.get("error").is_some() {
            let error_message = api_error_message(&response_json)
                .unwrap_or_else(|| response_json["error"].to_string());
            return Err(PlannerError::Upstream(format!("API error: {}", error_message)));
        }

        Ok(completion_text(&response_json))
    }
}

#[async_trait]
impl TextGenerator for GeminiClient {
    async fn generate(&self, prompt: &str) -> Result<String> {
        self.generate_content(prompt).await
    }
}

fn build_generate_url(base_url: &str, model: &str) -> String {
    let trimmed = base_url.trim_end_matches('/');
    if trimmed.ends_with(":generateContent") {
        trimmed.to_string()
    } else {
        format!("{}/models/{}:generateContent", trimmed, model)
    }
}

fn api_error_message(response: &Value) -> Option<String> {
    response
        .get("error")
        .and_then(|error| error.get("message"))
        .and_then(|value| value.as_str())
        .map(|s| s.to_string())
}

/// Text at `candidates[0].content.parts[0].text`, or an empty string when absent.
pub(crate) fn completion_text(response: &Value) -> String {
    response
        .pointer("/candidates/0/content/parts/0/text")
        .and_then(|value| value.as_str())
        .unwrap_or_default()
        .to_string()
}

#[derive(Clone, Debug)]
pub struct GenerateContentRequest {
    prompt: String,
}

impl GenerateContentRequest {
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
        }
    }

    pub fn into_value(self) -> Value {
        json!({
            "contents": [
                {
                    "parts": [{ "text": self.prompt }]
                }
            ]
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_generate_url() {
        assert_eq!(
            build_generate_url("https://example.com/v1beta/", "gemini-2.5-flash"),
            "https://example.com/v1beta/models/gemini-2.5-flash:generateContent"
        );
        assert_eq!(
            build_generate_url("https://example.com/v1/models/custom:generateContent", "ignored"),
            "https://example.com/v1/models/custom:generateContent"
        );
    }

    #[test]
    fn test_completion_text_path() {
        let response = json!({
            "candidates": [{"content": {"parts": [{"text": "Day 1"}, {"text": "ignored"}]}}]
        });
        assert_eq!(completion_text(&response), "Day 1");
        assert_eq!(completion_text(&json!({"candidates": []})), "");
        assert_eq!(
            completion_text(&json!({"candidates": [{"finishReason": "SAFETY"}]})),
            ""
        );
    }

    #[test]
    fn test_request_body_shape() {
        let body = GenerateContentRequest::new("Plan a trip").into_value();
        assert_eq!(body["contents"][0]["parts"][0]["text"], "Plan a trip");
    }
}

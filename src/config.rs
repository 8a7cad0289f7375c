//! Settings read from the environment, falling back to defaults for unset or invalid values.

use std::time::Duration;

use crate::{
    error::{PlannerError, Result},
    services::gemini_client::{GeminiClient, DEFAULT_BASE_URL, DEFAULT_MODEL, DEFAULT_TIMEOUT},
};

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 3001;

/// Connection settings for the text-generation service.
#[derive(Clone, Debug, PartialEq)]
pub struct PlannerConfig {
    pub api_key: String,
    pub model: String,
    pub base_url: String,
    pub timeout: Duration,
}

impl PlannerConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// - `GEMINI_API_KEY` (required)
    /// - `GEMINI_MODEL` (default `gemini-2.5-flash`)
    /// - `GEMINI_BASE_URL` (default the public v1beta endpoint)
    /// - `GEMINI_TIMEOUT_SECS` (default 120)
    pub fn from_env() -> Result<Self> {
        Self::from_env_with_api_key(None)
    }

    /// Same as [`PlannerConfig::from_env`], with `api_key` taking precedence over `GEMINI_API_KEY`.
    pub fn from_env_with_api_key(api_key: Option<String>) -> Result<Self> {
        let api_key = api_key.or_else(|| non_empty_var("GEMINI_API_KEY")).ok_or_else(|| {
            PlannerError::Config(
                "GEMINI_API_KEY environment variable must be set before creating a Planner"
                    .to_string(),
            )
        })?;

        let mut config = Self::new(api_key);
        if let Some(model) = non_empty_var("GEMINI_MODEL") {
            config.model = model;
        }
        if let Some(base_url) = non_empty_var("GEMINI_BASE_URL") {
            config.base_url = base_url;
        }
        if let Some(secs) = non_empty_var("GEMINI_TIMEOUT_SECS").and_then(|s| s.parse().ok()) {
            config.timeout = Duration::from_secs(secs);
        }
        Ok(config)
    }

    pub fn client(&self) -> GeminiClient {
        GeminiClient::new(self.api_key.clone())
            .with_model(self.model.clone())
            .with_base_url(self.base_url.clone())
            .with_timeout(self.timeout)
    }
}

/// Listen address for the HTTP server.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
        }
    }
}

impl ServerConfig {
    /// - `HOST` (default `0.0.0.0`)
    /// - `PORT` (default 3001)
    pub fn from_env() -> Self {
        let default = Self::default();
        Self {
            host: non_empty_var("HOST").unwrap_or(default.host),
            port: non_empty_var("PORT")
                .and_then(|s| s.parse().ok())
                .unwrap_or(default.port),
        }
    }

    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|value| !value.trim().is_empty())
}

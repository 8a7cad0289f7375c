use thiserror::Error;

/// Main error type for the trip planner
#[derive(Error, Debug)]
pub enum PlannerError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Upstream error: {0}")]
    Upstream(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, PlannerError>;

impl PlannerError {
    /// Whether the failure was caused by the caller's input rather than the service
    pub fn is_client_error(&self) -> bool {
        matches!(self, PlannerError::Validation(_))
    }

    /// Get the error code for structured responses
    pub fn error_code(&self) -> &'static str {
        match self {
            PlannerError::Config(_) => "CONFIG_ERROR",
            PlannerError::Validation(_) => "VALIDATION_ERROR",
            PlannerError::Upstream(_) => "UPSTREAM_ERROR",
            PlannerError::Serialization(_) => "SERIALIZATION_ERROR",
            PlannerError::Io(_) => "IO_ERROR",
        }
    }

    /// Convert to a structured error payload
    pub fn to_error_payload(&self) -> serde_json::Value {
        serde_json::json!({
            "error": {
                "code": self.error_code(),
                "message": self.to_string(),
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_payload() {
        let error = PlannerError::Upstream("HTTP 503 error: overloaded".to_string());
        assert_eq!(error.error_code(), "UPSTREAM_ERROR");
        assert!(!error.is_client_error());

        let payload = error.to_error_payload();
        assert_eq!(payload["error"]["code"], "UPSTREAM_ERROR");
        assert!(payload["error"]["message"]
            .as_str()
            .unwrap()
            .contains("overloaded"));
    }

    #[test]
    fn test_validation_is_client_error() {
        let error = PlannerError::Validation("destination is required".to_string());
        assert!(error.is_client_error());
        assert_eq!(error.error_code(), "VALIDATION_ERROR");
    }
}

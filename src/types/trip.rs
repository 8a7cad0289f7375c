use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{PlannerError, Result};

const REQUIRED_FIELDS_MESSAGE: &str = "destination and days are required";

/// Traveller preferences, either a free-form tag or a small record of options.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Preferences {
    Text(String),
    Record(Map<String, Value>),
}

impl Preferences {
    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Null => None,
            Value::String(text) if text.trim().is_empty() => None,
            Value::String(text) => Some(Preferences::Text(text.clone())),
            Value::Object(map) => Some(Preferences::Record(map.clone())),
            other => Some(Preferences::Text(other.to_string())),
        }
    }
}

impl From<&str> for Preferences {
    fn from(value: &str) -> Self {
        Preferences::Text(value.to_string())
    }
}

impl From<String> for Preferences {
    fn from(value: String) -> Self {
        Preferences::Text(value)
    }
}

impl From<Map<String, Value>> for Preferences {
    fn from(value: Map<String, Value>) -> Self {
        Preferences::Record(value)
    }
}

/// Validated trip parameters for a single planning request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TripRequest {
    destination: String,
    days: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    budget: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    prefs: Option<Preferences>,
}

impl TripRequest {
    /// Create a request, rejecting a blank destination or a zero day count.
    pub fn new(destination: impl Into<String>, days: u32) -> Result<Self> {
        let destination = destination.into();
        if destination.trim().is_empty() {
            return Err(PlannerError::Validation(
                "destination must not be empty".to_string(),
            ));
        }
        if days == 0 {
            return Err(PlannerError::Validation(
                "days must be a positive integer".to_string(),
            ));
        }

        Ok(Self {
            destination,
            days,
            budget: None,
            prefs: None,
        })
    }

    pub fn with_budget(mut self, budget: impl Into<String>) -> Self {
        let budget = budget.into();
        self.budget = if budget.trim().is_empty() {
            None
        } else {
            Some(budget)
        };
        self
    }

    pub fn with_prefs(mut self, prefs: impl Into<Preferences>) -> Self {
        self.prefs = Some(prefs.into());
        self
    }

    /// Build a request from an inbound JSON body `{destination, days, budget, prefs}`.
    ///
    /// `days` may be a number or a numeric string and `budget` a string or a
    /// number, since browser forms submit everything as text.
    pub fn from_body(body: &Value) -> Result<Self> {
        let fields = body
            .as_object()
            .ok_or_else(|| PlannerError::Validation(REQUIRED_FIELDS_MESSAGE.to_string()))?;

        let destination = fields
            .get("destination")
            .and_then(Value::as_str)
            .filter(|destination| !destination.trim().is_empty())
            .ok_or_else(|| PlannerError::Validation(REQUIRED_FIELDS_MESSAGE.to_string()))?;

        let days = fields
            .get("days")
            .and_then(parse_day_count)
            .ok_or_else(|| PlannerError::Validation(REQUIRED_FIELDS_MESSAGE.to_string()))?;

        let mut request = Self::new(destination, days)?;
        request.budget = fields.get("budget").and_then(budget_text);
        request.prefs = fields.get("prefs").and_then(Preferences::from_value);
        Ok(request)
    }

    pub fn destination(&self) -> &str {
        &self.destination
    }

    pub fn days(&self) -> u32 {
        self.days
    }

    pub fn budget(&self) -> Option<&str> {
        self.budget.as_deref()
    }

    pub fn prefs(&self) -> Option<&Preferences> {
        self.prefs.as_ref()
    }
}

fn parse_day_count(value: &Value) -> Option<u32> {
    let days = match value {
        Value::Number(number) => number.as_u64().or_else(|| {
            number
                .as_f64()
                .filter(|days| days.fract() == 0.0 && *days > 0.0)
                .map(|days| days as u64)
        })?,
        Value::String(text) => text.trim().parse::<u64>().ok()?,
        _ => return None,
    };

    u32::try_from(days).ok().filter(|days| *days > 0)
}

fn budget_text(value: &Value) -> Option<String> {
    match value {
        Value::String(text) if !text.trim().is_empty() => Some(text.clone()),
        Value::Number(number) => Some(number.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_body_accepts_string_days() {
        let request = TripRequest::from_body(&json!({
            "destination": "Delhi",
            "days": "3",
            "budget": "",
            "prefs": "sightseeing"
        }))
        .unwrap();

        assert_eq!(request.destination(), "Delhi");
        assert_eq!(request.days(), 3);
        assert_eq!(request.budget(), None);
        assert_eq!(
            request.prefs(),
            Some(&Preferences::Text("sightseeing".to_string()))
        );
    }

    #[test]
    fn test_from_body_numeric_budget_and_record_prefs() {
        let request = TripRequest::from_body(&json!({
            "destination": "Kyoto",
            "days": 4,
            "budget": 1500,
            "prefs": {"pace": "slow", "food": true}
        }))
        .unwrap();

        assert_eq!(request.budget(), Some("1500"));
        assert!(matches!(request.prefs(), Some(Preferences::Record(map)) if map["pace"] == "slow"));
    }

    #[test]
    fn test_from_body_rejects_missing_fields() {
        let missing_destination = TripRequest::from_body(&json!({"days": 2}));
        assert!(matches!(
            missing_destination,
            Err(PlannerError::Validation(ref message)) if message == REQUIRED_FIELDS_MESSAGE
        ));

        assert!(TripRequest::from_body(&json!({"destination": "Rome"})).is_err());
        assert!(TripRequest::from_body(&json!({"destination": "", "days": 2})).is_err());
        assert!(TripRequest::from_body(&json!({"destination": "Rome", "days": 0})).is_err());
        assert!(TripRequest::from_body(&json!({"destination": "Rome", "days": "two"})).is_err());
        assert!(TripRequest::from_body(&json!(["Rome", 2])).is_err());
    }

    #[test]
    fn test_builder_drops_blank_budget() {
        let request = TripRequest::new("Lisbon", 2)
            .unwrap()
            .with_budget("  ")
            .with_prefs("food");
        assert_eq!(request.budget(), None);
        assert_eq!(request.prefs(), Some(&Preferences::from("food")));
    }
}

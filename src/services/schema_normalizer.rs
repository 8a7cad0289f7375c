use serde::Deserialize;
use serde_json::Value;

use crate::types::{DayEntry, Itinerary};

/// Top-level fields the model may use for the itinerary.
///
/// Everything is optional and untyped so that any JSON object deserializes.
#[derive(Debug, Default, Deserialize)]
struct PlanDocument {
    #[serde(default)]
    destination: Option<Value>,
    #[serde(default)]
    plan: Option<Value>,
    #[serde(default)]
    days: Option<Value>,
    #[serde(default)]
    itinerary: Option<Value>,
}

impl PlanDocument {
    fn from_value(value: &Value) -> Self {
        match value {
            Value::Object(_) => Self::deserialize(value).unwrap_or_default(),
            _ => Self::default(),
        }
    }

    /// Candidate day lists, highest priority first.
    fn day_candidates(self) -> [Option<Value>; 3] {
        [self.plan, self.days, self.itinerary]
    }
}

/// Map a parsed completion onto the canonical itinerary.
///
/// The plan is the first of `plan`, `days`, `itinerary` that holds an array,
/// even an empty one. The destination is the parsed `destination` when it is
/// a non-empty string, otherwise `fallback_destination`.
pub fn normalize_structured(parsed: &Value, fallback_destination: &str) -> Itinerary {
    let document = PlanDocument::from_value(parsed);

    let destination = match &document.destination {
        Some(Value::String(destination)) if !destination.is_empty() => destination.clone(),
        _ => fallback_destination.to_string(),
    };

    let plan = document
        .day_candidates()
        .into_iter()
        .find_map(|candidate| match candidate {
            Some(Value::Array(days)) => Some(days),
            _ => None,
        })
        .unwrap_or_default()
        .into_iter()
        .map(DayEntry::from)
        .collect();

    Itinerary { destination, plan }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn plan_values(itinerary: &Itinerary) -> Value {
        serde_json::to_value(&itinerary.plan).unwrap()
    }

    #[test]
    fn test_plan_field_priority() {
        let parsed = json!({
            "itinerary": [{"day_number": 3}],
            "days": [{"day_number": 2}],
            "plan": [{"day_number": 1}, {"day_number": 4}]
        });
        let itinerary = normalize_structured(&parsed, "Paris");
        assert_eq!(plan_values(&itinerary), json!([{"day_number": 1}, {"day_number": 4}]));

        let parsed = json!({"itinerary": ["c"], "days": ["b"]});
        assert_eq!(plan_values(&normalize_structured(&parsed, "Paris")), json!(["b"]));

        let parsed = json!({"itinerary": ["c"]});
        assert_eq!(plan_values(&normalize_structured(&parsed, "Paris")), json!(["c"]));
    }

    #[test]
    fn test_non_array_candidates_are_skipped() {
        let parsed = json!({"plan": "see below", "days": 3, "itinerary": [{"theme": "Food"}]});
        let itinerary = normalize_structured(&parsed, "Lima");
        assert_eq!(plan_values(&itinerary), json!([{"theme": "Food"}]));
    }

    #[test]
    fn test_empty_array_still_wins() {
        let parsed = json!({"plan": [], "days": [{"day_number": 1}]});
        assert!(normalize_structured(&parsed, "Lima").plan.is_empty());
    }

    #[test]
    fn test_destination_resolution() {
        let parsed = json!({"destination": "Paris, France", "plan": []});
        assert_eq!(normalize_structured(&parsed, "Paris").destination, "Paris, France");

        let parsed = json!({"destination": "", "plan": []});
        assert_eq!(normalize_structured(&parsed, "Paris").destination, "Paris");

        let parsed = json!({"destination": 75, "plan": []});
        assert_eq!(normalize_structured(&parsed, "Paris").destination, "Paris");
    }

    #[test]
    fn test_unrelated_values_yield_empty_plan() {
        for parsed in [json!({"weather": "sunny"}), json!([1, 2, 3]), json!("text"), Value::Null] {
            let itinerary = normalize_structured(&parsed, "Cairo");
            assert_eq!(itinerary.destination, "Cairo");
            assert!(itinerary.plan.is_empty());
        }
    }
}

use crate::types::{plan_schema, TripRequest};

/// Generate the itinerary request sent to the model
pub fn generate_itinerary_prompt(request: &TripRequest) -> String {
    let budget = request.budget().unwrap_or("not specified");
    let prefs = serde_json::to_string(&request.prefs()).unwrap_or_else(|_| "null".to_string());

    format!(
        "Create a detailed {}-day travel itinerary for {}.\nBudget: {}.\nPreferences: {}.\nOutput as a structured JSON plan with days and activities.",
        request.days(),
        request.destination(),
        budget,
        prefs
    )
}

/// Same as [`generate_itinerary_prompt`], followed by the JSON Schema of the expected answer
pub fn generate_schema_prompt(request: &TripRequest) -> String {
    format!(
        "{}\nRespond with a single JSON object matching this schema:\n{}",
        generate_itinerary_prompt(request),
        plan_schema()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_prompt_embeds_trip_parameters() {
        let request = TripRequest::new("Paris", 3)
            .unwrap()
            .with_budget("$1200")
            .with_prefs("museums");
        let prompt = generate_itinerary_prompt(&request);

        assert!(prompt.contains("3-day travel itinerary for Paris"));
        assert!(prompt.contains("Budget: $1200."));
        assert!(prompt.contains("Preferences: \"museums\"."));
        assert!(prompt.contains("structured JSON plan with days and activities"));
    }

    #[test]
    fn test_prompt_defaults() {
        let request = TripRequest::new("Oslo", 1).unwrap();
        let prompt = generate_itinerary_prompt(&request);

        assert!(prompt.contains("Budget: not specified."));
        assert!(prompt.contains("Preferences: null."));
    }

    #[test]
    fn test_prompt_dumps_record_prefs() {
        let request = TripRequest::from_body(&json!({
            "destination": "Rome",
            "days": 2,
            "prefs": {"pace": "slow"}
        }))
        .unwrap();
        let prompt = generate_itinerary_prompt(&request);

        assert!(prompt.contains(r#"Preferences: {"pace":"slow"}."#));
    }

    #[test]
    fn test_schema_prompt_appends_schema() {
        let request = TripRequest::new("Paris", 2).unwrap();
        let prompt = generate_schema_prompt(&request);

        assert!(prompt.starts_with(&generate_itinerary_prompt(&request)));
        assert!(prompt.contains("matching this schema"));
        assert!(prompt.contains("day_number"));
    }
}

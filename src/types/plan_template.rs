use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Itinerary shape the model is asked to return.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct PlanTemplate {
    /// Destination city and country (e.g., "Paris, France")
    pub destination: String,
    /// Day-by-day plan in chronological order
    pub plan: Vec<DayTemplate>,
}

/// Per-day plan with its activities.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct DayTemplate {
    /// 1-based day counter within the itinerary
    pub day_number: u32,
    /// Short theme for the day
    pub theme: Option<String>,
    /// One or two sentences describing the day
    pub summary: Option<String>,
    /// Activities in chronological order
    pub activities: Vec<ActivityTemplate>,
    /// Free-form notes when the day has no fixed activities
    pub details: Option<String>,
}

/// A single planned activity.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ActivityTemplate {
    /// Local start time (e.g., "09:00")
    pub time: Option<String>,
    /// Name of the attraction or activity
    pub name: String,
    /// Neighbourhood or address
    pub location: Option<String>,
    /// What to expect
    pub description: Option<String>,
    /// Estimated cost per person in the trip currency
    pub price: Option<f64>,
}

/// JSON Schema for [`PlanTemplate`].
pub fn plan_schema() -> Value {
    serde_json::to_value(schemars::schema_for!(PlanTemplate)).unwrap_or_default()
}

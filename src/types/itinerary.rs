use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

static LEADING_NUMBER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[+-]?(\d+(\.\d*)?|\.\d+)([eE][+-]?\d+)?").expect("valid number pattern")
});

/// Canonical itinerary returned to callers: destination plus ordered day entries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Itinerary {
    pub destination: String,
    pub plan: Vec<DayEntry>,
}

impl Itinerary {
    pub fn new(destination: impl Into<String>, plan: Vec<DayEntry>) -> Self {
        Self {
            destination: destination.into(),
            plan,
        }
    }

    pub fn day_count(&self) -> usize {
        self.plan.len()
    }
}

/// One day of the plan: a record produced by the model, a plain text block,
/// or any other JSON value the model put in its day list, kept as sent.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum DayEntry {
    Plain(String),
    Structured(StructuredDay),
    Other(Value),
}

impl DayEntry {
    pub fn plain(text: impl Into<String>) -> Self {
        DayEntry::Plain(text.into())
    }

    /// Title shown for the day at `index` in the plan.
    pub fn title(&self, index: usize) -> String {
        match self {
            DayEntry::Plain(_) | DayEntry::Other(_) => format!("Day {}", index + 1),
            DayEntry::Structured(day) => {
                let number = day
                    .day_number()
                    .map(|number| number.to_string())
                    .unwrap_or_else(|| (index + 1).to_string());
                match day.theme() {
                    Some(theme) => format!("Day {} - {}", number, theme),
                    None => format!("Day {}", number),
                }
            }
        }
    }
}

impl From<Value> for DayEntry {
    fn from(value: Value) -> Self {
        match value {
            Value::Object(fields) => DayEntry::Structured(StructuredDay::from(fields)),
            Value::String(text) => DayEntry::Plain(text),
            other => DayEntry::Other(other),
        }
    }
}

impl<'de> Deserialize<'de> for DayEntry {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Value::deserialize(deserializer).map(DayEntry::from)
    }
}

/// Day record as the model produced it.
///
/// Every field is kept so callers receive exactly what the model sent; the
/// accessors read the well-known fields and treat wrong-typed values as absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StructuredDay {
    fields: Map<String, Value>,
}

impl From<Map<String, Value>> for StructuredDay {
    fn from(fields: Map<String, Value>) -> Self {
        Self { fields }
    }
}

impl StructuredDay {
    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    pub fn field(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    pub fn day_number(&self) -> Option<i64> {
        match self.fields.get("day_number")? {
            Value::Number(number) => number.as_i64().or_else(|| {
                number
                    .as_f64()
                    .filter(|value| value.fract() == 0.0)
                    .map(|value| value as i64)
            }),
            Value::String(text) => text.trim().parse().ok(),
            _ => None,
        }
    }

    pub fn theme(&self) -> Option<&str> {
        non_empty_str(self.fields.get("theme"))
    }

    pub fn summary(&self) -> Option<&str> {
        non_empty_str(self.fields.get("summary"))
    }

    pub fn details(&self) -> Option<&str> {
        non_empty_str(self.fields.get("details"))
    }

    /// Activities in listed order; empty when the field is missing or not an array.
    pub fn activities(&self) -> Vec<Activity<'_>> {
        match self.fields.get("activities") {
            Some(Value::Array(items)) => items.iter().map(Activity::new).collect(),
            _ => Vec::new(),
        }
    }

    pub fn has_activities(&self) -> bool {
        matches!(self.fields.get("activities"), Some(Value::Array(_)))
    }

    /// Sum of every activity price that reads as a number, if positive.
    pub fn estimated_cost(&self) -> Option<f64> {
        let total: f64 = self
            .activities()
            .iter()
            .filter_map(|activity| activity.price().and_then(|price| price.amount()))
            .sum();
        (total > 0.0).then_some(total)
    }
}

/// Borrowed view over one activity entry of a structured day.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Activity<'a> {
    value: &'a Value,
}

impl<'a> Activity<'a> {
    pub fn new(value: &'a Value) -> Self {
        Self { value }
    }

    pub fn value(&self) -> &'a Value {
        self.value
    }

    pub fn time(&self) -> Option<&'a str> {
        non_empty_str(self.value.get("time"))
    }

    /// `name`, then `title`, then `activity`.
    pub fn name(&self) -> Option<&'a str> {
        ["name", "title", "activity"]
            .iter()
            .find_map(|key| non_empty_str(self.value.get(key)))
    }

    /// Name for display, falling back to the stringified entry.
    pub fn display_name(&self) -> String {
        if let Some(name) = self.name() {
            return name.to_string();
        }
        match self.value {
            Value::String(text) => text.clone(),
            other => other.to_string(),
        }
    }

    pub fn location(&self) -> Option<&'a str> {
        non_empty_str(self.value.get("location"))
    }

    pub fn description(&self) -> Option<&'a str> {
        non_empty_str(self.value.get("description"))
    }

    pub fn price(&self) -> Option<Price<'a>> {
        match self.value.get("price")? {
            Value::Number(number) => number.as_f64().map(Price::Number),
            Value::String(text) if !text.trim().is_empty() => Some(Price::Text(text)),
            _ => None,
        }
    }
}

/// Activity price as sent by the model.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Price<'a> {
    Number(f64),
    Text(&'a str),
}

impl Price<'_> {
    /// Numeric amount, reading the leading number of a text price ("25 USD" -> 25).
    pub fn amount(&self) -> Option<f64> {
        match self {
            Price::Number(value) => Some(*value),
            Price::Text(text) => LEADING_NUMBER
                .find(text.trim())
                .and_then(|found| found.as_str().parse().ok()),
        }
    }
}

impl std::fmt::Display for Price<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Price::Number(value) => write!(f, "{}", value),
            Price::Text(text) => f.write_str(text),
        }
    }
}

/// Form the completion took before normalization, kept for diagnostics.
#[derive(Debug, Clone, PartialEq)]
pub enum RawForm {
    Structured(Value),
    Text(String),
}

/// Result of normalizing one completion.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedResponse {
    pub itinerary: Itinerary,
    pub raw: RawForm,
}

impl NormalizedResponse {
    pub fn is_structured(&self) -> bool {
        matches!(self.raw, RawForm::Structured(_))
    }

    pub fn into_itinerary(self) -> Itinerary {
        self.itinerary
    }
}

fn non_empty_str(value: Option<&Value>) -> Option<&str> {
    value
        .and_then(Value::as_str)
        .filter(|text| !text.is_empty())
}

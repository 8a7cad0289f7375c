pub mod itinerary;
pub mod plan_template;
pub mod trip;

pub use itinerary::{Activity, DayEntry, Itinerary, NormalizedResponse, Price, RawForm, StructuredDay};
pub use plan_template::{plan_schema, PlanTemplate};
pub use trip::{Preferences, TripRequest};

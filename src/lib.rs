//! trip-planner-rs: travel itinerary generation on top of a generative text model
//!
//! The model is asked for a JSON itinerary, but completions arrive in every
//! shape: fenced JSON, JSON with unexpected field names, or plain prose. This
//! crate turns any completion into one predictable [`Itinerary`] so callers
//! can render it without special-casing.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use trip_planner_rs::{Planner, TripRequest};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let planner = Planner::from_env()?;
//!     let request = TripRequest::new("Paris", 3)?.with_budget("1200 EUR");
//!
//!     let response = planner.plan(&request).await?;
//!     println!("{}", serde_json::to_string_pretty(&response.itinerary)?);
//!     Ok(())
//! }
//! ```
//!
//! The pipeline itself is synchronous and never fails:
//!
//! ```rust
//! use trip_planner_rs::{normalize_response, DayEntry};
//!
//! let response = normalize_response("Day 1\nLouvre\nDay 2\nVersailles", "Paris");
//! assert_eq!(response.itinerary.plan[0], DayEntry::plain("Day 1 Louvre"));
//! ```

pub mod config;
pub mod core;
pub mod error;
pub mod render;
pub mod server;
pub(crate) mod services;
pub mod types;

pub use config::{PlannerConfig, ServerConfig};
pub use crate::core::{Planner, TextGenerator};
pub use error::{PlannerError, Result};
pub use render::render_text;
pub use services::fence::strip_code_fence;
pub use services::gemini_client::GeminiClient;
pub use services::line_grouper::{group_lines_by_day, is_day_marker};
pub use services::normalizer::normalize_response;
pub use services::parser::parse_structured;
pub use services::prompt::{generate_itinerary_prompt, generate_schema_prompt};
pub use services::schema_normalizer::normalize_structured;
pub use types::{
    Activity, DayEntry, Itinerary, NormalizedResponse, Preferences, Price, RawForm, StructuredDay,
    TripRequest,
};

#[cfg(feature = "cli")]
pub mod cli;

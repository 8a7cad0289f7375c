use std::sync::Arc;

use serde_json::Value;
use tracing::{info, warn};

use crate::{
    config::PlannerConfig,
    core::generator::TextGenerator,
    error::Result,
    services::{
        normalizer::normalize_response,
        prompt::{generate_itinerary_prompt, generate_schema_prompt},
    },
    types::{NormalizedResponse, TripRequest},
};

/// Runs one trip request through the model and the normalization pipeline
#[derive(Debug, Clone)]
pub struct Planner {
    generator: Arc<dyn TextGenerator>,
    schema_hint: bool,
}

impl Planner {
    pub fn new(generator: impl TextGenerator + 'static) -> Self {
        Self::from_generator(Arc::new(generator))
    }

    pub fn from_generator(generator: Arc<dyn TextGenerator>) -> Self {
        Self {
            generator,
            schema_hint: true,
        }
    }

    pub fn from_config(config: &PlannerConfig) -> Self {
        Self::new(config.client())
    }

    pub fn from_env() -> Result<Self> {
        Ok(Self::from_config(&PlannerConfig::from_env()?))
    }

    /// Append the JSON Schema of the expected answer to the prompt (on by default)
    pub fn with_schema_hint(mut self, enabled: bool) -> Self {
        self.schema_hint = enabled;
        self
    }

    pub fn prompt_for(&self, request: &TripRequest) -> String {
        if self.schema_hint {
            generate_schema_prompt(request)
        } else {
            generate_itinerary_prompt(request)
        }
    }

    /// Issue exactly one model call for `request` and normalize the completion.
    pub async fn plan(&self, request: &TripRequest) -> Result<NormalizedResponse> {
        info!(
            target: "trip_planner::planner",
            destination = request.destination(),
            days = request.days(),
            "generating itinerary"
        );

        let prompt = self.prompt_for(request);
        let completion = self.generator.generate(&prompt).await.map_err(|err| {
            warn!(target: "trip_planner::planner", error = %err, "model call failed");
            err
        })?;

        let response = normalize_response(&completion, request.destination());
        info!(
            target: "trip_planner::planner",
            days = response.itinerary.day_count(),
            structured = response.is_structured(),
            "itinerary ready"
        );
        Ok(response)
    }

    /// Validate an inbound `{destination, days, budget, prefs}` body, then plan.
    ///
    /// Validation errors are returned before the model is called.
    pub async fn plan_from_body(&self, body: &Value) -> Result<NormalizedResponse> {
        let request = TripRequest::from_body(body)?;
        self.plan(&request).await
    }
}

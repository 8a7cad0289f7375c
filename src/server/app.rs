//! Axum app: shared state, router and the plan handler.

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use tower_http::cors::CorsLayer;
use tracing::error;

use crate::{core::Planner, error::PlannerError};

/// Shared state handed to every request. The planner holds no mutable data.
#[derive(Clone, Debug)]
pub(crate) struct AppState {
    pub(crate) planner: Arc<Planner>,
}

/// Builds the router: `POST /api/plan/generate` and `GET /health`, with permissive CORS.
pub fn router(planner: Planner) -> Router {
    let state = AppState {
        planner: Arc::new(planner),
    };

    Router::new()
        .route("/api/plan/generate", post(generate_plan))
        .route("/health", get(health))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

/// Handles `POST /api/plan/generate`: validates the body, plans, and returns `{destination, plan}`.
async fn generate_plan(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> Response {
    // Unparsable bodies are treated like empty ones so they get the same 400.
    let body = body.map(|Json(value)| value).unwrap_or(Value::Null);

    match state.planner.plan_from_body(&body).await {
        Ok(response) => Json(response.into_itinerary()).into_response(),
        Err(err) => error_response(err),
    }
}

fn error_response(err: PlannerError) -> Response {
    if err.is_client_error() {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "destination and days are required" })),
        )
            .into_response();
    }

    error!(target: "trip_planner::server", error = %err, "generatePlan failed");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({
            "error": "Failed to generate itinerary",
            "details": err.to_string(),
        })),
    )
        .into_response()
}

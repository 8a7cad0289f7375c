use async_trait::async_trait;
use serde_json::{json, Value};
use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc,
};
use tokio::net::TcpListener;
use trip_planner_rs::{server::run_serve_on_listener, Planner, PlannerError, TextGenerator};

#[derive(Debug)]
struct ScriptedGenerator {
    completion: Result<String, String>,
    calls: Arc<AtomicUsize>,
}

#[async_trait]
impl TextGenerator for ScriptedGenerator {
    async fn generate(&self, _prompt: &str) -> trip_planner_rs::Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.completion.clone().map_err(PlannerError::Upstream)
    }
}

/// Starts the server on an ephemeral port and returns its base URL and the call counter.
async fn spawn_server(completion: Result<&str, &str>) -> (String, Arc<AtomicUsize>) {
    let calls = Arc::new(AtomicUsize::new(0));
    let generator = ScriptedGenerator {
        completion: completion.map(str::to_string).map_err(str::to_string),
        calls: calls.clone(),
    };

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(run_serve_on_listener(listener, Planner::new(generator)));

    (format!("http://{}", addr), calls)
}

async fn post_plan(base_url: &str, body: Value) -> (u16, Value) {
    let response = reqwest::Client::new()
        .post(format!("{}/api/plan/generate", base_url))
        .json(&body)
        .send()
        .await
        .unwrap();
    let status = response.status().as_u16();
    (status, response.json().await.unwrap())
}

#[tokio::test]
async fn test_generate_returns_canonical_shape() {
    let (base_url, calls) = spawn_server(Ok("Day 1\nVisit Eiffel Tower\nDay 2\nLouvre Museum")).await;

    let (status, body) = post_plan(
        &base_url,
        json!({"destination": "Paris", "days": "2", "budget": "", "prefs": "sightseeing"}),
    )
    .await;

    assert_eq!(status, 200);
    assert_eq!(
        body,
        json!({
            "destination": "Paris",
            "plan": ["Day 1 Visit Eiffel Tower", "Day 2 Louvre Museum"]
        })
    );
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_missing_destination_is_rejected_without_model_call() {
    let (base_url, calls) = spawn_server(Ok("{}")).await;

    let (status, body) = post_plan(&base_url, json!({"days": 3})).await;

    assert_eq!(status, 400);
    assert_eq!(body, json!({"error": "destination and days are required"}));
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_malformed_body_is_rejected() {
    let (base_url, calls) = spawn_server(Ok("{}")).await;

    let response = reqwest::Client::new()
        .post(format!("{}/api/plan/generate", base_url))
        .header("content-type", "application/json")
        .body("{not json")
        .send()
        .await
        .unwrap();

    assert_eq!(response.status().as_u16(), 400);
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_upstream_failure_is_500() {
    let (base_url, _) = spawn_server(Err("HTTP 403 Forbidden error: API key not valid")).await;

    let (status, body) = post_plan(&base_url, json!({"destination": "Paris", "days": 2})).await;

    assert_eq!(status, 500);
    assert_eq!(body["error"], "Failed to generate itinerary");
    assert!(body["details"].as_str().unwrap().contains("API key not valid"));
}

#[tokio::test]
async fn test_empty_completion_still_succeeds() {
    let (base_url, _) = spawn_server(Ok("")).await;

    let (status, body) = post_plan(&base_url, json!({"destination": "Oslo", "days": 1})).await;

    assert_eq!(status, 200);
    assert_eq!(body, json!({"destination": "Oslo", "plan": [""]}));
}

#[tokio::test]
async fn test_health() {
    let (base_url, _) = spawn_server(Ok("")).await;

    let body: Value = reqwest::get(format!("{}/health", base_url))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body, json!({"status": "ok"}));
}

//! End-to-end tests for the control-plane HTTP surface.
//!
//! These drive the full router in-process with `tower::ServiceExt` and
//! assert on exact response bodies.

use axum::body::{to_bytes, Body};
use axum::http::{header, Request, Response, StatusCode};
use axum::Router;
use photo_mcp::api::{create_router, AppState};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use tower::ServiceExt;
use uuid::Uuid;

/// Build a ready router over fresh state.
fn app() -> Router {
    let state = AppState::new();
    state.set_ready(true);
    create_router(state)
}

/// Decode a response body as JSON.
async fn body_json(response: Response<Body>) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body should be readable");
    serde_json::from_slice(&bytes).expect("body should be JSON")
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn post_json(uri: &str, body: impl Into<Body>) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(body.into())
        .unwrap()
}

#[tokio::test]
async fn health_returns_exact_body() {
    let response = app().oneshot(get("/health")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, json!({ "status": "ok" }));
}

#[tokio::test]
async fn cluster_returns_placeholder_for_empty_body() {
    let response = app()
        .oneshot(post_json("/cluster", Body::empty()))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        body_json(response).await,
        json!({ "message": "TODO: implement clustering job creation" })
    );
}

#[tokio::test]
async fn cluster_response_is_invariant_under_malformed_json() {
    let response = app()
        .oneshot(post_json("/cluster", "{not json at all"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        body_json(response).await,
        json!({ "message": "TODO: implement clustering job creation" })
    );
}

#[tokio::test]
async fn cluster_response_is_invariant_under_large_payloads() {
    let payload = "x".repeat(64 * 1024);

    let response = app().oneshot(post_json("/cluster", payload)).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        body_json(response).await,
        json!({ "message": "TODO: implement clustering job creation" })
    );
}

#[tokio::test]
async fn ingest_accepts_batch_and_reports_status() {
    let app = app();

    let payload = json!({
        "photos": [
            { "key": "uploads/2026/08/06/a.jpg", "url": "https://cdn.example/a.jpg" },
            { "key": "uploads/2026/08/06/b.jpg", "url": "https://cdn.example/b.jpg" }
        ]
    });

    let response = app
        .clone()
        .oneshot(post_json("/ingest", payload.to_string()))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::ACCEPTED);

    let body = body_json(response).await;
    let job_id: Uuid = body["jobId"]
        .as_str()
        .expect("jobId should be a string")
        .parse()
        .expect("jobId should be a UUID");

    let response = app
        .oneshot(get(&format!("/jobs/{job_id}/status")))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        body_json(response).await,
        json!({ "status": "completed", "progress": 100 })
    );
}

#[tokio::test]
async fn ingest_rejects_missing_photos() {
    let response = app()
        .oneshot(post_json("/ingest", json!({}).to_string()))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        body_json(response).await,
        json!({ "error": "Invalid payload: \"photos\" is required." })
    );
}

#[tokio::test]
async fn ingest_rejects_empty_photo_list() {
    let response = app()
        .oneshot(post_json("/ingest", json!({ "photos": [] }).to_string()))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        body_json(response).await,
        json!({ "error": "Invalid payload: \"photos\" is required." })
    );
}

#[tokio::test]
async fn ingest_rejects_unreadable_body() {
    let response = app()
        .oneshot(post_json("/ingest", "{not json"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        body_json(response).await,
        json!({ "error": "Invalid payload: \"photos\" is required." })
    );
}

#[tokio::test]
async fn ingest_rejects_non_array_photos() {
    let response = app()
        .oneshot(post_json("/ingest", json!({ "photos": "a.jpg" }).to_string()))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        body_json(response).await,
        json!({ "error": "Invalid payload: \"photos\" is required." })
    );
}

#[tokio::test]
async fn ingest_rejects_oversized_batch() {
    let photos: Vec<Value> = (0..201)
        .map(|i| json!({ "key": format!("uploads/{i}.jpg"), "url": format!("https://cdn.example/{i}.jpg") }))
        .collect();

    let response = app()
        .oneshot(post_json("/ingest", json!({ "photos": photos }).to_string()))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        body_json(response).await,
        json!({ "error": "Invalid payload: at most 200 photos per batch." })
    );
}

#[tokio::test]
async fn job_status_unknown_id_is_404() {
    let response = app()
        .oneshot(get(&format!("/jobs/{}/status", Uuid::new_v4())))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await, json!({ "error": "job not found" }));
}

#[tokio::test]
async fn job_status_invalid_id_is_400() {
    let response = app().oneshot(get("/jobs/not-a-uuid/status")).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn status_endpoint_counts_activity() {
    let app = app();

    for _ in 0..3 {
        let response = app
            .clone()
            .oneshot(post_json("/cluster", Body::empty()))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    let payload = json!({ "photos": [{ "key": "uploads/a.jpg", "url": "https://cdn.example/a.jpg" }] });
    let response = app
        .clone()
        .oneshot(post_json("/ingest", payload.to_string()))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::ACCEPTED);

    let response = app.oneshot(get("/api/v1/status")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["status"], "running");
    assert_eq!(body["cluster_requests"], 3);
    assert_eq!(body["jobs"]["tracked"], 1);
    assert_eq!(body["jobs"]["completed"], 1);
}

#[tokio::test]
async fn unknown_route_returns_404() {
    let response = app().oneshot(get("/uploads")).await.unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

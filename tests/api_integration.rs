//! Integration tests for the HTTP API
//!
//! Requests go straight into the router; no socket is bound.

use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Duration;
use tower::ServiceExt;

use practice_engine::config::PracticeConfig;
use practice_engine::core::{create_router, create_router_with_state, AppState};

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let request = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => request
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => request.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

async fn open_session(app: &Router, practice: &str) -> String {
    let (status, body) = send(
        app,
        Method::POST,
        "/session/new",
        Some(json!({ "practice_type": practice })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    body["session_id"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn test_health() {
    let app = create_router(PracticeConfig::default());
    let (status, body) = send(&app, Method::GET, "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["sessions_active"], 0);
}

#[tokio::test]
async fn test_practice_catalog() {
    let app = create_router(PracticeConfig::default());
    let (status, body) = send(&app, Method::GET, "/practices", None).await;
    assert_eq!(status, StatusCode::OK);

    let entries = body.as_array().unwrap();
    assert_eq!(entries.len(), 4);
    assert_eq!(entries[0]["practice_type"], "breathing");
    assert_eq!(entries[0]["total_duration_secs"], 84);
    assert_eq!(entries[3]["practice_type"], "grounding");
    assert!(entries[3]["total_duration_secs"].is_null());
}

#[tokio::test]
async fn test_new_session_starts_idle() {
    let app = create_router(PracticeConfig::default());
    let (status, body) = send(
        &app,
        Method::POST,
        "/session/new",
        Some(json!({ "practice_type": "meditation", "sound_enabled": false })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["snapshot"]["state"], "IDLE");
    assert_eq!(body["snapshot"]["label"], "5:00");
    assert_eq!(body["snapshot"]["sound_enabled"], false);

    let id = body["session_id"].as_str().unwrap();
    assert_eq!(body["websocket_url"], format!("/ws/{}", id));
}

#[tokio::test]
async fn test_unknown_practice_is_bad_request() {
    let app = create_router(PracticeConfig::default());
    let (status, body) = send(
        &app,
        Method::POST,
        "/session/new",
        Some(json!({ "practice_type": "yoga" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("yoga"));
}

#[tokio::test(start_paused = true)]
async fn test_command_flow() {
    let app = create_router(PracticeConfig::default());
    let id = open_session(&app, "breathing").await;

    let (status, body) = send(&app, Method::POST, &format!("/session/{}/start", id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["reason"], "R001_STARTED");
    assert_eq!(body["applied"], true);
    assert_eq!(body["snapshot"]["state"], "RUNNING");

    tokio::time::sleep(Duration::from_millis(5500)).await;

    let (_, body) = send(&app, Method::POST, &format!("/session/{}/pause", id), None).await;
    assert_eq!(body["reason"], "R002_PAUSED");
    assert_eq!(body["snapshot"]["elapsed_seconds"], 5);
    assert_eq!(body["snapshot"]["label"], "Hold");
    assert_eq!(body["snapshot"]["primary_action"], "Resume");

    let (_, body) = send(&app, Method::POST, &format!("/session/{}/pause", id), None).await;
    assert_eq!(body["reason"], "R002_PAUSE_IGNORED");
    assert_eq!(body["applied"], false);

    let (_, body) = send(&app, Method::POST, &format!("/session/{}/reset", id), None).await;
    assert_eq!(body["snapshot"]["state"], "IDLE");
    assert_eq!(body["snapshot"]["elapsed_seconds"], 0);

    let (status, body) = send(&app, Method::GET, &format!("/session/{}", id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["state"], "IDLE");
}

#[tokio::test]
async fn test_grounding_steps_over_http() {
    let app = create_router(PracticeConfig::default());
    let id = open_session(&app, "grounding").await;

    for _ in 0..4 {
        let (_, body) = send(&app, Method::POST, &format!("/session/{}/next", id), None).await;
        assert_eq!(body["reason"], "R005_STEP_ADVANCED");
    }
    let (_, body) = send(&app, Method::POST, &format!("/session/{}/advance", id), None).await;
    assert_eq!(body["reason"], "R004_COMPLETED");
    assert_eq!(body["snapshot"]["completed"], true);
}

#[tokio::test]
async fn test_unknown_command_is_bad_request() {
    let app = create_router(PracticeConfig::default());
    let id = open_session(&app, "breathing").await;
    let (status, body) = send(&app, Method::POST, &format!("/session/{}/jump", id), None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_missing_session_is_not_found() {
    let app = create_router(PracticeConfig::default());
    let (status, _) = send(&app, Method::GET, "/session/nope", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, Method::POST, "/session/nope/start", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, Method::DELETE, "/session/nope", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_closes_session() {
    let app = create_router(PracticeConfig::default());
    let id = open_session(&app, "meditation").await;
    send(&app, Method::POST, &format!("/session/{}/start", id), None).await;

    let (status, _) = send(&app, Method::DELETE, &format!("/session/{}", id), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = send(&app, Method::GET, &format!("/session/{}", id), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, body) = send(&app, Method::GET, "/health", None).await;
    assert_eq!(body["sessions_active"], 0);
}

#[tokio::test]
async fn test_sound_command_echoes_path_name() {
    let app = create_router(PracticeConfig::default());
    let id = open_session(&app, "meditation").await;
    let (status, body) = send(&app, Method::POST, &format!("/session/{}/sound", id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["command"], "sound");
    assert_eq!(body["reason"], "R006_SOUND_TOGGLED");
}

fn websocket_request(uri: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .header("connection", "upgrade")
        .header("upgrade", "websocket")
        .header("sec-websocket-version", "13")
        .header("sec-websocket-key", "dGhlIHNhbXBsZSBub25jZQ==")
        .body(Body::empty())
        .unwrap()
}

#[tokio::test]
async fn test_websocket_unknown_session_is_not_found() {
    let app = create_router(PracticeConfig::default());
    let response = app.oneshot(websocket_request("/ws/nope")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_websocket_without_upgradable_connection() {
    let app = create_router(PracticeConfig::default());
    let id = open_session(&app, "breathing").await;
    // no live connection behind the request, so it cannot be upgraded
    let response = app
        .clone()
        .oneshot(websocket_request(&format!("/ws/{}", id)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UPGRADE_REQUIRED);
}

/// A busy session never blocks requests for other sessions
#[tokio::test]
async fn test_busy_session_does_not_block_others() {
    let state = Arc::new(AppState::new(PracticeConfig::default()));
    let app = create_router_with_state(Arc::clone(&state));
    let busy = open_session(&app, "breathing").await;
    let other = open_session(&app, "meditation").await;

    let runner = state.runner(&busy).await.unwrap();
    let guard = runner.lock().await;

    let pending = {
        let app = app.clone();
        let uri = format!("/session/{}/start", busy);
        tokio::spawn(async move { send(&app, Method::POST, &uri, None).await })
    };
    for _ in 0..10 {
        tokio::task::yield_now().await;
    }
    assert!(!pending.is_finished());

    let (status, body) = tokio::time::timeout(
        Duration::from_secs(1),
        send(&app, Method::POST, &format!("/session/{}/start", other), None),
    )
    .await
    .expect("other session answered while the busy one was locked");
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["reason"], "R001_STARTED");

    let (status, _) = tokio::time::timeout(Duration::from_secs(1), send(&app, Method::GET, "/health", None))
        .await
        .expect("health answered while a session was locked");
    assert_eq!(status, StatusCode::OK);

    drop(guard);
    let (status, body) = pending.await.unwrap();
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["reason"], "R001_STARTED");
}

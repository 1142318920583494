use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use chrono::Duration as TimeDelta;
use petpoint_core::config::NlpConfig;
use petpoint_core::nlp::{DatasetRecord, NlpEngine};
use petpoint_core::session::{Clock, Exchange, ManualClock, SessionStore};
use petpoint_server::{build_router, AppState};
use std::sync::Arc;
use std::time::Duration;
use tower::ServiceExt;

fn dataset() -> Vec<DatasetRecord> {
    vec![
        DatasetRecord::new("halo selamat pagi", "Halo juga!").with_intent("greeting"),
        DatasetRecord::new("kucing saya tidak mau makan", "Periksakan ke dokter hewan.")
            .with_intent("pet_health")
            .with_entity("ANIMAL", "kucing"),
    ]
}

fn app_with(engine: NlpEngine) -> (Router, Arc<SessionStore>, ManualClock) {
    let clock = ManualClock::default();
    let sessions = Arc::new(SessionStore::with_clock(
        Duration::from_secs(300),
        Arc::new(clock.clone()),
    ));
    let state = AppState::new(Arc::clone(&sessions), Arc::new(engine));
    (build_router(state), sessions, clock)
}

fn app() -> (Router, Arc<SessionStore>, ManualClock) {
    app_with(NlpEngine::from_records(&dataset(), &NlpConfig::default()))
}

fn chat_request(body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/chat/")
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn json_body(response: axum::response::Response) -> serde_json::Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_health() {
    let (app, _, _) = app();
    let response = app
        .oneshot(Request::builder().uri("/health/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["status"], "OK");
    assert!(body["message"].is_string());
}

#[tokio::test]
async fn test_chat_returns_reply_and_records_exchange() {
    let (app, sessions, _) = app();
    let response = app
        .oneshot(chat_request(
            r#"{"text": "Kucing saya tidak mau makan!", "session_id": "abc"}"#,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["intent"], "pet_health");
    assert_eq!(
        body["entities"],
        serde_json::json!([{"entity": "ANIMAL", "value": "kucing"}])
    );
    assert_eq!(body["response"], "Periksakan ke dokter hewan.");

    assert_eq!(
        sessions.history("abc"),
        Some(vec![Exchange::new(
            "Kucing saya tidak mau makan!",
            "Periksakan ke dokter hewan."
        )])
    );
}

#[tokio::test]
async fn test_chat_appends_in_order_per_session() {
    let (app, sessions, clock) = app();
    for text in ["halo selamat pagi", "apa kabar"] {
        let body = serde_json::json!({"text": text, "session_id": "s1"}).to_string();
        let response = app.clone().oneshot(chat_request(&body)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        clock.advance(TimeDelta::seconds(10));
    }

    let history = sessions.history("s1").unwrap();
    assert_eq!(history.len(), 2);
    assert_eq!(history[0], Exchange::new("halo selamat pagi", "Halo juga!"));
    assert_eq!(history[1].user, "apa kabar");
    assert_eq!(history[1].bot, NlpConfig::default().fallback_response);
}

#[tokio::test]
async fn test_chat_missing_field_is_bad_request() {
    let (app, sessions, _) = app();
    for body in [r#"{"text": "halo"}"#, r#"{"session_id": "abc"}"#, r#"{"text": "halo", "session_id": ""}"#, "not json"] {
        let response = app.clone().oneshot(chat_request(body)).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "body: {}", body);
        let json = json_body(response).await;
        assert!(json["error"].as_str().unwrap().contains("session_id"));
    }
    assert!(sessions.is_empty());
}

#[tokio::test]
async fn test_chat_with_unloaded_engine_is_server_error() {
    let (app, sessions, _) = app_with(NlpEngine::unloaded());
    let response = app
        .oneshot(chat_request(r#"{"text": "halo", "session_id": "abc"}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = json_body(response).await;
    assert_eq!(body["error"], "Server configuration error.");
    assert!(!sessions.contains("abc"));
}

#[tokio::test]
async fn test_reset_session_endpoint_is_idempotent() {
    let (app, sessions, _) = app();
    sessions.append("abc", Exchange::new("hi", "hello"));

    for _ in 0..2 {
        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .method("DELETE")
                    .uri("/sessions/abc")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }
    assert!(!sessions.contains("abc"));
}

#[tokio::test]
async fn test_chat_session_expires_after_timeout() {
    let (app, sessions, clock) = app();
    let response = app
        .oneshot(chat_request(r#"{"text": "halo", "session_id": "abc"}"#))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    clock.advance(TimeDelta::seconds(301));
    let expired = sessions.sweep(clock.now());
    assert!(expired.contains("abc"));
    assert!(sessions.history("abc").is_none());
}

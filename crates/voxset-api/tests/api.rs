//! API integration tests.
//!
//! These exercise the router end to end with tower's oneshot, against a
//! temporary dataset tree. Nothing here touches the network: the
//! process-audio cases all fail validation before the download stage.

use std::net::SocketAddr;

use axum::body::Body;
use axum::extract::connect_info::ConnectInfo;
use axum::http::{header, Request, StatusCode};
use serde_json::{json, Value};
use tempfile::TempDir;
use tower::ServiceExt;

use voxset_api::{create_router, ApiConfig, AppState};

fn test_state(dir: &TempDir) -> AppState {
    let config = ApiConfig {
        data_dir: dir.path().join("data"),
        temp_dir: dir.path().join("temp"),
        rate_limit_rps: 100,
        ..ApiConfig::default()
    };
    AppState::new(config)
}

fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .extension(ConnectInfo(SocketAddr::from(([127, 0, 0, 1], 9999))))
        .body(Body::empty())
        .unwrap()
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .extension(ConnectInfo(SocketAddr::from(([127, 0, 0, 1], 9999))))
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_health_endpoint() {
    let dir = TempDir::new().unwrap();
    let app = create_router(test_state(&dir), None);

    let response = app.oneshot(get("/health")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn test_root_banner() {
    let dir = TempDir::new().unwrap();
    let app = create_router(test_state(&dir), None);

    let response = app.oneshot(get("/")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["status"], "running");
}

#[tokio::test]
async fn test_languages_endpoint() {
    let dir = TempDir::new().unwrap();
    let app = create_router(test_state(&dir), None);

    let response = app.oneshot(get("/languages")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    let languages = body["languages"].as_object().unwrap();
    assert_eq!(languages.len(), 7);
    assert_eq!(languages["french"], "Français");
    assert_eq!(languages["japanese"], "日本語");
}

#[tokio::test]
async fn test_list_files_unknown_language() {
    let dir = TempDir::new().unwrap();
    let app = create_router(test_state(&dir), None);

    let response = app.oneshot(get("/files/klingon")).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = body_json(response).await;
    assert!(body["detail"].as_str().unwrap().contains("Invalid language"));
}

#[tokio::test]
async fn test_list_files_empty_language() {
    let dir = TempDir::new().unwrap();
    let app = create_router(test_state(&dir), None);

    let response = app.oneshot(get("/files/german")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["files"], json!([]));
}

#[tokio::test]
async fn test_list_files_returns_written_segments() {
    let dir = TempDir::new().unwrap();
    let state = test_state(&dir);
    state.library.ensure_directories().unwrap();
    std::fs::write(
        state.library.language_dir("english".parse().unwrap()).join("talk_english_men_part1.wav"),
        b"RIFF",
    )
    .unwrap();

    let app = create_router(state, None);
    let response = app.oneshot(get("/files/english")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["files"], json!(["talk_english_men_part1.wav"]));
}

#[tokio::test]
async fn test_process_audio_rejects_malformed_url() {
    let dir = TempDir::new().unwrap();
    let app = create_router(test_state(&dir), None);

    let response = app
        .oneshot(post_json(
            "/process-audio",
            json!({
                "url": "not a url",
                "language": "english",
                "title": "sample",
                "gender": "women"
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_process_audio_rejects_non_youtube_url() {
    let dir = TempDir::new().unwrap();
    let app = create_router(test_state(&dir), None);

    let response = app
        .oneshot(post_json(
            "/process-audio",
            json!({
                "url": "https://example.com/watch?v=dQw4w9WgXcQ",
                "language": "english",
                "title": "sample",
                "gender": "women"
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = body_json(response).await;
    assert!(body["detail"].as_str().unwrap().to_lowercase().contains("youtube"));
}

#[tokio::test]
async fn test_process_audio_rejects_empty_title() {
    let dir = TempDir::new().unwrap();
    let app = create_router(test_state(&dir), None);

    let response = app
        .oneshot(post_json(
            "/process-audio",
            json!({
                "url": "https://youtube.com/watch?v=dQw4w9WgXcQ",
                "language": "english",
                "title": "",
                "gender": "men"
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_process_audio_rejects_out_of_range_segment_duration() {
    let dir = TempDir::new().unwrap();
    let app = create_router(test_state(&dir), None);

    let response = app
        .oneshot(post_json(
            "/process-audio",
            json!({
                "url": "https://youtube.com/watch?v=dQw4w9WgXcQ",
                "language": "english",
                "title": "sample",
                "gender": "men",
                "segment_duration": 0.0
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_unknown_route_is_404() {
    let dir = TempDir::new().unwrap();
    let app = create_router(test_state(&dir), None);

    let response = app.oneshot(get("/nope")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_security_headers_present() {
    let dir = TempDir::new().unwrap();
    let app = create_router(test_state(&dir), None);

    let response = app.oneshot(get("/health")).await.unwrap();
    assert_eq!(
        response.headers().get("X-Content-Type-Options").unwrap(),
        "nosniff"
    );
    assert!(response.headers().contains_key("X-Request-ID"));
}

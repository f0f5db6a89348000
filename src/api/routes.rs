use axum::{
    http::{header, Method},
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    services::ServeDir,
    trace::TraceLayer,
};

use super::handlers;
use crate::tts::TtsService;

pub struct AppState {
    pub tts: TtsService,
}

pub fn create_router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE]);

    Router::new()
        .route("/tts", post(handlers::tts))
        .route("/audio/:filename", get(handlers::get_audio))
        .route("/health", get(handlers::health))
        .fallback_service(ServeDir::new("static").append_index_html_on_directories(true))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    use super::*;
    use crate::tts::engine::fake::FakeEngine;

    fn test_router(dir: &std::path::Path) -> Router {
        let engine = Arc::new(FakeEngine::new());
        let tts = TtsService::new(engine, dir.to_path_buf());
        create_router(Arc::new(AppState { tts }))
    }

    fn tts_request(body: serde_json::Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/tts")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn empty_text_is_rejected_with_400() {
        let dir = tempfile::tempdir().unwrap();
        let app = test_router(dir.path());

        let response = app
            .oneshot(tts_request(serde_json::json!({ "text": "   " })))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = response.into_body().collect().await.unwrap().to_bytes();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["code"], "INVALID_INPUT");
    }

    #[tokio::test]
    async fn synthesized_audio_is_served_back_byte_for_byte() {
        let dir = tempfile::tempdir().unwrap();
        let app = test_router(dir.path());

        let response = app
            .clone()
            .oneshot(tts_request(serde_json::json!({ "text": "Hello there" })))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);

        let body = response.into_body().collect().await.unwrap().to_bytes();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        let filename = json["filename"].as_str().unwrap();
        let audio_url = json["audio_url"].as_str().unwrap();
        assert_eq!(audio_url, format!("/audio/{}", filename));

        let stored = std::fs::read(dir.path().join(filename)).unwrap();

        let response = app
            .oneshot(Request::builder().uri(audio_url).body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "audio/wav"
        );

        let served = response.into_body().collect().await.unwrap().to_bytes();
        assert_eq!(served.as_ref(), stored.as_slice());
    }

    #[tokio::test]
    async fn unknown_audio_file_is_404() {
        let dir = tempfile::tempdir().unwrap();
        let app = test_router(dir.path());

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/audio/output_00000000-0000-0000-0000-000000000000.wav")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn health_reports_ok() {
        let dir = tempfile::tempdir().unwrap();
        let app = test_router(dir.path());

        let response = app
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }
}

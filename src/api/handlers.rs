use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use std::sync::Arc;

use super::{HealthResponse, TtsRequest, TtsResponse};
use crate::api::routes::AppState;
use crate::error::AppError;

pub async fn tts(
    State(state): State<Arc<AppState>>,
    Json(request): Json<TtsRequest>,
) -> Result<Json<TtsResponse>, AppError> {
    let artifact = state
        .tts
        .synthesize(&request.text, request.language.as_deref(), &request.voice)
        .await?;

    Ok(Json(TtsResponse {
        audio_url: artifact.audio_url,
        filename: artifact.filename,
    }))
}

pub async fn get_audio(
    State(state): State<Arc<AppState>>,
    Path(filename): Path<String>,
) -> Result<Response, AppError> {
    let bytes = state.tts.load_audio(&filename).await?;

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "audio/wav".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", filename),
            ),
        ],
        bytes,
    )
        .into_response())
}

pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

pub mod handlers;
pub mod routes;

use serde::{Deserialize, Serialize};

use crate::tts::voice;

#[derive(Debug, Deserialize)]
pub struct TtsRequest {
    pub text: String,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default = "default_voice")]
    pub voice: String,
}

fn default_voice() -> String {
    voice::DEFAULT_VOICE.to_string()
}

#[derive(Debug, Serialize)]
pub struct TtsResponse {
    pub audio_url: String,
    pub filename: String,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

use async_trait::async_trait;
use reqwest::Client;

use crate::error::AppError;

/// Audio container requested from the provider. RIFF output keeps the
/// pipeline in plain WAV end to end.
const OUTPUT_FORMAT: &str = "riff-24khz-16bit-mono-pcm";

/// A provider that turns text into a waveform.
#[async_trait]
pub trait SpeechEngine: Send + Sync {
    /// Synthesize `text` with the given provider voice, returning WAV bytes.
    async fn synthesize(&self, text: &str, voice: &str) -> Result<Vec<u8>, AppError>;
}

/// Client for the Azure Cognitive Services Speech REST endpoint.
///
/// Requests carry an SSML body; the voice name selects both the speaker
/// and the synthesis model. No timeout is set on the request: synthesis
/// of long text is allowed to take as long as the provider needs.
pub struct AzureSpeechEngine {
    client: Client,
    endpoint: String,
    api_key: String,
}

impl AzureSpeechEngine {
    pub fn new(region: &str, api_key: String) -> Self {
        Self {
            client: Client::new(),
            endpoint: format!(
                "https://{}.tts.speech.microsoft.com/cognitiveservices/v1",
                region
            ),
            api_key,
        }
    }
}

#[async_trait]
impl SpeechEngine for AzureSpeechEngine {
    async fn synthesize(&self, text: &str, voice: &str) -> Result<Vec<u8>, AppError> {
        let ssml = build_ssml(text, voice);

        tracing::debug!(voice, text_len = text.len(), "Requesting synthesis");

        let response = self
            .client
            .post(&self.endpoint)
            .header("Ocp-Apim-Subscription-Key", &self.api_key)
            .header("Content-Type", "application/ssml+xml")
            .header("X-Microsoft-OutputFormat", OUTPUT_FORMAT)
            .body(ssml)
            .send()
            .await
            .map_err(|e| AppError::Provider(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(AppError::Provider(format!(
                "provider returned {}: {}",
                status, detail
            )));
        }

        let audio = response
            .bytes()
            .await
            .map_err(|e| AppError::Provider(e.to_string()))?;

        Ok(audio.to_vec())
    }
}

/// Wrap text in the SSML envelope the synthesis endpoint expects.
fn build_ssml(text: &str, voice: &str) -> String {
    format!(
        "<speak version='1.0' xml:lang='{}'><voice name='{}'>{}</voice></speak>",
        voice_lang(voice),
        voice,
        escape_xml(text)
    )
}

/// Voice names carry their locale as a prefix (e.g. "es-ES-ElviraNeural").
fn voice_lang(voice: &str) -> &str {
    match voice.match_indices('-').nth(1) {
        Some((idx, _)) => &voice[..idx],
        None => "en-US",
    }
}

fn escape_xml(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

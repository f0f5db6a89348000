pub mod engine;
pub mod voice;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use lazy_static::lazy_static;
use regex::Regex;
use uuid::Uuid;

use crate::audio;
use crate::error::AppError;

pub use engine::SpeechEngine;
pub use voice::Locale;

/// Semitones the baby voice is raised by.
const BABY_PITCH_SEMITONES: f32 = 4.0;

lazy_static! {
    // The only filenames the pipeline ever produces: output_<uuid>.wav
    static ref ARTIFACT_NAME: Regex = Regex::new(
        r"^output_[0-9a-f]{8}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{12}\.wav$"
    )
    .unwrap();
}

/// Reference to one synthesized waveform on disk.
#[derive(Debug, Clone)]
pub struct SynthesisArtifact {
    pub filename: String,
    pub file_path: PathBuf,
    pub audio_url: String,
}

pub struct TtsService {
    engine: Arc<dyn SpeechEngine>,
    audio_dir: PathBuf,
}

impl TtsService {
    pub fn new(engine: Arc<dyn SpeechEngine>, audio_dir: PathBuf) -> Self {
        Self { engine, audio_dir }
    }

    /// Run the synthesis pipeline for one request.
    pub async fn synthesize(
        &self,
        text: &str,
        language: Option<&str>,
        requested_voice: &str,
    ) -> Result<SynthesisArtifact, AppError> {
        // 1. Validate
        let text = text.trim();
        if text.is_empty() {
            return Err(AppError::InvalidInput("Text cannot be empty".into()));
        }

        // 2. Resolve the locale, detecting it when the request names none.
        // An empty language string counts as absent.
        let locale = match language {
            Some(code) if !code.is_empty() => Locale::parse_or_default(code),
            _ => voice::detect_locale(text),
        };

        // 3-4. Resolve the provider voice
        let voice_id = voice::resolve_voice(requested_voice, locale);

        tracing::info!(
            locale = %locale,
            voice = voice_id,
            text_len = text.len(),
            "Synthesizing"
        );

        // 5. Unique target path
        let filename = format!("output_{}.wav", Uuid::new_v4());
        tokio::fs::create_dir_all(&self.audio_dir).await?;
        let file_path = self.audio_dir.join(&filename);

        // 6. Synthesize and persist
        let wav = self.engine.synthesize(text, voice_id).await?;
        tokio::fs::write(&file_path, &wav)
            .await
            .map_err(|e| AppError::Provider(e.to_string()))?;

        // 7. The baby voice is the default voice pitched up after the fact
        if requested_voice == voice::BABY_VOICE {
            apply_baby_pitch(&file_path)?;
        }

        Ok(SynthesisArtifact {
            audio_url: format!("/audio/{}", filename),
            file_path,
            filename,
        })
    }

    /// Look up a previously synthesized waveform by filename.
    pub async fn load_audio(&self, filename: &str) -> Result<Vec<u8>, AppError> {
        // Names outside the artifact scheme can never have been produced
        if !ARTIFACT_NAME.is_match(filename) {
            return Err(AppError::NotFound(filename.to_string()));
        }

        let path = self.audio_dir.join(filename);
        match tokio::fs::read(&path).await {
            Ok(bytes) => Ok(bytes),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(AppError::NotFound(filename.to_string()))
            }
            Err(e) => Err(AppError::Io(e)),
        }
    }
}

/// Reload the finished waveform, raise its pitch, and write it back.
fn apply_baby_pitch(path: &Path) -> Result<(), AppError> {
    let (samples, spec) = audio::load(path)?;
    let shifted = audio::pitch::shift(&samples, spec.channels, BABY_PITCH_SEMITONES);
    audio::store(path, &shifted, spec)?;

    tracing::debug!(path = %path.display(), "Applied baby pitch shift");

    Ok(())
}

pub mod pitch;

use std::path::Path;

use hound::{SampleFormat, WavReader, WavSpec, WavWriter};

use crate::error::AppError;

/// Decode a WAV file into interleaved f32 samples plus its spec.
pub fn load(path: &Path) -> Result<(Vec<f32>, WavSpec), AppError> {
    let reader = WavReader::open(path).map_err(wav_err)?;
    let spec = reader.spec();

    let samples = match spec.sample_format {
        SampleFormat::Float => reader
            .into_samples::<f32>()
            .collect::<Result<Vec<_>, _>>()
            .map_err(wav_err)?,
        SampleFormat::Int => {
            let scale = (1i64 << (spec.bits_per_sample - 1)) as f32;
            reader
                .into_samples::<i32>()
                .map(|s| s.map(|v| v as f32 / scale))
                .collect::<Result<Vec<_>, _>>()
                .map_err(wav_err)?
        }
    };

    Ok((samples, spec))
}

/// Encode interleaved f32 samples as 16-bit PCM, overwriting `path`.
pub fn store(path: &Path, samples: &[f32], spec: WavSpec) -> Result<(), AppError> {
    let out_spec = WavSpec {
        channels: spec.channels,
        sample_rate: spec.sample_rate,
        bits_per_sample: 16,
        sample_format: SampleFormat::Int,
    };

    let mut writer = WavWriter::create(path, out_spec).map_err(wav_err)?;
    for sample in samples {
        let scaled = (sample * 32767.0).clamp(-32768.0, 32767.0) as i16;
        writer.write_sample(scaled).map_err(wav_err)?;
    }
    writer.finalize().map_err(wav_err)?;

    Ok(())
}

// Waveform decode/encode problems count as synthesis failures: they can
// only happen downstream of the provider call.
fn wav_err(e: hound::Error) -> AppError {
    AppError::Provider(e.to_string())
}

/// Resample-based pitch shift: output frame `i` reads the input at
/// `i * factor` with linear interpolation, so raising the pitch shortens
/// the clip the way speeding up a tape does.
pub fn shift(samples: &[f32], channels: u16, semitones: f32) -> Vec<f32> {
    if samples.is_empty() || semitones == 0.0 {
        return samples.to_vec();
    }

    let factor = 2f64.powf(semitones as f64 / 12.0);
    let channel_count = channels.max(1) as usize;
    let frame_count = samples.len() / channel_count;
    if frame_count == 0 {
        return samples.to_vec();
    }
    let out_frames = (frame_count as f64 / factor) as usize;

    let mut shifted = Vec::with_capacity(out_frames * channel_count);
    for i in 0..out_frames {
        let src_pos = i as f64 * factor;
        let src_idx = src_pos as usize;
        let frac = (src_pos - src_idx as f64) as f32;

        for ch in 0..channel_count {
            let idx0 = src_idx * channel_count + ch;
            let idx1 = (src_idx + 1).min(frame_count - 1) * channel_count + ch;

            let s0 = samples.get(idx0).copied().unwrap_or(0.0);
            let s1 = samples.get(idx1).copied().unwrap_or(s0);

            shifted.push(s0 + (s1 - s0) * frac);
        }
    }

    shifted
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sine(freq: f32, sample_rate: u32, frames: usize) -> Vec<f32> {
        (0..frames)
            .map(|i| {
                let t = i as f32 / sample_rate as f32;
                (2.0 * std::f32::consts::PI * freq * t).sin()
            })
            .collect()
    }

    fn zero_crossing_rate(samples: &[f32]) -> f32 {
        let crossings = samples
            .windows(2)
            .filter(|w| (w[0] >= 0.0) != (w[1] >= 0.0))
            .count();
        crossings as f32 / samples.len() as f32
    }

    #[test]
    fn zero_semitones_is_identity() {
        let input = sine(440.0, 24_000, 1_000);
        assert_eq!(shift(&input, 1, 0.0), input);
    }

    #[test]
    fn empty_input_stays_empty() {
        assert!(shift(&[], 1, 4.0).is_empty());
    }

    #[test]
    fn octave_up_halves_length_and_doubles_frequency() {
        let input = sine(220.0, 24_000, 4_800);
        let shifted = shift(&input, 1, 12.0);

        assert!((shifted.len() as i64 - 2_400).abs() <= 1);

        let ratio = zero_crossing_rate(&shifted) / zero_crossing_rate(&input);
        assert!((ratio - 2.0).abs() < 0.1, "crossing ratio {}", ratio);
    }

    #[test]
    fn four_semitones_up_raises_frequency_by_a_major_third() {
        let input = sine(440.0, 24_000, 4_800);
        let shifted = shift(&input, 1, 4.0);

        // 2^(4/12) ~= 1.26
        let expected_len = (4_800f64 / 1.2599) as i64;
        assert!((shifted.len() as i64 - expected_len).abs() <= 1);

        let ratio = zero_crossing_rate(&shifted) / zero_crossing_rate(&input);
        assert!((ratio - 1.26).abs() < 0.1, "crossing ratio {}", ratio);
    }

    #[test]
    fn octave_down_doubles_length() {
        let input = sine(440.0, 24_000, 2_400);
        let shifted = shift(&input, 1, -12.0);
        assert!((shifted.len() as i64 - 4_800).abs() <= 1);
    }

    #[test]
    fn stereo_frames_shift_per_channel() {
        // Left channel constant, right channel ramp: both must survive
        let mut input = Vec::new();
        for i in 0..1_000 {
            input.push(0.5);
            input.push(i as f32 / 1_000.0);
        }

        let shifted = shift(&input, 2, 12.0);
        assert_eq!(shifted.len() % 2, 0);

        for frame in shifted.chunks(2) {
            assert!((frame[0] - 0.5).abs() < 1e-6);
        }
        // Ramp still monotonic after resampling
        let right: Vec<f32> = shifted.chunks(2).map(|f| f[1]).collect();
        assert!(right.windows(2).all(|w| w[1] >= w[0]));
    }
}

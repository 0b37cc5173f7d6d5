//! PCM sample conversion helpers.
//!
//! The capture path stores audio as little-endian signed 16-bit PCM bytes;
//! the inference engine wants normalized `f32` in `[-1.0, 1.0]`.  This
//! module provides the conversions plus the channel downmix and 16 kHz
//! resampling used by the cpal source (the resampler is linear
//! interpolation — adequate for speech and dependency-free).

/// Target sample rate of everything downstream of the capture source (Hz).
pub const TARGET_SAMPLE_RATE: u32 = 16_000;

// ---------------------------------------------------------------------------
// PCM16 <-> f32
// ---------------------------------------------------------------------------

/// Interpret little-endian PCM16 bytes as normalized `f32` samples.
///
/// Each pair of bytes becomes one sample in `[-1.0, 1.0)` via
/// `i16 / 32768.0`.  A trailing odd byte is ignored.
pub fn pcm16_to_f32(bytes: &[u8]) -> Vec<f32> {
    bytes
        .chunks_exact(2)
        .map(|pair| i16::from_le_bytes([pair[0], pair[1]]) as f32 / 32_768.0)
        .collect()
}

/// Convert normalized `f32` samples to little-endian PCM16 bytes.
///
/// Samples are clamped to `[-1.0, 1.0]` before quantization so an
/// out-of-range input cannot wrap around.
pub fn f32_to_pcm16(samples: &[f32]) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(samples.len() * 2);
    for &s in samples {
        let v = (s.clamp(-1.0, 1.0) * 32_767.0) as i16;
        bytes.extend_from_slice(&v.to_le_bytes());
    }
    bytes
}

// ---------------------------------------------------------------------------
// Channel downmix
// ---------------------------------------------------------------------------

/// Mix interleaved multi-channel audio down to mono by averaging channels.
///
/// * `channels == 1` returns the input unchanged (owned).
/// * `channels == 0` returns an empty vector.
pub fn downmix_to_mono(samples: &[f32], channels: u16) -> Vec<f32> {
    match channels {
        0 => Vec::new(),
        1 => samples.to_vec(),
        n => {
            let n = n as usize;
            samples
                .chunks_exact(n)
                .map(|frame| frame.iter().sum::<f32>() / n as f32)
                .collect()
        }
    }
}

// ---------------------------------------------------------------------------
// Resampling
// ---------------------------------------------------------------------------

/// Resample mono `samples` from `source_rate` Hz to 16 000 Hz using linear
/// interpolation.
///
/// A source already at 16 kHz is returned unchanged; the output length is
/// approximately `samples.len() * 16_000 / source_rate`.
pub fn resample_to_16k(samples: &[f32], source_rate: u32) -> Vec<f32> {
    if source_rate == TARGET_SAMPLE_RATE {
        return samples.to_vec();
    }
    if samples.is_empty() {
        return Vec::new();
    }

    let ratio = TARGET_SAMPLE_RATE as f64 / source_rate as f64;
    let output_len = (samples.len() as f64 * ratio).ceil() as usize;
    let mut output = Vec::with_capacity(output_len);

    for i in 0..output_len {
        let src_pos = i as f64 / ratio;
        let idx = src_pos as usize;
        let frac = (src_pos - idx as f64) as f32;

        let sample = if idx + 1 < samples.len() {
            samples[idx] * (1.0 - frac) + samples[idx + 1] * frac
        } else if idx < samples.len() {
            samples[idx]
        } else {
            0.0
        };
        output.push(sample);
    }

    output
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    // ---- pcm16_to_f32 ------------------------------------------------------

    #[test]
    fn pcm16_to_f32_normalizes_by_32768() {
        // 16384 / 32768 = 0.5
        let bytes = 16_384i16.to_le_bytes();
        let samples = pcm16_to_f32(&bytes);
        assert_eq!(samples.len(), 1);
        assert!((samples[0] - 0.5).abs() < 1e-6);
    }

    #[test]
    fn pcm16_to_f32_handles_negative_full_scale() {
        let bytes = i16::MIN.to_le_bytes();
        let samples = pcm16_to_f32(&bytes);
        assert!((samples[0] + 1.0).abs() < 1e-6);
    }

    #[test]
    fn pcm16_to_f32_zero_is_silence() {
        let samples = pcm16_to_f32(&[0, 0, 0, 0]);
        assert_eq!(samples, vec![0.0, 0.0]);
    }

    #[test]
    fn pcm16_to_f32_ignores_trailing_odd_byte() {
        let samples = pcm16_to_f32(&[0, 0, 0x7f]);
        assert_eq!(samples.len(), 1);
    }

    // ---- f32_to_pcm16 ------------------------------------------------------

    #[test]
    fn f32_to_pcm16_round_trips_mid_scale() {
        let bytes = f32_to_pcm16(&[0.5]);
        let back = pcm16_to_f32(&bytes);
        assert!((back[0] - 0.5).abs() < 1e-3);
    }

    #[test]
    fn f32_to_pcm16_clamps_out_of_range() {
        let bytes = f32_to_pcm16(&[2.0, -2.0]);
        let back = pcm16_to_f32(&bytes);
        assert!(back[0] <= 1.0 && back[0] > 0.99);
        assert!(back[1] >= -1.0 && back[1] < -0.99);
    }

    // ---- downmix_to_mono ---------------------------------------------------

    #[test]
    fn downmix_mono_is_identity() {
        let input = vec![0.1_f32, 0.2, 0.3];
        assert_eq!(downmix_to_mono(&input, 1), input);
    }

    #[test]
    fn downmix_stereo_averages_frames() {
        let input = vec![1.0_f32, -1.0, 0.5, 0.5];
        let out = downmix_to_mono(&input, 2);
        assert_eq!(out.len(), 2);
        assert!((out[0]).abs() < 1e-6);
        assert!((out[1] - 0.5).abs() < 1e-6);
    }

    #[test]
    fn downmix_zero_channels_is_empty() {
        assert!(downmix_to_mono(&[1.0, 2.0], 0).is_empty());
    }

    // ---- resample_to_16k ---------------------------------------------------

    #[test]
    fn resample_16k_is_noop() {
        let input: Vec<f32> = (0..160).map(|i| i as f32 / 160.0).collect();
        assert_eq!(resample_to_16k(&input, 16_000), input);
    }

    #[test]
    fn resample_48k_halves_to_one_third() {
        // 480 samples @ 48 kHz = 10 ms → 160 samples @ 16 kHz
        let out = resample_to_16k(&vec![0.5_f32; 480], 48_000);
        assert_eq!(out.len(), 160);
    }

    #[test]
    fn resample_preserves_dc_amplitude() {
        let out = resample_to_16k(&vec![0.25_f32; 441], 44_100);
        for &s in &out {
            assert!((s - 0.25).abs() < 1e-5, "amplitude drift: {s}");
        }
    }

    #[test]
    fn resample_empty_is_empty() {
        assert!(resample_to_16k(&[], 48_000).is_empty());
    }
}

//! WAV persistence boundary.
//!
//! The capture worker hands the finished session buffer to a
//! [`RecordingSink`]; the production sink is [`WavSink`], which writes a
//! PCM16 WAV via `hound`.  The same module hosts [`read_wav_samples`], the
//! file-side entry of the transcription pipeline — it returns normalized
//! 16 kHz mono `f32` samples regardless of the container's channel count,
//! rate or sample format.

use std::path::Path;

use thiserror::Error;

use crate::audio::convert::{downmix_to_mono, resample_to_16k};
use crate::audio::source::CaptureFormat;

// ---------------------------------------------------------------------------
// SinkError
// ---------------------------------------------------------------------------

/// Errors from writing or reading a recording.
#[derive(Debug, Error)]
pub enum SinkError {
    #[error("wav error: {0}")]
    Wav(#[from] hound::Error),

    #[error("recorded data is not aligned to whole PCM16 samples")]
    Misaligned,
}

// ---------------------------------------------------------------------------
// RecordingSink trait
// ---------------------------------------------------------------------------

/// Persistence collaborator for finished capture sessions.
///
/// Invoked exactly once per session with the session buffer's final
/// contents — also on early termination, where the buffer is simply short.
pub trait RecordingSink: Send + Sync {
    /// Persist `pcm` (raw little-endian PCM16 bytes) to `path`.
    fn save(&self, pcm: &[u8], format: &CaptureFormat, path: &Path) -> Result<(), SinkError>;
}

// ---------------------------------------------------------------------------
// WavSink
// ---------------------------------------------------------------------------

/// Writes recordings as standard PCM16 WAV files.
pub struct WavSink;

impl RecordingSink for WavSink {
    fn save(&self, pcm: &[u8], format: &CaptureFormat, path: &Path) -> Result<(), SinkError> {
        if pcm.len() % 2 != 0 {
            return Err(SinkError::Misaligned);
        }

        let spec = hound::WavSpec {
            channels: format.channels,
            sample_rate: format.sample_rate_hz,
            bits_per_sample: 16,
            sample_format: hound::SampleFormat::Int,
        };

        let mut writer = hound::WavWriter::create(path, spec)?;
        for pair in pcm.chunks_exact(2) {
            writer.write_sample(i16::from_le_bytes([pair[0], pair[1]]))?;
        }
        writer.finalize()?;

        log::debug!("saved {} bytes of PCM to {}", pcm.len(), path.display());
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// WAV reading
// ---------------------------------------------------------------------------

/// Read a WAV file into normalized 16 kHz mono `f32` samples.
///
/// Integer and float containers are both accepted; multi-channel audio is
/// downmixed and non-16 kHz audio resampled so the result always satisfies
/// the inference engine's input format.
pub fn read_wav_samples(path: &Path) -> Result<Vec<f32>, SinkError> {
    let mut reader = hound::WavReader::open(path)?;
    let spec = reader.spec();

    let samples: Vec<f32> = match spec.sample_format {
        hound::SampleFormat::Int => reader
            .samples::<i16>()
            .map(|s| s.map(|v| v as f32 / 32_768.0))
            .collect::<Result<_, _>>()?,
        hound::SampleFormat::Float => reader.samples::<f32>().collect::<Result<_, _>>()?,
    };

    let mono = downmix_to_mono(&samples, spec.channels);
    Ok(resample_to_16k(&mono, spec.sample_rate))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

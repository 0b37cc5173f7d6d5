//! Audio layer — rolling buffers, PCM conversion, the microphone boundary
//! and WAV persistence.
//!
//! # Data flow
//!
//! ```text
//! Microphone → CpalSource (downmix + resample → PCM16 @ 16 kHz)
//!           → Recorder read loop → RollingBuffer (session, realtime)
//!           → WavSink / pcm16_to_f32 → inference engine
//! ```

pub mod buffer;
pub mod convert;
pub mod cpal_source;
pub mod source;
pub mod wav;

pub use buffer::RollingBuffer;
pub use convert::{downmix_to_mono, f32_to_pcm16, pcm16_to_f32, resample_to_16k};
pub use cpal_source::CpalSource;
pub use source::{AudioSource, CaptureFormat, SourceError};
pub use wav::{read_wav_samples, RecordingSink, SinkError, WavSink};

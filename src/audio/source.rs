//! The microphone collaborator boundary.
//!
//! [`AudioSource`] is a pull-based abstraction over one microphone session:
//! the capture worker opens it with a fixed [`CaptureFormat`], pulls one
//! fixed-size chunk of PCM bytes per loop iteration, and closes it when the
//! session ends.  The production implementation is
//! [`CpalSource`](crate::audio::CpalSource); tests script their own.

use thiserror::Error;

// ---------------------------------------------------------------------------
// CaptureFormat
// ---------------------------------------------------------------------------

/// PCM format of one capture session, fixed at session start.
///
/// The capture path always uses [`CaptureFormat::whisper`] — mono, 16 kHz,
/// 16-bit signed PCM.  These parameters are not negotiated per session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CaptureFormat {
    /// Samples per second (Hz).
    pub sample_rate_hz: u32,
    /// Number of interleaved channels.
    pub channels: u16,
    /// Bytes per sample per channel (2 for PCM16).
    pub bytes_per_sample: u16,
}

impl CaptureFormat {
    /// The fixed format the inference engine expects: 16 kHz mono s16le.
    pub fn whisper() -> Self {
        Self {
            sample_rate_hz: 16_000,
            channels: 1,
            bytes_per_sample: 2,
        }
    }

    /// Raw throughput of this format in bytes per second.
    pub fn bytes_per_second(&self) -> usize {
        self.sample_rate_hz as usize * self.bytes_per_sample as usize * self.channels as usize
    }
}

impl Default for CaptureFormat {
    fn default() -> Self {
        Self::whisper()
    }
}

// ---------------------------------------------------------------------------
// SourceError
// ---------------------------------------------------------------------------

/// Errors reported by an [`AudioSource`].
///
/// Every variant is fatal to the *current session only*; the worker logs it,
/// releases the source and ends the session without crossing the thread
/// boundary as a panic.
#[derive(Debug, Clone, Error)]
pub enum SourceError {
    /// No input device is present or the platform denied microphone access.
    #[error("no usable input device: {0}")]
    Unavailable(String),

    /// `read_chunk` was called before `open`, or after `close`.
    #[error("audio source is not open")]
    NotOpen,

    /// The platform audio stream could not be built or started.
    #[error("audio stream failed: {0}")]
    Stream(String),

    /// The device stopped delivering data mid-session.
    #[error("audio device disconnected")]
    Disconnected,
}

// ---------------------------------------------------------------------------
// AudioSource trait
// ---------------------------------------------------------------------------

/// One microphone capture session, pulled one chunk at a time.
///
/// Implementations must be `Send` so the capture worker can take ownership
/// onto its thread.  The worker is the only caller; no method needs to be
/// re-entrant.
///
/// # Contract
///
/// - [`is_available`](Self::is_available) is a cheap capability probe and
///   must be callable before `open`.
/// - [`read_chunk`](Self::read_chunk) blocks until up to
///   [`chunk_size`](Self::chunk_size) bytes are available.  `Ok(0)` and any
///   `Err` both mean the session cannot continue.
/// - [`close`](Self::close) must be safe to call at most once after a
///   successful `open`, releasing the device.
pub trait AudioSource: Send {
    /// Probe whether a capture device is usable right now.
    fn is_available(&self) -> bool;

    /// Open the device with the given fixed format.
    fn open(&mut self, format: &CaptureFormat) -> Result<(), SourceError>;

    /// Minimum viable chunk size in bytes, as reported by the device.
    ///
    /// Only meaningful after a successful [`open`](Self::open).
    fn chunk_size(&self) -> usize;

    /// Blocking read of one chunk into `buf`, returning the byte count.
    fn read_chunk(&mut self, buf: &mut [u8]) -> Result<usize, SourceError>;

    /// Stop the stream and release the device.
    fn close(&mut self);
}

// Compile-time assertion: Box<dyn AudioSource> must be constructible.
const _: fn() = || {
    fn _assert_object_safe(_: Box<dyn AudioSource>) {}
};

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

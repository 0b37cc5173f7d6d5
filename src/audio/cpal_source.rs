//! cpal-backed [`AudioSource`] implementation.
//!
//! cpal delivers audio by *pushing* buffers into a callback on a platform
//! audio thread, and `cpal::Stream` is not `Send` on every platform.  To
//! present the pull-based [`AudioSource`] contract, [`CpalSource::open`]
//! spawns a dedicated stream thread that owns the `cpal::Stream` for its
//! whole lifetime; the callback downmixes, resamples to 16 kHz, converts to
//! PCM16 bytes and forwards them over a `std::sync::mpsc` channel that
//! [`read_chunk`](CpalSource::read_chunk) drains.

use std::collections::VecDeque;
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};

use crate::audio::convert::{downmix_to_mono, f32_to_pcm16, resample_to_16k};
use crate::audio::source::{AudioSource, CaptureFormat, SourceError};

/// Fallback chunk size when the device does not report a minimum buffer
/// size: 100 ms of 16 kHz mono PCM16.
const DEFAULT_CHUNK_BYTES: usize = 3_200;

/// Smallest chunk the worker loop is willing to spin on (10 ms).
const MIN_CHUNK_BYTES: usize = 320;

/// How long `read_chunk` waits for the stream thread before declaring the
/// device gone.
const READ_TIMEOUT: Duration = Duration::from_secs(1);

// ---------------------------------------------------------------------------
// CpalSource
// ---------------------------------------------------------------------------

/// Microphone source built on the system default cpal input device.
///
/// Construct with [`CpalSource::new`], then drive through the
/// [`AudioSource`] trait.  Dropping the source closes the stream.
pub struct CpalSource {
    data_rx: Option<mpsc::Receiver<Vec<u8>>>,
    stop_tx: Option<mpsc::Sender<()>>,
    stream_thread: Option<thread::JoinHandle<()>>,
    chunk_bytes: usize,
    /// Converted bytes received from the stream thread but not yet pulled.
    pending: VecDeque<u8>,
}

impl CpalSource {
    /// Create an unopened source bound to the system default input device.
    pub fn new() -> Self {
        Self {
            data_rx: None,
            stop_tx: None,
            stream_thread: None,
            chunk_bytes: DEFAULT_CHUNK_BYTES,
            pending: VecDeque::new(),
        }
    }
}

impl Default for CpalSource {
    fn default() -> Self {
        Self::new()
    }
}

/// Translate the device-reported minimum buffer size (frames at the device
/// rate) into a chunk size in 16 kHz mono PCM16 bytes.
fn chunk_bytes_for(min_frames: Option<u32>, device_rate: u32) -> usize {
    match min_frames {
        Some(frames) if device_rate > 0 => {
            let resampled = frames as u64 * 16_000 / device_rate as u64;
            ((resampled as usize) * 2).max(MIN_CHUNK_BYTES)
        }
        _ => DEFAULT_CHUNK_BYTES,
    }
}

/// Body of the stream thread: build and play the input stream, report the
/// outcome once, then park until `stop_rx` disconnects.  The stream is
/// dropped (and the device released) when this function returns.
fn run_stream(
    ready_tx: mpsc::Sender<Result<usize, SourceError>>,
    data_tx: mpsc::Sender<Vec<u8>>,
    stop_rx: mpsc::Receiver<()>,
) {
    let device = match cpal::default_host().default_input_device() {
        Some(d) => d,
        None => {
            let _ = ready_tx.send(Err(SourceError::Unavailable(
                "no default input device".into(),
            )));
            return;
        }
    };

    let supported = match device.default_input_config() {
        Ok(c) => c,
        Err(e) => {
            let _ = ready_tx.send(Err(SourceError::Stream(e.to_string())));
            return;
        }
    };

    if supported.sample_format() != cpal::SampleFormat::F32 {
        let _ = ready_tx.send(Err(SourceError::Stream(format!(
            "unsupported sample format: {:?}",
            supported.sample_format()
        ))));
        return;
    }

    let device_rate = supported.sample_rate().0;
    let channels = supported.channels();
    let min_frames = match supported.buffer_size() {
        cpal::SupportedBufferSize::Range { min, .. } => Some(*min),
        cpal::SupportedBufferSize::Unknown => None,
    };
    let chunk_bytes = chunk_bytes_for(min_frames, device_rate);
    let config: cpal::StreamConfig = supported.into();

    let stream = device.build_input_stream(
        &config,
        move |data: &[f32], _: &cpal::InputCallbackInfo| {
            let mono = downmix_to_mono(data, channels);
            let resampled = resample_to_16k(&mono, device_rate);
            // Receiver dropped means the session is over — never panic here.
            let _ = data_tx.send(f32_to_pcm16(&resampled));
        },
        |err: cpal::StreamError| {
            log::error!("cpal stream error: {err}");
        },
        None,
    );

    let stream = match stream {
        Ok(s) => s,
        Err(e) => {
            let _ = ready_tx.send(Err(SourceError::Stream(e.to_string())));
            return;
        }
    };

    if let Err(e) = stream.play() {
        let _ = ready_tx.send(Err(SourceError::Stream(e.to_string())));
        return;
    }

    let _ = ready_tx.send(Ok(chunk_bytes));

    // Block until the owning CpalSource drops its stop sender.
    let _ = stop_rx.recv();
}

impl AudioSource for CpalSource {
    fn is_available(&self) -> bool {
        cpal::default_host().default_input_device().is_some()
    }

    fn open(&mut self, format: &CaptureFormat) -> Result<(), SourceError> {
        // The downstream pipeline is hard-wired to the whisper format; the
        // source resamples whatever the device offers down to it.
        if *format != CaptureFormat::whisper() {
            return Err(SourceError::Stream(format!(
                "unsupported capture format: {format:?}"
            )));
        }

        let (ready_tx, ready_rx) = mpsc::channel();
        let (data_tx, data_rx) = mpsc::channel();
        let (stop_tx, stop_rx) = mpsc::channel();

        let handle = thread::Builder::new()
            .name("cpal-input".into())
            .spawn(move || run_stream(ready_tx, data_tx, stop_rx))
            .map_err(|e| SourceError::Stream(e.to_string()))?;

        match ready_rx.recv_timeout(Duration::from_secs(5)) {
            Ok(Ok(chunk_bytes)) => {
                self.chunk_bytes = chunk_bytes;
                self.data_rx = Some(data_rx);
                self.stop_tx = Some(stop_tx);
                self.stream_thread = Some(handle);
                self.pending.clear();
                log::debug!("cpal source opened, chunk size {chunk_bytes} B");
                Ok(())
            }
            Ok(Err(e)) => {
                let _ = handle.join();
                Err(e)
            }
            Err(_) => {
                drop(stop_tx);
                let _ = handle.join();
                Err(SourceError::Stream("stream thread did not start".into()))
            }
        }
    }

    fn chunk_size(&self) -> usize {
        self.chunk_bytes
    }

    fn read_chunk(&mut self, buf: &mut [u8]) -> Result<usize, SourceError> {
        let rx = self.data_rx.as_ref().ok_or(SourceError::NotOpen)?;

        while self.pending.len() < buf.len() {
            match rx.recv_timeout(READ_TIMEOUT) {
                Ok(bytes) => self.pending.extend(bytes),
                // Timeout or a dead stream thread: hand over whatever is
                // buffered; an empty read is the fatal signal.
                Err(_) => break,
            }
        }

        let n = buf.len().min(self.pending.len());
        if n == 0 {
            return Err(SourceError::Disconnected);
        }
        for b in buf[..n].iter_mut() {
            *b = self.pending.pop_front().unwrap_or(0);
        }
        Ok(n)
    }

    fn close(&mut self) {
        // Dropping the stop sender unparks the stream thread.
        self.stop_tx = None;
        self.data_rx = None;
        if let Some(handle) = self.stream_thread.take() {
            if handle.join().is_err() {
                log::error!("cpal stream thread panicked");
            }
        }
        self.pending.clear();
    }
}

impl Drop for CpalSource {
    fn drop(&mut self) {
        self.close();
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

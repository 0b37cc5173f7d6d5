//! Transcription orchestrator.
//!
//! [`Transcriber`] bridges raw audio and decoded text: it owns the
//! [`InferenceEngine`] handle and the [`Vocabulary`], shapes the input to
//! the model's fixed window, runs the feature/forward-pass pipeline and
//! decodes the resulting token stream.
//!
//! Engine construction is injected as a loader so the orchestrator never
//! depends on a concrete backend — the binary passes the whisper loader,
//! tests pass mocks.

use std::path::Path;
use std::sync::Arc;

use thiserror::Error;

use crate::audio::wav::{read_wav_samples, SinkError};
use crate::stt::decoder::decode;
use crate::stt::engine::{
    inference_threads, pad_or_truncate, EngineError, InferenceEngine, MODEL_INPUT_SAMPLES,
};
use crate::stt::vocab::Vocabulary;

/// Constructor for the inference backend: `(model_path, thread_hint)`.
pub type EngineLoader =
    Box<dyn Fn(&Path, i32) -> Result<Arc<dyn InferenceEngine>, EngineError> + Send + Sync>;

// ---------------------------------------------------------------------------
// TranscribeError
// ---------------------------------------------------------------------------

/// Errors from the transcription entry points.
#[derive(Debug, Error)]
pub enum TranscribeError {
    /// `initialize` has not succeeded yet.
    #[error("transcriber is not initialized")]
    NotInitialized,

    /// The audio file could not be read.
    #[error("could not read audio: {0}")]
    Audio(#[from] SinkError),

    /// The inference engine failed.
    #[error(transparent)]
    Engine(#[from] EngineError),
}

// ---------------------------------------------------------------------------
// Transcriber
// ---------------------------------------------------------------------------

/// Owns the engine handle and vocabulary; both calls block the caller for
/// the duration of feature extraction and inference.  Callers needing
/// responsiveness invoke them from a context of their own choosing.
pub struct Transcriber {
    loader: EngineLoader,
    engine: Option<Arc<dyn InferenceEngine>>,
    vocab: Option<Vocabulary>,
}

impl Transcriber {
    /// Create an uninitialized transcriber with the given engine loader.
    pub fn new(loader: EngineLoader) -> Self {
        Self {
            loader,
            engine: None,
            vocab: None,
        }
    }

    /// Transcriber backed by the whisper.cpp engine.
    #[cfg(feature = "whisper")]
    pub fn with_whisper() -> Self {
        use crate::stt::whisper::WhisperInferenceEngine;

        Self::new(Box::new(|model_path, threads| {
            WhisperInferenceEngine::load(model_path, threads)
                .map(|engine| Arc::new(engine) as Arc<dyn InferenceEngine>)
        }))
    }

    /// Load the model and vocabulary.
    ///
    /// Returns `false` (after logging) on any expected failure mode —
    /// missing or corrupt files — leaving the transcriber unusable until a
    /// later call succeeds.  Calling again re-opens the engine; do not call
    /// concurrently with transcription.
    pub fn initialize(&mut self, model_path: &Path, vocab_path: &Path, multilingual: bool) -> bool {
        self.engine = None;
        self.vocab = None;

        let engine = match (self.loader)(model_path, inference_threads()) {
            Ok(engine) => engine,
            Err(e) => {
                log::warn!("stt: engine load failed: {e}");
                return false;
            }
        };
        log::info!("stt: model loaded from {}", model_path.display());

        let vocab = match Vocabulary::load(vocab_path, multilingual) {
            Ok(vocab) => vocab,
            Err(e) => {
                log::warn!("stt: vocabulary load failed: {e}");
                return false;
            }
        };
        log::info!(
            "stt: vocabulary loaded from {} ({} words)",
            vocab_path.display(),
            vocab.len()
        );

        self.engine = Some(engine);
        self.vocab = Some(vocab);
        true
    }

    /// Returns `true` once `initialize` has succeeded.
    pub fn is_initialized(&self) -> bool {
        self.engine.is_some() && self.vocab.is_some()
    }

    /// Transcribe the WAV file at `path`.
    pub fn transcribe_file(&self, path: &Path) -> Result<String, TranscribeError> {
        let samples = read_wav_samples(path)?;
        log::debug!(
            "stt: transcribing {} ({} samples)",
            path.display(),
            samples.len()
        );
        self.transcribe_buffer(&samples)
    }

    /// Transcribe already-extracted 16 kHz mono `f32` samples.
    pub fn transcribe_buffer(&self, samples: &[f32]) -> Result<String, TranscribeError> {
        let (engine, vocab) = match (&self.engine, &self.vocab) {
            (Some(engine), Some(vocab)) => (engine, vocab),
            _ => return Err(TranscribeError::NotInitialized),
        };

        // The model accepts exactly one 30-second window; shorter audio is
        // zero-padded, longer audio loses its tail.
        let shaped = pad_or_truncate(samples, MODEL_INPUT_SAMPLES);
        let features = engine.compute_features(&shaped)?;
        let tokens = engine.run_model(&features)?;
        log::debug!("stt: model produced {} tokens", tokens.len());

        Ok(decode(&tokens, vocab))
    }

    /// Ask the engine to abandon an in-flight inference; best-effort, safe
    /// to call at any time.
    pub fn interrupt(&self) {
        if let Some(engine) = &self.engine {
            engine.interrupt();
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

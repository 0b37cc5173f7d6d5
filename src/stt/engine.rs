//! The inference engine boundary.
//!
//! The neural network itself — acoustic feature extraction and the
//! transformer forward pass — is an external collaborator behind the
//! [`InferenceEngine`] trait.  The orchestrator only knows the pipeline
//! shape: padded samples → features → token stream.
//!
//! [`MockEngine`] (under `#[cfg(test)]`) scripts the boundary so the
//! orchestrator and decoder can be tested without a model file.

use thiserror::Error;

/// One vocabulary token or control signal produced by the model.
pub type Token = i32;

/// Ordered token sequence for one request — consumed once, front to back.
pub type TokenStream = Vec<Token>;

/// Sample rate the model was trained on (Hz).
pub const MODEL_SAMPLE_RATE: usize = 16_000;

/// Length of one model input window in seconds.
pub const MODEL_CHUNK_SECONDS: usize = 30;

/// Fixed sample count of one model input window.
pub const MODEL_INPUT_SAMPLES: usize = MODEL_SAMPLE_RATE * MODEL_CHUNK_SECONDS;

// ---------------------------------------------------------------------------
// EngineError
// ---------------------------------------------------------------------------

/// Errors crossing the inference boundary.
#[derive(Debug, Clone, Error)]
pub enum EngineError {
    /// The model file was not found at the given path.
    #[error("model not found: {0}")]
    ModelNotFound(String),

    /// The backend failed to load the model.
    #[error("model load failed: {0}")]
    Load(String),

    /// An error occurred during feature extraction or the forward pass.
    #[error("inference failed: {0}")]
    Inference(String),

    /// The run was abandoned by an `interrupt()` call.
    #[error("inference interrupted")]
    Interrupted,
}

// ---------------------------------------------------------------------------
// InferenceEngine trait
// ---------------------------------------------------------------------------

/// Object-safe, thread-safe interface to the speech-recognition backend.
///
/// # Contract
///
/// - `samples` handed to [`compute_features`](Self::compute_features) are
///   16 kHz mono `f32`, already padded/truncated to
///   [`MODEL_INPUT_SAMPLES`] — the input shape is a hard contract of the
///   model, not negotiable per call.
/// - [`run_model`](Self::run_model) consumes the features from
///   `compute_features` and yields one [`TokenStream`].
/// - [`interrupt`](Self::interrupt) is best-effort: the engine abandons an
///   in-flight run as soon as feasible, with no guaranteed bound.
pub trait InferenceEngine: Send + Sync {
    /// Compute acoustic features (e.g. a mel spectrogram) for `samples`.
    fn compute_features(&self, samples: &[f32]) -> Result<Vec<f32>, EngineError>;

    /// Run the forward pass over `features` and return the token stream.
    fn run_model(&self, features: &[f32]) -> Result<TokenStream, EngineError>;

    /// Signal the engine to abandon an in-flight inference.
    fn interrupt(&self);
}

// Compile-time assertion: Box<dyn InferenceEngine> must be constructible.
const _: fn() = || {
    fn _assert_object_safe(_: Box<dyn InferenceEngine>) {}
};

// ---------------------------------------------------------------------------
// Input shaping
// ---------------------------------------------------------------------------

/// Force `samples` to exactly `target` samples.
///
/// Short input is padded with silence (zeros); long input silently drops
/// trailing audio.
pub fn pad_or_truncate(samples: &[f32], target: usize) -> Vec<f32> {
    let mut shaped = Vec::with_capacity(target);
    let keep = samples.len().min(target);
    shaped.extend_from_slice(&samples[..keep]);
    shaped.resize(target, 0.0);
    shaped
}

/// Thread count hint handed to the backend at model-load time: available
/// parallelism, capped at 8.
pub fn inference_threads() -> i32 {
    std::thread::available_parallelism()
        .map(|n| n.get().min(8) as i32)
        .unwrap_or(4)
}

// ---------------------------------------------------------------------------
// MockEngine  (test-only)
// ---------------------------------------------------------------------------

/// Scripted engine: features are the identity, the token stream is fixed,
/// and every input is recorded for assertions.
#[cfg(test)]
pub struct MockEngine {
    pub tokens: Result<TokenStream, EngineError>,
    pub feature_input_lens: std::sync::Mutex<Vec<usize>>,
    pub interrupted: std::sync::atomic::AtomicBool,
}

#[cfg(test)]
impl MockEngine {
    pub fn returning(tokens: TokenStream) -> Self {
        Self {
            tokens: Ok(tokens),
            feature_input_lens: std::sync::Mutex::new(Vec::new()),
            interrupted: std::sync::atomic::AtomicBool::new(false),
        }
    }

    pub fn failing(error: EngineError) -> Self {
        Self {
            tokens: Err(error),
            feature_input_lens: std::sync::Mutex::new(Vec::new()),
            interrupted: std::sync::atomic::AtomicBool::new(false),
        }
    }
}

#[cfg(test)]
impl InferenceEngine for MockEngine {
    fn compute_features(&self, samples: &[f32]) -> Result<Vec<f32>, EngineError> {
        self.feature_input_lens.lock().unwrap().push(samples.len());
        Ok(samples.to_vec())
    }

    fn run_model(&self, _features: &[f32]) -> Result<TokenStream, EngineError> {
        self.tokens.clone()
    }

    fn interrupt(&self) {
        self.interrupted
            .store(true, std::sync::atomic::Ordering::SeqCst);
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

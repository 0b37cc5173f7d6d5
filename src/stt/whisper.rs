//! whisper.cpp-backed implementation of [`InferenceEngine`].
//!
//! Wraps a `whisper_rs::WhisperContext`.  A new `WhisperState` is created
//! for every [`run_model`] call so the engine can be shared across threads
//! without locking; the model weights are read-only after loading.
//!
//! whisper.cpp computes the mel spectrogram internally as part of `full()`,
//! so [`compute_features`] here is the identity — the trait's two-stage
//! pipeline shape is preserved, the heavy lifting just happens one stage
//! later.
//!
//! [`run_model`]: WhisperInferenceEngine::run_model
//! [`compute_features`]: WhisperInferenceEngine::compute_features

use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use whisper_rs::{FullParams, SamplingStrategy, WhisperContext, WhisperContextParameters};

use crate::stt::engine::{EngineError, InferenceEngine, TokenStream};

/// Production inference engine over a GGML Whisper model.
pub struct WhisperInferenceEngine {
    ctx: WhisperContext,
    n_threads: i32,
    abort: Arc<AtomicBool>,
}

impl std::fmt::Debug for WhisperInferenceEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WhisperInferenceEngine")
            .field("n_threads", &self.n_threads)
            .finish_non_exhaustive()
    }
}

impl WhisperInferenceEngine {
    /// Load a GGML model from `model_path`.
    ///
    /// # Errors
    ///
    /// - [`EngineError::ModelNotFound`] — `model_path` does not exist.
    /// - [`EngineError::Load`] — whisper-rs failed to load the file.
    pub fn load(model_path: impl AsRef<Path>, n_threads: i32) -> Result<Self, EngineError> {
        let path = model_path.as_ref();

        if !path.exists() {
            return Err(EngineError::ModelNotFound(path.display().to_string()));
        }

        let path_str = path.to_str().ok_or_else(|| {
            EngineError::ModelNotFound(format!(
                "model path contains non-UTF-8 characters: {}",
                path.display()
            ))
        })?;

        let ctx = WhisperContext::new_with_params(path_str, WhisperContextParameters::default())
            .map_err(|e| EngineError::Load(e.to_string()))?;
        log::info!("whisper: loaded model {} ({n_threads} threads)", path.display());

        Ok(Self {
            ctx,
            n_threads,
            abort: Arc::new(AtomicBool::new(false)),
        })
    }
}

impl InferenceEngine for WhisperInferenceEngine {
    fn compute_features(&self, samples: &[f32]) -> Result<Vec<f32>, EngineError> {
        // Mel extraction happens inside state.full(); pass the samples on.
        Ok(samples.to_vec())
    }

    fn run_model(&self, features: &[f32]) -> Result<TokenStream, EngineError> {
        // A fresh run clears any leftover interrupt from a previous one.
        self.abort.store(false, Ordering::SeqCst);

        let mut params = FullParams::new(SamplingStrategy::Greedy { best_of: 1 });
        params.set_n_threads(self.n_threads);
        params.set_print_progress(false);
        params.set_print_realtime(false);
        params.set_print_special(false);

        let abort = Arc::clone(&self.abort);
        params.set_abort_callback_safe(move || abort.load(Ordering::SeqCst));

        let mut state = self
            .ctx
            .create_state()
            .map_err(|e| EngineError::Load(e.to_string()))?;

        let started = std::time::Instant::now();
        state.full(params, features).map_err(|e| {
            if self.abort.load(Ordering::SeqCst) {
                EngineError::Interrupted
            } else {
                EngineError::Inference(e.to_string())
            }
        })?;

        let n_segments = state
            .full_n_segments()
            .map_err(|e| EngineError::Inference(e.to_string()))?;

        let mut tokens = TokenStream::new();
        for seg in 0..n_segments {
            let n_tokens = state
                .full_n_tokens(seg)
                .map_err(|e| EngineError::Inference(format!("segment {seg}: {e}")))?;
            for tok in 0..n_tokens {
                let id = state
                    .full_get_token_id(seg, tok)
                    .map_err(|e| EngineError::Inference(format!("segment {seg}: {e}")))?;
                tokens.push(id);
            }
        }

        log::debug!(
            "whisper: {} tokens in {} ms",
            tokens.len(),
            started.elapsed().as_millis()
        );
        Ok(tokens)
    }

    fn interrupt(&self) {
        self.abort.store(true, Ordering::SeqCst);
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

//! Speech-to-text layer — the inference boundary, the vocabulary table,
//! token decoding and the [`Transcriber`] orchestrator that ties them
//! together.
//!
#![cfg_attr(feature = "whisper", doc = "```rust,no_run")]
#![cfg_attr(not(feature = "whisper"), doc = "```rust,ignore")]
//! use std::path::Path;
//! use voice_capture::stt::Transcriber;
//!
//! let mut transcriber = Transcriber::with_whisper();
//! if transcriber.initialize(Path::new("model.bin"), Path::new("vocab.json"), false) {
//!     let text = transcriber.transcribe_file(Path::new("session.wav")).unwrap();
//!     println!("{text}");
//! }
//! ```

pub mod decoder;
pub mod engine;
pub mod transcriber;
pub mod vocab;

#[cfg(feature = "whisper")]
pub mod whisper;

pub use decoder::decode;
pub use engine::{
    inference_threads, pad_or_truncate, EngineError, InferenceEngine, Token, TokenStream,
    MODEL_CHUNK_SECONDS, MODEL_INPUT_SAMPLES, MODEL_SAMPLE_RATE,
};
pub use transcriber::{EngineLoader, TranscribeError, Transcriber};
pub use vocab::{VocabError, Vocabulary};

#[cfg(feature = "whisper")]
pub use whisper::WhisperInferenceEngine;

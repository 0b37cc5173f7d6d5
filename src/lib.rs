//! Microphone capture and speech-to-text orchestration.
//!
//! The crate splits into two halves joined by a WAV file and a shared
//! sample format (16 kHz mono):
//!
//! - [`capture`] — a worker thread pulls PCM16 chunks from an
//!   [`audio::AudioSource`], keeps a bounded session buffer plus a short
//!   realtime window, and saves the session through an
//!   [`audio::RecordingSink`].  Progress reaches the application through a
//!   [`listener::Listener`].
//! - [`stt`] — the [`stt::Transcriber`] shapes audio to the model's fixed
//!   30-second window, runs an [`stt::InferenceEngine`] and decodes the
//!   token stream against a [`stt::Vocabulary`].
//!
//! [`config`] supplies TOML-backed settings and platform paths for both.

pub mod audio;
pub mod capture;
pub mod config;
pub mod listener;
pub mod stt;

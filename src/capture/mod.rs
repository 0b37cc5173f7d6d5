//! Capture layer — the session state machine and the worker thread that
//! drives one recording end to end.
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use voice_capture::audio::{CpalSource, WavSink};
//! use voice_capture::capture::Recorder;
//! use voice_capture::listener::NoopListener;
//!
//! let mut recorder = Recorder::new("session.wav");
//! recorder.start(
//!     Box::new(CpalSource::new()),
//!     Arc::new(NoopListener),
//!     Arc::new(WavSink),
//! );
//! // … up to 30 s later …
//! recorder.stop(); // blocks until the worker thread has exited
//! ```

pub mod state;
pub mod worker;

pub use state::{SessionPhase, SessionState};
pub use worker::{Recorder, REALTIME_SECONDS, SESSION_SECONDS, TRIGGER_INTERVAL_SECONDS};

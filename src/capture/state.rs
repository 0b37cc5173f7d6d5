//! Capture session state machine.
//!
//! One [`SessionState`] word is the *only* state shared between the calling
//! thread and the capture worker:
//!
//! ```text
//! Idle ──start()──▶ Recording ──stop() / buffer full / read error──▶ Stopping
//!                                  Stopping ──worker exits──▶ Idle
//! ```
//!
//! There is no Paused state and no retry; a failed session starts over from
//! `Idle`.

use std::sync::atomic::{AtomicU8, Ordering};

// ---------------------------------------------------------------------------
// SessionPhase
// ---------------------------------------------------------------------------

/// Phase of a capture session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum SessionPhase {
    /// No session running; `start()` is accepted.
    Idle = 0,
    /// The worker thread is reading from the device.
    Recording = 1,
    /// Termination requested or reached; the worker is winding down.
    Stopping = 2,
}

impl SessionPhase {
    fn from_u8(v: u8) -> Self {
        match v {
            1 => SessionPhase::Recording,
            2 => SessionPhase::Stopping,
            _ => SessionPhase::Idle,
        }
    }

    /// Short label for status messages.
    pub fn label(&self) -> &'static str {
        match self {
            SessionPhase::Idle => "Idle",
            SessionPhase::Recording => "Recording",
            SessionPhase::Stopping => "Stopping",
        }
    }
}

// ---------------------------------------------------------------------------
// SessionState
// ---------------------------------------------------------------------------

/// Atomic holder of the current [`SessionPhase`].
///
/// All transitions are compare-and-swap so `start()` stays idempotent:
/// only one caller can ever move `Idle → Recording`.
pub struct SessionState(AtomicU8);

impl SessionState {
    pub fn new() -> Self {
        Self(AtomicU8::new(SessionPhase::Idle as u8))
    }

    /// Current phase.
    pub fn phase(&self) -> SessionPhase {
        SessionPhase::from_u8(self.0.load(Ordering::Acquire))
    }

    /// Attempt `Idle → Recording`; `false` when a session is already live.
    pub fn try_begin(&self) -> bool {
        self.0
            .compare_exchange(
                SessionPhase::Idle as u8,
                SessionPhase::Recording as u8,
                Ordering::AcqRel,
                Ordering::Acquire,
            )
            .is_ok()
    }

    /// Request `Recording → Stopping`.  No-op in any other phase.
    pub fn request_stop(&self) {
        let _ = self.0.compare_exchange(
            SessionPhase::Recording as u8,
            SessionPhase::Stopping as u8,
            Ordering::AcqRel,
            Ordering::Acquire,
        );
    }

    /// The worker's read-loop condition.
    pub fn is_recording(&self) -> bool {
        self.phase() == SessionPhase::Recording
    }

    /// Final transition back to `Idle`, performed by the worker on exit.
    pub fn finish(&self) {
        self.0.store(SessionPhase::Idle as u8, Ordering::Release);
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

//! Caller-supplied observation surface.
//!
//! The capture worker reports through a [`Listener`]: status strings via
//! [`on_update_received`](Listener::on_update_received) and realtime sample
//! batches via [`on_data_received`](Listener::on_data_received).
//! Implementations are polymorphic — a UI sink, a test sink, or
//! [`NoopListener`] when nobody cares.

// ---------------------------------------------------------------------------
// Listener trait
// ---------------------------------------------------------------------------

/// Capability interface for capture and transcription callbacks.
///
/// # Contract
///
/// Callbacks run on the capture worker's thread, synchronously between
/// device reads.  Implementations must not block for longer than it takes
/// to enqueue the payload — a slow listener stalls audio ingestion.
pub trait Listener: Send + Sync {
    /// A human-readable status message (session started, saved, failed …).
    fn on_update_received(&self, message: &str);

    /// One realtime window of normalized `f32` samples in `[-1.0, 1.0]`,
    /// delivered every trigger interval and then discarded by the worker.
    fn on_data_received(&self, samples: &[f32]);
}

// ---------------------------------------------------------------------------
// NoopListener
// ---------------------------------------------------------------------------

/// A listener that ignores everything.
pub struct NoopListener;

impl Listener for NoopListener {
    fn on_update_received(&self, _message: &str) {}

    fn on_data_received(&self, _samples: &[f32]) {}
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

//! Capture worker — drives one recording session end to end.
//!
//! [`Recorder`] owns the session [`SessionState`] and a dedicated worker
//! thread.  The worker pulls fixed-size chunks from an [`AudioSource`],
//! feeds the 30-second session buffer and the 5-second realtime buffer,
//! fires a realtime trigger every 3 elapsed seconds (normalized samples to
//! [`Listener::on_data_received`], then a realtime-buffer reset) and hands
//! the finished session buffer to a [`RecordingSink`].
//!
//! # Lifecycle
//!
//! ```text
//! start() ── CAS Idle→Recording ──▶ worker thread
//!   read loop: read_chunk → session.write + realtime.write
//!              → elapsed seconds → every 3 s: on_data_received + reset
//!   exits on: stop flag | session buffer full (normal 30 s end) | read error
//!   then: close source → sink.save(session snapshot) → phase Idle
//!
//! stop() ── request Stopping ── join ──▶ returns after the thread exited
//! ```

use std::panic::{self, AssertUnwindSafe};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::thread;

use crate::audio::buffer::RollingBuffer;
use crate::audio::convert::pcm16_to_f32;
use crate::audio::source::{AudioSource, CaptureFormat};
use crate::audio::wav::RecordingSink;
use crate::capture::state::{SessionPhase, SessionState};
use crate::listener::Listener;

/// Session buffer capacity in seconds; reaching it ends the session.
pub const SESSION_SECONDS: usize = 30;

/// Realtime buffer capacity in seconds — headroom over the trigger
/// interval so a trigger that lands late never truncates its window.
pub const REALTIME_SECONDS: usize = 5;

/// Elapsed-second multiple at which the realtime trigger fires.
pub const TRIGGER_INTERVAL_SECONDS: usize = 3;

// ---------------------------------------------------------------------------
// Recorder
// ---------------------------------------------------------------------------

/// Owns one capture session at a time.
///
/// `start` is idempotent: a second call while a session is live is a logged
/// no-op, enforced by a compare-and-swap on the shared phase word — the only
/// state the calling thread and the worker share.
pub struct Recorder {
    state: Arc<SessionState>,
    worker: Option<thread::JoinHandle<()>>,
    output_path: PathBuf,
}

impl Recorder {
    /// Create an idle recorder that will persist sessions to `output_path`.
    pub fn new(output_path: impl Into<PathBuf>) -> Self {
        Self {
            state: Arc::new(SessionState::new()),
            worker: None,
            output_path: output_path.into(),
        }
    }

    /// Change the destination of the *next* session's recording.
    pub fn set_output_path(&mut self, path: impl Into<PathBuf>) {
        self.output_path = path.into();
    }

    /// Current phase of the session state machine.
    pub fn phase(&self) -> SessionPhase {
        self.state.phase()
    }

    /// Returns `true` while a session is actively recording.
    pub fn is_recording(&self) -> bool {
        self.state.is_recording()
    }

    /// Start a capture session on a dedicated worker thread.
    ///
    /// No-ops (with a log line) when a session is already live — checked
    /// before anything else, so a redundant `start` never reaches the
    /// listener.  When the source reports no usable microphone the session
    /// is refused and the phase reverts to `Idle` — a non-fatal condition
    /// reported through the listener.
    pub fn start(
        &mut self,
        source: Box<dyn AudioSource>,
        listener: Arc<dyn Listener>,
        sink: Arc<dyn RecordingSink>,
    ) {
        if !self.state.try_begin() {
            log::debug!("capture: recording already in progress, start ignored");
            return;
        }

        if !source.is_available() {
            log::warn!("capture: no microphone available, session refused");
            listener.on_update_received("Recording failed: no microphone available");
            self.state.finish();
            return;
        }

        // A previous session that ended on its own leaves a finished thread
        // behind; reap it before spawning the next one.
        if let Some(handle) = self.worker.take() {
            let _ = handle.join();
        }

        let state = Arc::clone(&self.state);
        let path = self.output_path.clone();

        let handle = thread::Builder::new()
            .name("capture-worker".into())
            .spawn(move || {
                // The session body must never take the phase word down with
                // it: whatever panics inside is contained here and the
                // machine returns to Idle.
                let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
                    run_session(&state, source, listener, sink, &path);
                }));
                if outcome.is_err() {
                    log::error!("capture: session panicked, returning to idle");
                }
                state.finish();
            })
            .expect("failed to spawn capture worker thread");

        self.worker = Some(handle);
    }

    /// Request termination and block until the worker thread has exited.
    ///
    /// After `stop` returns no further buffer mutation occurs.  Calling it
    /// while idle is a safe no-op.  Panics inside the session (listener
    /// callbacks included) are contained at the worker boundary, so `stop`
    /// never propagates them.
    pub fn stop(&mut self) {
        self.state.request_stop();
        if let Some(handle) = self.worker.take() {
            // The worker catches session panics itself; a failed join here
            // would mean that containment broke.
            handle.join().expect("capture worker panicked");
        }
    }
}

impl Drop for Recorder {
    fn drop(&mut self) {
        self.state.request_stop();
        if let Some(handle) = self.worker.take() {
            let _ = handle.join();
        }
    }
}

// ---------------------------------------------------------------------------
// Worker body
// ---------------------------------------------------------------------------

/// How the read loop ended.
#[derive(Debug, PartialEq, Eq)]
enum LoopEnd {
    /// `stop()` cleared the recording flag.
    Stopped,
    /// Session buffer reached 30 s — the normal termination condition.
    Full,
    /// The device returned no data or an error.
    DeviceError,
    /// Something inside the loop panicked; treated like a device failure.
    Panicked,
}

/// One full session: open, read loop, close, persist.  Loop panics are
/// caught here so the session still closes the source and persists the
/// partial buffer, ending like a device read failure; panics in the
/// notify/persist tail are caught by the spawn wrapper instead.
fn run_session(
    state: &SessionState,
    mut source: Box<dyn AudioSource>,
    listener: Arc<dyn Listener>,
    sink: Arc<dyn RecordingSink>,
    path: &Path,
) {
    let format = CaptureFormat::whisper();

    if let Err(e) = source.open(&format) {
        log::warn!("capture: could not open audio source: {e}");
        listener.on_update_received(&format!("Recording failed: {e}"));
        return;
    }

    let bytes_per_second = format.bytes_per_second();
    let mut session = RollingBuffer::new(SESSION_SECONDS * bytes_per_second);
    let mut realtime = RollingBuffer::new(REALTIME_SECONDS * bytes_per_second);
    let mut chunk = vec![0u8; source.chunk_size().max(2)];

    listener.on_update_received("Recording started");
    log::info!(
        "capture: session started ({SESSION_SECONDS} s max, {} B chunks)",
        chunk.len()
    );

    let end = panic::catch_unwind(AssertUnwindSafe(|| {
        read_loop(
            state,
            source.as_mut(),
            listener.as_ref(),
            &mut session,
            &mut realtime,
            &mut chunk,
            bytes_per_second,
        )
    }))
    .unwrap_or_else(|_| {
        log::error!("capture: read loop panicked, ending session");
        LoopEnd::Panicked
    });

    state.request_stop();
    source.close();

    match end {
        LoopEnd::Stopped => log::info!("capture: session stopped by request"),
        LoopEnd::Full => log::info!("capture: session buffer full after {SESSION_SECONDS} s"),
        LoopEnd::DeviceError | LoopEnd::Panicked => {
            listener.on_update_received("Recording ended: audio device error");
        }
    }

    // The session buffer is persisted on every termination path; an early
    // end just produces a shorter file.
    match sink.save(session.snapshot(), &format, path) {
        Ok(()) => {
            log::info!(
                "capture: saved {} bytes to {}",
                session.len(),
                path.display()
            );
            listener.on_update_received(&format!("Recording saved to {}", path.display()));
        }
        Err(e) => {
            log::error!("capture: could not save recording: {e}");
            listener.on_update_received(&format!("Recording failed: {e}"));
        }
    }
}

/// The per-chunk loop.  Runs until the stop flag clears, the session buffer
/// fills, or the device fails.
fn read_loop(
    state: &SessionState,
    source: &mut dyn AudioSource,
    listener: &dyn Listener,
    session: &mut RollingBuffer,
    realtime: &mut RollingBuffer,
    chunk: &mut [u8],
    bytes_per_second: usize,
) -> LoopEnd {
    let mut elapsed_bytes: usize = 0;
    let mut elapsed_seconds: usize = 0;

    loop {
        if !state.is_recording() {
            return LoopEnd::Stopped;
        }
        if session.is_full() {
            return LoopEnd::Full;
        }

        let read = match source.read_chunk(chunk) {
            Ok(0) => {
                log::warn!("capture: audio source returned no data");
                return LoopEnd::DeviceError;
            }
            Ok(n) => n,
            Err(e) => {
                log::warn!("capture: audio read failed: {e}");
                return LoopEnd::DeviceError;
            }
        };

        // Both buffers truncate on overflow; the partial acceptance on the
        // session buffer is what makes the loop exit on the next iteration.
        session.write(&chunk[..read]);
        realtime.write(&chunk[..read]);
        elapsed_bytes += read;

        let seconds = elapsed_bytes / bytes_per_second;
        if seconds != elapsed_seconds {
            elapsed_seconds = seconds;

            if seconds % TRIGGER_INTERVAL_SECONDS == 0 {
                // Realtime trigger: deliver the window as normalized f32,
                // then reset before the next read.
                let samples = pcm16_to_f32(realtime.snapshot());
                listener.on_data_received(&samples);
                realtime.reset();
                log::debug!("capture: realtime trigger at {seconds} s ({} samples)", samples.len());
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::source::SourceError;
    use crate::audio::wav::SinkError;
    use std::collections::VecDeque;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Mutex;
    use std::time::Duration;

    /// One second of PCM16 at the whisper format.
    const ONE_SECOND: usize = 32_000;

    // -----------------------------------------------------------------------
    // Test doubles
    // -----------------------------------------------------------------------

    /// Audio source that replays a script of chunks, then disconnects.
    struct ScriptedSource {
        available: bool,
        fail_open: bool,
        chunks: VecDeque<Vec<u8>>,
        chunk_bytes: usize,
        read_delay: Duration,
        opened: Arc<AtomicBool>,
        closed: Arc<AtomicBool>,
    }

    impl ScriptedSource {
        fn new(chunks: Vec<Vec<u8>>, chunk_bytes: usize) -> Self {
            Self {
                available: true,
                fail_open: false,
                chunks: chunks.into(),
                chunk_bytes,
                read_delay: Duration::ZERO,
                opened: Arc::new(AtomicBool::new(false)),
                closed: Arc::new(AtomicBool::new(false)),
            }
        }

        /// `count` chunks of one second of silence each.
        fn seconds_of_silence(count: usize) -> Self {
            Self::new(vec![vec![0u8; ONE_SECOND]; count], ONE_SECOND)
        }
    }

    impl AudioSource for ScriptedSource {
        fn is_available(&self) -> bool {
            self.available
        }

        fn open(&mut self, _format: &CaptureFormat) -> Result<(), SourceError> {
            if self.fail_open {
                return Err(SourceError::Unavailable("scripted refusal".into()));
            }
            self.opened.store(true, Ordering::SeqCst);
            Ok(())
        }

        fn chunk_size(&self) -> usize {
            self.chunk_bytes
        }

        fn read_chunk(&mut self, buf: &mut [u8]) -> Result<usize, SourceError> {
            if !self.read_delay.is_zero() {
                thread::sleep(self.read_delay);
            }
            match self.chunks.pop_front() {
                Some(chunk) => {
                    let n = buf.len().min(chunk.len());
                    buf[..n].copy_from_slice(&chunk[..n]);
                    Ok(n)
                }
                None => Err(SourceError::Disconnected),
            }
        }

        fn close(&mut self) {
            self.closed.store(true, Ordering::SeqCst);
        }
    }

    /// Listener that records every callback.
    #[derive(Default)]
    struct CollectingListener {
        updates: Mutex<Vec<String>>,
        batch_lens: Mutex<Vec<usize>>,
    }

    impl Listener for CollectingListener {
        fn on_update_received(&self, message: &str) {
            self.updates.lock().unwrap().push(message.to_string());
        }

        fn on_data_received(&self, samples: &[f32]) {
            self.batch_lens.lock().unwrap().push(samples.len());
        }
    }

    /// Listener whose data callback panics — exercises the worker boundary.
    struct PanickyListener;

    impl Listener for PanickyListener {
        fn on_update_received(&self, _message: &str) {}

        fn on_data_received(&self, _samples: &[f32]) {
            panic!("listener blew up");
        }
    }

    /// Listener whose status callback panics.
    struct PanickyStatusListener;

    impl Listener for PanickyStatusListener {
        fn on_update_received(&self, _message: &str) {
            panic!("status listener blew up");
        }

        fn on_data_received(&self, _samples: &[f32]) {}
    }

    /// Sink that records each save in memory.
    #[derive(Default)]
    struct MemorySink {
        saved: Mutex<Vec<(usize, PathBuf)>>,
    }

    impl RecordingSink for MemorySink {
        fn save(&self, pcm: &[u8], _format: &CaptureFormat, path: &Path) -> Result<(), SinkError> {
            self.saved
                .lock()
                .unwrap()
                .push((pcm.len(), path.to_path_buf()));
            Ok(())
        }
    }

    /// Sink that panics instead of persisting.
    struct PanickySink;

    impl RecordingSink for PanickySink {
        fn save(&self, _pcm: &[u8], _format: &CaptureFormat, _path: &Path) -> Result<(), SinkError> {
            panic!("sink blew up");
        }
    }

    // -----------------------------------------------------------------------
    // Helpers
    // -----------------------------------------------------------------------

    fn wait_until_idle(recorder: &Recorder) {
        for _ in 0..500 {
            if recorder.phase() == SessionPhase::Idle {
                return;
            }
            thread::sleep(Duration::from_millis(10));
        }
        panic!("worker did not return to Idle");
    }

    // -----------------------------------------------------------------------
    // Session lifecycle
    // -----------------------------------------------------------------------

    /// A 30-second source fills the session buffer exactly and stops on its
    /// own; the saved recording is exactly 30 s of PCM.
    #[test]
    fn session_ends_when_buffer_is_full() {
        let mut recorder = Recorder::new("/tmp/full.wav");
        let listener = Arc::new(CollectingListener::default());
        let sink = Arc::new(MemorySink::default());

        // One spare chunk proves the loop stops reading once full.
        let source = ScriptedSource::seconds_of_silence(31);
        recorder.start(Box::new(source), listener.clone(), sink.clone());
        wait_until_idle(&recorder);
        recorder.stop();

        let saved = sink.saved.lock().unwrap();
        assert_eq!(saved.len(), 1);
        assert_eq!(saved[0].0, SESSION_SECONDS * ONE_SECOND);

        // Triggers at 3, 6, …, 30 — ten in total, 3 s of samples each.
        let batches = listener.batch_lens.lock().unwrap();
        assert_eq!(batches.len(), 10);
        assert!(batches.iter().all(|&len| len == 3 * ONE_SECOND / 2));
    }

    /// Exactly three realtime triggers fire during a 10-second capture,
    /// each carrying a 3-second window, each followed by a reset.
    #[test]
    fn trigger_cadence_three_per_ten_seconds() {
        let mut recorder = Recorder::new("/tmp/cadence.wav");
        let listener = Arc::new(CollectingListener::default());
        let sink = Arc::new(MemorySink::default());

        let source = ScriptedSource::seconds_of_silence(10);
        recorder.start(Box::new(source), listener.clone(), sink.clone());
        wait_until_idle(&recorder);
        recorder.stop();

        let batches = listener.batch_lens.lock().unwrap();
        assert_eq!(batches.len(), 3, "triggers at 3 s, 6 s, 9 s");
        // 3 s × 16 000 samples — the reset between triggers keeps each
        // window at exactly one interval.
        assert!(batches.iter().all(|&len| len == 48_000));

        // Ten seconds of audio were still saved despite the early device end.
        assert_eq!(sink.saved.lock().unwrap()[0].0, 10 * ONE_SECOND);
    }

    /// Starting twice while recording runs exactly one session; the second
    /// source is never opened.
    #[test]
    fn start_is_idempotent() {
        let mut recorder = Recorder::new("/tmp/idempotent.wav");
        let listener = Arc::new(CollectingListener::default());
        let sink = Arc::new(MemorySink::default());

        let mut slow = ScriptedSource::new(vec![vec![0u8; 3_200]; 100], 3_200);
        slow.read_delay = Duration::from_millis(5);
        recorder.start(Box::new(slow), listener.clone(), sink.clone());

        // Give the worker a moment to enter the loop, then try again.
        thread::sleep(Duration::from_millis(20));
        assert!(recorder.is_recording());

        let second = ScriptedSource::seconds_of_silence(1);
        let second_opened = Arc::clone(&second.opened);
        recorder.start(Box::new(second), listener.clone(), sink.clone());
        assert!(!second_opened.load(Ordering::SeqCst), "second start must be a no-op");

        recorder.stop();
        assert_eq!(sink.saved.lock().unwrap().len(), 1);
    }

    /// `stop()` on an idle recorder returns immediately without error.
    #[test]
    fn stop_before_start_is_safe() {
        let mut recorder = Recorder::new("/tmp/never.wav");
        recorder.stop();
        recorder.stop();
        assert_eq!(recorder.phase(), SessionPhase::Idle);
    }

    /// After `stop()` returns the session is fully terminated: the source is
    /// closed, the sink was invoked exactly once, and nothing mutates later.
    #[test]
    fn stop_joins_the_worker() {
        let mut recorder = Recorder::new("/tmp/joined.wav");
        let listener = Arc::new(CollectingListener::default());
        let sink = Arc::new(MemorySink::default());

        let mut source = ScriptedSource::new(vec![vec![0u8; 3_200]; 400], 3_200);
        source.read_delay = Duration::from_millis(5);
        let closed = Arc::clone(&source.closed);

        recorder.start(Box::new(source), listener, sink.clone());
        thread::sleep(Duration::from_millis(40));
        recorder.stop();

        assert_eq!(recorder.phase(), SessionPhase::Idle);
        assert!(closed.load(Ordering::SeqCst), "source must be released");
        let count_after_stop = sink.saved.lock().unwrap().len();
        assert_eq!(count_after_stop, 1);

        thread::sleep(Duration::from_millis(50));
        assert_eq!(sink.saved.lock().unwrap().len(), count_after_stop);
    }

    // -----------------------------------------------------------------------
    // Failure paths
    // -----------------------------------------------------------------------

    /// A missing microphone refuses the session before any state change.
    #[test]
    fn unavailable_microphone_never_records() {
        let mut recorder = Recorder::new("/tmp/unavailable.wav");
        let listener = Arc::new(CollectingListener::default());
        let sink = Arc::new(MemorySink::default());

        let mut source = ScriptedSource::seconds_of_silence(1);
        source.available = false;
        let opened = Arc::clone(&source.opened);

        recorder.start(Box::new(source), listener.clone(), sink.clone());

        assert_eq!(recorder.phase(), SessionPhase::Idle);
        assert!(!opened.load(Ordering::SeqCst));
        assert!(sink.saved.lock().unwrap().is_empty());
        let updates = listener.updates.lock().unwrap();
        assert!(updates.iter().any(|m| m.contains("no microphone")));
    }

    /// An open failure ends the session without persisting anything.
    #[test]
    fn open_failure_reports_and_returns_to_idle() {
        let mut recorder = Recorder::new("/tmp/openfail.wav");
        let listener = Arc::new(CollectingListener::default());
        let sink = Arc::new(MemorySink::default());

        let mut source = ScriptedSource::seconds_of_silence(1);
        source.fail_open = true;

        recorder.start(Box::new(source), listener.clone(), sink.clone());
        wait_until_idle(&recorder);
        recorder.stop();

        assert!(sink.saved.lock().unwrap().is_empty());
        let updates = listener.updates.lock().unwrap();
        assert!(updates.iter().any(|m| m.contains("Recording failed")));
    }

    /// A mid-session device error still persists the partial recording and
    /// notifies the listener.
    #[test]
    fn device_error_saves_partial_session() {
        let mut recorder = Recorder::new("/tmp/partial.wav");
        let listener = Arc::new(CollectingListener::default());
        let sink = Arc::new(MemorySink::default());

        let source = ScriptedSource::seconds_of_silence(2);
        recorder.start(Box::new(source), listener.clone(), sink.clone());
        wait_until_idle(&recorder);
        recorder.stop();

        let saved = sink.saved.lock().unwrap();
        assert_eq!(saved.len(), 1);
        assert_eq!(saved[0].0, 2 * ONE_SECOND);

        let updates = listener.updates.lock().unwrap();
        assert!(updates.iter().any(|m| m.contains("device error")));
        assert!(updates.iter().any(|m| m.contains("Recording saved")));
    }

    /// A panic inside the loop (here: a panicking listener) is caught at the
    /// worker boundary — the session ends like a device failure, the partial
    /// buffer is saved, and `stop()` does not propagate the panic.
    #[test]
    fn loop_panic_is_contained() {
        let mut recorder = Recorder::new("/tmp/panicked.wav");
        let sink = Arc::new(MemorySink::default());

        let source = ScriptedSource::seconds_of_silence(5);
        recorder.start(Box::new(source), Arc::new(PanickyListener), sink.clone());
        wait_until_idle(&recorder);
        recorder.stop();

        // The panic fired at the 3 s trigger; 3 s of audio had been written.
        let saved = sink.saved.lock().unwrap();
        assert_eq!(saved.len(), 1);
        assert_eq!(saved[0].0, 3 * ONE_SECOND);
    }

    /// A panic in a *status* callback fires outside the read loop; it must
    /// still be contained, `stop()` must not propagate it, and the phase
    /// word must return to `Idle` so the recorder stays usable.
    #[test]
    fn status_callback_panic_does_not_poison_the_recorder() {
        let mut recorder = Recorder::new("/tmp/status-panic.wav");
        let sink = Arc::new(MemorySink::default());

        recorder.start(
            Box::new(ScriptedSource::seconds_of_silence(2)),
            Arc::new(PanickyStatusListener),
            sink.clone(),
        );
        wait_until_idle(&recorder);
        recorder.stop();
        assert_eq!(recorder.phase(), SessionPhase::Idle);

        // The machine recovered: a fresh session runs to completion.
        let listener = Arc::new(CollectingListener::default());
        recorder.start(
            Box::new(ScriptedSource::seconds_of_silence(1)),
            listener,
            sink.clone(),
        );
        wait_until_idle(&recorder);
        recorder.stop();
        assert!(!sink.saved.lock().unwrap().is_empty());
    }

    /// A panicking sink ends the session like any other failure — contained
    /// at the worker boundary, back to `Idle`, `stop()` returns normally.
    #[test]
    fn sink_panic_is_contained() {
        let mut recorder = Recorder::new("/tmp/sink-panic.wav");
        let listener = Arc::new(CollectingListener::default());

        recorder.start(
            Box::new(ScriptedSource::seconds_of_silence(1)),
            listener,
            Arc::new(PanickySink),
        );
        wait_until_idle(&recorder);
        recorder.stop();
        assert_eq!(recorder.phase(), SessionPhase::Idle);
    }

    /// A redundant `start` is judged on the already-recording constraint
    /// alone — its (unavailable) device is never probed, so no spurious
    /// failure message reaches the listener and the live session continues.
    #[test]
    fn second_start_with_unavailable_device_stays_silent() {
        let mut recorder = Recorder::new("/tmp/busy.wav");
        let listener = Arc::new(CollectingListener::default());
        let sink = Arc::new(MemorySink::default());

        let mut slow = ScriptedSource::new(vec![vec![0u8; 3_200]; 100], 3_200);
        slow.read_delay = Duration::from_millis(5);
        recorder.start(Box::new(slow), listener.clone(), sink.clone());
        thread::sleep(Duration::from_millis(20));
        assert!(recorder.is_recording());

        let mut second = ScriptedSource::seconds_of_silence(1);
        second.available = false;
        recorder.start(Box::new(second), listener.clone(), sink.clone());

        assert!(recorder.is_recording());
        let updates = listener.updates.lock().unwrap();
        assert!(
            !updates.iter().any(|m| m.contains("no microphone")),
            "redundant start must be silent: {updates:?}"
        );
        drop(updates);

        recorder.stop();
        assert_eq!(sink.saved.lock().unwrap().len(), 1);
    }

    /// The recorder can run a second session after the first finished on its
    /// own, and the sink receives the configured path.
    #[test]
    fn restart_after_natural_end_uses_new_path() {
        let mut recorder = Recorder::new("/tmp/first.wav");
        let listener = Arc::new(CollectingListener::default());
        let sink = Arc::new(MemorySink::default());

        recorder.start(
            Box::new(ScriptedSource::seconds_of_silence(1)),
            listener.clone(),
            sink.clone(),
        );
        wait_until_idle(&recorder);

        recorder.set_output_path("/tmp/second.wav");
        recorder.start(
            Box::new(ScriptedSource::seconds_of_silence(1)),
            listener,
            sink.clone(),
        );
        wait_until_idle(&recorder);
        recorder.stop();

        let saved = sink.saved.lock().unwrap();
        assert_eq!(saved.len(), 2);
        assert_eq!(saved[0].1, PathBuf::from("/tmp/first.wav"));
        assert_eq!(saved[1].1, PathBuf::from("/tmp/second.wav"));
    }
}

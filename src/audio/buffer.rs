//! Fixed-capacity append-only buffer for raw PCM bytes.
//!
//! Unlike a circular buffer, a [`RollingBuffer`] never wraps: writes beyond
//! capacity are truncated, and a partial write is the caller's signal that
//! the buffer is full.  The capture worker uses two of these — the 30-second
//! session buffer fills exactly once per session (reaching capacity is the
//! *normal* end of a recording), while the 5-second realtime buffer is
//! [`reset`](RollingBuffer::reset) after every realtime trigger.
//!
//! # Example
//!
//! ```rust
//! use voice_capture::audio::RollingBuffer;
//!
//! let mut buf = RollingBuffer::new(4);
//! assert_eq!(buf.write(&[1, 2, 3]), 3);
//! assert_eq!(buf.write(&[4, 5, 6]), 1); // partial — buffer is now full
//! assert!(buf.is_full());
//! assert_eq!(buf.snapshot(), &[1, 2, 3, 4]);
//! ```

// ---------------------------------------------------------------------------
// RollingBuffer
// ---------------------------------------------------------------------------

/// A fixed-capacity append-only byte buffer.
///
/// ## Overflow behaviour
///
/// [`write`](Self::write) accepts `min(data.len(), capacity - len)` bytes
/// and returns the accepted count.  Data is never silently wrapped or
/// overwritten; once full, further writes accept zero bytes until
/// [`reset`](Self::reset).
///
/// The buffer has exactly one owner — there is no interior mutability and
/// no locking.  Ownership transfer is the synchronization strategy.
pub struct RollingBuffer {
    buf: Vec<u8>,
    capacity: usize,
    /// Bytes written since the last reset (≤ `capacity`).
    cursor: usize,
}

impl RollingBuffer {
    /// Create a new buffer with the given `capacity` in bytes.
    ///
    /// Storage is allocated up front and reused across resets.
    ///
    /// # Panics
    ///
    /// Panics if `capacity == 0`.
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "RollingBuffer capacity must be > 0");
        Self {
            buf: vec![0; capacity],
            capacity,
            cursor: 0,
        }
    }

    /// Append `data`, returning the number of bytes accepted.
    ///
    /// Accepts `min(data.len(), capacity - len)` bytes and never blocks.
    /// A return value smaller than `data.len()` means the buffer is full.
    pub fn write(&mut self, data: &[u8]) -> usize {
        let accepted = data.len().min(self.capacity - self.cursor);
        self.buf[self.cursor..self.cursor + accepted].copy_from_slice(&data[..accepted]);
        self.cursor += accepted;
        accepted
    }

    /// Rewind the write cursor to zero, logically discarding all contents.
    ///
    /// The underlying storage is reused, not reallocated.
    pub fn reset(&mut self) {
        self.cursor = 0;
    }

    /// Immutable view of everything written since the last reset.
    pub fn snapshot(&self) -> &[u8] {
        &self.buf[..self.cursor]
    }

    /// Bytes written since the last reset.
    pub fn len(&self) -> usize {
        self.cursor
    }

    /// Returns `true` when no bytes have been written since the last reset.
    pub fn is_empty(&self) -> bool {
        self.cursor == 0
    }

    /// Maximum number of bytes the buffer can hold.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Returns `true` once the write cursor has reached capacity.
    pub fn is_full(&self) -> bool {
        self.cursor == self.capacity
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

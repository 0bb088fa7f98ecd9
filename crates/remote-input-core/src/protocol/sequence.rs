//! Thread-safe counter for numbering outbound request frames.
//!
//! Every frame header carries a sequence number set by the originator of the
//! message. Peers number their requests with a counter like this one; the
//! service never numbers anything itself – each reply echoes the sequence
//! number of the request it answers, which is how a peer pipelining several
//! requests over one connection matches replies that complete out of order.

use std::sync::atomic::{AtomicU64, Ordering};

/// A monotonically increasing counter for request sequence numbers.
///
/// Numbers start at 0 and increment by 1 per [`next`](Self::next) call. The
/// counter wraps around at `u64::MAX` back to 0 without panicking.
///
/// # Examples
///
/// ```rust
/// use remote_input_core::protocol::SequenceCounter;
///
/// let counter = SequenceCounter::new();
/// assert_eq!(counter.next(), 0);
/// assert_eq!(counter.next(), 1);
/// ```
pub struct SequenceCounter {
    inner: AtomicU64,
}

impl SequenceCounter {
    /// Creates a new counter starting at 0.
    pub fn new() -> Self {
        Self {
            inner: AtomicU64::new(0),
        }
    }

    /// Returns the next sequence number and atomically increments the counter.
    ///
    /// `Ordering::Relaxed` is sufficient: the numbers only order messages on
    /// the wire, they are not used for memory synchronisation between
    /// threads.
    pub fn next(&self) -> u64 {
        self.inner.fetch_add(1, Ordering::Relaxed)
    }

    /// Returns the current value without incrementing. Diagnostic use only;
    /// another thread may advance the counter before the value is read.
    pub fn current(&self) -> u64 {
        self.inner.load(Ordering::Relaxed)
    }
}

impl Default for SequenceCounter {
    fn default() -> Self {
        Self::new()
    }
}

//! Destination-side buffered write combiner.
//!
//! Coalesces many small `put(dst_locale, value)` calls into few large
//! transfers, amortizing the per-message cost the way real RDMA/PGAS
//! aggregation does over a genuinely distributed interconnect. One
//! [`Aggregator`] instance is held by exactly one task: it owns one
//! outgoing buffer per destination locale and one `Sender` end of that
//! locale's inbound channel.
//!
//! Built around a `rayon::scope` fork-join shape for the
//! many-producers-one-consumer pattern, with the actual transport a plain
//! `std::sync::mpsc::channel` rather than a one-sided PGAS put — the
//! closest idiomatic Rust stand-in for a remote put in a single-process
//! simulation. The receiving side (applying level or parent updates to
//! newly discovered vertices) is not part of this type: it lives in the
//! owning locale's worker loop in `crate::level`/`crate::parent`, the only
//! code allowed to write that locale's partition of
//! `visited`/`level`/`parent`.

use std::sync::mpsc::Sender;

use crate::config::AggregatorConfig;

/// A batch of values flushed to one destination locale in a single bulk
/// transfer.
pub type Batch<T> = Vec<T>;

/// Buffers `put(dst_locale, value)` calls per destination locale and
/// flushes each buffer as one [`Batch`] over that locale's channel once it
/// reaches `buffer_capacity`, or when [`Aggregator::flush`] is called
/// (including implicitly, on drop).
pub struct Aggregator<T> {
    senders: Vec<Sender<Batch<T>>>,
    buffers: Vec<Batch<T>>,
    capacity: usize,
}

impl<T> Aggregator<T> {
    /// Creates an aggregator with one destination channel per locale. The
    /// order of `senders` must match locale ids: `senders[n]` is the
    /// inbox of locale `n`.
    pub fn new(senders: Vec<Sender<Batch<T>>>, config: AggregatorConfig) -> Self {
        let locales = senders.len();
        Self {
            senders,
            buffers: (0..locales)
                .map(|_| Vec::with_capacity(config.buffer_capacity))
                .collect(),
            capacity: config.buffer_capacity,
        }
    }

    /// Appends `value` to the buffer for `dst_locale`, flushing that
    /// buffer as one bulk transfer if it is now full.
    ///
    /// Overflow past `buffer_capacity` is impossible: enqueue always
    /// triggers a flush exactly at the capacity boundary.
    pub fn put(&mut self, dst_locale: usize, value: T) {
        self.buffers[dst_locale].push(value);
        if self.buffers[dst_locale].len() == self.capacity {
            self.flush_one(dst_locale);
        }
    }

    /// Drains every non-empty buffer, shipping each as one bulk transfer.
    /// After this returns, every `(n, v)` submitted so far has been
    /// handed to locale `n`'s channel; the value is *applied* once the
    /// owning locale's worker drains its receiver, which this call does
    /// not wait for.
    pub fn flush(&mut self) {
        for n in 0..self.buffers.len() {
            self.flush_one(n);
        }
    }

    fn flush_one(&mut self, n: usize) {
        if self.buffers[n].is_empty() {
            return;
        }
        let batch = std::mem::replace(&mut self.buffers[n], Vec::with_capacity(self.capacity));
        // A disconnected receiver means locale `n`'s worker thread is
        // gone, which is fatal to the in-flight BFS; the caller observes
        // this as the BFS call simply never terminating cleanly.
        // Aggregators are not durable and never retry a failed send.
        let _ = self.senders[n].send(batch);
    }
}

impl<T> Drop for Aggregator<T> {
    fn drop(&mut self) {
        self.flush();
    }
}

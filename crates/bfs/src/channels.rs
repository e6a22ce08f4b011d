//! Per-locale inbound channel plumbing shared by the aggregated BFS
//! kernels: one `mpsc` channel per locale, the `Sender` half cloned into
//! every [`crate::aggregator::Aggregator`] any task on any locale
//! constructs, the `Receiver` half owned by that locale's worker thread
//! for the lifetime of the BFS call.
//!
//! Channels are unbounded: every locale fully drains its inbox only after
//! a barrier confirms every locale has finished sending for the current
//! level, so nothing is ever waiting to be received while a send could
//! still block a sender. A bounded channel would risk exactly that
//! deadlock, since many worker-local aggregators can be flushing into the
//! same destination concurrently with no one yet draining it.

use std::sync::mpsc::{channel, Receiver, Sender};

use crate::aggregator::Batch;

/// Creates one unbounded channel per locale.
pub(crate) fn make_locale_channels<T>(locales: usize) -> (Vec<Sender<Batch<T>>>, Vec<Receiver<Batch<T>>>) {
    let mut senders = Vec::with_capacity(locales);
    let mut receivers = Vec::with_capacity(locales);
    for _ in 0..locales {
        let (tx, rx) = channel();
        senders.push(tx);
        receivers.push(rx);
    }
    (senders, receivers)
}

/// Drains every currently-available batch off `receiver` without
/// blocking, appending to `out`. Called only after the per-level barrier
/// that guarantees every locale has finished sending for this level, so a
/// non-blocking drain cannot miss an in-flight send.
pub(crate) fn drain_available<T>(receiver: &Receiver<Batch<T>>, mut apply: impl FnMut(T)) {
    while let Ok(batch) = receiver.try_recv() {
        for value in batch {
            apply(value);
        }
    }
}

//! Dispatch metrics.

use std::sync::atomic::{AtomicU64, Ordering};

/// Counters for dispatch activity.
#[derive(Debug, Default)]
pub struct DispatchMetrics {
    /// Messages delivered to the transport.
    pub messages_sent: AtomicU64,
    /// Messages that failed during sending.
    pub messages_failed: AtomicU64,
    /// Batches that passed validation and were dispatched.
    pub batches_dispatched: AtomicU64,
    /// Batches rejected by validation.
    pub batches_rejected: AtomicU64,
}

impl DispatchMetrics {
    /// Creates a new metrics collector.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a successful message send.
    pub fn record_send_success(&self) {
        self.messages_sent.fetch_add(1, Ordering::Relaxed);
    }

    /// Records a failed message send.
    pub fn record_send_failure(&self) {
        self.messages_failed.fetch_add(1, Ordering::Relaxed);
    }

    /// Records a batch outcome at the validation gate.
    pub fn record_batch(&self, accepted: bool) {
        if accepted {
            self.batches_dispatched.fetch_add(1, Ordering::Relaxed);
        } else {
            self.batches_rejected.fetch_add(1, Ordering::Relaxed);
        }
    }

    /// Returns a point-in-time snapshot.
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            messages_sent: self.messages_sent.load(Ordering::Relaxed),
            messages_failed: self.messages_failed.load(Ordering::Relaxed),
            batches_dispatched: self.batches_dispatched.load(Ordering::Relaxed),
            batches_rejected: self.batches_rejected.load(Ordering::Relaxed),
        }
    }
}

/// Point-in-time view of [`DispatchMetrics`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MetricsSnapshot {
    /// Messages delivered to the transport.
    pub messages_sent: u64,
    /// Messages that failed during sending.
    pub messages_failed: u64,
    /// Batches dispatched.
    pub batches_dispatched: u64,
    /// Batches rejected by validation.
    pub batches_rejected: u64,
}

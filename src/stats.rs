//! Delivery counters for the registry.
//!
//! Logging never reports failure to a call site. What went wrong is counted
//! here instead, so a health task or the console can report it later.
//!
//! | Counter      | Condition                                  |
//! |--------------|--------------------------------------------|
//! | `delivered`  | sink accepted the record                   |
//! | `suppressed` | message filtered out before formatting     |
//! | `dropped`    | sink refused the record (`SinkUnavailable`)|
//! | `truncated`  | text exceeded the stream buffer            |
//! | `fallback`   | subsystem had no threshold, default used   |

use core::sync::atomic::{AtomicU32, Ordering};

/// Thread-safe delivery counters.
pub struct DeliveryStats {
    delivered: AtomicU32,
    suppressed: AtomicU32,
    dropped: AtomicU32,
    truncated: AtomicU32,
    fallback: AtomicU32,
}

impl DeliveryStats {
    pub const fn new() -> Self {
        Self {
            delivered: AtomicU32::new(0),
            suppressed: AtomicU32::new(0),
            dropped: AtomicU32::new(0),
            truncated: AtomicU32::new(0),
            fallback: AtomicU32::new(0),
        }
    }

    #[inline]
    pub(crate) fn delivered(&self) {
        self.delivered.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub(crate) fn suppressed(&self) {
        self.suppressed.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub(crate) fn dropped(&self) {
        self.dropped.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub(crate) fn truncated(&self) {
        self.truncated.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub(crate) fn fallback(&self) {
        self.fallback.fetch_add(1, Ordering::Relaxed);
    }

    /// Reset all counters (e.g., after reporting).
    pub fn reset(&self) {
        self.delivered.store(0, Ordering::Relaxed);
        self.suppressed.store(0, Ordering::Relaxed);
        self.dropped.store(0, Ordering::Relaxed);
        self.truncated.store(0, Ordering::Relaxed);
        self.fallback.store(0, Ordering::Relaxed);
    }

    /// Get a snapshot of the current counters.
    #[inline]
    pub fn snapshot(&self) -> StatsSnapshot {
        StatsSnapshot {
            delivered: self.delivered.load(Ordering::Relaxed),
            suppressed: self.suppressed.load(Ordering::Relaxed),
            dropped: self.dropped.load(Ordering::Relaxed),
            truncated: self.truncated.load(Ordering::Relaxed),
            fallback: self.fallback.load(Ordering::Relaxed),
        }
    }
}

impl Default for DeliveryStats {
    fn default() -> Self {
        Self::new()
    }
}

/// Snapshot of delivery counters at a point in time.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StatsSnapshot {
    pub delivered: u32,
    pub suppressed: u32,
    pub dropped: u32,
    pub truncated: u32,
    pub fallback: u32,
}

//! Shared logging configuration: active sink, thresholds, counters.
//!
//! # Lifecycle
//!
//! 1. Created (usually `static`) with [`Registry::new`]: null sink, `Info`
//! 2. Configured once by the startup sequence via [`Registry::init`] and the
//!    `set_*` calls
//! 3. Read by every [`ServiceStream`](crate::ServiceStream) from then on
//!
//! Reconfiguration later is allowed; it takes the exclusive lock and therefore
//! never lands in the middle of a sink `accept`.
//!
//! # Locking
//!
//! - default threshold: `AtomicU8`, lock-free
//! - threshold table, active sink: `spin::RwLock`, readers never allocate

use core::sync::atomic::{AtomicBool, AtomicU8, Ordering};

use spin::RwLock;

use crate::error::ConfigError;
use crate::filter::SeverityFilter;
use crate::line::Record;
use crate::severity::{statically_enabled, Severity};
use crate::sink::{Sink, NULL_SINK};
use crate::stats::{DeliveryStats, StatsSnapshot};

/// Microsecond clock used to stamp records.
pub type Clock = fn() -> i64;

/// Process-wide (or test-local) logging configuration.
pub struct Registry {
    sink: RwLock<&'static dyn Sink>,
    filter: RwLock<SeverityFilter>,
    default_threshold: AtomicU8,
    initialized: AtomicBool,
    clock: Option<Clock>,
    stats: DeliveryStats,
}

impl Registry {
    /// Registry with the null sink and an `Info` default threshold.
    pub const fn new() -> Self {
        Self {
            sink: RwLock::new(NULL_SINK),
            filter: RwLock::new(SeverityFilter::new()),
            default_threshold: AtomicU8::new(Severity::Info as u8),
            initialized: AtomicBool::new(false),
            clock: None,
            stats: DeliveryStats::new(),
        }
    }

    pub const fn with_default_threshold(mut self, threshold: Severity) -> Self {
        self.default_threshold = AtomicU8::new(threshold as u8);
        self
    }

    /// Stamp records with `clock` (microseconds).
    pub const fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = Some(clock);
        self
    }

    /// One-shot startup configuration.
    ///
    /// Later changes must go through the `set_*` calls explicitly.
    pub fn init(&self, sink: &'static dyn Sink, default_threshold: Severity) -> Result<(), ConfigError> {
        if self
            .initialized
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            return Err(ConfigError::AlreadyInitialized);
        }

        self.set_active_sink(sink);
        self.set_default_severity_threshold(default_threshold);
        Ok(())
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized.load(Ordering::Acquire)
    }

    /// Swap the active sink, returning the previous one.
    ///
    /// Waits for in-flight `accept` calls on the old sink to finish.
    pub fn set_active_sink(&self, sink: &'static dyn Sink) -> &'static dyn Sink {
        core::mem::replace(&mut *self.sink.write(), sink)
    }

    pub fn set_severity_threshold(&self, subsystem: &str, threshold: Severity) -> Result<(), ConfigError> {
        self.filter.write().set(subsystem, threshold)
    }

    /// Drop the subsystem's own threshold so it follows the default again.
    pub fn clear_severity_threshold(&self, subsystem: &str) -> bool {
        self.filter.write().remove(subsystem)
    }

    pub fn set_default_severity_threshold(&self, threshold: Severity) {
        self.default_threshold.store(threshold as u8, Ordering::Relaxed);
    }

    #[inline]
    pub fn default_threshold(&self) -> Severity {
        Severity::from_u8(self.default_threshold.load(Ordering::Relaxed))
    }

    /// Effective threshold for `subsystem`: its own, or the default.
    ///
    /// A plain query; nothing is counted.
    #[inline]
    pub fn threshold(&self, subsystem: &str) -> Severity {
        self.filter
            .read()
            .get(subsystem)
            .unwrap_or_else(|| self.default_threshold())
    }

    /// Whether a `severity` message for `subsystem` would reach the sink.
    #[inline]
    pub fn is_enabled(&self, subsystem: &str, severity: Severity) -> bool {
        statically_enabled(severity) && severity >= self.threshold(subsystem)
    }

    /// Filter decision for a message that is actually being logged.
    ///
    /// Counts a subsystem without its own threshold as `fallback` and a
    /// rejected message as `suppressed`.
    pub(crate) fn admit(&self, subsystem: &str, severity: Severity) -> bool {
        let admitted = statically_enabled(severity) && {
            let threshold = match self.filter.read().get(subsystem) {
                Some(threshold) => threshold,
                None => {
                    self.stats.fallback();
                    self.default_threshold()
                }
            };
            severity >= threshold
        };

        if !admitted {
            self.stats.suppressed();
        }
        admitted
    }

    /// Hand a finished record to the active sink.
    ///
    /// Never fails; a refusing sink only bumps the `dropped` counter.
    pub fn submit(&self, record: &Record<'_>) {
        if !statically_enabled(record.severity) {
            return;
        }

        if record.truncated {
            self.stats.truncated();
        }

        let sink = self.sink.read();
        match sink.accept(record) {
            Ok(()) => self.stats.delivered(),
            Err(_) => self.stats.dropped(),
        }
    }

    /// Current clock reading, `0` without a clock.
    #[inline]
    pub fn now_us(&self) -> i64 {
        self.clock.map_or(0, |clock| clock())
    }

    /// Visit every subsystem with its own threshold.
    pub fn for_each_threshold(&self, mut f: impl FnMut(&str, Severity)) {
        for (name, threshold) in self.filter.read().iter() {
            f(name, threshold);
        }
    }

    pub fn stats(&self) -> StatsSnapshot {
        self.stats.snapshot()
    }

    pub fn reset_stats(&self) {
        self.stats.reset();
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

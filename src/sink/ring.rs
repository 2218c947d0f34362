//! In-memory ring of the most recent records.
//!
//! Unlike a bounded queue, a full ring never refuses a record: the oldest
//! entry is overwritten and counted. Entries are fixed-size so the whole ring
//! can sit in a `static`.

use core::sync::atomic::{AtomicU32, Ordering};

use spin::Mutex;

use super::{Sink, Transport};
use crate::error::{SinkError, TransportError};
use crate::line::{format_record, store_name, utf8_prefix, Record, MAX_MSG_LEN, MAX_SUBSYSTEM_LEN};
use crate::severity::Severity;
use crate::sink::FORWARD_LINE_LEN;

/// Default ring size (number of entries).
pub const DEFAULT_RING_LEN: usize = 64;

/// One retained record.
#[derive(Clone, Copy)]
pub struct RingEntry<const C: usize = MAX_MSG_LEN> {
    /// Timestamp in microseconds.
    pub timestamp_us: i64,
    pub severity: Severity,
    /// Text was truncated, either by the stream or by this ring's capacity.
    pub truncated: bool,
    subsystem_len: u8,
    subsystem: [u8; MAX_SUBSYSTEM_LEN],
    len: usize,
    text: [u8; C],
}

impl<const C: usize> RingEntry<C> {
    const EMPTY: Self = Self {
        timestamp_us: 0,
        severity: Severity::Info,
        truncated: false,
        subsystem_len: 0,
        subsystem: [0; MAX_SUBSYSTEM_LEN],
        len: 0,
        text: [0; C],
    };

    fn fill(&mut self, record: &Record<'_>) {
        self.timestamp_us = record.timestamp_us;
        self.severity = record.severity;
        self.subsystem_len = store_name(record.subsystem, &mut self.subsystem) as u8;
        self.len = record.text.len().min(C);
        self.text[..self.len].copy_from_slice(&record.text[..self.len]);
        self.truncated = record.truncated || record.text.len() > C;
    }

    /// Subsystem name (cut at `MAX_SUBSYSTEM_LEN`).
    pub fn subsystem(&self) -> &str {
        utf8_prefix(&self.subsystem[..self.subsystem_len as usize])
    }

    pub fn text(&self) -> &str {
        utf8_prefix(self.as_bytes())
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.text[..self.len]
    }

    /// View as a record, e.g. to re-format or forward it.
    pub fn record(&self) -> Record<'_> {
        Record {
            timestamp_us: self.timestamp_us,
            subsystem: self.subsystem(),
            severity: self.severity,
            text: self.as_bytes(),
            truncated: self.truncated,
        }
    }
}

impl<const C: usize> core::fmt::Debug for RingEntry<C> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("RingEntry")
            .field("timestamp_us", &self.timestamp_us)
            .field("severity", &self.severity)
            .field("subsystem", &self.subsystem())
            .field("text", &self.text())
            .field("truncated", &self.truncated)
            .finish()
    }
}

struct Ring<const N: usize, const C: usize> {
    entries: [RingEntry<C>; N],
    /// Index of the oldest entry.
    head: usize,
    len: usize,
    /// Entries ever removed from the head (popped, overwritten or cleared).
    /// Identifies the current oldest entry across unlocked sections.
    removed: u64,
}

impl<const N: usize, const C: usize> Ring<N, C> {
    fn push(&mut self, record: &Record<'_>) -> bool {
        let overwrite = self.len == N;
        let idx = (self.head + self.len) % N;
        self.entries[idx].fill(record);
        if overwrite {
            self.head = (self.head + 1) % N;
            self.removed += 1;
        } else {
            self.len += 1;
        }
        overwrite
    }

    fn oldest(&self) -> Option<&RingEntry<C>> {
        (self.len > 0).then(|| &self.entries[self.head])
    }

    fn pop(&mut self) -> Option<RingEntry<C>> {
        let entry = *self.oldest()?;
        self.head = (self.head + 1) % N;
        self.len -= 1;
        self.removed += 1;
        Some(entry)
    }

    /// Pop the oldest entry only if it is still the one seen at `removed`.
    fn pop_if_head(&mut self, removed: u64) -> bool {
        if self.len == 0 || self.removed != removed {
            return false;
        }
        self.pop();
        true
    }
}

/// Fixed-capacity circular sink keeping the last `N` records.
///
/// - `accept` copies at most `C` bytes under a spin lock; never allocates
/// - overflow evicts the oldest entry (see [`RingSink::overwritten`])
/// - [`RingSink::drain`] / [`RingSink::drain_into`] hand entries to whoever
///   exports them (console, telemetry task)
pub struct RingSink<const N: usize = DEFAULT_RING_LEN, const C: usize = MAX_MSG_LEN> {
    ring: Mutex<Ring<N, C>>,
    overwritten: AtomicU32,
}

impl<const N: usize, const C: usize> RingSink<N, C> {
    /// Create a new empty ring.
    ///
    /// # Panics
    ///
    /// Panics at compile time (in const context) if `N` is zero.
    pub const fn new() -> Self {
        assert!(N > 0, "Ring must hold at least one entry");

        Self {
            ring: Mutex::new(Ring {
                entries: [RingEntry::EMPTY; N],
                head: 0,
                len: 0,
                removed: 0,
            }),
            overwritten: AtomicU32::new(0),
        }
    }

    /// Pop the oldest entry.
    pub fn drain(&self) -> Option<RingEntry<C>> {
        self.ring.lock().pop()
    }

    /// Visit retained entries oldest-first without removing them.
    ///
    /// The ring stays locked while `f` runs; keep it short.
    pub fn for_each(&self, mut f: impl FnMut(&RingEntry<C>)) {
        let ring = self.ring.lock();
        for i in 0..ring.len {
            f(&ring.entries[(ring.head + i) % N]);
        }
    }

    /// Forward entries oldest-first to `transport` as formatted lines.
    ///
    /// Stops at the first entry the transport refuses; that entry stays in
    /// the ring for the next call. Returns the number of entries sent.
    ///
    /// The ring is not locked while `try_send` runs, so a transport may log
    /// (into this ring too). Only entries present when the call starts are
    /// sent; anything logged meanwhile waits for the next call.
    pub fn drain_into<T: Transport + ?Sized>(&self, transport: &T) -> Result<usize, TransportError> {
        let mut line = [0u8; FORWARD_LINE_LEN];
        let mut sent = 0;
        let budget = self.len();

        while sent < budget {
            let (entry, removed) = {
                let ring = self.ring.lock();
                match ring.oldest() {
                    Some(entry) => (*entry, ring.removed),
                    None => break,
                }
            };

            let len = format_record(&entry.record(), &mut line);
            transport.try_send(&line[..len])?;

            // Overwritten while unlocked: it was still sent, nothing to pop.
            self.ring.lock().pop_if_head(removed);
            sent += 1;
        }

        Ok(sent)
    }

    /// Number of retained entries.
    pub fn len(&self) -> usize {
        self.ring.lock().len
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub const fn capacity(&self) -> usize {
        N
    }

    /// Entries lost to overwrite since creation (or last reset).
    #[inline]
    pub fn overwritten(&self) -> u32 {
        self.overwritten.load(Ordering::Relaxed)
    }

    /// Reset overwritten counter (e.g., after reporting).
    #[inline]
    pub fn reset_overwritten(&self) {
        self.overwritten.store(0, Ordering::Relaxed);
    }

    /// Drop every retained entry.
    pub fn clear(&self) {
        let mut ring = self.ring.lock();
        ring.removed += ring.len as u64;
        ring.head = 0;
        ring.len = 0;
    }
}

impl<const N: usize, const C: usize> Default for RingSink<N, C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize, const C: usize> Sink for RingSink<N, C> {
    fn accept(&self, record: &Record<'_>) -> Result<(), SinkError> {
        if self.ring.lock().push(record) {
            self.overwritten.fetch_add(1, Ordering::Relaxed);
        }
        Ok(())
    }
}

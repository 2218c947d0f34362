//! Sinks: consumers of finished records.
//!
//! ```text
//! ServiceStream ──▶ Registry ──▶ &'static dyn Sink
//!                                  ├─ NullSink        (discard)
//!                                  ├─ RingSink        (last N records, drained later)
//!                                  └─ ForwardingSink  (Transport::try_send, drop if busy)
//! ```
//!
//! # Rules
//!
//! - `accept` shall complete in bounded time; it never waits on I/O
//! - A sink never keeps a reference to the record it was handed
//! - Errors are reported to the registry for accounting, never to call sites

mod forward;
mod null;
mod ring;

pub use forward::{ForwardingSink, Transport, FORWARD_LINE_LEN};
pub use null::{NullSink, NULL_SINK};
pub use ring::{RingEntry, RingSink, DEFAULT_RING_LEN};

use crate::error::SinkError;
use crate::line::Record;

/// Capability to accept a finished record.
pub trait Sink: Sync {
    /// Take one record. Must not block for an unbounded time.
    fn accept(&self, record: &Record<'_>) -> Result<(), SinkError>;
}

impl<S: Sink + ?Sized> Sink for &S {
    #[inline]
    fn accept(&self, record: &Record<'_>) -> Result<(), SinkError> {
        (**self).accept(record)
    }
}

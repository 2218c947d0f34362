//! Forwarding sink: one formatted line per record, handed to a transport.

use core::sync::atomic::{AtomicU32, Ordering};

use super::Sink;
use crate::error::{SinkError, TransportError};
use crate::line::{format_record, Record};

/// Size of the stack buffer a record is formatted into before sending.
pub const FORWARD_LINE_LEN: usize = 256;

/// Byte transport owned by the embedding application (UART, radio link, ...).
///
/// `try_send` must return immediately: `Err(WouldBlock)` when the transport
/// cannot take the bytes right now, never wait for it to drain.
pub trait Transport {
    fn try_send(&self, bytes: &[u8]) -> Result<(), TransportError>;
}

impl<T: Transport + ?Sized> Transport for &T {
    #[inline]
    fn try_send(&self, bytes: &[u8]) -> Result<(), TransportError> {
        (**self).try_send(bytes)
    }
}

/// Sink that forwards each record to a [`Transport`], dropping on back-pressure.
///
/// Format: `[timestamp_us] LEVEL subsystem: message\n` (see
/// [`format_record`]). Lines longer than `L` are cut; the newline is kept.
pub struct ForwardingSink<T, const L: usize = FORWARD_LINE_LEN> {
    transport: T,
    forwarded: AtomicU32,
    dropped: AtomicU32,
}

impl<T: Transport, const L: usize> ForwardingSink<T, L> {
    pub const fn new(transport: T) -> Self {
        Self {
            transport,
            forwarded: AtomicU32::new(0),
            dropped: AtomicU32::new(0),
        }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Lines handed to the transport.
    #[inline]
    pub fn forwarded(&self) -> u32 {
        self.forwarded.load(Ordering::Relaxed)
    }

    /// Lines refused by the transport.
    #[inline]
    pub fn dropped(&self) -> u32 {
        self.dropped.load(Ordering::Relaxed)
    }

    /// Reset dropped counter (e.g., after reporting).
    #[inline]
    pub fn reset_dropped(&self) {
        self.dropped.store(0, Ordering::Relaxed);
    }
}

impl<T: Transport + Sync, const L: usize> Sink for ForwardingSink<T, L> {
    fn accept(&self, record: &Record<'_>) -> Result<(), SinkError> {
        let mut line = [0u8; L];
        let len = format_record(record, &mut line);

        match self.transport.try_send(&line[..len]) {
            Ok(()) => {
                self.forwarded.fetch_add(1, Ordering::Relaxed);
                Ok(())
            }
            Err(e) => {
                self.dropped.fetch_add(1, Ordering::Relaxed);
                Err(e.into())
            }
        }
    }
}

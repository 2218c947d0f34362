//! Bounded line buffer and the record handed to sinks.

use core::fmt::{self, Write};

use crate::severity::Severity;

/// Maximum message length (bytes of text per message).
pub const MAX_MSG_LEN: usize = 120;

/// Maximum stored subsystem name length.
pub const MAX_SUBSYSTEM_LEN: usize = 16;

/// Fixed-capacity text accumulator.
///
/// Writes past capacity are cut off at exactly `C` bytes and flagged; the
/// `fmt::Write` impl never reports an error, so `write!` keeps going.
pub struct LineBuffer<const C: usize = MAX_MSG_LEN> {
    buf: [u8; C],
    len: usize,
    truncated: bool,
}

impl<const C: usize> LineBuffer<C> {
    /// Create empty buffer
    pub const fn new() -> Self {
        Self {
            buf: [0u8; C],
            len: 0,
            truncated: false,
        }
    }

    /// Append bytes, keeping only what fits.
    #[inline]
    pub fn push_bytes(&mut self, bytes: &[u8]) {
        let remaining = C - self.len;
        let to_write = bytes.len().min(remaining);
        self.buf[self.len..self.len + to_write].copy_from_slice(&bytes[..to_write]);
        self.len += to_write;
        if to_write < bytes.len() {
            self.truncated = true;
        }
    }

    /// Clear buffer
    #[inline]
    pub fn clear(&mut self) {
        self.len = 0;
        self.truncated = false;
    }

    /// Get raw bytes
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf[..self.len]
    }

    /// Longest valid UTF-8 prefix of the contents.
    pub fn as_str(&self) -> &str {
        utf8_prefix(self.as_bytes())
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub const fn capacity(&self) -> usize {
        C
    }

    /// True if any content was dropped since the last `clear`.
    pub fn is_truncated(&self) -> bool {
        self.truncated
    }
}

impl<const C: usize> Default for LineBuffer<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const C: usize> Write for LineBuffer<C> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.push_bytes(s.as_bytes());
        Ok(())
    }
}

/// A finished message, borrowed for the duration of one `Sink::accept`.
#[derive(Clone, Copy, Debug)]
pub struct Record<'a> {
    /// Timestamp in microseconds (0 when the registry has no clock).
    pub timestamp_us: i64,
    pub subsystem: &'a str,
    pub severity: Severity,
    /// Message bytes, at most the stream capacity.
    pub text: &'a [u8],
    /// Content was cut off at the stream capacity.
    pub truncated: bool,
}

impl<'a> Record<'a> {
    /// Text as `&str`; a multi-byte character split by truncation is dropped.
    pub fn text_str(&self) -> &'a str {
        utf8_prefix(self.text)
    }
}

/// Format a record as one output line.
///
/// Format: `[timestamp_us] LEVEL subsystem: message\n`
///
/// Returns the number of bytes written. A line longer than `buf` is cut, but
/// the last byte is always the `\n` so consecutive lines never run together.
pub fn format_record(record: &Record<'_>, buf: &mut [u8]) -> usize {
    let Some(body_len) = buf.len().checked_sub(1) else {
        return 0;
    };
    let mut writer = SliceWriter { buf: &mut buf[..body_len], pos: 0 };

    let _ = write!(
        writer,
        "[{:10}] {} {}: {}",
        record.timestamp_us,
        record.severity.as_str(),
        record.subsystem,
        record.text_str()
    );

    let pos = writer.pos;
    buf[pos] = b'\n';
    pos + 1
}

/// Copy `name` into a fixed array, cutting at `MAX_SUBSYSTEM_LEN` on a char
/// boundary. Returns the stored length.
pub(crate) fn store_name(name: &str, dst: &mut [u8; MAX_SUBSYSTEM_LEN]) -> usize {
    let mut len = name.len().min(MAX_SUBSYSTEM_LEN);
    while !name.is_char_boundary(len) {
        len -= 1;
    }
    dst[..len].copy_from_slice(&name.as_bytes()[..len]);
    len
}

pub(crate) fn utf8_prefix(bytes: &[u8]) -> &str {
    match core::str::from_utf8(bytes) {
        Ok(s) => s,
        Err(e) => core::str::from_utf8(&bytes[..e.valid_up_to()]).unwrap_or_default(),
    }
}

struct SliceWriter<'a> {
    buf: &'a mut [u8],
    pos: usize,
}

impl<'a> Write for SliceWriter<'a> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        let bytes = s.as_bytes();
        let remaining = self.buf.len() - self.pos;
        let to_write = bytes.len().min(remaining);
        self.buf[self.pos..self.pos + to_write].copy_from_slice(&bytes[..to_write]);
        self.pos += to_write;
        Ok(())
    }
}

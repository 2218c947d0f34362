//! Service interface stream: the per-call-site message builder.
//!
//! # Architecture
//!
//! ```text
//! call site            ServiceStream              Registry            Sink
//! ─────────            ─────────────              ────────            ────
//! begin(sev) ───────▶  threshold check ◀───────── filter
//! append(..) ───────▶  [u8; C] line (stack)
//! end_of_message() ─▶  Record ──────────────────▶ submit() ─────────▶ accept()
//! ```
//!
//! # Rules
//!
//! - The filter is checked once, in `begin`; a suppressed message costs no
//!   formatting and never touches the sink
//! - The line buffer is fixed; overflow truncates, nothing grows
//! - Nothing here returns an error to the caller

use core::fmt::{self, Display, Write};

use crate::line::{LineBuffer, Record, MAX_MSG_LEN};
use crate::registry::Registry;
use crate::severity::Severity;

/// Named output stream for one subsystem.
///
/// Not shared between threads: each call site (or task) owns its own, typically
/// on the stack. An unfinished message is ended when the stream is dropped.
///
/// ```ignore
/// let mut eps = ServiceStream::new(&REGISTRY, "power");
/// eps.error().append("undervoltage ").append(mv).append(" mV").end_of_message();
/// ```
pub struct ServiceStream<'a, const C: usize = MAX_MSG_LEN> {
    registry: &'a Registry,
    name: &'a str,
    severity: Severity,
    /// A message has been started and not yet ended.
    open: bool,
    /// The open message passed the filter.
    enabled: bool,
    line: LineBuffer<C>,
}

impl<'a> ServiceStream<'a> {
    /// Bind a stream to `name`. Does not touch the registry or sink.
    pub const fn new(registry: &'a Registry, name: &'a str) -> Self {
        Self::bounded(registry, name)
    }
}

impl<'a, const C: usize> ServiceStream<'a, C> {
    /// Like [`ServiceStream::new`] with a line capacity of `C` bytes.
    pub const fn bounded(registry: &'a Registry, name: &'a str) -> Self {
        Self {
            registry,
            name,
            severity: Severity::Info,
            open: false,
            enabled: false,
            line: LineBuffer::new(),
        }
    }

    /// Subsystem name this stream reports as.
    pub fn name(&self) -> &'a str {
        self.name
    }

    /// Severity of the current (or next implicit) message.
    pub fn severity(&self) -> Severity {
        self.severity
    }

    /// Start a message at `severity`.
    ///
    /// Unfinished content from a previous message is discarded.
    pub fn begin(&mut self, severity: Severity) -> &mut Self {
        self.line.clear();
        self.severity = severity;
        self.open = true;
        self.enabled = self.registry.admit(self.name, severity);
        self
    }

    pub fn debug(&mut self) -> &mut Self {
        self.begin(Severity::Debug)
    }

    pub fn info(&mut self) -> &mut Self {
        self.begin(Severity::Info)
    }

    pub fn warning(&mut self) -> &mut Self {
        self.begin(Severity::Warning)
    }

    pub fn error(&mut self) -> &mut Self {
        self.begin(Severity::Error)
    }

    /// Whether the open message will reach the sink.
    ///
    /// Lets callers skip computing expensive arguments.
    #[inline]
    pub fn is_active(&self) -> bool {
        self.open && self.enabled
    }

    /// Would a message at `severity` pass the filter right now?
    pub fn would_log(&self, severity: Severity) -> bool {
        self.registry.is_enabled(self.name, severity)
    }

    /// Append a displayable value (text, number, enum).
    ///
    /// Starts a message at the current severity if none is open. Content past
    /// capacity is dropped silently.
    pub fn append<T: Display>(&mut self, value: T) -> &mut Self {
        if self.ensure_open() {
            let _ = write!(self.line, "{}", value);
        }
        self
    }

    /// Append preformatted arguments, as produced by `format_args!`.
    pub fn append_args(&mut self, args: fmt::Arguments<'_>) -> &mut Self {
        if self.ensure_open() {
            let _ = self.line.write_fmt(args);
        }
        self
    }

    /// Finish the open message.
    ///
    /// If it passed the filter, the text is handed to the registry's active
    /// sink together with the subsystem name and severity. Either way the
    /// buffer is cleared.
    pub fn end_of_message(&mut self) {
        if self.open && self.enabled {
            let record = Record {
                timestamp_us: self.registry.now_us(),
                subsystem: self.name,
                severity: self.severity,
                text: self.line.as_bytes(),
                truncated: self.line.is_truncated(),
            };
            self.registry.submit(&record);
        }

        self.line.clear();
        self.open = false;
        self.enabled = false;
    }

    /// Bytes accumulated in the open message.
    pub fn pending(&self) -> &[u8] {
        self.line.as_bytes()
    }

    #[inline]
    fn ensure_open(&mut self) -> bool {
        if !self.open {
            self.begin(self.severity);
        }
        self.enabled
    }
}

impl<'a, const C: usize> Write for ServiceStream<'a, C> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        if self.ensure_open() {
            self.line.push_bytes(s.as_bytes());
        }
        Ok(())
    }
}

impl<'a, const C: usize> Drop for ServiceStream<'a, C> {
    fn drop(&mut self) {
        if self.open {
            self.end_of_message();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sink::RingSink;

    fn setup() -> (&'static RingSink<8>, Registry) {
        let ring: &'static RingSink<8> = Box::leak(Box::new(RingSink::new()));
        let registry = Registry::new();
        registry.set_active_sink(ring);
        (ring, registry)
    }

    #[test]
    fn test_new_does_not_touch_registry() {
        let (_, registry) = setup();
        let stream = ServiceStream::new(&registry, "eps");
        assert_eq!(stream.name(), "eps");
        assert!(!stream.is_active());
        assert_eq!(registry.stats().fallback, 0);
    }

    #[cfg(not(any(feature = "flight", feature = "min-error")))]
    #[test]
    fn test_chained_message() {
        let (ring, registry) = setup();
        let mut stream = ServiceStream::new(&registry, "eps");

        stream.warning().append("bus ").append(27.5).append(" V").end_of_message();

        let entry = ring.drain().unwrap();
        assert_eq!(entry.subsystem(), "eps");
        assert_eq!(entry.severity, Severity::Warning);
        assert_eq!(entry.text(), "bus 27.5 V");
    }

    #[test]
    fn test_suppressed_message_skips_formatting() {
        struct Loud;
        impl Display for Loud {
            fn fmt(&self, _: &mut fmt::Formatter<'_>) -> fmt::Result {
                panic!("formatted a suppressed message");
            }
        }

        let (ring, registry) = setup();
        let mut stream = ServiceStream::new(&registry, "eps");
        stream.debug().append(Loud).end_of_message();

        assert!(ring.is_empty());
        assert_eq!(registry.stats().suppressed, 1);
    }

    #[cfg(not(any(feature = "flight", feature = "min-warning")))]
    #[test]
    fn test_implicit_begin_and_drop_flush() {
        let (ring, registry) = setup();
        {
            let mut stream = ServiceStream::new(&registry, "ttc");
            stream.append("link up");
        }

        let entry = ring.drain().unwrap();
        assert_eq!(entry.severity, Severity::Info);
        assert_eq!(entry.text(), "link up");
    }

    #[cfg(not(any(feature = "flight", feature = "min-error")))]
    #[test]
    fn test_write_macro_and_truncation() {
        let (ring, registry) = setup();
        let mut stream: ServiceStream<'_, 6> = ServiceStream::bounded(&registry, "obc");

        stream.error();
        let _ = write!(stream, "reset #{}", 12);
        stream.end_of_message();

        let entry = ring.drain().unwrap();
        assert_eq!(entry.text(), "reset ");
        assert!(entry.truncated);
        assert_eq!(registry.stats().truncated, 1);
    }

    #[cfg(not(any(feature = "flight", feature = "min-error")))]
    #[test]
    fn test_begin_discards_unfinished() {
        let (ring, registry) = setup();
        let mut stream = ServiceStream::new(&registry, "obc");

        stream.info().append("half a");
        stream.error().append("whole").end_of_message();

        assert_eq!(ring.len(), 1);
        assert_eq!(ring.drain().unwrap().text(), "whole");
    }

    #[test]
    fn test_end_without_message_is_noop() {
        let (ring, registry) = setup();
        let mut stream = ServiceStream::new(&registry, "obc");
        stream.end_of_message();
        assert!(ring.is_empty());
    }
}

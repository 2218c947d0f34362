//! Forwarding sink tests: a busy transport drops, never blocks

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::{Duration, Instant};

use svc_stream::{
    svc_error, ForwardingSink, Registry, ServiceStream, Severity, Transport, TransportError,
};

/// Transport stuck in `WouldBlock` (e.g. radio link saturated).
struct Saturated {
    attempts: AtomicUsize,
}

impl Transport for Saturated {
    fn try_send(&self, _bytes: &[u8]) -> Result<(), TransportError> {
        self.attempts.fetch_add(1, Ordering::Relaxed);
        Err(TransportError::WouldBlock)
    }
}

/// Transport that is only up while `online` is set.
struct Link {
    online: AtomicBool,
    sent: AtomicUsize,
}

impl Transport for Link {
    fn try_send(&self, _bytes: &[u8]) -> Result<(), TransportError> {
        if !self.online.load(Ordering::Relaxed) {
            return Err(TransportError::Unavailable);
        }
        self.sent.fetch_add(1, Ordering::Relaxed);
        Ok(())
    }
}

#[cfg(not(feature = "flight"))]
#[test]
fn test_would_block_transport_never_stalls_caller() {
    let sink: &'static ForwardingSink<Saturated> = Box::leak(Box::new(ForwardingSink::new(Saturated {
        attempts: AtomicUsize::new(0),
    })));
    let registry = Registry::new();
    registry.set_active_sink(sink);

    let mut stream = ServiceStream::new(&registry, "ttc");
    let start = Instant::now();
    for i in 0..1000 {
        svc_error!(stream, "frame {} lost", i);
    }
    assert!(start.elapsed() < Duration::from_secs(2));

    // One attempt per message, no retries.
    assert_eq!(sink.transport().attempts.load(Ordering::Relaxed), 1000);
    assert_eq!(sink.dropped(), 1000);

    let stats = registry.stats();
    assert_eq!(stats.dropped, 1000);
    assert_eq!(stats.delivered, 0);
}

#[cfg(not(any(feature = "flight", feature = "min-error")))]
#[test]
fn test_link_recovers_after_outage() {
    let sink: &'static ForwardingSink<Link> = Box::leak(Box::new(ForwardingSink::new(Link {
        online: AtomicBool::new(false),
        sent: AtomicUsize::new(0),
    })));
    let registry = Registry::new();
    registry.set_active_sink(sink);

    let mut stream = ServiceStream::new(&registry, "ttc");
    stream.warning().append("during outage").end_of_message();
    assert_eq!(sink.dropped(), 1);

    sink.transport().online.store(true, Ordering::Relaxed);
    stream.warning().append("after outage").end_of_message();
    assert_eq!(sink.forwarded(), 1);
    assert_eq!(sink.transport().sent.load(Ordering::Relaxed), 1);
    assert_eq!(registry.stats().delivered, 1);
    assert_eq!(registry.stats().dropped, 1);
}

#[test]
fn test_filtered_message_never_reaches_transport() {
    let sink: &'static ForwardingSink<Saturated> = Box::leak(Box::new(ForwardingSink::new(Saturated {
        attempts: AtomicUsize::new(0),
    })));
    let registry = Registry::new().with_default_threshold(Severity::Error);
    registry.set_active_sink(sink);

    let mut stream = ServiceStream::new(&registry, "ttc");
    stream.info().append("quiet").end_of_message();
    assert_eq!(sink.transport().attempts.load(Ordering::Relaxed), 0);
}

//! Service stream tests: accumulation, truncation, implicit end
//!
//! Needs every severity compiled in.

#![cfg(not(any(feature = "flight", feature = "min-info")))]

use core::fmt::Write;

use svc_stream::{svc_error, svc_info, Registry, RingSink, ServiceStream, Severity};

fn setup() -> (&'static RingSink<8>, Registry) {
    let ring: &'static RingSink<8> = Box::leak(Box::new(RingSink::new()));
    let registry = Registry::new().with_default_threshold(Severity::Debug);
    registry.set_active_sink(ring);
    (ring, registry)
}

#[test]
fn test_overflow_keeps_exactly_first_c_bytes() {
    let (ring, registry) = setup();
    let mut stream: ServiceStream<'_, 16> = ServiceStream::bounded(&registry, "obc");

    let content = "0123456789abcdefghijklmnopqrstuvwxyz";
    stream.error();
    for chunk in content.as_bytes().chunks(5) {
        stream.append(core::str::from_utf8(chunk).unwrap());
    }
    stream.end_of_message();

    let entry = ring.drain().unwrap();
    assert_eq!(entry.as_bytes(), &content.as_bytes()[..16]);
    assert!(entry.truncated);
}

#[test]
fn test_content_at_capacity_is_not_truncated() {
    let (ring, registry) = setup();
    let mut stream: ServiceStream<'_, 4> = ServiceStream::bounded(&registry, "obc");
    stream.info().append("abcd").end_of_message();

    let entry = ring.drain().unwrap();
    assert_eq!(entry.text(), "abcd");
    assert!(!entry.truncated);
    assert_eq!(registry.stats().truncated, 0);
}

#[test]
fn test_mixed_value_types() {
    #[derive(Debug)]
    enum Mode {
        Safe,
    }

    let (ring, registry) = setup();
    let mut stream = ServiceStream::new(&registry, "modes");
    stream
        .warning()
        .append("mode=")
        .append(format_args!("{:?}", Mode::Safe))
        .append(" t=")
        .append(-12i32)
        .append(" ok=")
        .append(false);
    stream.end_of_message();

    assert_eq!(ring.drain().unwrap().text(), "mode=Safe t=-12 ok=false");
}

#[test]
fn test_fmt_write_into_stream() {
    let (ring, registry) = setup();
    let mut stream = ServiceStream::new(&registry, "eps");
    stream.info();
    write!(stream, "{}/{}", 3, 4).unwrap();
    stream.end_of_message();

    assert_eq!(ring.drain().unwrap().text(), "3/4");
}

#[test]
fn test_per_stream_fifo_order() {
    let (ring, registry) = setup();
    let mut stream = ServiceStream::new(&registry, "eps");
    for i in 0..5 {
        svc_info!(stream, "msg {}", i);
    }

    for i in 0..5 {
        assert_eq!(ring.drain().unwrap().text(), format!("msg {}", i));
    }
}

#[test]
fn test_drop_ends_open_message() {
    let (ring, registry) = setup();
    {
        let mut stream = ServiceStream::new(&registry, "eps");
        stream.error().append("dying words");
        assert!(ring.is_empty());
    }
    assert_eq!(ring.drain().unwrap().text(), "dying words");
}

#[test]
fn test_timestamp_from_registry_clock() {
    fn clock() -> i64 {
        123_456
    }

    let ring: &'static RingSink<2> = Box::leak(Box::new(RingSink::new()));
    let registry = Registry::new().with_clock(clock);
    registry.set_active_sink(ring);

    let mut stream = ServiceStream::new(&registry, "eps");
    svc_error!(stream, "stamped");
    assert_eq!(ring.drain().unwrap().timestamp_us, 123_456);
}

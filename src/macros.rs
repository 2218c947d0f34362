//! Call-site macros.
//!
//! Each macro is one complete message: begin, format, end. Arguments are only
//! evaluated and formatted when the message passes the filter.
//!
//! # Example
//!
//! ```ignore
//! let mut eps = ServiceStream::new(&REGISTRY, "power");
//! svc_error!(eps, "undervoltage {} mV", mv);
//! ```

/// Log one message at `$severity` through `$stream`.
#[macro_export]
macro_rules! svc_log {
    ($stream:expr, $severity:expr, $($arg:tt)*) => {{
        let stream = &mut $stream;
        if stream.begin($severity).is_active() {
            stream.append_args(format_args!($($arg)*));
        }
        stream.end_of_message();
    }};
}

/// Debug-level message.
#[macro_export]
macro_rules! svc_debug {
    ($stream:expr, $($arg:tt)*) => {
        $crate::svc_log!($stream, $crate::Severity::Debug, $($arg)*)
    };
}

/// Info-level message.
#[macro_export]
macro_rules! svc_info {
    ($stream:expr, $($arg:tt)*) => {
        $crate::svc_log!($stream, $crate::Severity::Info, $($arg)*)
    };
}

/// Warning-level message.
#[macro_export]
macro_rules! svc_warning {
    ($stream:expr, $($arg:tt)*) => {
        $crate::svc_log!($stream, $crate::Severity::Warning, $($arg)*)
    };
}

/// Error-level message.
#[macro_export]
macro_rules! svc_error {
    ($stream:expr, $($arg:tt)*) => {
        $crate::svc_log!($stream, $crate::Severity::Error, $($arg)*)
    };
}

//! # svc-stream
//!
//! Service interface streams: allocation-free diagnostic output for onboard
//! software.
//!
//! ## Architecture
//!
//! ```text
//! call site ─▶ ServiceStream("power") ─▶ Registry ─▶ &'static dyn Sink
//!              [u8; C] line, stack        thresholds    Null / Ring / Forwarding
//! ```
//!
//! - A message is checked against the subsystem threshold before anything is
//!   formatted
//! - Buffers are fixed; overflow truncates
//! - Sinks never block; a refusing sink drops the message and it is counted
//! - Logging never fails the caller
//!
//! ## Build-time control
//!
//! `flight` compiles all delivery out; `min-info`, `min-warning`, `min-error`
//! raise the compile-time floor.

#![cfg_attr(not(test), no_std)]

#[macro_use]
mod macros;

pub mod console;
pub mod error;
pub mod filter;
pub mod globals;
pub mod line;
pub mod log_bridge;
pub mod registry;
pub mod severity;
pub mod sink;
pub mod stats;
pub mod stream;

#[cfg(target_os = "espidf")]
pub mod uart;

pub use error::{ConfigError, SinkError, TransportError};
pub use globals::{install_log_bridge, REGISTRY};
pub use line::{Record, MAX_MSG_LEN, MAX_SUBSYSTEM_LEN};
pub use registry::Registry;
pub use severity::Severity;
pub use sink::{ForwardingSink, NullSink, RingSink, Sink, Transport};
pub use stats::StatsSnapshot;
pub use stream::ServiceStream;

//! Global instances.
//!
//! Libraries and tests should pass a `&Registry` around; these statics exist
//! for firmware where one process-wide configuration is the natural shape.
//! Call [`Registry::init`] on [`REGISTRY`] once during startup.

use log::LevelFilter;

use crate::log_bridge::LogBridge;
use crate::registry::Registry;

/// Process-wide registry.
///
/// Starts with the null sink and an `Info` default threshold. On ESP-IDF it is
/// stamped with the high-resolution timer.
#[cfg(not(target_os = "espidf"))]
pub static REGISTRY: Registry = Registry::new();

#[cfg(target_os = "espidf")]
pub static REGISTRY: Registry = Registry::new().with_clock(esp_timer_us);

#[cfg(target_os = "espidf")]
fn esp_timer_us() -> i64 {
    // SAFETY: esp_timer_get_time is always safe to call
    unsafe { esp_idf_svc::sys::esp_timer_get_time() }
}

/// `log` facade adapter bound to [`REGISTRY`].
pub static LOG_BRIDGE: LogBridge = LogBridge::new(&REGISTRY);

/// Route the `log` crate macros into [`REGISTRY`].
pub fn install_log_bridge(max: LevelFilter) -> Result<(), log::SetLoggerError> {
    LogBridge::install(&LOG_BRIDGE, max)
}

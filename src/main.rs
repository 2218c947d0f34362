//! svc-monitor - ESP-IDF firmware entry point
//!
//! Boots the logging stack the way an onboard application would:
//! 1. Route every subsystem into a static ring
//! 2. Install the `log` bridge so third-party crates share the ring
//! 3. Drain the ring to UART on a background loop
//!
//! Build with `--features firmware` for an `espidf` target.

#![no_std]
#![no_main]

use esp_idf_svc::hal::peripherals::Peripherals;
use esp_idf_svc::sys as esp_idf_sys;

use svc_stream::sink::RingSink;
use svc_stream::uart::{drain_task, UartConfig, UartTransport};
use svc_stream::{install_log_bridge, svc_error, svc_info, ServiceStream, Severity, REGISTRY};

static RING: RingSink<128> = RingSink::new();

#[no_mangle]
fn main() {
    // Initialize ESP-IDF
    esp_idf_sys::link_patches();

    if REGISTRY.init(&RING, Severity::Info).is_err() {
        return;
    }
    let _ = REGISTRY.set_severity_threshold("power", Severity::Warning);
    let _ = install_log_bridge(log::LevelFilter::Debug);

    let mut boot = ServiceStream::new(&REGISTRY, "boot");
    svc_info!(boot, "{}", svc_stream::console::commands::VERSION);

    let Some(peripherals) = Peripherals::take().ok() else {
        svc_error!(boot, "peripherals already taken");
        return;
    };

    let config = UartConfig::default();
    let uart = match UartTransport::new(peripherals.uart1, peripherals.pins.gpio6, &config) {
        Ok(uart) => uart,
        Err(e) => {
            svc_error!(boot, "uart init failed: {}", e);
            return;
        }
    };

    svc_info!(boot, "uart log @ {} baud on GPIO{}", config.baud_rate, config.tx_pin);
    log::info!(target: "boot", "log bridge online");
    drop(boot);

    drain_task(&RING, &uart)
}

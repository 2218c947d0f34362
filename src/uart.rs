//! UART transport for ESP-IDF targets.
//!
//! Gives [`ForwardingSink`](crate::sink::ForwardingSink) and
//! [`RingSink::drain_into`](crate::sink::RingSink::drain_into) a serial
//! console to write to. Requires an external USB-UART adapter on the TX pin.
//!
//! # Hardware Setup
//!
//! ```text
//! ESP32-S3 GPIO6 (TX) ──────▶ USB-UART RX
//!                              └─▶ PC Serial Monitor
//! ```
//!
//! **WARNING**: GPIO6 conflicts with Octal PSRAM. Only use on Quad flash boards!

use esp_idf_svc::hal::gpio;
use esp_idf_svc::hal::peripheral::Peripheral;
use esp_idf_svc::hal::uart::{self, UartTxDriver};
use spin::Mutex;

use crate::error::TransportError;
use crate::sink::{RingSink, Transport};

/// UART configuration for log output.
pub struct UartConfig {
    pub baud_rate: u32,
    pub tx_pin: u8,
}

impl Default for UartConfig {
    fn default() -> Self {
        Self {
            baud_rate: 115200,
            tx_pin: 6, // GPIO6 - UART TX (Quad flash, GPIO6 free for UART)
        }
    }
}

/// Non-blocking UART TX transport.
///
/// A concurrent sender or a full TX FIFO reports `WouldBlock`; nothing here
/// waits for the line to drain.
pub struct UartTransport<'d> {
    driver: Mutex<UartTxDriver<'d>>,
}

impl<'d> UartTransport<'d> {
    /// Initialize UART1 TX-only for log output.
    pub fn new(
        uart: impl Peripheral<P = uart::UART1> + 'd,
        tx_pin: impl Peripheral<P = impl gpio::OutputPin> + 'd,
        config: &UartConfig,
    ) -> Result<Self, esp_idf_svc::sys::EspError> {
        let uart_config = uart::config::Config::default()
            .baudrate(esp_idf_svc::hal::units::Hertz(config.baud_rate));

        let driver = UartTxDriver::new(
            uart,
            tx_pin,
            Option::<gpio::AnyIOPin>::None, // CTS
            Option::<gpio::AnyIOPin>::None, // RTS
            &uart_config,
        )?;

        Ok(Self { driver: Mutex::new(driver) })
    }
}

// SAFETY: the driver is only reached through the spin mutex.
unsafe impl Sync for UartTransport<'_> {}

impl Transport for UartTransport<'_> {
    fn try_send(&self, bytes: &[u8]) -> Result<(), TransportError> {
        let mut driver = self.driver.try_lock().ok_or(TransportError::WouldBlock)?;
        match driver.write_nb(bytes) {
            Ok(n) if n == bytes.len() => Ok(()),
            Ok(_) => Err(TransportError::WouldBlock),
            Err(_) => Err(TransportError::Unavailable),
        }
    }
}

/// Ring drain task: forwards `ring` to `uart` forever.
///
/// Reports entries lost to overwrite every 10 seconds.
pub fn drain_task<const N: usize, const C: usize>(ring: &RingSink<N, C>, uart: &UartTransport<'_>) -> ! {
    let mut last_report = 0i64;

    loop {
        let sent = ring.drain_into(uart).unwrap_or(0);

        // SAFETY: esp_timer_get_time is always safe to call
        let now = unsafe { esp_idf_svc::sys::esp_timer_get_time() };
        if now - last_report > 10_000_000 {
            let lost = ring.overwritten();
            if lost > 0 {
                let mut msg = crate::line::LineBuffer::<48>::new();
                let _ = core::fmt::Write::write_fmt(
                    &mut msg,
                    format_args!("[WARN] ring overwrote {} entries\n", lost),
                );
                if uart.try_send(msg.as_bytes()).is_ok() {
                    ring.reset_overwritten();
                }
            }
            last_report = now;
        }

        // If no work, wait before checking again
        if sent == 0 {
            // SAFETY: plain FreeRTOS delay
            unsafe {
                esp_idf_svc::sys::vTaskDelay(10);
            }
        }
    }
}

//! `log` crate adapter.
//!
//! Routes `log::info!` & co. into a [`Registry`] so third-party crates end up
//! in the same sink, filtered by the same thresholds. The subsystem name is
//! the last `::` segment of the record target, so `log::warn!` in
//! `gnss::driver` logs as `driver` unless `target:` overrides it.

use log::{Level, LevelFilter, Metadata, Log};

use crate::registry::Registry;
use crate::severity::Severity;
use crate::stream::ServiceStream;

/// Map a `log` level onto a severity. `Trace` folds into `Debug`.
pub const fn severity_for(level: Level) -> Severity {
    match level {
        Level::Error => Severity::Error,
        Level::Warn => Severity::Warning,
        Level::Info => Severity::Info,
        Level::Debug | Level::Trace => Severity::Debug,
    }
}

/// Subsystem name for a `log` target: its last `::` segment.
pub fn subsystem_for(target: &str) -> &str {
    match target.rfind("::") {
        Some(idx) if idx + 2 < target.len() => &target[idx + 2..],
        _ => target,
    }
}

/// `log::Log` implementation over a registry.
pub struct LogBridge {
    registry: &'static Registry,
}

impl LogBridge {
    pub const fn new(registry: &'static Registry) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &'static Registry {
        self.registry
    }

    /// Install `bridge` as the global `log` logger.
    ///
    /// `max` caps what the `log` macros even evaluate; the registry thresholds
    /// still apply on top.
    pub fn install(bridge: &'static LogBridge, max: LevelFilter) -> Result<(), log::SetLoggerError> {
        log::set_logger(bridge)?;
        log::set_max_level(max);
        Ok(())
    }
}

impl Log for LogBridge {
    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        self.registry
            .is_enabled(subsystem_for(metadata.target()), severity_for(metadata.level()))
    }

    fn log(&self, record: &log::Record<'_>) {
        let mut stream = ServiceStream::new(self.registry, subsystem_for(record.target()));
        if stream.begin(severity_for(record.level())).is_active() {
            stream.append_args(*record.args());
        }
        stream.end_of_message();
    }

    fn flush(&self) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sink::RingSink;

    #[test]
    fn test_level_mapping() {
        assert_eq!(severity_for(Level::Trace), Severity::Debug);
        assert_eq!(severity_for(Level::Debug), Severity::Debug);
        assert_eq!(severity_for(Level::Info), Severity::Info);
        assert_eq!(severity_for(Level::Warn), Severity::Warning);
        assert_eq!(severity_for(Level::Error), Severity::Error);
    }

    #[test]
    fn test_subsystem_is_last_path_segment() {
        assert_eq!(subsystem_for("gnss"), "gnss");
        assert_eq!(subsystem_for("svc_stream::log_bridge"), "log_bridge");
        assert_eq!(subsystem_for("fw::power::bus_monitor"), "bus_monitor");
        assert_eq!(subsystem_for("odd::"), "odd::");
    }

    #[cfg(not(feature = "flight"))]
    #[test]
    fn test_module_path_target_matches_console_name() {
        let ring: &'static RingSink<4> = Box::leak(Box::new(RingSink::new()));
        let registry: &'static Registry = Box::leak(Box::new(Registry::new()));
        registry.set_active_sink(ring);

        let mut out = String::new();
        crate::console::run_line("level log_bridge error", registry, &mut out).unwrap();

        let bridge = LogBridge::new(registry);
        bridge.log(
            &log::Record::builder()
                .target("svc_stream::log_bridge")
                .level(Level::Warn)
                .args(format_args!("filtered"))
                .build(),
        );
        bridge.log(
            &log::Record::builder()
                .target("svc_stream::log_bridge")
                .level(Level::Error)
                .args(format_args!("kept"))
                .build(),
        );

        assert_eq!(ring.len(), 1);
        let entry = ring.drain().unwrap();
        assert_eq!(entry.subsystem(), "log_bridge");
        assert_eq!(entry.text(), "kept");
    }

    #[cfg(not(feature = "flight"))]
    #[test]
    fn test_bridge_without_global_logger() {
        let ring: &'static RingSink<4> = Box::leak(Box::new(RingSink::new()));
        let registry: &'static Registry = Box::leak(Box::new(Registry::new()));
        registry.set_active_sink(ring);
        registry.set_severity_threshold("gnss", Severity::Warning).unwrap();

        let bridge = LogBridge::new(registry);

        bridge.log(
            &log::Record::builder()
                .target("gnss")
                .level(Level::Info)
                .args(format_args!("fix lost"))
                .build(),
        );
        bridge.log(
            &log::Record::builder()
                .target("gnss")
                .level(Level::Error)
                .args(format_args!("antenna open, {} sats", 0))
                .build(),
        );

        assert_eq!(ring.len(), 1);
        let entry = ring.drain().unwrap();
        assert_eq!(entry.subsystem(), "gnss");
        assert_eq!(entry.text(), "antenna open, 0 sats");
    }
}

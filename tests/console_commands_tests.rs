//! Console command tests against an isolated registry

use svc_stream::console::{command_names, run_line, ConsoleError};
use svc_stream::{Registry, RingSink, ServiceStream, Severity};

fn run(registry: &Registry, line: &str) -> (Result<(), ConsoleError>, String) {
    let mut out = String::new();
    let result = run_line(line, registry, &mut out);
    (result, out)
}

#[test]
fn test_help_lists_all_commands() {
    let registry = Registry::new();
    let (result, out) = run(&registry, "help");
    assert!(result.is_ok());
    for name in command_names() {
        assert!(out.contains(name), "help is missing {}", name);
    }
}

#[test]
fn test_help_for_one_command() {
    let registry = Registry::new();
    let (result, out) = run(&registry, "help level");
    assert!(result.is_ok());
    assert!(out.starts_with("level <subsystem>"));
}

#[test]
fn test_level_sets_threshold() {
    let registry = Registry::new();
    let (result, out) = run(&registry, "level power warn");
    assert!(result.is_ok());
    assert_eq!(out, "power=WARN\n");
    assert_eq!(registry.threshold("power"), Severity::Warning);
}

#[cfg(not(any(feature = "flight", feature = "min-info")))]
#[test]
fn test_level_changes_delivery() {
    let ring: &'static RingSink<4> = Box::leak(Box::new(RingSink::new()));
    let registry = Registry::new();
    registry.set_active_sink(ring);
    let mut stream = ServiceStream::new(&registry, "power");

    run(&registry, "level power error").0.unwrap();
    stream.warning().append("hidden").end_of_message();
    run(&registry, "level power debug").0.unwrap();
    stream.debug().append("shown").end_of_message();

    assert_eq!(ring.len(), 1);
    assert_eq!(ring.drain().unwrap().text(), "shown");
}

#[test]
fn test_default_command() {
    let registry = Registry::new();
    let (_, out) = run(&registry, "default");
    assert_eq!(out, "default=INFO\n");

    let (result, out) = run(&registry, "default error");
    assert!(result.is_ok());
    assert_eq!(out, "default=ERROR\n");
    assert_eq!(registry.default_threshold(), Severity::Error);
}

#[test]
fn test_show_lists_overrides() {
    let registry = Registry::new();
    run(&registry, "level eps warn").0.unwrap();
    run(&registry, "level ttc debug").0.unwrap();

    let (_, out) = run(&registry, "show");
    assert!(out.starts_with("default=INFO\n"));
    assert!(out.contains("eps"));
    assert!(out.contains("ttc"));
    assert!(out.contains("DEBUG"));
}

#[cfg(not(feature = "flight"))]
#[test]
fn test_stats_reset() {
    let registry = Registry::new();
    ServiceStream::new(&registry, "eps").error().append("x").end_of_message();

    let (_, out) = run(&registry, "stats reset");
    assert!(out.contains("delivered:  1"));
    assert_eq!(registry.stats().delivered, 0);
}

#[test]
fn test_errors_are_reported() {
    let registry = Registry::new();

    let (result, out) = run(&registry, "reboot");
    assert_eq!(result, Err(ConsoleError::UnknownCommand));
    assert_eq!(out, "E01: unknown command\n");

    let (result, _) = run(&registry, "level power loud");
    assert_eq!(result, Err(ConsoleError::InvalidValue));

    let (result, _) = run(&registry, "level");
    assert_eq!(result, Err(ConsoleError::MissingArg));

    let (result, _) = run(&registry, "level a-name-well-over-the-limit warn");
    assert_eq!(result, Err(ConsoleError::BadName));
}

#[test]
fn test_blank_line_is_ok() {
    let registry = Registry::new();
    let (result, out) = run(&registry, "   ");
    assert!(result.is_ok());
    assert!(out.is_empty());
}

#[test]
fn test_queries_do_not_count_fallback() {
    let registry = Registry::new();
    run(&registry, "level gnss").0.unwrap();
    run(&registry, "show").0.unwrap();
    assert!(!ServiceStream::new(&registry, "gnss").would_log(Severity::Debug));
    assert_eq!(registry.stats().fallback, 0);
}

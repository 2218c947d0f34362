//! Command handlers

use core::fmt::Write;

use super::parser::{parse_line, ParsedCommand};
use super::ConsoleError;
use crate::registry::Registry;
use crate::severity::Severity;

/// Version string (set by build.rs, includes git hash)
pub const VERSION: &str = env!("VERSION_STRING");

type Handler = fn(&ParsedCommand<'_>, &Registry, &mut dyn Write) -> Result<(), ConsoleError>;

/// Command descriptor
pub struct CommandDescriptor {
    pub name: &'static str,
    pub usage: &'static str,
    pub brief: &'static str,
    pub handler: Handler,
}

/// All available commands
pub static COMMANDS: &[CommandDescriptor] = &[
    CommandDescriptor { name: "help", usage: "help [command]", brief: "List commands", handler: cmd_help },
    CommandDescriptor { name: "level", usage: "level <subsystem> [severity|clear]", brief: "Show or set a subsystem threshold", handler: cmd_level },
    CommandDescriptor { name: "default", usage: "default [severity]", brief: "Show or set the default threshold", handler: cmd_default },
    CommandDescriptor { name: "show", usage: "show", brief: "List all thresholds", handler: cmd_show },
    CommandDescriptor { name: "stats", usage: "stats [reset]", brief: "Delivery statistics", handler: cmd_stats },
    CommandDescriptor { name: "version", usage: "version", brief: "Firmware version", handler: cmd_version },
];

/// Execute a parsed command
pub fn execute(cmd: &ParsedCommand<'_>, registry: &Registry, out: &mut dyn Write) -> Result<(), ConsoleError> {
    if cmd.is_empty() {
        return Ok(()); // Empty line, do nothing
    }

    let handler = COMMANDS
        .iter()
        .find(|c| c.name == cmd.command)
        .ok_or(ConsoleError::UnknownCommand)?;

    (handler.handler)(cmd, registry, out)
}

/// Parse and execute one line, writing `E0x: ...` on failure.
pub fn run_line(line: &str, registry: &Registry, out: &mut dyn Write) -> Result<(), ConsoleError> {
    let result = execute(&parse_line(line), registry, out);
    if let Err(e) = result {
        let _ = writeln!(out, "{}", e);
    }
    result
}

/// Get all command names for completion
pub fn command_names() -> impl Iterator<Item = &'static str> {
    COMMANDS.iter().map(|c| c.name)
}

fn parse_severity(value: &str) -> Result<Severity, ConsoleError> {
    value.parse().map_err(|_| ConsoleError::InvalidValue)
}

// --- Command Implementations ---

fn cmd_help(cmd: &ParsedCommand<'_>, _registry: &Registry, out: &mut dyn Write) -> Result<(), ConsoleError> {
    if let Some(name) = cmd.arg(0) {
        let c = COMMANDS
            .iter()
            .find(|c| c.name == name)
            .ok_or(ConsoleError::UnknownCommand)?;
        let _ = writeln!(out, "{}: {}", c.usage, c.brief);
    } else {
        for c in COMMANDS {
            let _ = writeln!(out, "  {:<10} {}", c.name, c.brief);
        }
    }
    Ok(())
}

fn cmd_level(cmd: &ParsedCommand<'_>, registry: &Registry, out: &mut dyn Write) -> Result<(), ConsoleError> {
    let subsystem = cmd.arg(0).ok_or(ConsoleError::MissingArg)?;

    match cmd.arg(1) {
        None => {
            let _ = writeln!(out, "{}={}", subsystem, registry.threshold(subsystem));
        }
        Some("clear") => {
            registry.clear_severity_threshold(subsystem);
            let _ = writeln!(out, "{}={} (default)", subsystem, registry.default_threshold());
        }
        Some(value) => {
            let severity = parse_severity(value)?;
            registry.set_severity_threshold(subsystem, severity)?;
            let _ = writeln!(out, "{}={}", subsystem, severity);
        }
    }
    Ok(())
}

fn cmd_default(cmd: &ParsedCommand<'_>, registry: &Registry, out: &mut dyn Write) -> Result<(), ConsoleError> {
    if let Some(value) = cmd.arg(0) {
        registry.set_default_severity_threshold(parse_severity(value)?);
    }
    let _ = writeln!(out, "default={}", registry.default_threshold());
    Ok(())
}

fn cmd_show(_cmd: &ParsedCommand<'_>, registry: &Registry, out: &mut dyn Write) -> Result<(), ConsoleError> {
    let _ = writeln!(out, "default={}", registry.default_threshold());
    registry.for_each_threshold(|name, severity| {
        let _ = writeln!(out, "  {:<16} {}", name, severity);
    });
    Ok(())
}

fn cmd_stats(cmd: &ParsedCommand<'_>, registry: &Registry, out: &mut dyn Write) -> Result<(), ConsoleError> {
    let s = registry.stats();
    let _ = writeln!(out, "delivered:  {}", s.delivered);
    let _ = writeln!(out, "suppressed: {}", s.suppressed);
    let _ = writeln!(out, "dropped:    {}", s.dropped);
    let _ = writeln!(out, "truncated:  {}", s.truncated);
    let _ = writeln!(out, "fallback:   {}", s.fallback);

    match cmd.arg(0) {
        None => {}
        Some("reset") => {
            registry.reset_stats();
            let _ = writeln!(out, "reset");
        }
        Some(_) => return Err(ConsoleError::InvalidValue),
    }
    Ok(())
}

fn cmd_version(_cmd: &ParsedCommand<'_>, _registry: &Registry, out: &mut dyn Write) -> Result<(), ConsoleError> {
    let _ = writeln!(out, "{}", VERSION);
    Ok(())
}

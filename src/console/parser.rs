//! Console line parser
//!
//! Whitespace separated tokens, up to `MAX_ARGS` arguments after the command.
//! Everything after a `#` is a comment, so scripted configuration files can be
//! replayed line by line.

/// Arguments kept per line; extra tokens are ignored.
pub const MAX_ARGS: usize = 3;

/// Parsed console line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedCommand<'a> {
    /// The command name (first token), empty for blank lines
    pub command: &'a str,
    /// Up to `MAX_ARGS` arguments
    pub args: [Option<&'a str>; MAX_ARGS],
}

impl<'a> ParsedCommand<'a> {
    pub const fn empty() -> Self {
        Self {
            command: "",
            args: [None; MAX_ARGS],
        }
    }

    /// Get argument by index (0-based)
    pub fn arg(&self, idx: usize) -> Option<&'a str> {
        self.args.get(idx).copied().flatten()
    }

    /// Number of arguments present.
    pub fn arg_count(&self) -> usize {
        self.args.iter().take_while(|a| a.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.command.is_empty()
    }
}

/// Parse a console line into command and arguments
pub fn parse_line(line: &str) -> ParsedCommand<'_> {
    let line = match line.find('#') {
        Some(pos) => &line[..pos],
        None => line,
    };

    let mut parts = line.split_whitespace();
    let Some(command) = parts.next() else {
        return ParsedCommand::empty();
    };

    let mut args = [None; MAX_ARGS];
    for (slot, arg) in args.iter_mut().zip(parts) {
        *slot = Some(arg);
    }

    ParsedCommand { command, args }
}

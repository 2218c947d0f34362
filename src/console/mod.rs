//! Text console for runtime log configuration.
//!
//! Meant to be fed complete lines from whatever input the embedding
//! application has (UART RX, telecommand payload). Zero heap allocation.
//!
//! ```text
//! > level power warn
//! power=WARN
//! > show
//! default=INFO
//!   power          WARN
//! ```

pub mod commands;
pub mod error;
pub mod parser;

pub use commands::{command_names, execute, run_line, COMMANDS};
pub use error::ConsoleError;
pub use parser::{parse_line, ParsedCommand};

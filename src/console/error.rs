//! Console error types

use crate::error::ConfigError;

/// Console error with code and message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsoleError {
    /// E01: Unknown command
    UnknownCommand,
    /// E02: Invalid value format
    InvalidValue,
    /// E03: Missing required argument
    MissingArg,
    /// E04: Subsystem name empty or too long
    BadName,
    /// E05: Threshold table full
    TableFull,
}

impl ConsoleError {
    /// Get error code string
    pub fn code(&self) -> &'static str {
        match self {
            Self::UnknownCommand => "E01",
            Self::InvalidValue => "E02",
            Self::MissingArg => "E03",
            Self::BadName => "E04",
            Self::TableFull => "E05",
        }
    }

    /// Get error message
    pub fn message(&self) -> &'static str {
        match self {
            Self::UnknownCommand => "unknown command",
            Self::InvalidValue => "invalid value",
            Self::MissingArg => "missing argument",
            Self::BadName => "bad subsystem name",
            Self::TableFull => "threshold table full",
        }
    }
}

impl From<ConfigError> for ConsoleError {
    fn from(e: ConfigError) -> Self {
        match e {
            ConfigError::EmptyName | ConfigError::NameTooLong => Self::BadName,
            ConfigError::TableFull => Self::TableFull,
            ConfigError::AlreadyInitialized => Self::InvalidValue,
        }
    }
}

impl core::fmt::Display for ConsoleError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}: {}", self.code(), self.message())
    }
}

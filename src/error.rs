//! Error types.
//!
//! Logging itself never returns an error to the caller. These types only
//! appear on configuration calls and on the sink / transport seams, where the
//! registry turns them into counters.

use core::fmt;

/// Configuration error returned by the registry and the severity filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// Subsystem name is empty
    EmptyName,
    /// Subsystem name exceeds `MAX_SUBSYSTEM_LEN`
    NameTooLong,
    /// No free slot left in the severity filter table
    TableFull,
    /// `Registry::init` was already called
    AlreadyInitialized,
}

impl ConfigError {
    /// Get error code string
    pub fn code(&self) -> &'static str {
        match self {
            Self::EmptyName => "C01",
            Self::NameTooLong => "C02",
            Self::TableFull => "C03",
            Self::AlreadyInitialized => "C04",
        }
    }

    /// Get error message
    pub fn message(&self) -> &'static str {
        match self {
            Self::EmptyName => "empty subsystem name",
            Self::NameTooLong => "subsystem name too long",
            Self::TableFull => "threshold table full",
            Self::AlreadyInitialized => "registry already initialized",
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code(), self.message())
    }
}

/// Why a sink did not take a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SinkError {
    /// Downstream transport busy or absent; the record was dropped.
    Unavailable,
}

impl fmt::Display for SinkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unavailable => f.write_str("sink unavailable"),
        }
    }
}

/// Result of a transport send attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportError {
    /// Transport is busy right now; caller must not wait.
    WouldBlock,
    /// Transport is down (link lost, driver not started).
    Unavailable,
}

impl fmt::Display for TransportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::WouldBlock => f.write_str("transport would block"),
            Self::Unavailable => f.write_str("transport unavailable"),
        }
    }
}

impl From<TransportError> for SinkError {
    fn from(_: TransportError) -> Self {
        SinkError::Unavailable
    }
}

/// Unrecognized severity name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseSeverityError;

impl fmt::Display for ParseSeverityError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("expected one of debug, info, warn, error")
    }
}

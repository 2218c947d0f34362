//! Message severity.
//!
//! Ordered `Debug < Info < Warning < Error`. A message passes a threshold when
//! its severity is greater than or equal to it.

use core::str::FromStr;

use crate::error::ParseSeverityError;

/// Severity attached to every message.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum Severity {
    Debug = 0,
    Info = 1,
    Warning = 2,
    Error = 3,
}

impl Severity {
    /// All severities, lowest first.
    pub const ALL: [Severity; 4] = [
        Severity::Debug,
        Severity::Info,
        Severity::Warning,
        Severity::Error,
    ];

    /// Label used in formatted lines.
    pub const fn as_str(self) -> &'static str {
        match self {
            Severity::Debug => "DEBUG",
            Severity::Info => "INFO",
            Severity::Warning => "WARN",
            Severity::Error => "ERROR",
        }
    }

    /// Convert from raw u8 value. Out-of-range values saturate to `Error`.
    pub const fn from_u8(value: u8) -> Self {
        match value {
            0 => Severity::Debug,
            1 => Severity::Info,
            2 => Severity::Warning,
            _ => Severity::Error,
        }
    }

    #[inline]
    pub const fn as_u8(self) -> u8 {
        self as u8
    }
}

impl core::fmt::Display for Severity {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Severity {
    type Err = ParseSeverityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        const NAMES: [(&str, Severity); 9] = [
            ("debug", Severity::Debug),
            ("info", Severity::Info),
            ("warn", Severity::Warning),
            ("warning", Severity::Warning),
            ("error", Severity::Error),
            ("0", Severity::Debug),
            ("1", Severity::Info),
            ("2", Severity::Warning),
            ("3", Severity::Error),
        ];

        NAMES
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(s))
            .map(|&(_, severity)| severity)
            .ok_or(ParseSeverityError)
    }
}

/// Lowest severity that survives compilation, `None` when everything is
/// compiled out.
pub const STATIC_MIN_SEVERITY: Option<Severity> = if cfg!(feature = "flight") {
    None
} else if cfg!(feature = "min-error") {
    Some(Severity::Error)
} else if cfg!(feature = "min-warning") {
    Some(Severity::Warning)
} else if cfg!(feature = "min-info") {
    Some(Severity::Info)
} else {
    Some(Severity::Debug)
};

/// Whether `severity` survives the compile-time floor.
#[inline(always)]
pub const fn statically_enabled(severity: Severity) -> bool {
    match STATIC_MIN_SEVERITY {
        Some(min) => severity as u8 >= min as u8,
        None => false,
    }
}

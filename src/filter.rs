//! Per-subsystem severity thresholds.
//!
//! A fixed table of `(name, threshold)` pairs. Names are copied in, so the
//! table never borrows from callers; lookups are a linear scan with no
//! allocation. Absent names have no entry and the caller falls back to its
//! default threshold.

use crate::error::ConfigError;
use crate::line::{utf8_prefix, MAX_SUBSYSTEM_LEN};
use crate::severity::Severity;

/// Number of subsystems that can carry their own threshold.
pub const FILTER_CAPACITY: usize = 32;

#[derive(Clone, Copy)]
struct FilterEntry {
    name: [u8; MAX_SUBSYSTEM_LEN],
    name_len: u8,
    threshold: Severity,
}

impl FilterEntry {
    const EMPTY: Self = Self {
        name: [0; MAX_SUBSYSTEM_LEN],
        name_len: 0,
        threshold: Severity::Info,
    };

    #[inline]
    fn name(&self) -> &[u8] {
        &self.name[..self.name_len as usize]
    }
}

/// Fixed-capacity subsystem → threshold table.
pub struct SeverityFilter<const N: usize = FILTER_CAPACITY> {
    entries: [FilterEntry; N],
    len: usize,
}

impl<const N: usize> SeverityFilter<N> {
    pub const fn new() -> Self {
        Self {
            entries: [FilterEntry::EMPTY; N],
            len: 0,
        }
    }

    /// Set or replace the threshold for `subsystem`.
    pub fn set(&mut self, subsystem: &str, threshold: Severity) -> Result<(), ConfigError> {
        if subsystem.is_empty() {
            return Err(ConfigError::EmptyName);
        }
        if subsystem.len() > MAX_SUBSYSTEM_LEN {
            return Err(ConfigError::NameTooLong);
        }

        if let Some(entry) = self.find_mut(subsystem) {
            entry.threshold = threshold;
            return Ok(());
        }

        if self.len == N {
            return Err(ConfigError::TableFull);
        }

        let entry = &mut self.entries[self.len];
        entry.name[..subsystem.len()].copy_from_slice(subsystem.as_bytes());
        entry.name_len = subsystem.len() as u8;
        entry.threshold = threshold;
        self.len += 1;
        Ok(())
    }

    /// Threshold configured for `subsystem`, if any.
    #[inline]
    pub fn get(&self, subsystem: &str) -> Option<Severity> {
        self.entries[..self.len]
            .iter()
            .find(|e| e.name() == subsystem.as_bytes())
            .map(|e| e.threshold)
    }

    /// Remove the entry for `subsystem`. Returns `true` if one existed.
    pub fn remove(&mut self, subsystem: &str) -> bool {
        let Some(idx) = self.entries[..self.len]
            .iter()
            .position(|e| e.name() == subsystem.as_bytes())
        else {
            return false;
        };

        // Order is irrelevant; move the last entry into the hole.
        self.len -= 1;
        self.entries[idx] = self.entries[self.len];
        true
    }

    pub fn clear(&mut self) {
        self.len = 0;
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Iterate configured `(subsystem, threshold)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&str, Severity)> + '_ {
        self.entries[..self.len]
            .iter()
            .map(|e| (utf8_prefix(e.name()), e.threshold))
    }

    fn find_mut(&mut self, subsystem: &str) -> Option<&mut FilterEntry> {
        self.entries[..self.len]
            .iter_mut()
            .find(|e| e.name() == subsystem.as_bytes())
    }
}

impl<const N: usize> Default for SeverityFilter<N> {
    fn default() -> Self {
        Self::new()
    }
}

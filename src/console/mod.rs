//! Bounded console history.

pub mod logger;

use crate::model::{ConsoleEntry, ConsoleKind};
use crate::store::keys::ConsoleEntries;
use crate::store::Store;
use logger::LogBuffer;

pub const MAX_CONSOLE_ENTRIES: usize = 1000;

/// One or many console lines. Single line and a sequence of lines are appended the same way.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConsoleLines(Vec<String>);

impl From<&str> for ConsoleLines {
    fn from(line: &str) -> Self {
        Self(vec![line.to_string()])
    }
}

impl From<String> for ConsoleLines {
    fn from(line: String) -> Self {
        Self(vec![line])
    }
}

impl From<Vec<String>> for ConsoleLines {
    fn from(lines: Vec<String>) -> Self {
        Self(lines)
    }
}

impl From<Vec<&str>> for ConsoleLines {
    fn from(lines: Vec<&str>) -> Self {
        Self(lines.into_iter().map(ToString::to_string).collect())
    }
}

impl From<&[&str]> for ConsoleLines {
    fn from(lines: &[&str]) -> Self {
        Self(lines.iter().map(ToString::to_string).collect())
    }
}

impl<const N: usize> From<[&str; N]> for ConsoleLines {
    fn from(lines: [&str; N]) -> Self {
        Self(lines.iter().map(ToString::to_string).collect())
    }
}

/// Console buffer manager, keeps at most `max_entries` newest entries in the store.
#[derive(Debug, Clone, Copy)]
pub struct ConsoleBuffer {
    max_entries: usize,
}

impl Default for ConsoleBuffer {
    fn default() -> Self {
        Self {
            max_entries: MAX_CONSOLE_ENTRIES,
        }
    }
}

impl ConsoleBuffer {
    /// Create a buffer keeping `max_entries` newest entries, at most [`MAX_CONSOLE_ENTRIES`].
    pub fn new(max_entries: usize) -> Self {
        Self {
            max_entries: max_entries.min(MAX_CONSOLE_ENTRIES),
        }
    }

    pub fn max_entries(&self) -> usize {
        self.max_entries
    }

    pub fn clear(&self, store: &mut impl Store) {
        store.set::<ConsoleEntries>(vec![]);
    }

    /// Append lines tagged with `kind`, the oldest entries are evicted when the buffer
    /// grows past its limit.
    pub fn append(
        &self,
        store: &mut impl Store,
        lines: impl Into<ConsoleLines>,
        kind: impl Into<ConsoleKind>,
    ) {
        let ConsoleLines(lines) = lines.into();
        let kind = kind.into();

        let mut entries = store.get::<ConsoleEntries>();
        entries.extend(lines.into_iter().map(|value| ConsoleEntry {
            kind: kind.clone(),
            value,
        }));
        if entries.len() > self.max_entries {
            let overflow = entries.len() - self.max_entries;
            entries.drain(..overflow);
        }

        store.set::<ConsoleEntries>(entries);
    }

    /// Move all captured log records into the console as [`ConsoleKind::Internal`] entries.
    pub fn append_logs(&self, store: &mut impl Store, logs: &LogBuffer) {
        let lines: Vec<String> = logs
            .lock()
            .unwrap()
            .drain(..)
            .map(|line| line.to_string())
            .collect();
        if !lines.is_empty() {
            self.append(store, lines, ConsoleKind::Internal);
        }
    }
}

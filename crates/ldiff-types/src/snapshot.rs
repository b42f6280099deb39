use std::fmt;

use serde::Serialize;

use crate::entry::{AttributeCase, DirectoryEntry};

/// An immutable, strictly dn-ascending sequence of directory entries.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct EntrySnapshot {
    entries: Vec<DirectoryEntry>,
}

impl EntrySnapshot {
    /// An empty snapshot.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Wrap entries the caller has already sorted and deduplicated.
    ///
    /// The parser is the usual caller; it resolves repeated dns according
    /// to its duplicate-entry policy before building the snapshot.
    pub fn from_sorted(entries: Vec<DirectoryEntry>) -> Self {
        debug_assert!(
            entries.windows(2).all(|w| w[0].dn() < w[1].dn()),
            "snapshot entries must be strictly ascending by dn"
        );
        Self { entries }
    }

    pub fn entries(&self) -> &[DirectoryEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, DirectoryEntry> {
        self.entries.iter()
    }
}

impl<'a> IntoIterator for &'a EntrySnapshot {
    type Item = &'a DirectoryEntry;
    type IntoIter = std::slice::Iter<'a, DirectoryEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// Human-readable dump: each entry's dn followed by its sorted projection.
impl fmt::Display for EntrySnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for entry in &self.entries {
            writeln!(f, "dn: {}", entry.dn())?;
            for item in entry.projection(AttributeCase::Sensitive) {
                writeln!(f, "{}", item.canonical())?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

//! The structured change script produced by the differs.

use ldiff_types::{Attribute, AttributeValue, DirectoryEntry, Dn};
use serde::Serialize;

/// An ordered list of entry changes that turns a current snapshot into a
/// target snapshot.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct ChangeScript {
    /// Changes in ascending dn order.
    pub changes: Vec<EntryChange>,
}

impl ChangeScript {
    /// Create an empty change script.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` if the two snapshots were equivalent.
    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }

    /// Number of entry-level changes.
    pub fn len(&self) -> usize {
        self.changes.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, EntryChange> {
        self.changes.iter()
    }

    /// Number of add-entry blocks.
    pub fn additions(&self) -> usize {
        self.changes
            .iter()
            .filter(|c| matches!(c, EntryChange::Add { .. }))
            .count()
    }

    /// Number of delete-entry blocks.
    pub fn deletions(&self) -> usize {
        self.changes
            .iter()
            .filter(|c| matches!(c, EntryChange::Delete { .. }))
            .count()
    }

    /// Number of modify blocks.
    pub fn modifications(&self) -> usize {
        self.changes
            .iter()
            .filter(|c| matches!(c, EntryChange::Modify { .. }))
            .count()
    }

    /// Render as LDIF change records.
    pub fn to_ldif(&self) -> String {
        self.to_string()
    }
}

impl<'a> IntoIterator for &'a ChangeScript {
    type Item = &'a EntryChange;
    type IntoIter = std::slice::Iter<'a, EntryChange>;

    fn into_iter(self) -> Self::IntoIter {
        self.changes.iter()
    }
}

/// A change to a single entry.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "changetype", rename_all = "lowercase")]
pub enum EntryChange {
    /// The entry exists only in the target.
    Add { dn: Dn, attributes: Vec<Attribute> },
    /// The entry exists only in the current snapshot.
    Delete { dn: Dn },
    /// The entry exists in both with differing attribute values.
    Modify {
        dn: Dn,
        modifications: Vec<Modification>,
    },
}

impl EntryChange {
    /// An add-entry change carrying every stored attribute of `entry`.
    pub fn add_entry(entry: &DirectoryEntry) -> Self {
        EntryChange::Add {
            dn: entry.dn().clone(),
            attributes: entry.attributes().to_vec(),
        }
    }

    pub fn delete_entry(entry: &DirectoryEntry) -> Self {
        EntryChange::Delete {
            dn: entry.dn().clone(),
        }
    }

    pub fn dn(&self) -> &Dn {
        match self {
            EntryChange::Add { dn, .. }
            | EntryChange::Delete { dn }
            | EntryChange::Modify { dn, .. } => dn,
        }
    }
}

/// Whether a single value is added to or removed from an attribute.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ModOp {
    Add,
    Delete,
}

impl ModOp {
    /// The LDIF keyword for this operation.
    pub fn keyword(self) -> &'static str {
        match self {
            ModOp::Add => "add",
            ModOp::Delete => "delete",
        }
    }
}

/// One attribute-value directive inside a modify block.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Modification {
    pub op: ModOp,
    pub attribute: String,
    pub value: String,
}

impl Modification {
    pub(crate) fn from_projection(op: ModOp, item: &AttributeValue<'_>) -> Self {
        Self {
            op,
            attribute: item.name.to_string(),
            value: item.value.to_string(),
        }
    }
}

//! A single directory entry and its comparison projection.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::dn::Dn;

/// How attribute names are compared when projecting an entry.
///
/// Directory servers treat attribute names case-insensitively, but the
/// projection compares them byte-wise unless `Insensitive` is requested.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttributeCase {
    #[default]
    Sensitive,
    Insensitive,
}

/// One named attribute with its values in source order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attribute {
    pub name: String,
    pub values: Vec<String>,
}

/// A directory entry: a distinguished name plus multi-valued attributes.
///
/// Attributes keep the order in which they were first seen, and values keep
/// the order in which they were appended. Comparison never relies on that
/// order; see [`DirectoryEntry::projection`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectoryEntry {
    dn: Dn,
    attributes: Vec<Attribute>,
}

impl DirectoryEntry {
    /// Create an entry with no attributes.
    pub fn new(dn: Dn) -> Self {
        Self {
            dn,
            attributes: Vec::new(),
        }
    }

    /// Builder-style variant of [`push_value`](Self::push_value).
    pub fn with_value(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.push_value(name, value);
        self
    }

    pub fn dn(&self) -> &Dn {
        &self.dn
    }

    pub fn attributes(&self) -> &[Attribute] {
        &self.attributes
    }

    /// Append a value to the named attribute, creating it on first use.
    pub fn push_value(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.attributes.iter_mut().find(|a| a.name == name) {
            Some(attr) => attr.values.push(value),
            None => self.attributes.push(Attribute {
                name,
                values: vec![value],
            }),
        }
    }

    /// Fold another entry's attributes into this one, in the other entry's
    /// source order. The other entry's dn is ignored.
    pub fn absorb(&mut self, other: DirectoryEntry) {
        for attr in other.attributes {
            for value in attr.values {
                self.push_value(attr.name.clone(), value);
            }
        }
    }

    /// Every `(name, value)` pair in storage order.
    pub fn pairs(&self) -> impl Iterator<Item = (&str, &str)> {
        self.attributes.iter().flat_map(|a| {
            a.values
                .iter()
                .map(move |v| (a.name.as_str(), v.as_str()))
        })
    }

    /// Total number of attribute values.
    pub fn value_count(&self) -> usize {
        self.attributes.iter().map(|a| a.values.len()).sum()
    }

    /// The sorted comparison projection: one [`AttributeValue`] per value
    /// instance, ordered by [`AttributeValue::projection_cmp`].
    pub fn projection(&self, case: AttributeCase) -> Vec<AttributeValue<'_>> {
        let mut items: Vec<_> = self
            .pairs()
            .map(|(name, value)| AttributeValue::new(name, value, case))
            .collect();
        items.sort_by(AttributeValue::projection_cmp);
        items
    }

    /// Snapshot ordering: byte-wise by distinguished name.
    pub fn dn_cmp(a: &DirectoryEntry, b: &DirectoryEntry) -> Ordering {
        a.dn.cmp(&b.dn)
    }
}

/// One attribute value as seen by the differ.
///
/// `canonical` is the `"name: value"` string the merge-join compares; `name`
/// and `value` borrow the entry's stored text for rendering.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AttributeValue<'a> {
    canonical: String,
    pub name: &'a str,
    pub value: &'a str,
}

impl<'a> AttributeValue<'a> {
    pub fn new(name: &'a str, value: &'a str, case: AttributeCase) -> Self {
        let canonical = match case {
            AttributeCase::Sensitive => format!("{name}: {value}"),
            AttributeCase::Insensitive => format!("{}: {value}", name.to_ascii_lowercase()),
        };
        Self {
            canonical,
            name,
            value,
        }
    }

    pub fn canonical(&self) -> &str {
        &self.canonical
    }

    /// Projection ordering: lexicographic over the whole canonical string,
    /// which groups values by attribute name.
    pub fn canonical_cmp(a: &AttributeValue<'_>, b: &AttributeValue<'_>) -> Ordering {
        a.canonical.cmp(&b.canonical)
    }

    /// [`canonical_cmp`](Self::canonical_cmp), then the name as written.
    ///
    /// Only differs when names are folded: `CN: x` and `cn: x` share a
    /// canonical string but must still sort the same way regardless of
    /// input order.
    pub fn projection_cmp(a: &AttributeValue<'_>, b: &AttributeValue<'_>) -> Ordering {
        Self::canonical_cmp(a, b).then_with(|| a.name.cmp(b.name))
    }
}

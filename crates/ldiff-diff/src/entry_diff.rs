//! Entry-level diff: compare the attribute values of two entries that share
//! a dn.
//!
//! Both entries are projected into sorted `"name: value"` strings and walked
//! once with two cursors. Values only in the current entry become `delete`
//! directives, values only in the target become `add` directives.

use std::cmp::Ordering;

use ldiff_types::{AttributeValue, DirectoryEntry};

use crate::change::{EntryChange, ModOp, Modification};
use crate::options::DiffOptions;

/// Compare two entries with the same dn.
///
/// Returns `None` when their attribute values are equal, so callers never
/// emit an empty modify block.
pub fn diff_entry(
    target: &DirectoryEntry,
    current: &DirectoryEntry,
    options: &DiffOptions,
) -> Option<EntryChange> {
    debug_assert_eq!(target.dn(), current.dn());

    let target_values = target.projection(options.attribute_case);
    let current_values = current.projection(options.attribute_case);
    let modifications = merge_projections(&target_values, &current_values);

    if modifications.is_empty() {
        return None;
    }
    Some(EntryChange::Modify {
        dn: target.dn().clone(),
        modifications,
    })
}

fn merge_projections(
    target: &[AttributeValue<'_>],
    current: &[AttributeValue<'_>],
) -> Vec<Modification> {
    let mut modifications = Vec::new();
    let (mut t, mut c) = (0, 0);

    loop {
        // Ordering of current relative to target; an exhausted side loses.
        let order = match (target.get(t), current.get(c)) {
            (Some(tv), Some(cv)) => AttributeValue::canonical_cmp(cv, tv),
            (Some(_), None) => Ordering::Greater,
            (None, Some(_)) => Ordering::Less,
            (None, None) => break,
        };

        match order {
            Ordering::Less => {
                modifications.push(Modification::from_projection(ModOp::Delete, &current[c]));
                c += 1;
            }
            Ordering::Greater => {
                modifications.push(Modification::from_projection(ModOp::Add, &target[t]));
                t += 1;
            }
            Ordering::Equal => {
                t += 1;
                c += 1;
            }
        }
    }

    modifications
}

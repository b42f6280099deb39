//! Tree-level diff: compare two snapshots entry by entry.
//!
//! Both snapshots are already sorted by dn, so a single forward merge-join
//! finds added, deleted and shared entries in linear time. Shared entries are
//! handed to [`diff_entry`].

use std::cmp::Ordering;

use ldiff_parser::{parse_snapshot_with, ParseOptions};
use ldiff_types::{DirectoryEntry, EntrySnapshot};
use tracing::debug;

use crate::change::{ChangeScript, EntryChange};
use crate::entry_diff::diff_entry;
use crate::error::{DiffError, DiffResult, Side};
use crate::options::DiffOptions;

/// Where the two cursors stand.
enum MergeState<'a> {
    CompareBoth(&'a DirectoryEntry, &'a DirectoryEntry),
    DrainTarget,
    DrainCurrent,
    Done,
}

impl<'a> MergeState<'a> {
    fn at(target: Option<&'a DirectoryEntry>, current: Option<&'a DirectoryEntry>) -> Self {
        match (target, current) {
            (Some(t), Some(c)) => MergeState::CompareBoth(t, c),
            (Some(_), None) => MergeState::DrainTarget,
            (None, Some(_)) => MergeState::DrainCurrent,
            (None, None) => MergeState::Done,
        }
    }
}

/// Compute the change script turning `current` into `target` with default
/// options.
pub fn diff_snapshots(target: &EntrySnapshot, current: &EntrySnapshot) -> ChangeScript {
    diff_snapshots_with(target, current, &DiffOptions::default())
}

/// Compute the change script turning `current` into `target`.
///
/// Blocks come out in ascending dn order: a delete for every dn only in
/// `current`, an add for every dn only in `target`, and a modify for every
/// shared dn whose values differ.
pub fn diff_snapshots_with(
    target: &EntrySnapshot,
    current: &EntrySnapshot,
    options: &DiffOptions,
) -> ChangeScript {
    let targets = target.entries();
    let currents = current.entries();
    let (mut t, mut c) = (0, 0);
    let mut changes = Vec::new();

    loop {
        match MergeState::at(targets.get(t), currents.get(c)) {
            MergeState::CompareBoth(tgt, cur) => match DirectoryEntry::dn_cmp(cur, tgt) {
                Ordering::Less => {
                    changes.push(EntryChange::delete_entry(cur));
                    c += 1;
                }
                Ordering::Greater => {
                    changes.push(EntryChange::add_entry(tgt));
                    t += 1;
                }
                Ordering::Equal => {
                    changes.extend(diff_entry(tgt, cur, options));
                    t += 1;
                    c += 1;
                }
            },
            MergeState::DrainTarget => {
                changes.extend(targets[t..].iter().map(EntryChange::add_entry));
                t = targets.len();
            }
            MergeState::DrainCurrent => {
                changes.extend(currents[c..].iter().map(EntryChange::delete_entry));
                c = currents.len();
            }
            MergeState::Done => break,
        }
    }

    let script = ChangeScript { changes };
    debug!(
        target_entries = targets.len(),
        current_entries = currents.len(),
        added = script.additions(),
        deleted = script.deletions(),
        modified = script.modifications(),
        "snapshots compared"
    );
    script
}

/// Parse both texts and diff them.
///
/// A parse failure on either side aborts before any comparison happens.
pub fn compare_ldif(
    target: &str,
    current: &str,
    parse_options: &ParseOptions,
    diff_options: &DiffOptions,
) -> DiffResult<ChangeScript> {
    let target = parse_snapshot_with(target, parse_options).map_err(|source| DiffError::Parse {
        side: Side::Target,
        source,
    })?;
    let current = parse_snapshot_with(current, parse_options).map_err(|source| DiffError::Parse {
        side: Side::Current,
        source,
    })?;
    Ok(diff_snapshots_with(&target, &current, diff_options))
}

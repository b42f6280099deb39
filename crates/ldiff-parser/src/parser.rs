//! Snapshot parser.
//!
//! Input is a simplified LDIF: one `name: value` pair per line, entries
//! separated by blank lines, `#` comments. No line folding, no base64 or
//! URL values.

use ldiff_types::{DirectoryEntry, Dn, EntrySnapshot};
use tracing::{debug, warn};

use crate::error::{ParseError, ParseResult};
use crate::options::{DuplicateEntryPolicy, MissingDnPolicy, ParseOptions};

/// Attribute name that carries the entry's distinguished name.
const DN_ATTRIBUTE: &str = "dn";

/// Parse a snapshot with the default (strict) options.
///
/// # Examples
///
/// ```
/// use ldiff_parser::parse_snapshot;
///
/// let snap = parse_snapshot("dn: b\ncn: B\n\ndn: a\ncn: A\n").unwrap();
/// assert_eq!(snap.entries()[0].dn().as_str(), "a");
/// assert!(parse_snapshot("foo\n").is_err());
/// ```
pub fn parse_snapshot(text: &str) -> ParseResult<EntrySnapshot> {
    parse_snapshot_with(text, &ParseOptions::default())
}

/// Parse a snapshot, returning entries sorted ascending by dn.
pub fn parse_snapshot_with(text: &str, options: &ParseOptions) -> ParseResult<EntrySnapshot> {
    let mut entries = Vec::new();
    let mut open: Option<EntryBuilder> = None;

    for (idx, raw) in text.lines().enumerate() {
        let line_no = idx + 1;
        let line = raw.trim();

        if line.starts_with('#') {
            continue;
        }

        if line.is_empty() {
            if let Some(builder) = open.take() {
                close_entry(builder, options.missing_dn, &mut entries)?;
            }
            continue;
        }

        let (name, value) = split_line(line, line_no)?;
        open.get_or_insert_with(|| EntryBuilder::new(line_no))
            .accept(name, value, line_no)?;
    }

    if let Some(builder) = open.take() {
        close_entry(builder, options.missing_dn, &mut entries)?;
    }

    entries.sort_by(DirectoryEntry::dn_cmp);
    let entries = resolve_duplicates(entries, options.duplicate_entry)?;

    debug!(entries = entries.len(), "snapshot parsed");
    Ok(EntrySnapshot::from_sorted(entries))
}

/// Split `name: value` on its only colon, trimming both sides.
fn split_line(line: &str, line_no: usize) -> ParseResult<(&str, &str)> {
    match line.split_once(':') {
        Some((name, value)) if !value.contains(':') => Ok((name.trim(), value.trim())),
        _ => Err(ParseError::MalformedLine {
            line: line_no,
            content: line.to_string(),
        }),
    }
}

/// The entry currently being accumulated between blank lines.
struct EntryBuilder {
    start_line: usize,
    dn: Option<Dn>,
    pairs: Vec<(String, String)>,
}

impl EntryBuilder {
    fn new(start_line: usize) -> Self {
        Self {
            start_line,
            dn: None,
            pairs: Vec::new(),
        }
    }

    fn accept(&mut self, name: &str, value: &str, line_no: usize) -> ParseResult<()> {
        if name != DN_ATTRIBUTE {
            self.pairs.push((name.to_string(), value.to_string()));
            return Ok(());
        }

        if let Some(existing) = &self.dn {
            return Err(ParseError::DuplicateDn {
                line: line_no,
                existing: existing.to_string(),
                found: value.to_string(),
            });
        }
        // An empty `dn:` value leaves the entry without a dn.
        self.dn = Dn::new(value).ok();
        Ok(())
    }

    fn finish(self) -> Option<DirectoryEntry> {
        let dn = self.dn?;
        let mut entry = DirectoryEntry::new(dn);
        for (name, value) in self.pairs {
            entry.push_value(name, value);
        }
        Some(entry)
    }
}

fn close_entry(
    builder: EntryBuilder,
    policy: MissingDnPolicy,
    entries: &mut Vec<DirectoryEntry>,
) -> ParseResult<()> {
    let start_line = builder.start_line;
    match (builder.finish(), policy) {
        (Some(entry), _) => {
            entries.push(entry);
            Ok(())
        }
        (None, MissingDnPolicy::Reject) => Err(ParseError::MissingDn { line: start_line }),
        (None, MissingDnPolicy::Skip) => {
            warn!(line = start_line, "skipping entry without dn");
            Ok(())
        }
    }
}

/// Collapse adjacent equal dns of an already-sorted list.
fn resolve_duplicates(
    entries: Vec<DirectoryEntry>,
    policy: DuplicateEntryPolicy,
) -> ParseResult<Vec<DirectoryEntry>> {
    let mut out: Vec<DirectoryEntry> = Vec::with_capacity(entries.len());
    for entry in entries {
        match out.last_mut() {
            Some(prev) if prev.dn() == entry.dn() => match policy {
                DuplicateEntryPolicy::Reject => {
                    return Err(ParseError::DuplicateEntry {
                        dn: entry.dn().to_string(),
                    });
                }
                DuplicateEntryPolicy::Merge => {
                    debug!(dn = %entry.dn(), "merging duplicate entry");
                    prev.absorb(entry);
                }
            },
            _ => out.push(entry),
        }
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn dns(snap: &EntrySnapshot) -> Vec<&str> {
        snap.iter().map(|e| e.dn().as_str()).collect()
    }

    #[test]
    fn empty_input_is_empty_snapshot() {
        assert!(parse_snapshot("").unwrap().is_empty());
        assert!(parse_snapshot("\n\n   \n").unwrap().is_empty());
    }

    #[test]
    fn single_entry_without_trailing_blank() {
        let snap = parse_snapshot("dn: b\nobjectClass: top").unwrap();
        assert_eq!(dns(&snap), vec!["b"]);
        let pairs: Vec<_> = snap.entries()[0].pairs().collect();
        assert_eq!(pairs, vec![("objectClass", "top")]);
    }

    #[test]
    fn entries_are_sorted_by_dn() {
        let text = "dn: c\ncn: C\n\ndn: a\ncn: A\n\ndn: b\ncn: B\n";
        assert_eq!(dns(&parse_snapshot(text).unwrap()), vec!["a", "b", "c"]);
    }

    #[test]
    fn comments_and_whitespace_are_ignored() {
        let text = "# header\n  dn:  cn=x  \n# inline comment\n\tcn :  x \n\n";
        let snap = parse_snapshot(text).unwrap();
        let entry = &snap.entries()[0];
        assert_eq!(entry.dn().as_str(), "cn=x");
        assert_eq!(entry.pairs().collect::<Vec<_>>(), vec![("cn", "x")]);
    }

    #[test]
    fn comment_does_not_close_entry() {
        let snap = parse_snapshot("dn: a\n# note\ncn: A\n").unwrap();
        assert_eq!(snap.entries()[0].value_count(), 1);
    }

    #[test]
    fn multi_valued_attributes_keep_source_order() {
        let snap = parse_snapshot("dn: a\nobjectClass: top\ncn: A\nobjectClass: person\n").unwrap();
        let attr = &snap.entries()[0].attributes()[0];
        assert_eq!(attr.name, "objectClass");
        assert_eq!(attr.values, vec!["top", "person"]);
    }

    #[test]
    fn crlf_line_endings() {
        let snap = parse_snapshot("dn: a\r\ncn: A\r\n\r\ndn: b\r\n").unwrap();
        assert_eq!(dns(&snap), vec!["a", "b"]);
    }

    #[test]
    fn line_without_colon_is_malformed() {
        let err = parse_snapshot("dn: a\nfoo\n").unwrap_err();
        assert_eq!(
            err,
            ParseError::MalformedLine {
                line: 2,
                content: "foo".into()
            }
        );
    }

    #[test]
    fn line_with_two_colons_is_malformed() {
        let err = parse_snapshot("dn: a\nlabeledURI: ldap://host\n").unwrap_err();
        assert!(matches!(err, ParseError::MalformedLine { line: 2, .. }));
    }

    #[test]
    fn second_dn_in_one_entry_is_rejected() {
        let err = parse_snapshot("dn: a\ncn: A\ndn: b\n").unwrap_err();
        assert_eq!(
            err,
            ParseError::DuplicateDn {
                line: 3,
                existing: "a".into(),
                found: "b".into()
            }
        );
    }

    #[test]
    fn empty_dn_value_counts_as_missing() {
        let err = parse_snapshot("dn:\ncn: A\n").unwrap_err();
        assert_eq!(err, ParseError::MissingDn { line: 1 });
    }

    #[test]
    fn trailing_entry_without_dn_is_rejected() {
        let err = parse_snapshot("dn: a\n\ncn: orphan\n").unwrap_err();
        assert_eq!(err, ParseError::MissingDn { line: 3 });
    }

    #[test]
    fn mid_stream_entry_without_dn_is_rejected_by_default() {
        let err = parse_snapshot("cn: orphan\n\ndn: a\n").unwrap_err();
        assert_eq!(err, ParseError::MissingDn { line: 1 });
    }

    #[test]
    fn skip_policy_drops_dnless_entries_everywhere() {
        let opts = ParseOptions {
            missing_dn: MissingDnPolicy::Skip,
            ..Default::default()
        };
        let snap = parse_snapshot_with("cn: x\n\ndn: a\n\ncn: y\n", &opts).unwrap();
        assert_eq!(dns(&snap), vec!["a"]);
    }

    #[test]
    fn duplicate_blocks_are_rejected_by_default() {
        let err = parse_snapshot("dn: a\ncn: 1\n\ndn: b\n\ndn: a\ncn: 2\n").unwrap_err();
        assert_eq!(err, ParseError::DuplicateEntry { dn: "a".into() });
    }

    #[test]
    fn merge_policy_folds_duplicate_blocks() {
        let opts = ParseOptions {
            duplicate_entry: DuplicateEntryPolicy::Merge,
            ..Default::default()
        };
        let snap = parse_snapshot_with("dn: a\ncn: 1\n\ndn: b\n\ndn: a\ncn: 2\nsn: s\n", &opts).unwrap();
        assert_eq!(dns(&snap), vec!["a", "b"]);
        let pairs: Vec<_> = snap.entries()[0].pairs().collect();
        assert_eq!(pairs, vec![("cn", "1"), ("cn", "2"), ("sn", "s")]);
    }

    #[test]
    fn lenient_options() {
        let snap = parse_snapshot_with("cn: x\n\ndn: a\n\ndn: a\n", &ParseOptions::lenient()).unwrap();
        assert_eq!(dns(&snap), vec!["a"]);
    }

    proptest! {
        #[test]
        fn attribute_line_order_does_not_change_projection(
            values in proptest::collection::vec(("[a-c]{1,2}", "[a-z0-9 ]{0,4}"), 0..8),
        ) {
            let forward: String = values.iter().map(|(n, v)| format!("{n}: {v}\n")).collect();
            let backward: String = values.iter().rev().map(|(n, v)| format!("{n}: {v}\n")).collect();

            let a = parse_snapshot(&format!("dn: x\n{forward}")).unwrap();
            let b = parse_snapshot(&format!("dn: x\n{backward}")).unwrap();

            let pa: Vec<_> = a.entries()[0].projection(Default::default()).iter().map(|v| v.canonical().to_string()).collect();
            let pb: Vec<_> = b.entries()[0].projection(Default::default()).iter().map(|v| v.canonical().to_string()).collect();
            prop_assert_eq!(pa, pb);
        }
    }
}

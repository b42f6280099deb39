//! Snapshot parser for ldiff.
//!
//! Turns one text snapshot of a directory tree into an
//! [`EntrySnapshot`](ldiff_types::EntrySnapshot) sorted by dn. Any malformed
//! input aborts the whole parse; no partial snapshot is ever returned.
//!
//! # Key Types
//!
//! - [`parse_snapshot`] / [`parse_snapshot_with`] -- Text to sorted snapshot
//! - [`ParseOptions`] -- Policies for dn-less blocks and repeated dns
//! - [`ParseError`] -- Malformed line, duplicate dn, missing dn, duplicate entry

pub mod error;
pub mod options;
pub mod parser;

pub use error::{ParseError, ParseResult};
pub use options::{DuplicateEntryPolicy, MissingDnPolicy, ParseOptions};
pub use parser::{parse_snapshot, parse_snapshot_with};

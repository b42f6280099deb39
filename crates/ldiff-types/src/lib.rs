//! Record model for ldiff.
//!
//! Directory snapshots are parsed into these types and then compared by
//! `ldiff-diff`. Nothing here performs I/O.
//!
//! # Key Types
//!
//! - [`Dn`] — non-empty distinguished name, ordered byte-wise
//! - [`DirectoryEntry`] — dn plus multi-valued attributes in source order
//! - [`AttributeValue`] — one `"name: value"` item of an entry's sorted projection
//! - [`EntrySnapshot`] — entries strictly ascending by dn

pub mod dn;
pub mod entry;
pub mod error;
pub mod snapshot;

pub use dn::Dn;
pub use entry::{Attribute, AttributeCase, AttributeValue, DirectoryEntry};
pub use error::TypeError;
pub use snapshot::EntrySnapshot;

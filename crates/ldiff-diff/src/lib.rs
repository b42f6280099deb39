//! Diff engine for ldiff.
//!
//! Compares a target snapshot against a current snapshot and produces the
//! LDIF change script that moves a directory server from one to the other.
//!
//! # Key Types
//!
//! - [`diff_snapshots`] / [`ChangeScript`] -- Tree-level diff (add/delete/modify entries)
//! - [`diff_entry`] / [`Modification`] -- Attribute-value diff of one shared entry
//! - [`compare_ldif`] -- Parse two texts and diff them in one call
//!
//! # Quick Start
//!
//! ```rust
//! use ldiff_diff::{compare_ldif, DiffOptions};
//! use ldiff_parser::ParseOptions;
//!
//! let script = compare_ldif(
//!     "dn: b\nobjectClass: top\n\n",
//!     "",
//!     &ParseOptions::default(),
//!     &DiffOptions::default(),
//! )
//! .unwrap();
//! assert_eq!(script.to_ldif(), "dn: b\nchangetype: add\nobjectClass: top\n\n");
//! ```

pub mod change;
pub mod entry_diff;
pub mod error;
pub mod options;
pub mod render;
pub mod tree_diff;

pub use change::{ChangeScript, EntryChange, ModOp, Modification};
pub use entry_diff::diff_entry;
pub use error::{DiffError, DiffResult, Side};
pub use options::DiffOptions;
pub use tree_diff::{compare_ldif, diff_snapshots, diff_snapshots_with};

//! Error types for the diff crate.

use std::fmt;

use ldiff_parser::ParseError;

/// Which of the two inputs a failure belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Side {
    Target,
    Current,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Target => f.write_str("target"),
            Side::Current => f.write_str("current"),
        }
    }
}

/// Errors that can occur while loading snapshots for a diff.
///
/// Comparing two already-parsed snapshots cannot fail.
#[derive(Debug, thiserror::Error)]
pub enum DiffError {
    /// One of the input texts failed to parse.
    #[error("{side} snapshot: {source}")]
    Parse {
        side: Side,
        #[source]
        source: ParseError,
    },
}

impl DiffError {
    /// The underlying parse error.
    pub fn parse_error(&self) -> &ParseError {
        match self {
            DiffError::Parse { source, .. } => source,
        }
    }
}

/// Convenience alias for diff results.
pub type DiffResult<T> = Result<T, DiffError>;

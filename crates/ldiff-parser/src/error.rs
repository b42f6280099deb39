//! Error types for the parser crate.

/// Errors that abort parsing of a snapshot.
///
/// Line numbers are 1-based and refer to the raw input text.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    /// A non-blank, non-comment line is not of the form `name: value`
    /// with exactly one colon.
    #[error("line {line}: malformed line: {content:?}")]
    MalformedLine { line: usize, content: String },

    /// A second `dn` line appeared inside an entry that already has one.
    #[error("line {line}: entry already has dn {existing:?}, found second dn {found:?}")]
    DuplicateDn {
        line: usize,
        existing: String,
        found: String,
    },

    /// An entry was closed without ever receiving a dn.
    #[error("line {line}: entry has no dn")]
    MissingDn { line: usize },

    /// Two separate entry blocks share the same dn.
    #[error("duplicate entry for dn {dn:?}")]
    DuplicateEntry { dn: String },
}

/// Convenience alias for parser results.
pub type ParseResult<T> = Result<T, ParseError>;

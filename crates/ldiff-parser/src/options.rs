use serde::{Deserialize, Serialize};

/// What to do with an entry block that never received a `dn` line.
///
/// The same policy applies whether the block is closed by a blank line or
/// by the end of input.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MissingDnPolicy {
    /// Fail with [`ParseError::MissingDn`](crate::ParseError::MissingDn).
    #[default]
    Reject,
    /// Drop the block and log a warning.
    Skip,
}

/// What to do when two separate blocks carry the same dn.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DuplicateEntryPolicy {
    /// Fail with [`ParseError::DuplicateEntry`](crate::ParseError::DuplicateEntry).
    #[default]
    Reject,
    /// Append the later block's values to the earlier entry.
    Merge,
}

/// Parser configuration.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParseOptions {
    pub missing_dn: MissingDnPolicy,
    pub duplicate_entry: DuplicateEntryPolicy,
}

impl ParseOptions {
    /// The most forgiving configuration: skip dn-less blocks, merge
    /// duplicate dns.
    pub fn lenient() -> Self {
        Self {
            missing_dn: MissingDnPolicy::Skip,
            duplicate_entry: DuplicateEntryPolicy::Merge,
        }
    }
}

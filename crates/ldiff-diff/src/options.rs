use ldiff_types::AttributeCase;
use serde::{Deserialize, Serialize};

/// Differ configuration.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiffOptions {
    /// How attribute names are compared. Values are always compared
    /// byte-wise.
    pub attribute_case: AttributeCase,
}

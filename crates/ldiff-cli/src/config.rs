use std::path::{Path, PathBuf};

use ldiff_diff::DiffOptions;
use ldiff_parser::ParseOptions;
use serde::{Deserialize, Serialize};

use crate::cli::PolicyArgs;

/// Contents of an `ldiff.toml` file. Every field is optional.
///
/// ```toml
/// [parser]
/// missing_dn = "skip"
/// duplicate_entry = "merge"
///
/// [diff]
/// attribute_case = "insensitive"
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LdiffConfig {
    pub parser: ParseOptions,
    pub diff: DiffOptions,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("cannot read config file {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid config file {path}: {source}")]
    Toml {
        path: PathBuf,
        source: toml::de::Error,
    },
}

impl LdiffConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&text).map_err(|source| ConfigError::Toml {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Apply command-line overrides on top of the file settings.
    pub fn with_overrides(mut self, args: &PolicyArgs) -> Self {
        if let Some(case) = args.attribute_case {
            self.diff.attribute_case = case.into();
        }
        if let Some(policy) = args.missing_dn {
            self.parser.missing_dn = policy.into();
        }
        if let Some(policy) = args.duplicate_entry {
            self.parser.duplicate_entry = policy.into();
        }
        self
    }
}

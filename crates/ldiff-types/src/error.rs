use thiserror::Error;

/// Errors produced by record-model operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeError {
    #[error("distinguished name must not be empty")]
    EmptyDn,
}

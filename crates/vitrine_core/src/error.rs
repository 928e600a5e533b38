//! Error types shared across Vitrine crates

use thiserror::Error;

/// Result alias using the Vitrine [`Error`]
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised by Vitrine libraries.
///
/// Missing elements are never errors: operations on absent elements are
/// silently skipped. Only capability gaps and malformed input surface here.
#[derive(Debug, Error)]
pub enum Error {
    /// The host surface lacks a primitive a feature depends on
    #[error("missing capability: {0}")]
    MissingCapability(&'static str),

    /// An attribute could not be interpreted
    #[error("invalid value {value:?} for attribute `{name}`")]
    InvalidAttribute { name: String, value: String },

    /// A page description, session script or settings file is malformed
    #[error("invalid configuration: {0}")]
    Config(String),
}

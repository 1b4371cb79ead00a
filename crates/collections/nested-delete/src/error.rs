//! Error types for delete operations and options parsing.

use thiserror::Error;

use crate::classify::ContainerKind;

/// Error returned when a delete cannot be attempted at all.
///
/// A missing key is not an error; it is reported as `Ok(false)`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DeleteError {
    /// The value a delete was aimed at is not a container.
    #[error("cannot delete property of a non-object ({found})")]
    NotAnObject { found: &'static str },

    /// A class override assigned a kind the container's storage cannot serve.
    #[error("cannot delete from a {found} classified as a {kind}")]
    KindMismatch {
        kind: ContainerKind,
        found: &'static str,
    },

    /// The key chain had no keys.
    #[error("key chain must contain at least one key")]
    EmptyKeyChain,
}

impl DeleteError {
    /// Whether this is the type error raised for non-container targets.
    pub const fn is_type_error(&self) -> bool {
        matches!(self, Self::NotAnObject { .. } | Self::KindMismatch { .. })
    }
}

/// Error returned when options text cannot be parsed.
#[derive(Error, Debug)]
pub enum OptionsError {
    #[error("invalid JSON options at `{path}`: {source}")]
    Json {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid TOML options at `{path}`: {source}")]
    Toml {
        path: String,
        #[source]
        source: toml::de::Error,
    },
}

impl OptionsError {
    /// Path of the offending field, `.` for the document root.
    pub fn path(&self) -> &str {
        match self {
            Self::Json { path, .. } | Self::Toml { path, .. } => path,
        }
    }
}

//! Error types for the platform crate.

use apicat_types::TypeError;

/// Errors that can occur while parsing platform facts.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum PlatformError {
    /// The platform specification has no platform name.
    #[error("invalid platform {0:?}: missing platform name")]
    MissingName(String),

    /// The version suffix of a platform specification is malformed.
    #[error("invalid platform version: {0}")]
    Version(#[from] TypeError),
}

/// Convenience alias for platform results.
pub type PlatformResult<T> = Result<T, PlatformError>;

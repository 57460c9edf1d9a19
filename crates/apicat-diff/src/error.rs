//! Error types for the diff crate.

/// Errors that can occur while setting up or rendering a diff.
#[derive(Debug, thiserror::Error)]
pub enum DiffError {
    /// A resolver was requested for a framework the catalog does not have.
    #[error("unknown framework: {0}")]
    UnknownFramework(String),

    /// A resolver was requested for a package the catalog does not have.
    #[error("unknown package: {0}")]
    UnknownPackage(String),

    /// Diff options could not be parsed.
    #[error("invalid diff configuration: {0}")]
    Config(String),

    /// Reading configuration or writing output failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience alias for diff results.
pub type DiffResult<T> = Result<T, DiffError>;

//! Error types for the catalog.

use apicat_types::{ApiId, TypeError};

/// Errors that can occur while building, loading, or querying a catalog.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// A referenced API was not found in the catalog.
    #[error("API not found: {0:?}")]
    ApiNotFound(ApiId),

    /// Attempted to add an API with an id that already exists.
    #[error("duplicate API: {0:?}")]
    DuplicateApi(ApiId),

    /// An API names a parent that does not exist.
    #[error("dangling parent reference: API {api:?} references missing parent {parent:?}")]
    DanglingParent {
        /// The API containing the bad reference.
        api: ApiId,
        /// The missing parent.
        parent: ApiId,
    },

    /// An assembly referenced by name or id is not in the catalog.
    #[error("unknown assembly: {0}")]
    UnknownAssembly(String),

    /// A framework referenced by name is not in the catalog.
    #[error("unknown framework: {0}")]
    UnknownFramework(String),

    /// A package referenced by name is not in the catalog.
    #[error("unknown package: {0}")]
    UnknownPackage(String),

    /// Two assemblies, frameworks, or packages share a name.
    #[error("duplicate {kind} name: {name}")]
    DuplicateName { kind: &'static str, name: String },

    /// Serialization or deserialization error.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// Reading a catalog file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A value in the catalog could not be parsed.
    #[error(transparent)]
    Type(#[from] TypeError),
}

/// Convenience alias for catalog results.
pub type CatalogResult<T> = Result<T, CatalogError>;

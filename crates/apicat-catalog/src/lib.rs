//! In-memory API catalog for apicat.
//!
//! Holds the hierarchical API tree (namespaces, types, members), the
//! declarations each assembly contributes, and the frameworks and packages
//! that ship those assemblies. The catalog is immutable once built and is
//! shared read-only by every diff and availability query.
//!
//! # Key Types
//!
//! - [`Catalog`] / [`CatalogBuilder`] -- The API tree and its contexts
//! - [`CatalogDocument`] -- JSON interchange form of a catalog
//! - [`AvailabilityContext`] / [`Availability`] -- Which declaration applies in a framework or package
//! - [`PlatformContext`] -- Effective platform annotation of an API in a framework

pub mod availability;
pub mod builder;
pub mod catalog;
pub mod document;
pub mod error;
pub mod model;
pub mod platform_context;

pub use availability::{Availability, AvailabilityContext};
pub use builder::CatalogBuilder;
pub use catalog::Catalog;
pub use document::CatalogDocument;
pub use error::{CatalogError, CatalogResult};
pub use model::{ApiNode, Assembly, AssemblyId, Declaration, DeclarationId, Framework, Package, PackageAsset};
pub use platform_context::PlatformContext;

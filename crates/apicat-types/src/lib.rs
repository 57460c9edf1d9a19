//! Foundation types for apicat.
//!
//! This crate provides the identity, markup, and version types shared by
//! the catalog model, the platform support model, and the diff engine.
//!
//! # Key Types
//!
//! - [`ApiId`]: Stable identity of an API across catalog versions
//! - [`ApiKind`]: Namespace, type, or member classification
//! - [`Token`] / [`Markup`]: Rendered declaration as a token sequence
//! - [`MarkupId`]: Content-addressed identity of a markup (BLAKE3)
//! - [`DiffKind`]: Added / Removed / Changed / Unchanged classification
//! - [`Version`]: Four-component version number

pub mod api;
pub mod diff_kind;
pub mod error;
pub mod markup;
pub mod version;

pub use api::{ApiId, ApiKind};
pub use diff_kind::DiffKind;
pub use error::TypeError;
pub use markup::{Markup, MarkupId, Token, TokenKind};
pub use version::Version;

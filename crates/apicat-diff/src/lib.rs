//! Diff engine for apicat.
//!
//! Compares two contexts (frameworks, or a package against the framework it
//! targets) over one catalog. Declarations are compared token by token with a
//! minimal edit script; the API tree is compared node by node and pruned down
//! to the parts that changed.
//!
//! # Key Types
//!
//! - [`Edit`] / [`edit_script`] -- Edit-distance script over two sequences
//! - [`MarkupDiff`] / [`TokenDiff`] -- Token-level diff of two declarations
//! - [`DeclarationResolver`] -- Which declaration a context has for an API
//! - [`ApiDiff`] / [`DiffOptions`] -- Pruned diff tree over the API hierarchy
//! - [`DiffWriter`] / [`TextDiffWriter`] -- Rendering sink and plain-text sink

pub mod api_diff;
pub mod edit;
pub mod error;
pub mod markup_diff;
pub mod options;
pub mod resolver;
pub mod text_writer;
pub mod writer;

pub use api_diff::{ApiDiff, DiffCounts};
pub use edit::{diff_slices, edit_script, min_cost, script_cost, Edit};
pub use error::{DiffError, DiffResult};
pub use markup_diff::{diff_markup, MarkupDiff, TokenDiff};
pub use options::DiffOptions;
pub use resolver::DeclarationResolver;
pub use text_writer::TextDiffWriter;
pub use writer::{write_diff, DiffWriter};

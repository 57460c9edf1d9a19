//! Hierarchical API diff: compare two contexts over the whole API tree.
//!
//! Every node is resolved on both sides, its children are diffed first, and
//! the node is classified by which sides declare it and whether the two
//! declarations' markup ids agree. Unchanged nodes survive only when some
//! descendant did change, so the resulting tree contains just the paths
//! leading to differences.
//!
//! # Invariants
//!
//! - An `Unchanged` node always has a descendant that is not `Unchanged`.
//! - Children appear in canonical API order.

use std::fmt;

use apicat_catalog::{ApiNode, Catalog, Declaration};
use apicat_types::DiffKind;
use tracing::{debug, trace};

use crate::markup_diff::{diff_markup, MarkupDiff};
use crate::options::DiffOptions;
use crate::resolver::DeclarationResolver;

/// One node of a diff tree.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiDiff<'a> {
    kind: DiffKind,
    api: &'a ApiNode,
    old: Option<&'a Declaration>,
    new: Option<&'a Declaration>,
    children: Vec<ApiDiff<'a>>,
}

impl<'a> ApiDiff<'a> {
    /// Diff the subtree rooted at `api`.
    ///
    /// Returns `None` when neither side declares anything of interest in
    /// the subtree, or when the root's classification is excluded by
    /// `options`.
    pub fn build(
        catalog: &'a Catalog,
        api: &'a ApiNode,
        old: &DeclarationResolver<'a>,
        new: &DeclarationResolver<'a>,
        options: &DiffOptions,
    ) -> Option<Self> {
        debug!(api = %api.name, old = %old, new = %new, "diffing API subtree");
        let diff = Self::build_node(catalog, api, old, new, options);
        if let Some(diff) = &diff {
            let counts = diff.counts();
            debug!(
                api = %api.name,
                added = counts.added,
                removed = counts.removed,
                changed = counts.changed,
                "diff complete"
            );
        }
        diff
    }

    /// Diff every root of `catalog`, in canonical order.
    ///
    /// Roots are diffed one at a time as the iterator is pulled; roots with
    /// nothing to report are skipped.
    pub fn build_all(
        catalog: &'a Catalog,
        old: DeclarationResolver<'a>,
        new: DeclarationResolver<'a>,
        options: DiffOptions,
    ) -> impl Iterator<Item = ApiDiff<'a>> + 'a {
        catalog
            .roots()
            .filter_map(move |root| Self::build(catalog, root, &old, &new, &options))
    }

    fn build_node(
        catalog: &'a Catalog,
        api: &'a ApiNode,
        old: &DeclarationResolver<'a>,
        new: &DeclarationResolver<'a>,
        options: &DiffOptions,
    ) -> Option<Self> {
        let old_decl = old.resolve(api);
        let new_decl = new.resolve(api);
        if old_decl.is_none() && new_decl.is_none() {
            return None;
        }

        let children: Vec<ApiDiff<'a>> = catalog
            .children(api)
            .filter_map(|child| Self::build_node(catalog, child, old, new, options))
            .collect();

        let kind = match (old_decl, new_decl) {
            (None, None) => return None,
            (None, Some(_)) => DiffKind::Added,
            (Some(_), None) => DiffKind::Removed,
            (Some(o), Some(n)) if o.markup_id != n.markup_id => DiffKind::Changed,
            (Some(_), Some(_)) => DiffKind::Unchanged,
        };

        if !options.includes(kind) {
            trace!(api = %api.name, kind = %kind, "excluded by options");
            return None;
        }

        if kind == DiffKind::Unchanged && children.iter().all(|c| c.kind == DiffKind::Unchanged) {
            trace!(api = %api.name, "pruned unchanged subtree");
            return None;
        }

        Some(Self {
            kind,
            api,
            old: old_decl,
            new: new_decl,
            children,
        })
    }

    pub fn kind(&self) -> DiffKind {
        self.kind
    }

    pub fn api(&self) -> &'a ApiNode {
        self.api
    }

    /// Declaration on the old side.
    pub fn old_declaration(&self) -> Option<&'a Declaration> {
        self.old
    }

    /// Declaration on the new side.
    pub fn new_declaration(&self) -> Option<&'a Declaration> {
        self.new
    }

    pub fn children(&self) -> &[ApiDiff<'a>] {
        &self.children
    }

    /// The new declaration if there is one, otherwise the old.
    pub fn representative(&self) -> Option<&'a Declaration> {
        self.new.or(self.old)
    }

    /// Token diff of the old and new markup.
    pub fn markup_diff(&self) -> MarkupDiff<'a> {
        diff_markup(self.old.map(|d| &d.markup), self.new.map(|d| &d.markup))
    }

    /// Added/removed/changed totals over this node and its descendants.
    pub fn counts(&self) -> DiffCounts {
        let mut counts = DiffCounts::default();
        self.accumulate(&mut counts);
        counts
    }

    fn accumulate(&self, counts: &mut DiffCounts) {
        match self.kind {
            DiffKind::Added => counts.added += 1,
            DiffKind::Removed => counts.removed += 1,
            DiffKind::Changed => counts.changed += 1,
            DiffKind::Unchanged => {}
        }
        for child in &self.children {
            child.accumulate(counts);
        }
    }
}

/// Per-kind node totals of a diff subtree.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DiffCounts {
    pub added: usize,
    pub removed: usize,
    pub changed: usize,
}

impl DiffCounts {
    pub fn is_empty(&self) -> bool {
        self.added == 0 && self.removed == 0 && self.changed == 0
    }
}

impl std::ops::AddAssign for DiffCounts {
    fn add_assign(&mut self, other: Self) {
        self.added += other.added;
        self.removed += other.removed;
        self.changed += other.changed;
    }
}

impl fmt::Display for DiffCounts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "+{} -{} ~{}", self.added, self.removed, self.changed)
    }
}

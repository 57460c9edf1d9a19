//! The immutable API catalog.
//!
//! A [`Catalog`] is produced by [`CatalogBuilder`](crate::CatalogBuilder) or
//! loaded from a [`CatalogDocument`](crate::CatalogDocument). Once built it is
//! never mutated, so it can be shared freely between diff and availability
//! sessions running on different threads.
//!
//! # Invariants
//!
//! - Every parent reference resolves to an existing node.
//! - Roots and every node's children are in canonical order.
//! - Every declaration references an existing API and assembly.

use std::collections::HashMap;

use apicat_platform::PlatformImplications;
use apicat_types::ApiId;

use crate::model::{ApiNode, Assembly, AssemblyId, Declaration, DeclarationId, Framework, Package};

/// The API tree plus the assemblies, frameworks, and packages declaring it.
#[derive(Clone, Debug, Default)]
pub struct Catalog {
    pub(crate) apis: HashMap<ApiId, ApiNode>,
    pub(crate) roots: Vec<ApiId>,
    pub(crate) assemblies: Vec<Assembly>,
    pub(crate) declarations: Vec<Declaration>,
    pub(crate) declarations_by_api: HashMap<ApiId, Vec<DeclarationId>>,
    pub(crate) frameworks: Vec<Framework>,
    pub(crate) packages: Vec<Package>,
    pub(crate) implications: PlatformImplications,
}

impl Catalog {
    /// Number of APIs in the tree.
    pub fn len(&self) -> usize {
        self.apis.len()
    }

    pub fn is_empty(&self) -> bool {
        self.apis.is_empty()
    }

    // ---------------------------------------------------------------
    // API tree
    // ---------------------------------------------------------------

    pub fn api(&self, id: ApiId) -> Option<&ApiNode> {
        self.apis.get(&id)
    }

    /// Root APIs in canonical order.
    pub fn roots(&self) -> impl Iterator<Item = &ApiNode> + '_ {
        self.roots.iter().filter_map(|id| self.apis.get(id))
    }

    /// Children of `api` in canonical order.
    pub fn children<'a>(&'a self, api: &'a ApiNode) -> impl Iterator<Item = &'a ApiNode> + 'a {
        api.children.iter().filter_map(|id| self.apis.get(id))
    }

    pub fn parent(&self, api: &ApiNode) -> Option<&ApiNode> {
        api.parent.and_then(|id| self.apis.get(&id))
    }

    /// Ancestors of `api`, nearest first. The API itself is not included.
    pub fn ancestors<'a>(&'a self, api: &'a ApiNode) -> impl Iterator<Item = &'a ApiNode> + 'a {
        std::iter::successors(self.parent(api), move |node| self.parent(node))
    }

    /// Dotted name from the root down to `api`, e.g. `System.String.Length`.
    pub fn full_name(&self, api: &ApiNode) -> String {
        let mut names: Vec<&str> = self.ancestors(api).map(|n| n.name.as_str()).collect();
        names.reverse();
        names.push(&api.name);
        names.join(".")
    }

    /// Find an API by its dotted full name.
    ///
    /// Each segment is matched against the children of the previous one, so
    /// a namespace named `System.Collections` is found as one segment when
    /// the catalog stores it that way. The first match in canonical order wins.
    pub fn find_by_full_name(&self, full_name: &str) -> Option<&ApiNode> {
        fn descend<'a>(
            catalog: &'a Catalog,
            candidates: &[ApiId],
            rest: &str,
        ) -> Option<&'a ApiNode> {
            for id in candidates {
                let Some(node) = catalog.apis.get(id) else {
                    continue;
                };
                if rest == node.name {
                    return Some(node);
                }
                let Some(tail) = rest
                    .strip_prefix(node.name.as_str())
                    .and_then(|t| t.strip_prefix('.'))
                else {
                    continue;
                };
                if let Some(found) = descend(catalog, &node.children, tail) {
                    return Some(found);
                }
            }
            None
        }

        descend(self, &self.roots, full_name)
    }

    /// Every API, depth-first in canonical order.
    pub fn walk(&self) -> Vec<&ApiNode> {
        let mut result = Vec::with_capacity(self.apis.len());
        let mut stack: Vec<&ApiNode> = self.roots().collect();
        stack.reverse();
        while let Some(node) = stack.pop() {
            result.push(node);
            let mut children: Vec<&ApiNode> = self.children(node).collect();
            children.reverse();
            stack.extend(children);
        }
        result
    }

    // ---------------------------------------------------------------
    // Declarations and contexts
    // ---------------------------------------------------------------

    pub fn assembly(&self, id: AssemblyId) -> Option<&Assembly> {
        self.assemblies.get(id.index())
    }

    pub fn assembly_by_name(&self, name: &str) -> Option<&Assembly> {
        self.assemblies.iter().find(|a| a.name == name)
    }

    pub fn assemblies(&self) -> &[Assembly] {
        &self.assemblies
    }

    pub fn declaration(&self, id: DeclarationId) -> Option<&Declaration> {
        self.declarations.get(id.index())
    }

    /// Every declaration of `api`, across all assemblies.
    pub fn declarations_of(&self, api: ApiId) -> impl Iterator<Item = &Declaration> + '_ {
        self.declarations_by_api
            .get(&api)
            .into_iter()
            .flatten()
            .filter_map(|id| self.declarations.get(id.index()))
    }

    /// Declarations contributed by one assembly.
    pub fn declarations_in<'a>(
        &'a self,
        assembly: &'a Assembly,
    ) -> impl Iterator<Item = &'a Declaration> + 'a {
        assembly
            .declarations
            .iter()
            .filter_map(|id| self.declarations.get(id.index()))
    }

    pub fn framework(&self, name: &str) -> Option<&Framework> {
        self.frameworks.iter().find(|f| f.name == name)
    }

    pub fn frameworks(&self) -> &[Framework] {
        &self.frameworks
    }

    pub fn package(&self, name: &str) -> Option<&Package> {
        self.packages.iter().find(|p| p.name == name)
    }

    pub fn packages(&self) -> &[Package] {
        &self.packages
    }

    /// Implied-platform relationships used when building annotations.
    pub fn implications(&self) -> &PlatformImplications {
        &self.implications
    }
}

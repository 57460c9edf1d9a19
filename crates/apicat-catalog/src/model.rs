//! Catalog entities: API nodes, declarations, assemblies, frameworks, and
//! packages.

use std::cmp::Ordering;
use std::fmt;

use apicat_platform::PlatformFact;
use apicat_types::{ApiId, ApiKind, Markup, MarkupId};
use serde::{Deserialize, Serialize};

/// Index of an assembly inside its catalog.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AssemblyId(pub(crate) u32);

impl AssemblyId {
    pub fn index(&self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for AssemblyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Index of a declaration inside its catalog.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct DeclarationId(pub(crate) u32);

impl DeclarationId {
    pub fn index(&self) -> usize {
        self.0 as usize
    }
}

/// A node in the API tree.
///
/// Nodes order canonically by `(kind rank, name, id)`: namespaces first,
/// then types, then members. Children are stored in that order.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ApiNode {
    pub id: ApiId,
    pub kind: ApiKind,
    pub name: String,
    pub parent: Option<ApiId>,
    pub(crate) children: Vec<ApiId>,
}

impl ApiNode {
    pub(crate) fn new(id: ApiId, kind: ApiKind, name: String, parent: Option<ApiId>) -> Self {
        Self {
            id,
            kind,
            name,
            parent,
            children: Vec::new(),
        }
    }

    /// Child ids in canonical order.
    pub fn child_ids(&self) -> &[ApiId] {
        &self.children
    }

    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    fn sort_key(&self) -> (u8, &str, &ApiId) {
        (self.kind.sort_rank(), &self.name, &self.id)
    }
}

impl PartialOrd for ApiNode {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ApiNode {
    fn cmp(&self, other: &Self) -> Ordering {
        self.sort_key().cmp(&other.sort_key())
    }
}

/// The realization of an API inside one assembly.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Declaration {
    pub id: DeclarationId,
    pub api: ApiId,
    pub assembly: AssemblyId,
    pub markup: Markup,
    /// Identity key of `markup`; equal ids mean identical declarations.
    pub markup_id: MarkupId,
    /// Platform facts attached directly to this declaration.
    pub platforms: Vec<PlatformFact>,
}

/// A compiled unit contributing declarations.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Assembly {
    pub id: AssemblyId,
    pub name: String,
    /// Platform facts that apply to every declaration in the assembly.
    pub platforms: Vec<PlatformFact>,
    pub(crate) declarations: Vec<DeclarationId>,
}

impl Assembly {
    pub fn declaration_ids(&self) -> &[DeclarationId] {
        &self.declarations
    }
}

/// A framework and the assemblies it ships in-box.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Framework {
    pub name: String,
    pub assemblies: Vec<AssemblyId>,
}

/// One assembly a package ships for one framework.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PackageAsset {
    pub framework: String,
    pub assembly: AssemblyId,
}

/// A package and the assemblies it ships per framework.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Package {
    pub name: String,
    pub version: String,
    pub assets: Vec<PackageAsset>,
}

impl Package {
    /// Assemblies shipped for exactly `framework`.
    pub fn assemblies_for<'a>(&'a self, framework: &'a str) -> impl Iterator<Item = AssemblyId> + 'a {
        self.assets
            .iter()
            .filter(move |asset| asset.framework == framework)
            .map(|asset| asset.assembly)
    }

    pub fn targets(&self, framework: &str) -> bool {
        self.assets.iter().any(|asset| asset.framework == framework)
    }
}

impl fmt::Display for Package {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.name, self.version)
    }
}

//! Incremental catalog construction.

use std::collections::HashMap;

use apicat_platform::{PlatformFact, PlatformImplications};
use apicat_types::{ApiId, ApiKind, Markup};
use tracing::{debug, trace};

use crate::catalog::Catalog;
use crate::error::{CatalogError, CatalogResult};
use crate::model::{
    ApiNode, Assembly, AssemblyId, Declaration, DeclarationId, Framework, Package, PackageAsset,
};

/// Builds a [`Catalog`].
///
/// Every reference is validated on insertion: parents, APIs, and assemblies
/// must be added before anything that points at them. [`build`] sorts
/// children into canonical order and freezes the result.
///
/// [`build`]: CatalogBuilder::build
#[derive(Debug, Default)]
pub struct CatalogBuilder {
    catalog: Catalog,
}

impl CatalogBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an API with a fresh random id.
    pub fn add_api(
        &mut self,
        parent: Option<ApiId>,
        kind: ApiKind,
        name: impl Into<String>,
    ) -> CatalogResult<ApiId> {
        self.add_api_with_id(ApiId::random(), parent, kind, name)
    }

    /// Add an API with a known id.
    pub fn add_api_with_id(
        &mut self,
        id: ApiId,
        parent: Option<ApiId>,
        kind: ApiKind,
        name: impl Into<String>,
    ) -> CatalogResult<ApiId> {
        if self.catalog.apis.contains_key(&id) {
            return Err(CatalogError::DuplicateApi(id));
        }

        match parent {
            Some(parent_id) => match self.catalog.apis.get_mut(&parent_id) {
                Some(parent_node) => parent_node.children.push(id),
                None => {
                    return Err(CatalogError::DanglingParent {
                        api: id,
                        parent: parent_id,
                    })
                }
            },
            None => self.catalog.roots.push(id),
        }

        let node = ApiNode::new(id, kind, name.into(), parent);
        trace!(api = ?id, kind = %kind, name = %node.name, "added API");
        self.catalog.apis.insert(id, node);
        Ok(id)
    }

    /// Add an assembly. Names must be unique.
    pub fn add_assembly(
        &mut self,
        name: impl Into<String>,
        platforms: Vec<PlatformFact>,
    ) -> CatalogResult<AssemblyId> {
        let name = name.into();
        if self.catalog.assembly_by_name(&name).is_some() {
            return Err(CatalogError::DuplicateName {
                kind: "assembly",
                name,
            });
        }

        let id = AssemblyId(self.catalog.assemblies.len() as u32);
        self.catalog.assemblies.push(Assembly {
            id,
            name,
            platforms,
            declarations: Vec::new(),
        });
        Ok(id)
    }

    /// Record that `assembly` declares `api` with the given markup.
    pub fn add_declaration(
        &mut self,
        assembly: AssemblyId,
        api: ApiId,
        markup: Markup,
        platforms: Vec<PlatformFact>,
    ) -> CatalogResult<DeclarationId> {
        self.check_assembly(assembly)?;
        if !self.catalog.apis.contains_key(&api) {
            return Err(CatalogError::ApiNotFound(api));
        }

        let id = DeclarationId(self.catalog.declarations.len() as u32);
        let markup_id = markup.id();
        self.catalog.declarations.push(Declaration {
            id,
            api,
            assembly,
            markup,
            markup_id,
            platforms,
        });
        self.catalog.assemblies[assembly.index()].declarations.push(id);
        self.catalog
            .declarations_by_api
            .entry(api)
            .or_default()
            .push(id);
        Ok(id)
    }

    /// Add a framework shipping `assemblies` in-box.
    pub fn add_framework(
        &mut self,
        name: impl Into<String>,
        assemblies: &[AssemblyId],
    ) -> CatalogResult<()> {
        let name = name.into();
        if self.catalog.framework(&name).is_some() {
            return Err(CatalogError::DuplicateName {
                kind: "framework",
                name,
            });
        }
        for assembly in assemblies {
            self.check_assembly(*assembly)?;
        }

        self.catalog.frameworks.push(Framework {
            name,
            assemblies: assemblies.to_vec(),
        });
        Ok(())
    }

    /// Add a package. Each asset pairs a target framework name with the
    /// assembly the package ships for it.
    pub fn add_package(
        &mut self,
        name: impl Into<String>,
        version: impl Into<String>,
        assets: Vec<(String, AssemblyId)>,
    ) -> CatalogResult<()> {
        let name = name.into();
        if self.catalog.package(&name).is_some() {
            return Err(CatalogError::DuplicateName {
                kind: "package",
                name,
            });
        }

        let mut resolved = Vec::with_capacity(assets.len());
        for (framework, assembly) in assets {
            self.check_assembly(assembly)?;
            resolved.push(PackageAsset {
                framework,
                assembly,
            });
        }

        self.catalog.packages.push(Package {
            name,
            version: version.into(),
            assets: resolved,
        });
        Ok(())
    }

    /// Record that `platform` is implied by `implied_by`.
    pub fn imply_platform(&mut self, platform: impl Into<String>, implied_by: impl Into<String>) {
        self.catalog.implications.insert(platform, implied_by);
    }

    pub fn set_implications(&mut self, implications: PlatformImplications) {
        self.catalog.implications = implications;
    }

    /// Sort children into canonical order and freeze the catalog.
    pub fn build(self) -> Catalog {
        let mut catalog = self.catalog;

        let keys: HashMap<ApiId, (u8, String)> = catalog
            .apis
            .iter()
            .map(|(id, node)| (*id, (node.kind.sort_rank(), node.name.clone())))
            .collect();
        let canonical = |a: &ApiId, b: &ApiId| {
            let (rank_a, name_a) = &keys[a];
            let (rank_b, name_b) = &keys[b];
            (rank_a, name_a, a).cmp(&(rank_b, name_b, b))
        };

        catalog.roots.sort_by(canonical);
        for node in catalog.apis.values_mut() {
            node.children.sort_by(canonical);
        }

        debug!(
            apis = catalog.apis.len(),
            declarations = catalog.declarations.len(),
            frameworks = catalog.frameworks.len(),
            packages = catalog.packages.len(),
            "catalog built"
        );
        catalog
    }

    fn check_assembly(&self, assembly: AssemblyId) -> CatalogResult<()> {
        if assembly.index() < self.catalog.assemblies.len() {
            Ok(())
        } else {
            Err(CatalogError::UnknownAssembly(assembly.to_string()))
        }
    }
}

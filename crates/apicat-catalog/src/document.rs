//! JSON interchange format for catalogs.
//!
//! The document nests APIs as a tree and lists assemblies with their
//! declarations inline. Frameworks and packages refer to assemblies by
//! name. Loading goes through [`CatalogBuilder`], so a document is
//! validated exactly like programmatic construction.

use std::collections::HashMap;
use std::path::Path;

use apicat_platform::{PlatformFact, PlatformImplications};
use apicat_types::{ApiId, ApiKind, Markup};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::builder::CatalogBuilder;
use crate::catalog::Catalog;
use crate::error::{CatalogError, CatalogResult};
use crate::model::AssemblyId;

/// Serialized form of a [`Catalog`].
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CatalogDocument {
    #[serde(default)]
    pub apis: Vec<ApiEntry>,
    #[serde(default)]
    pub assemblies: Vec<AssemblyEntry>,
    #[serde(default)]
    pub frameworks: Vec<FrameworkEntry>,
    #[serde(default)]
    pub packages: Vec<PackageEntry>,
    #[serde(default, skip_serializing_if = "PlatformImplications::is_empty")]
    pub implied_platforms: PlatformImplications,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ApiEntry {
    pub id: ApiId,
    pub kind: ApiKind,
    pub name: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<ApiEntry>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AssemblyEntry {
    pub name: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub platforms: Vec<PlatformFact>,
    #[serde(default)]
    pub declarations: Vec<DeclarationEntry>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DeclarationEntry {
    pub api: ApiId,
    pub markup: Markup,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub platforms: Vec<PlatformFact>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FrameworkEntry {
    pub name: String,
    /// Assembly names.
    pub assemblies: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PackageEntry {
    pub name: String,
    pub version: String,
    pub assets: Vec<PackageAssetEntry>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PackageAssetEntry {
    pub framework: String,
    /// Assembly name.
    pub assembly: String,
}

impl CatalogDocument {
    pub fn from_json(json: &str) -> CatalogResult<Self> {
        serde_json::from_str(json).map_err(|e| CatalogError::Serialization(e.to_string()))
    }

    pub fn to_json_pretty(&self) -> CatalogResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| CatalogError::Serialization(e.to_string()))
    }

    /// Validate the document and build the catalog it describes.
    pub fn into_catalog(self) -> CatalogResult<Catalog> {
        let mut builder = CatalogBuilder::new();

        let mut pending: Vec<(Option<ApiId>, ApiEntry)> =
            self.apis.into_iter().rev().map(|e| (None, e)).collect();
        while let Some((parent, entry)) = pending.pop() {
            let id = builder.add_api_with_id(entry.id, parent, entry.kind, entry.name)?;
            pending.extend(entry.children.into_iter().rev().map(|c| (Some(id), c)));
        }

        let mut assemblies: HashMap<String, AssemblyId> = HashMap::new();
        for entry in self.assemblies {
            let id = builder.add_assembly(entry.name.clone(), entry.platforms)?;
            for decl in entry.declarations {
                builder.add_declaration(id, decl.api, decl.markup, decl.platforms)?;
            }
            assemblies.insert(entry.name, id);
        }

        let lookup = |name: &str| {
            assemblies
                .get(name)
                .copied()
                .ok_or_else(|| CatalogError::UnknownAssembly(name.to_string()))
        };

        for entry in self.frameworks {
            let ids = entry
                .assemblies
                .iter()
                .map(|name| lookup(name.as_str()))
                .collect::<CatalogResult<Vec<_>>>()?;
            builder.add_framework(entry.name, &ids)?;
        }

        for entry in self.packages {
            let mut assets = Vec::with_capacity(entry.assets.len());
            for asset in entry.assets {
                assets.push((asset.framework, lookup(asset.assembly.as_str())?));
            }
            builder.add_package(entry.name, entry.version, assets)?;
        }

        builder.set_implications(self.implied_platforms);
        Ok(builder.build())
    }
}

impl Catalog {
    /// Parse and build a catalog from JSON text.
    pub fn from_json(json: &str) -> CatalogResult<Self> {
        CatalogDocument::from_json(json)?.into_catalog()
    }

    /// Load a catalog from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> CatalogResult<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let catalog = Self::from_json(&json)?;
        debug!(path = %path.display(), apis = catalog.len(), "loaded catalog");
        Ok(catalog)
    }
}

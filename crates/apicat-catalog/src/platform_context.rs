//! Effective platform annotation of an API in one framework.
//!
//! Facts are collected level by level: the API's own declaration, then the
//! declarations of its ancestors in the same assembly, then the assembly
//! itself. For each platform the nearest level that mentions it wins; facts
//! about that platform from outer levels are ignored.

use std::collections::HashSet;

use apicat_platform::{PlatformAnnotation, PlatformFact};
use tracing::trace;

use crate::availability::AvailabilityContext;
use crate::catalog::Catalog;
use crate::error::{CatalogError, CatalogResult};
use crate::model::ApiNode;

/// Computes [`PlatformAnnotation`]s for APIs under one framework.
#[derive(Debug)]
pub struct PlatformContext<'a> {
    availability: AvailabilityContext<'a>,
    framework: String,
}

impl<'a> PlatformContext<'a> {
    pub fn new(catalog: &'a Catalog, framework: &str) -> CatalogResult<Self> {
        Self::with_availability(AvailabilityContext::new(catalog), framework)
    }

    /// Reuse an existing availability index.
    pub fn with_availability(
        availability: AvailabilityContext<'a>,
        framework: &str,
    ) -> CatalogResult<Self> {
        if !availability.has_framework(framework) {
            return Err(CatalogError::UnknownFramework(framework.to_string()));
        }
        Ok(Self {
            availability,
            framework: framework.to_string(),
        })
    }

    pub fn framework(&self) -> &str {
        &self.framework
    }

    /// Annotation of `api`, or `None` if the API is not available in the
    /// framework.
    pub fn annotation(&self, api: &ApiNode) -> Option<PlatformAnnotation> {
        let catalog = self.availability.catalog();
        let own = self.availability.availability(api.id, &self.framework)?;
        let assembly = own.declaration.assembly;

        let mut levels: Vec<&[PlatformFact]> = vec![own.declaration.platforms.as_slice()];
        for ancestor in catalog.ancestors(api) {
            if let Some(declaration) = catalog
                .declarations_of(ancestor.id)
                .find(|d| d.assembly == assembly)
            {
                levels.push(&declaration.platforms);
            }
        }
        if let Some(assembly) = catalog.assembly(assembly) {
            levels.push(&assembly.platforms);
        }

        let facts = nearest_facts(&levels);
        trace!(api = ?api.id, facts = facts.len(), "collected platform facts");
        Some(PlatformAnnotation::build(facts, catalog.implications()))
    }
}

fn nearest_facts(levels: &[&[PlatformFact]]) -> Vec<PlatformFact> {
    let mut decided: HashSet<String> = HashSet::new();
    let mut facts = Vec::new();

    for level in levels {
        let mentioned: HashSet<String> = level.iter().map(PlatformFact::key).collect();
        facts.extend(
            level
                .iter()
                .filter(|fact| !decided.contains(&fact.key()))
                .cloned(),
        );
        decided.extend(mentioned);
    }

    facts
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::CatalogBuilder;
    use apicat_platform::PlatformAnnotationKind;
    use apicat_types::{ApiId, ApiKind, Markup, Version};

    struct Fixture {
        catalog: Catalog,
        ty: ApiId,
        property: ApiId,
        getter: ApiId,
        bare: ApiId,
        absent: ApiId,
    }

    fn fixture(
        type_facts: Vec<PlatformFact>,
        property_facts: Vec<PlatformFact>,
        getter_facts: Vec<PlatformFact>,
        assembly_facts: Vec<PlatformFact>,
    ) -> Fixture {
        let mut b = CatalogBuilder::new();
        b.imply_platform("maccatalyst", "ios");

        let ns = b.add_api(None, ApiKind::Namespace, "System").unwrap();
        let ty = b.add_api(Some(ns), ApiKind::Class, "Console").unwrap();
        let property = b.add_api(Some(ty), ApiKind::Property, "Title").unwrap();
        let getter = b
            .add_api(Some(property), ApiKind::PropertyGetter, "get_Title")
            .unwrap();
        let bare = b.add_api(Some(ns), ApiKind::Class, "Bare").unwrap();
        let absent = b.add_api(Some(ns), ApiKind::Class, "Absent").unwrap();

        let asm = b.add_assembly("System.Console", assembly_facts).unwrap();
        b.add_declaration(asm, ns, Markup::default(), Vec::new())
            .unwrap();
        b.add_declaration(asm, ty, Markup::default(), type_facts)
            .unwrap();
        b.add_declaration(asm, property, Markup::default(), property_facts)
            .unwrap();
        b.add_declaration(asm, getter, Markup::default(), getter_facts)
            .unwrap();
        b.add_declaration(asm, bare, Markup::default(), Vec::new())
            .unwrap();
        b.add_framework("net8.0", &[asm]).unwrap();

        Fixture {
            catalog: b.build(),
            ty,
            property,
            getter,
            bare,
            absent,
        }
    }

    fn annotate(f: &Fixture, api: ApiId) -> Option<PlatformAnnotation> {
        let ctx = PlatformContext::new(&f.catalog, "net8.0").unwrap();
        ctx.annotation(f.catalog.api(api).unwrap())
    }

    #[test]
    fn unknown_framework_is_rejected() {
        let f = fixture(Vec::new(), Vec::new(), Vec::new(), Vec::new());
        assert!(matches!(
            PlatformContext::new(&f.catalog, "net9.0"),
            Err(CatalogError::UnknownFramework(name)) if name == "net9.0"
        ));
    }

    #[test]
    fn no_facts_is_unrestricted() {
        let f = fixture(Vec::new(), Vec::new(), Vec::new(), Vec::new());
        assert_eq!(
            annotate(&f, f.bare).unwrap(),
            PlatformAnnotation::unrestricted()
        );
    }

    #[test]
    fn unavailable_api_has_no_annotation() {
        let f = fixture(Vec::new(), Vec::new(), Vec::new(), Vec::new());
        assert!(annotate(&f, f.absent).is_none());
    }

    #[test]
    fn accessor_inherits_from_property() {
        let f = fixture(
            Vec::new(),
            vec![PlatformFact::supported("ios", None)],
            Vec::new(),
            Vec::new(),
        );
        let a = annotate(&f, f.getter).unwrap();
        assert_eq!(a.kind(), PlatformAnnotationKind::AllowList);
        let names: Vec<_> = a.entries().iter().map(|e| e.display_name()).collect();
        assert_eq!(names, vec!["iOS", "Mac Catalyst"]);
    }

    #[test]
    fn nearest_level_wins_per_platform() {
        let f = fixture(
            vec![
                PlatformFact::unsupported("browser", None),
                PlatformFact::unsupported("ios", None),
            ],
            vec![PlatformFact::unsupported("ios", Some(Version::new(14, 0, 0, 0)))],
            Vec::new(),
            Vec::new(),
        );
        let a = annotate(&f, f.property).unwrap();
        assert_eq!(a.kind(), PlatformAnnotationKind::DenyList);

        // ios comes from the property; browser is inherited from the type.
        assert!(a.is_supported("ios", &Version::new(13, 0, 0, 0)));
        assert!(!a.is_supported("ios", &Version::new(14, 0, 0, 0)));
        assert!(!a.is_supported("browser", &Version::ZERO));

        let ty = annotate(&f, f.ty).unwrap();
        assert!(!ty.is_supported("ios", &Version::new(13, 0, 0, 0)));
    }

    #[test]
    fn assembly_facts_apply_last() {
        let f = fixture(
            Vec::new(),
            Vec::new(),
            Vec::new(),
            vec![PlatformFact::unsupported("browser", None)],
        );
        let a = annotate(&f, f.getter).unwrap();
        assert_eq!(a.kind(), PlatformAnnotationKind::DenyList);
        assert_eq!(
            a.to_string(),
            "For the selected framework the API is supported on any platform except for:\n- Browser"
        );
    }

    #[test]
    fn nearest_facts_keeps_all_facts_of_deciding_level() {
        let inner = [
            PlatformFact::supported("ios", Some(Version::new(10, 0, 0, 0))),
            PlatformFact::unsupported("ios", Some(Version::new(12, 0, 0, 0))),
        ];
        let outer = [
            PlatformFact::unsupported("IOS", None),
            PlatformFact::unsupported("tvos", None),
        ];
        let levels: [&[PlatformFact]; 2] = [&inner, &outer];
        let facts = nearest_facts(&levels);
        assert_eq!(facts.len(), 3);
        assert_eq!(facts[2].platform, "tvos");
    }
}

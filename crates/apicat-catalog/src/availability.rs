//! Which declaration of an API applies in a given framework or package.
//!
//! An [`AvailabilityContext`] indexes the catalog once per framework: the
//! declarations its in-box assemblies contribute, and, per package that
//! targets the framework by exact name, the declarations the package ships
//! for it. When several assemblies declare the same API, the first in
//! framework (or package asset) order wins.

use std::collections::HashMap;

use apicat_types::ApiId;

use crate::catalog::Catalog;
use crate::model::{AssemblyId, Declaration, Package};

/// Where and how an API is available in one framework.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Availability<'a> {
    pub framework: &'a str,
    pub declaration: &'a Declaration,
    /// The package providing the declaration, or `None` for in-box.
    pub package: Option<&'a Package>,
}

impl Availability<'_> {
    /// Returns `true` if the framework itself ships the declaration.
    pub fn is_in_box(&self) -> bool {
        self.package.is_none()
    }
}

type DeclarationIndex<'a> = HashMap<ApiId, &'a Declaration>;

#[derive(Debug, Default)]
struct FrameworkIndex<'a> {
    in_box: DeclarationIndex<'a>,
    packages: Vec<(&'a Package, DeclarationIndex<'a>)>,
}

/// Availability queries over one catalog.
#[derive(Debug)]
pub struct AvailabilityContext<'a> {
    catalog: &'a Catalog,
    frameworks: HashMap<&'a str, FrameworkIndex<'a>>,
}

impl<'a> AvailabilityContext<'a> {
    /// Index every framework in `catalog`.
    pub fn new(catalog: &'a Catalog) -> Self {
        let mut frameworks = HashMap::with_capacity(catalog.frameworks().len());

        for framework in catalog.frameworks() {
            let in_box = index(catalog, framework.assemblies.iter().copied());
            let packages = catalog
                .packages()
                .iter()
                .filter(|package| package.targets(&framework.name))
                .map(|package| (package, index(catalog, package.assemblies_for(&framework.name))))
                .collect();
            frameworks.insert(framework.name.as_str(), FrameworkIndex { in_box, packages });
        }

        Self {
            catalog,
            frameworks,
        }
    }

    pub fn catalog(&self) -> &'a Catalog {
        self.catalog
    }

    pub fn has_framework(&self, framework: &str) -> bool {
        self.frameworks.contains_key(framework)
    }

    pub fn has_package(&self, package: &str) -> bool {
        self.catalog.package(package).is_some()
    }

    /// The declaration `framework` ships in-box for `api`.
    pub fn in_box_declaration(&self, api: ApiId, framework: &str) -> Option<&'a Declaration> {
        self.frameworks.get(framework)?.in_box.get(&api).copied()
    }

    /// Availability of `api` in `framework`.
    ///
    /// In-box declarations take precedence; otherwise the first package in
    /// catalog order that ships the API for the framework is used.
    pub fn availability(&self, api: ApiId, framework: &str) -> Option<Availability<'a>> {
        let (&name, index) = self.frameworks.get_key_value(framework)?;
        if let Some(&declaration) = index.in_box.get(&api) {
            return Some(Availability {
                framework: name,
                declaration,
                package: None,
            });
        }
        index.packages.iter().find_map(|(package, decls)| {
            decls.get(&api).map(|&declaration| Availability {
                framework: name,
                declaration,
                package: Some(*package),
            })
        })
    }

    /// Availability of `api` in `framework` when `package` is referenced.
    ///
    /// In-box declarations still take precedence over the package's own.
    pub fn package_availability(
        &self,
        api: ApiId,
        framework: &str,
        package: &str,
    ) -> Option<Availability<'a>> {
        let (&name, index) = self.frameworks.get_key_value(framework)?;
        if let Some(&declaration) = index.in_box.get(&api) {
            return Some(Availability {
                framework: name,
                declaration,
                package: None,
            });
        }
        index
            .packages
            .iter()
            .find(|(p, _)| p.name == package)
            .and_then(|(p, decls)| {
                decls.get(&api).map(|&declaration| Availability {
                    framework: name,
                    declaration,
                    package: Some(*p),
                })
            })
    }

    pub fn is_available(&self, api: ApiId, framework: &str) -> bool {
        self.availability(api, framework).is_some()
    }

    /// Every framework `api` is available in, in catalog order.
    pub fn available_frameworks(&self, api: ApiId) -> Vec<Availability<'a>> {
        self.catalog
            .frameworks()
            .iter()
            .filter_map(|framework| self.availability(api, &framework.name))
            .collect()
    }
}

fn index<'a>(
    catalog: &'a Catalog,
    assemblies: impl Iterator<Item = AssemblyId>,
) -> DeclarationIndex<'a> {
    let mut index = DeclarationIndex::new();
    for assembly in assemblies.filter_map(|id| catalog.assembly(id)) {
        for declaration in catalog.declarations_in(assembly) {
            index.entry(declaration.api).or_insert(declaration);
        }
    }
    index
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::CatalogBuilder;
    use apicat_types::{ApiKind, Markup, Token};

    struct Fixture {
        catalog: Catalog,
        span: ApiId,
        memory: ApiId,
        missing: ApiId,
    }

    fn markup(text: &str) -> Markup {
        vec![Token::keyword(text)].into()
    }

    // net461 lacks Span in-box; System.Memory ships it there. net8.0 has it
    // in-box, and the package also targets net8.0.
    fn fixture() -> Fixture {
        let mut b = CatalogBuilder::new();
        let ns = b.add_api(None, ApiKind::Namespace, "System").unwrap();
        let span = b.add_api(Some(ns), ApiKind::Struct, "Span").unwrap();
        let memory = b.add_api(Some(ns), ApiKind::Struct, "Memory").unwrap();
        let missing = b.add_api(Some(ns), ApiKind::Class, "Nowhere").unwrap();

        let corlib = b.add_assembly("mscorlib", Vec::new()).unwrap();
        let runtime = b.add_assembly("System.Runtime", Vec::new()).unwrap();
        let pkg = b.add_assembly("System.Memory", Vec::new()).unwrap();

        b.add_declaration(runtime, span, markup("runtime"), Vec::new())
            .unwrap();
        b.add_declaration(pkg, span, markup("package"), Vec::new())
            .unwrap();
        b.add_declaration(pkg, memory, markup("package"), Vec::new())
            .unwrap();

        b.add_framework("net461", &[corlib]).unwrap();
        b.add_framework("net8.0", &[runtime]).unwrap();
        b.add_package(
            "System.Memory",
            "4.5.5",
            vec![("net461".into(), pkg), ("net8.0".into(), pkg)],
        )
        .unwrap();

        Fixture {
            catalog: b.build(),
            span,
            memory,
            missing,
        }
    }

    #[test]
    fn in_box_takes_precedence() {
        let f = fixture();
        let ctx = AvailabilityContext::new(&f.catalog);
        let a = ctx.availability(f.span, "net8.0").unwrap();
        assert!(a.is_in_box());
        assert_eq!(a.framework, "net8.0");
        assert_eq!(a.declaration.markup.to_string(), "runtime");
    }

    #[test]
    fn package_fills_in_missing_in_box() {
        let f = fixture();
        let ctx = AvailabilityContext::new(&f.catalog);
        let a = ctx.availability(f.span, "net461").unwrap();
        assert!(!a.is_in_box());
        assert_eq!(a.package.unwrap().name, "System.Memory");
        assert!(ctx.in_box_declaration(f.span, "net461").is_none());
    }

    #[test]
    fn package_availability_prefers_in_box() {
        let f = fixture();
        let ctx = AvailabilityContext::new(&f.catalog);

        let a = ctx
            .package_availability(f.span, "net8.0", "System.Memory")
            .unwrap();
        assert!(a.is_in_box());

        let b = ctx
            .package_availability(f.memory, "net8.0", "System.Memory")
            .unwrap();
        assert!(!b.is_in_box());

        assert!(ctx
            .package_availability(f.memory, "net8.0", "Other.Package")
            .is_none());
    }

    #[test]
    fn unknown_framework_has_no_availability() {
        let f = fixture();
        let ctx = AvailabilityContext::new(&f.catalog);
        assert!(!ctx.has_framework("net9.0"));
        assert!(ctx.availability(f.span, "net9.0").is_none());
        assert!(!ctx.is_available(f.missing, "net8.0"));
    }

    #[test]
    fn available_frameworks_lists_catalog_order() {
        let f = fixture();
        let ctx = AvailabilityContext::new(&f.catalog);
        let names: Vec<_> = ctx
            .available_frameworks(f.span)
            .iter()
            .map(|a| a.framework)
            .collect();
        assert_eq!(names, vec!["net461", "net8.0"]);
        assert!(ctx.available_frameworks(f.missing).is_empty());
    }
}

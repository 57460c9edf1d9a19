//! Declaration resolvers: which declaration one side of a diff sees.

use std::fmt;

use apicat_catalog::{ApiNode, AvailabilityContext, Declaration};

use crate::error::{DiffError, DiffResult};

/// Resolves the declaration an API has in one context.
#[derive(Clone, Debug)]
pub enum DeclarationResolver<'a> {
    /// No context: nothing resolves.
    Null,
    /// The declaration available in one framework.
    Framework {
        context: &'a AvailabilityContext<'a>,
        framework: String,
    },
    /// The declaration a package adds to a framework, unless the framework
    /// already ships the API in-box.
    Package {
        context: &'a AvailabilityContext<'a>,
        framework: String,
        package: String,
    },
}

impl<'a> DeclarationResolver<'a> {
    pub fn null() -> Self {
        Self::Null
    }

    pub fn for_framework(
        context: &'a AvailabilityContext<'a>,
        framework: impl Into<String>,
    ) -> DiffResult<Self> {
        let framework = framework.into();
        if !context.has_framework(&framework) {
            return Err(DiffError::UnknownFramework(framework));
        }
        Ok(Self::Framework { context, framework })
    }

    pub fn for_package(
        context: &'a AvailabilityContext<'a>,
        framework: impl Into<String>,
        package: impl Into<String>,
    ) -> DiffResult<Self> {
        let framework = framework.into();
        let package = package.into();
        if !context.has_framework(&framework) {
            return Err(DiffError::UnknownFramework(framework));
        }
        if !context.has_package(&package) {
            return Err(DiffError::UnknownPackage(package));
        }
        Ok(Self::Package {
            context,
            framework,
            package,
        })
    }

    /// The declaration of `api` in this context, if any.
    pub fn resolve(&self, api: &ApiNode) -> Option<&'a Declaration> {
        match self {
            Self::Null => None,
            Self::Framework { context, framework } => context
                .availability(api.id, framework)
                .map(|a| a.declaration),
            Self::Package {
                context,
                framework,
                package,
            } => context
                .package_availability(api.id, framework, package)
                .filter(|a| !a.is_in_box())
                .map(|a| a.declaration),
        }
    }
}

impl fmt::Display for DeclarationResolver<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("(none)"),
            Self::Framework { framework, .. } => f.write_str(framework),
            Self::Package {
                framework, package, ..
            } => write!(f, "{package} ({framework})"),
        }
    }
}

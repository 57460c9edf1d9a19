//! Allow-list / deny-list summary over all platforms.
//!
//! Facts are grouped per platform (case-insensitively). Before ranges are
//! built, every fact about a platform is copied onto the platforms it
//! implies, so an explicit statement about an implied platform either
//! agrees with the copy (and is redundant) or contradicts it (and both
//! cancel). Platforms whose range ends up empty are not listed.

use std::collections::BTreeMap;
use std::fmt;

use apicat_types::Version;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::fact::{PlatformFact, PlatformImplications};
use crate::names::display_name;
use crate::range::{PlatformSupportRange, VersionPoint};

/// Overall shape of a platform annotation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlatformAnnotationKind {
    /// No platform facts: supported everywhere.
    Unrestricted,
    /// Supported only on the listed platforms.
    AllowList,
    /// Supported everywhere except the listed platforms.
    DenyList,
}

/// One listed platform and its support timeline.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct PlatformSupport {
    /// Lower-cased platform identifier.
    pub platform: String,
    pub range: PlatformSupportRange,
}

impl PlatformSupport {
    pub fn display_name(&self) -> String {
        display_name(&self.platform)
    }
}

impl fmt::Display for PlatformSupport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.range.covers_all_versions() {
            write!(f, "{}", self.display_name())
        } else {
            write!(f, "{} {}", self.display_name(), self.range)
        }
    }
}

/// Platform support of one API under one framework.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct PlatformAnnotation {
    kind: PlatformAnnotationKind,
    entries: Vec<PlatformSupport>,
}

impl PlatformAnnotation {
    /// An annotation with no restrictions.
    pub fn unrestricted() -> Self {
        Self {
            kind: PlatformAnnotationKind::Unrestricted,
            entries: Vec::new(),
        }
    }

    /// Build an annotation from raw facts.
    ///
    /// If any platform's range is an allow-list, the annotation is an
    /// allow-list over exactly those platforms. Otherwise any remaining
    /// range makes it a deny-list.
    pub fn build<I>(facts: I, implications: &PlatformImplications) -> Self
    where
        I: IntoIterator<Item = PlatformFact>,
    {
        let mut points: BTreeMap<String, Vec<VersionPoint>> = BTreeMap::new();
        for fact in facts {
            let point = fact.point();
            let key = fact.key();
            for implied in implications.implied_by(&key) {
                points
                    .entry(implied.to_ascii_lowercase())
                    .or_default()
                    .push(point);
            }
            points.entry(key).or_default().push(point);
        }

        let ranges: Vec<PlatformSupport> = points
            .into_iter()
            .map(|(platform, points)| PlatformSupport {
                platform,
                range: PlatformSupportRange::new(points),
            })
            .filter(|support| !support.range.is_empty())
            .collect();

        let (kind, mut entries) = if ranges.iter().any(|s| s.range.is_allow_list()) {
            let allowed: Vec<PlatformSupport> = ranges
                .into_iter()
                .filter(|s| s.range.is_allow_list())
                .collect();
            (PlatformAnnotationKind::AllowList, allowed)
        } else if !ranges.is_empty() {
            (PlatformAnnotationKind::DenyList, ranges)
        } else {
            (PlatformAnnotationKind::Unrestricted, Vec::new())
        };

        entries.sort_by_key(|s| s.display_name().to_lowercase());
        debug!(kind = ?kind, platforms = entries.len(), "built platform annotation");

        Self { kind, entries }
    }

    pub fn kind(&self) -> PlatformAnnotationKind {
        self.kind
    }

    /// Listed platforms, sorted by display name.
    pub fn entries(&self) -> &[PlatformSupport] {
        &self.entries
    }

    pub fn entry(&self, platform: &str) -> Option<&PlatformSupport> {
        self.entries
            .iter()
            .find(|s| s.platform.eq_ignore_ascii_case(platform))
    }

    /// Whether the API is supported on `platform` at `version`.
    pub fn is_supported(&self, platform: &str, version: &Version) -> bool {
        match self.kind {
            PlatformAnnotationKind::Unrestricted => true,
            PlatformAnnotationKind::AllowList => self
                .entry(platform)
                .is_some_and(|s| s.range.is_supported(version)),
            PlatformAnnotationKind::DenyList => self
                .entry(platform)
                .map_or(true, |s| s.range.is_supported(version)),
        }
    }
}

impl fmt::Display for PlatformAnnotation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let header = match self.kind {
            PlatformAnnotationKind::Unrestricted => {
                return f.write_str(
                    "For the selected framework the API is supported on any platform.",
                );
            }
            PlatformAnnotationKind::AllowList => {
                "For the selected framework the API is only supported on these platforms:"
            }
            PlatformAnnotationKind::DenyList => {
                "For the selected framework the API is supported on any platform except for:"
            }
        };

        f.write_str(header)?;
        for entry in &self.entries {
            write!(f, "\n- {entry}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn implied_catalyst() -> PlatformImplications {
        PlatformImplications::new().with("maccatalyst", "ios")
    }

    fn names(annotation: &PlatformAnnotation) -> Vec<String> {
        annotation
            .entries()
            .iter()
            .map(|e| e.display_name())
            .collect()
    }

    #[test]
    fn no_facts_is_unrestricted() {
        let a = PlatformAnnotation::build(Vec::new(), &implied_catalyst());
        assert_eq!(a.kind(), PlatformAnnotationKind::Unrestricted);
        assert_eq!(a, PlatformAnnotation::unrestricted());
        assert_eq!(
            a.to_string(),
            "For the selected framework the API is supported on any platform."
        );
        assert!(a.is_supported("ios", &Version::ZERO));
    }

    #[test]
    fn allow_list_includes_implied_platform() {
        let facts = vec![
            PlatformFact::supported("ios", None),
            PlatformFact::supported("tvos", None),
        ];
        let a = PlatformAnnotation::build(facts, &implied_catalyst());

        assert_eq!(a.kind(), PlatformAnnotationKind::AllowList);
        assert_eq!(names(&a), vec!["iOS", "Mac Catalyst", "tvOS"]);
        assert_eq!(
            a.to_string(),
            "For the selected framework the API is only supported on these platforms:\n\
             - iOS\n\
             - Mac Catalyst\n\
             - tvOS"
        );
    }

    #[test]
    fn allow_list_explicitly_unsupported_implied_platform_cancels() {
        let facts = vec![
            PlatformFact::supported("ios", None),
            PlatformFact::supported("tvos", None),
            PlatformFact::unsupported("maccatalyst", None),
        ];
        let a = PlatformAnnotation::build(facts, &implied_catalyst());

        assert_eq!(a.kind(), PlatformAnnotationKind::AllowList);
        assert_eq!(names(&a), vec!["iOS", "tvOS"]);
        assert!(!a.is_supported("maccatalyst", &Version::ZERO));
    }

    #[test]
    fn deny_list_includes_implied_platform() {
        let facts = vec![
            PlatformFact::unsupported("ios", None),
            PlatformFact::unsupported("tvos", None),
        ];
        let a = PlatformAnnotation::build(facts, &implied_catalyst());

        assert_eq!(a.kind(), PlatformAnnotationKind::DenyList);
        assert_eq!(names(&a), vec!["iOS", "Mac Catalyst", "tvOS"]);
        assert_eq!(
            a.to_string(),
            "For the selected framework the API is supported on any platform except for:\n\
             - iOS\n\
             - Mac Catalyst\n\
             - tvOS"
        );
    }

    #[test]
    fn deny_list_explicitly_supported_implied_platform_cancels() {
        let facts = vec![
            PlatformFact::supported("maccatalyst", None),
            PlatformFact::unsupported("ios", None),
            PlatformFact::unsupported("tvos", None),
        ];
        let a = PlatformAnnotation::build(facts, &implied_catalyst());

        assert_eq!(a.kind(), PlatformAnnotationKind::DenyList);
        assert_eq!(names(&a), vec!["iOS", "tvOS"]);
        assert!(a.is_supported("maccatalyst", &Version::ZERO));
        assert!(!a.is_supported("ios", &Version::ZERO));
        assert!(a.is_supported("linux", &Version::ZERO));
    }

    #[test]
    fn without_implications_only_stated_platforms_appear() {
        let facts = vec![PlatformFact::unsupported("ios", None)];
        let a = PlatformAnnotation::build(facts, &PlatformImplications::new());
        assert_eq!(names(&a), vec!["iOS"]);
    }

    #[test]
    fn allow_list_wins_over_deny_entries() {
        let facts = vec![
            PlatformFact::supported("windows", None),
            PlatformFact::unsupported("browser", None),
        ];
        let a = PlatformAnnotation::build(facts, &PlatformImplications::new());
        assert_eq!(a.kind(), PlatformAnnotationKind::AllowList);
        assert_eq!(names(&a), vec!["Windows"]);
        assert!(!a.is_supported("browser", &Version::ZERO));
        assert!(!a.is_supported("linux", &Version::ZERO));
    }

    #[test]
    fn versioned_entries_render_their_range() {
        let facts = vec![PlatformFact::supported("ios", Some(Version::new(13, 0, 0, 0)))];
        let a = PlatformAnnotation::build(facts, &implied_catalyst());
        assert_eq!(
            a.to_string(),
            "For the selected framework the API is only supported on these platforms:\n\
             - iOS >= 13\n\
             - Mac Catalyst >= 13"
        );
        assert!(!a.is_supported("ios", &Version::new(12, 0, 0, 0)));
        assert!(a.is_supported("ios", &Version::new(15, 0, 0, 0)));
    }

    #[test]
    fn platform_names_group_case_insensitively() {
        let facts = vec![
            PlatformFact::supported("IOS", None),
            PlatformFact::supported("ios", None),
        ];
        let a = PlatformAnnotation::build(facts, &PlatformImplications::new());
        assert_eq!(a.entries().len(), 1);
        assert_eq!(a.entries()[0].platform, "ios");
    }
}

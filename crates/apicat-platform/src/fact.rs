use std::fmt;

use apicat_types::Version;
use serde::{Deserialize, Serialize};

use crate::error::{PlatformError, PlatformResult};
use crate::range::VersionPoint;

/// A single support statement about one platform.
///
/// `version: None` means "from the first version on", i.e. version zero.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlatformFact {
    pub platform: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<Version>,
    pub supported: bool,
}

impl PlatformFact {
    pub fn supported(platform: impl Into<String>, version: Option<Version>) -> Self {
        Self {
            platform: platform.into(),
            version,
            supported: true,
        }
    }

    pub fn unsupported(platform: impl Into<String>, version: Option<Version>) -> Self {
        Self {
            platform: platform.into(),
            version,
            supported: false,
        }
    }

    /// Parse a platform specification such as `ios`, `ios13.0`, or
    /// `windows10.0.19041`.
    ///
    /// The name is everything before the first digit and is lower-cased.
    pub fn parse(spec: &str, supported: bool) -> PlatformResult<Self> {
        let spec = spec.trim();
        let split = spec
            .find(|c: char| c.is_ascii_digit())
            .unwrap_or(spec.len());
        let (name, version) = spec.split_at(split);

        if name.is_empty() {
            return Err(PlatformError::MissingName(spec.to_string()));
        }

        let version = if version.is_empty() {
            None
        } else {
            Some(version.parse::<Version>()?)
        };

        Ok(Self {
            platform: name.to_ascii_lowercase(),
            version,
            supported,
        })
    }

    /// Lower-cased platform name used for grouping.
    pub fn key(&self) -> String {
        self.platform.to_ascii_lowercase()
    }

    pub fn point(&self) -> VersionPoint {
        VersionPoint::new(self.version.unwrap_or(Version::ZERO), self.supported)
    }
}

impl fmt::Display for PlatformFact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = if self.supported { "supported" } else { "unsupported" };
        match &self.version {
            Some(v) => write!(f, "{}{} ({state})", self.platform, v),
            None => write!(f, "{} ({state})", self.platform),
        }
    }
}

/// "`platform` is implied by `implied_by`": every fact about `implied_by`
/// also holds for `platform` (Mac Catalyst runs iOS code).
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlatformImplication {
    pub platform: String,
    pub implied_by: String,
}

/// The set of implied-platform relationships known to a catalog.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlatformImplications {
    entries: Vec<PlatformImplication>,
}

impl PlatformImplications {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that `platform` is implied by `implied_by`.
    pub fn with(mut self, platform: impl Into<String>, implied_by: impl Into<String>) -> Self {
        self.insert(platform, implied_by);
        self
    }

    pub fn insert(&mut self, platform: impl Into<String>, implied_by: impl Into<String>) {
        let entry = PlatformImplication {
            platform: platform.into().to_ascii_lowercase(),
            implied_by: implied_by.into().to_ascii_lowercase(),
        };
        if !self.entries.contains(&entry) {
            self.entries.push(entry);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &PlatformImplication> {
        self.entries.iter()
    }

    /// Platforms implied by `platform` (not transitive).
    pub fn implied_by<'a>(&'a self, platform: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.entries
            .iter()
            .filter(move |e| e.implied_by.eq_ignore_ascii_case(platform))
            .map(|e| e.platform.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_bare_platform() {
        let fact = PlatformFact::parse("iOS", true).unwrap();
        assert_eq!(fact.platform, "ios");
        assert_eq!(fact.version, None);
        assert_eq!(fact.point(), VersionPoint::supported(Version::ZERO));
    }

    #[test]
    fn parse_versioned_platform() {
        let fact = PlatformFact::parse("windows10.0.19041", false).unwrap();
        assert_eq!(fact.platform, "windows");
        assert_eq!(fact.version, Some(Version::new(10, 0, 19041, 0)));
        assert!(!fact.supported);
    }

    #[test]
    fn parse_rejects_missing_name() {
        assert_eq!(
            PlatformFact::parse("13.0", true),
            Err(PlatformError::MissingName("13.0".into()))
        );
    }

    #[test]
    fn parse_rejects_bad_version() {
        assert!(matches!(
            PlatformFact::parse("ios13..0", true),
            Err(PlatformError::Version(_))
        ));
    }

    #[test]
    fn display() {
        let fact = PlatformFact::supported("ios", Some(Version::new(13, 0, 0, 0)));
        assert_eq!(fact.to_string(), "ios13 (supported)");
        assert_eq!(
            PlatformFact::unsupported("tvos", None).to_string(),
            "tvos (unsupported)"
        );
    }

    #[test]
    fn implications_lookup_is_case_insensitive() {
        let implications = PlatformImplications::new().with("MacCatalyst", "iOS");
        let implied: Vec<_> = implications.implied_by("ios").collect();
        assert_eq!(implied, vec!["maccatalyst"]);
        assert_eq!(implications.implied_by("tvos").count(), 0);
    }

    #[test]
    fn implications_deduplicate() {
        let mut implications = PlatformImplications::new();
        implications.insert("maccatalyst", "ios");
        implications.insert("maccatalyst", "IOS");
        assert_eq!(implications.iter().count(), 1);
    }
}

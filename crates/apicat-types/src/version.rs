use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::TypeError;

/// A four-component version number (`major.minor.build.revision`).
///
/// Missing components are zero, so `13.0` and `13.0.0.0` are the same
/// version. Ordering compares components left to right.
///
/// `Display` drops trailing zero components:
///
/// ```
/// use apicat_types::Version;
///
/// assert_eq!(Version::new(8, 0, 0, 0).to_string(), "8");
/// assert_eq!(Version::new(13, 1, 0, 0).to_string(), "13.1");
/// assert_eq!(Version::new(10, 0, 19041, 0).to_string(), "10.0.19041");
/// ```
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Version {
    pub major: u32,
    pub minor: u32,
    pub build: u32,
    pub revision: u32,
}

impl Version {
    /// `0.0.0.0`, the version before every other version.
    pub const ZERO: Version = Version::new(0, 0, 0, 0);

    pub const fn new(major: u32, minor: u32, build: u32, revision: u32) -> Self {
        Self {
            major,
            minor,
            build,
            revision,
        }
    }

    /// Returns `true` for `0.0.0.0`.
    pub fn is_zero(&self) -> bool {
        *self == Self::ZERO
    }
}

impl FromStr for Version {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = |reason: &str| TypeError::InvalidVersion {
            input: s.to_string(),
            reason: reason.to_string(),
        };

        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(invalid("version must not be empty"));
        }

        let mut parts = [0u32; 4];
        let mut count = 0;
        for component in trimmed.split('.') {
            if count == parts.len() {
                return Err(invalid("at most four components are allowed"));
            }
            parts[count] = component
                .parse()
                .map_err(|_| invalid("components must be non-negative integers"))?;
            count += 1;
        }

        Ok(Self::new(parts[0], parts[1], parts[2], parts[3]))
    }
}

impl TryFrom<String> for Version {
    type Error = TypeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Version> for String {
    fn from(version: Version) -> Self {
        version.to_string()
    }
}

impl fmt::Debug for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Version({}.{}.{}.{})",
            self.major, self.minor, self.build, self.revision
        )
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.revision != 0 {
            write!(
                f,
                "{}.{}.{}.{}",
                self.major, self.minor, self.build, self.revision
            )
        } else if self.build != 0 {
            write!(f, "{}.{}.{}", self.major, self.minor, self.build)
        } else if self.minor != 0 {
            write!(f, "{}.{}", self.major, self.minor)
        } else {
            write!(f, "{}", self.major)
        }
    }
}

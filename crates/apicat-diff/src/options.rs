use std::path::Path;

use apicat_types::DiffKind;
use serde::{Deserialize, Serialize};

use crate::error::{DiffError, DiffResult};

/// Which node classifications a diff keeps.
///
/// Every field defaults to `true`, so a partial TOML file only needs to name
/// what it turns off:
///
/// ```toml
/// include_changed = false
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiffOptions {
    /// Keep APIs that only the new side has.
    pub include_added: bool,
    /// Keep APIs that only the old side has.
    pub include_removed: bool,
    /// Keep APIs whose declarations differ.
    pub include_changed: bool,
}

impl Default for DiffOptions {
    fn default() -> Self {
        Self {
            include_added: true,
            include_removed: true,
            include_changed: true,
        }
    }
}

impl DiffOptions {
    /// Whether a node classified as `kind` is kept.
    ///
    /// Unchanged nodes are always eligible; pruning decides whether they
    /// appear.
    pub fn includes(&self, kind: DiffKind) -> bool {
        match kind {
            DiffKind::Unchanged => true,
            DiffKind::Added => self.include_added,
            DiffKind::Removed => self.include_removed,
            DiffKind::Changed => self.include_changed,
        }
    }

    pub fn from_toml_str(text: &str) -> DiffResult<Self> {
        toml::from_str(text).map_err(|e| DiffError::Config(e.to_string()))
    }

    pub fn to_toml_string(&self) -> DiffResult<String> {
        toml::to_string(self).map_err(|e| DiffError::Config(e.to_string()))
    }

    /// Load options from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> DiffResult<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }
}

use std::fmt;

use serde::{Deserialize, Serialize};

/// How a node or token differs between the old and new side of a diff.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DiffKind {
    #[default]
    Unchanged,
    Added,
    Removed,
    Changed,
}

impl DiffKind {
    /// Returns `true` for every kind except `Unchanged`.
    pub fn is_change(&self) -> bool {
        !matches!(self, Self::Unchanged)
    }

    /// Single-character marker used by text renderers.
    pub fn marker(&self) -> char {
        match self {
            Self::Unchanged => ' ',
            Self::Added => '+',
            Self::Removed => '-',
            Self::Changed => '~',
        }
    }
}

impl fmt::Display for DiffKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Unchanged => "unchanged",
            Self::Added => "added",
            Self::Removed => "removed",
            Self::Changed => "changed",
        };
        f.write_str(s)
    }
}

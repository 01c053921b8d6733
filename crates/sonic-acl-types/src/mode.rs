//! Reconciliation mode.

use crate::ParseError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How the desired configuration is applied to the current one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReconcileMode {
    /// Additive merge; current line numbers are carried onto desired entries.
    #[default]
    Merged,
    /// Replace the content of every ACL named in the desired state.
    Replaced,
    /// Replace the entire ACL state; unnamed ACLs are removed.
    Overridden,
    /// Remove the named ACLs, or every ACL when none is named.
    Deleted,
    /// Render the desired state against an empty device.
    Rendered,
}

impl ReconcileMode {
    /// Returns true for modes that recompute line positions from scratch.
    ///
    /// Entries lose their explicit `line` before rendering, and the final
    /// command list is reordered so that removals run first.
    pub const fn recomputes_lines(&self) -> bool {
        matches!(self, Self::Replaced | Self::Overridden | Self::Deleted)
    }

    /// Returns true for modes that remove ACLs absent from the desired state.
    pub const fn removes_unlisted(&self) -> bool {
        matches!(self, Self::Overridden | Self::Deleted)
    }

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Merged => "merged",
            Self::Replaced => "replaced",
            Self::Overridden => "overridden",
            Self::Deleted => "deleted",
            Self::Rendered => "rendered",
        }
    }
}

impl fmt::Display for ReconcileMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReconcileMode {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "merged" => Ok(Self::Merged),
            "replaced" => Ok(Self::Replaced),
            "overridden" => Ok(Self::Overridden),
            "deleted" => Ok(Self::Deleted),
            "rendered" => Ok(Self::Rendered),
            _ => Err(ParseError::InvalidMode(s.to_string())),
        }
    }
}

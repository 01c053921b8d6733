//! ACL entity and ACL type.

use crate::ace::AceEntity;
use crate::ParseError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// ACL type as configured on the device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AclType {
    /// Destination-address only rules.
    Standard,
    /// Full five-tuple rules.
    Extended,
    /// Layer 2 EtherType rules.
    Ethertype,
}

impl AclType {
    /// Returns the keyword used in device commands.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Standard => "standard",
            Self::Extended => "extended",
            Self::Ethertype => "ethertype",
        }
    }
}

impl fmt::Display for AclType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AclType {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "standard" => Ok(Self::Standard),
            "extended" => Ok(Self::Extended),
            "ethertype" => Ok(Self::Ethertype),
            _ => Err(ParseError::InvalidAclType(s.to_string())),
        }
    }
}

/// A named access control list.
///
/// The name is the identity of the ACL within one state snapshot. An entity
/// with an empty name and no entries stands in for "absent" on either side
/// of a comparison.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AclEntity {
    /// ACL name.
    #[serde(default)]
    pub name: String,

    /// ACL type.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub acl_type: Option<AclType>,

    /// New name to rename the ACL to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rename: Option<String>,

    /// Ordered entries.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub aces: Vec<AceEntity>,
}

impl AclEntity {
    /// Creates an ACL with no entries.
    pub fn new(name: impl Into<String>, acl_type: AclType) -> Self {
        Self {
            name: name.into(),
            acl_type: Some(acl_type),
            rename: None,
            aces: Vec::new(),
        }
    }

    /// Appends an entry, builder style.
    pub fn with_ace(mut self, ace: AceEntity) -> Self {
        self.aces.push(ace);
        self
    }

    /// Returns the rename target when one is set and non-empty.
    pub fn rename_target(&self) -> Option<&str> {
        self.rename.as_deref().filter(|r| !r.is_empty())
    }
}

/// Top-level document holding a list of ACLs.
///
/// This is the shape of both the desired configuration and the facts
/// gathered from the device: `{"acls": [...]}`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AclsConfig {
    #[serde(default)]
    pub acls: Vec<AclEntity>,
}

impl From<Vec<AclEntity>> for AclsConfig {
    fn from(acls: Vec<AclEntity>) -> Self {
        Self { acls }
    }
}

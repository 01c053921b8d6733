//! Access control entry types.

use crate::endpoint::Endpoint;
use crate::ParseError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Action of an entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Grant {
    Permit,
    Deny,
}

impl fmt::Display for Grant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Permit => write!(f, "permit"),
            Self::Deny => write!(f, "deny"),
        }
    }
}

impl FromStr for Grant {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "permit" => Ok(Self::Permit),
            "deny" => Ok(Self::Deny),
            _ => Err(ParseError::InvalidGrant(s.to_string())),
        }
    }
}

/// Value of a single protocol options key.
///
/// Either a plain flag (`tcp: true`) or a set of named option flags
/// (`icmp: {echo: true, echo_reply: true}`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ProtocolOption {
    Enabled(bool),
    Flags(BTreeMap<String, bool>),
}

/// Protocol options keyed by protocol name.
///
/// Ordered so that rendering is deterministic.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProtocolOptions(BTreeMap<String, ProtocolOption>);

impl ProtocolOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enables a bare protocol (e.g. `tcp: true`).
    pub fn with_protocol(mut self, protocol: impl Into<String>) -> Self {
        self.0.insert(protocol.into(), ProtocolOption::Enabled(true));
        self
    }

    /// Enables an option flag under a protocol (e.g. `icmp: {echo: true}`).
    pub fn with_flag(mut self, protocol: impl Into<String>, flag: impl Into<String>) -> Self {
        let entry = self
            .0
            .entry(protocol.into())
            .or_insert_with(|| ProtocolOption::Flags(BTreeMap::new()));
        if let ProtocolOption::Enabled(_) = entry {
            *entry = ProtocolOption::Flags(BTreeMap::new());
        }
        if let ProtocolOption::Flags(flags) = entry {
            flags.insert(flag.into(), true);
        }
        self
    }

    /// Returns the first protocol that is enabled or carries flags.
    pub fn protocol(&self) -> Option<&str> {
        self.0
            .iter()
            .find(|(_, opt)| !matches!(opt, ProtocolOption::Enabled(false)))
            .map(|(name, _)| name.as_str())
    }

    /// Returns the enabled option flags across all protocols, in key order.
    pub fn flags(&self) -> impl Iterator<Item = &str> {
        self.0.values().flat_map(|opt| match opt {
            ProtocolOption::Flags(flags) => flags
                .iter()
                .filter(|(_, on)| **on)
                .map(|(flag, _)| flag.as_str())
                .collect::<Vec<_>>(),
            ProtocolOption::Enabled(_) => Vec::new(),
        })
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// A single access control entry.
///
/// `line` is the 1-based position of the entry within its ACL on the
/// device. A desired entry without `line` means "position unspecified".
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AceEntity {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grant: Option<Grant>,

    /// Free-form remark; a remark entry carries no match fields.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remark: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub protocol: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub protocol_options: Option<ProtocolOptions>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<Endpoint>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub destination: Option<Endpoint>,

    /// Log level or interval (e.g. `default`, `7 interval 300`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_range: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inactive: Option<bool>,
}

impl AceEntity {
    /// Creates a permit/deny entry for a protocol between two endpoints.
    pub fn new(grant: Grant, protocol: impl Into<String>, source: Endpoint, destination: Endpoint) -> Self {
        Self {
            grant: Some(grant),
            protocol: Some(protocol.into()),
            source: Some(source),
            destination: Some(destination),
            ..Self::default()
        }
    }

    /// Creates a remark entry.
    pub fn remark(text: impl Into<String>) -> Self {
        Self {
            remark: Some(text.into()),
            ..Self::default()
        }
    }

    /// Sets the line, builder style.
    pub fn at_line(mut self, line: u32) -> Self {
        self.line = Some(line);
        self
    }

    /// Compares two entries ignoring their line positions.
    pub fn same_content(&self, other: &AceEntity) -> bool {
        let strip = |ace: &AceEntity| AceEntity {
            line: None,
            ..ace.clone()
        };
        strip(self) == strip(other)
    }
}

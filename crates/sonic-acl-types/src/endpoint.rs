//! Source and destination match of an access control entry.

use serde::{Deserialize, Serialize};

/// Port range for `range <start> <end>` matches.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortRange {
    pub start: String,
    pub end: String,
}

/// Port operator applied after an endpoint address.
///
/// At most one operator is expected to be set.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PortProtocol {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub eq: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gt: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lt: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub neq: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub range: Option<PortRange>,
}

impl PortProtocol {
    pub fn port_eq(port: impl Into<String>) -> Self {
        Self {
            eq: Some(port.into()),
            ..Self::default()
        }
    }

    pub fn range(start: impl Into<String>, end: impl Into<String>) -> Self {
        Self {
            range: Some(PortRange {
                start: start.into(),
                end: end.into(),
            }),
            ..Self::default()
        }
    }
}

/// Address part of an entry.
///
/// Exactly one addressing form is expected: `any`/`any4`/`any6`, `host`,
/// `address` with `netmask`, `ipv6_address` prefix, `object_group` or
/// `interface`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Endpoint {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub any: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub any4: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub any6: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub netmask: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ipv6_address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub object_group: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interface: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub port_protocol: Option<PortProtocol>,
}

impl Endpoint {
    pub fn any() -> Self {
        Self {
            any: Some(true),
            ..Self::default()
        }
    }

    pub fn any4() -> Self {
        Self {
            any4: Some(true),
            ..Self::default()
        }
    }

    pub fn host(host: impl Into<String>) -> Self {
        Self {
            host: Some(host.into()),
            ..Self::default()
        }
    }

    pub fn network(address: impl Into<String>, netmask: impl Into<String>) -> Self {
        Self {
            address: Some(address.into()),
            netmask: Some(netmask.into()),
            ..Self::default()
        }
    }

    pub fn object_group(name: impl Into<String>) -> Self {
        Self {
            object_group: Some(name.into()),
            ..Self::default()
        }
    }

    /// Attaches a port operator, builder style.
    pub fn with_port(mut self, port: PortProtocol) -> Self {
        self.port_protocol = Some(port);
        self
    }
}

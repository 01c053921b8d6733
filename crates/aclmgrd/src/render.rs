//! Rendering of entries to device command lines.
//!
//! The comparator diffs rendered text, so a renderer must be deterministic
//! and produce byte-identical output for semantically identical entries.
//! Rendered lines are whitespace tokenizable with the ACL name as the
//! second token: `access-list <name> [line <n>] <rule text>`.

use sonic_acl_types::{AceEntity, AclEntity, AclType, Endpoint, PortProtocol};

use crate::error::{AclError, AclResult};

/// Keyword that introduces an explicit line clause.
pub const LINE_KEYWORD: &str = "line";

/// Renders entries to canonical command text.
pub trait CommandRenderer {
    /// Renders one entry of `acl` to a single command line.
    ///
    /// Only the ACL's `name` and `acl_type` are consulted.
    fn render(&self, acl: &AclEntity, ace: &AceEntity) -> AclResult<String>;

    /// Returns true if `command` already carries a line clause.
    fn has_line_clause(&self, command: &str) -> bool {
        command.split(' ').nth(2) == Some(LINE_KEYWORD)
    }

    /// Inserts `line <n>` after the ACL name of `command`.
    fn with_line(&self, command: &str, line: usize) -> String {
        let mut tokens = command.splitn(3, ' ');
        let keyword = tokens.next().unwrap_or_default();
        let name = tokens.next().unwrap_or_default();
        let rest = tokens.next().unwrap_or_default();
        format!("{keyword} {name} {LINE_KEYWORD} {line} {rest}")
    }
}

/// Renderer for the ASA `access-list` grammar.
///
/// ```text
/// access-list <name> [line <n>] remark <text>
/// access-list <name> [line <n>] standard <grant> <source>
/// access-list <name> [line <n>] ethertype <grant> <protocol>
/// access-list <name> [line <n>] extended <grant> <protocol> <source> <destination>
///     [<option flags>] [log <level>] [time-range <name>] [inactive]
/// ```
///
/// For ethertype ACLs the protocol token carries the EtherType keyword or
/// hex value (`bpdu`, `mpls-unicast`, `0x8847`).
#[derive(Debug, Clone, Copy, Default)]
pub struct AsaRenderer;

impl AsaRenderer {
    fn push_endpoint(tokens: &mut Vec<String>, endpoint: &Endpoint) {
        if let (Some(address), Some(netmask)) = (&endpoint.address, &endpoint.netmask) {
            tokens.push(address.clone());
            tokens.push(netmask.clone());
        } else if endpoint.any == Some(true) {
            tokens.push("any".to_string());
        } else if endpoint.any4 == Some(true) {
            tokens.push("any4".to_string());
        } else if endpoint.any6 == Some(true) {
            tokens.push("any6".to_string());
        } else if let Some(host) = &endpoint.host {
            tokens.push("host".to_string());
            tokens.push(host.clone());
        } else if let Some(interface) = &endpoint.interface {
            tokens.push("interface".to_string());
            tokens.push(interface.clone());
        } else if let Some(group) = &endpoint.object_group {
            tokens.push("object-group".to_string());
            tokens.push(group.clone());
        } else if let Some(prefix) = &endpoint.ipv6_address {
            tokens.push(prefix.clone());
        }

        if let Some(port) = &endpoint.port_protocol {
            Self::push_port(tokens, port);
        }
    }

    fn push_port(tokens: &mut Vec<String>, port: &PortProtocol) {
        let single = [
            ("eq", &port.eq),
            ("gt", &port.gt),
            ("lt", &port.lt),
            ("neq", &port.neq),
        ];
        for (op, value) in single {
            if let Some(value) = value {
                tokens.push(op.to_string());
                tokens.push(value.clone());
            }
        }
        if let Some(range) = &port.range {
            tokens.push("range".to_string());
            tokens.push(range.start.clone());
            tokens.push(range.end.clone());
        }
    }

    fn protocol_token(acl: &AclEntity, ace: &AceEntity) -> AclResult<String> {
        ace.protocol
            .as_deref()
            .filter(|p| !p.is_empty())
            .or_else(|| ace.protocol_options.as_ref().and_then(|o| o.protocol()))
            .map(str::to_string)
            .ok_or_else(|| AclError::render(&acl.name, "entry has no protocol"))
    }
}

impl CommandRenderer for AsaRenderer {
    fn render(&self, acl: &AclEntity, ace: &AceEntity) -> AclResult<String> {
        if acl.name.is_empty() {
            return Err(AclError::render("<unnamed>", "ACL has no name"));
        }

        let mut tokens = vec!["access-list".to_string(), acl.name.clone()];
        if let Some(line) = ace.line {
            tokens.push(LINE_KEYWORD.to_string());
            tokens.push(line.to_string());
        }

        if let Some(remark) = &ace.remark {
            tokens.push("remark".to_string());
            tokens.push(remark.clone());
            return Ok(tokens.join(" "));
        }

        let acl_type = acl
            .acl_type
            .ok_or_else(|| AclError::render(&acl.name, "ACL has no acl_type"))?;
        let grant = ace
            .grant
            .ok_or_else(|| AclError::render(&acl.name, "entry has no grant"))?;
        tokens.push(acl_type.to_string());
        tokens.push(grant.to_string());

        match acl_type {
            AclType::Standard => {
                let source = ace
                    .source
                    .as_ref()
                    .ok_or_else(|| AclError::render(&acl.name, "standard entry has no source"))?;
                Self::push_endpoint(&mut tokens, source);
            }
            AclType::Ethertype => {
                tokens.push(Self::protocol_token(acl, ace)?);
            }
            AclType::Extended => {
                tokens.push(Self::protocol_token(acl, ace)?);

                let source = ace
                    .source
                    .as_ref()
                    .ok_or_else(|| AclError::render(&acl.name, "entry has no source"))?;
                Self::push_endpoint(&mut tokens, source);

                let destination = ace
                    .destination
                    .as_ref()
                    .ok_or_else(|| AclError::render(&acl.name, "extended entry has no destination"))?;
                Self::push_endpoint(&mut tokens, destination);

                if let Some(options) = &ace.protocol_options {
                    tokens.extend(options.flags().map(str::to_string));
                }
            }
        }

        if let Some(log) = &ace.log {
            tokens.push("log".to_string());
            tokens.push(log.clone());
        }
        if let Some(time_range) = &ace.time_range {
            tokens.push("time-range".to_string());
            tokens.push(time_range.clone());
        }
        if ace.inactive == Some(true) {
            tokens.push("inactive".to_string());
        }

        Ok(tokens.join(" "))
    }
}

//! Protocol discriminator normalization.
//!
//! Devices report an entry's protocol both as `protocol` and as a
//! `protocol_options` key, while users usually declare only one of the two.
//! Before comparing, the redundant half is dropped from the current entry
//! so that an omitted discriminator does not show up as a change.

use sonic_acl_types::AceEntity;
use tracing::debug;

use crate::index::AclMap;

fn has_protocol(ace: &AceEntity) -> bool {
    ace.protocol.as_deref().is_some_and(|p| !p.is_empty())
}

fn has_protocol_options(ace: &AceEntity) -> bool {
    ace.protocol_options.as_ref().is_some_and(|o| !o.is_empty())
}

/// Drops redundant protocol discriminators from `haved` entries.
///
/// For each desired entry, the current entries of the same ACL are scanned
/// for one with equal source and destination. If the protocols agree and
/// only the current entry carries options, its options are cleared. If the
/// options agree and only the current entry carries a protocol, its
/// protocol is cleared. Scanning for a desired entry stops at the first
/// current entry that was modified.
pub fn normalize_protocols(wantd: &AclMap, haved: &mut AclMap) {
    for (name, want) in wantd {
        let Some(have) = haved.get_mut(name) else {
            continue;
        };

        for each in &want.aces {
            for e_have in have.aces.iter_mut() {
                if e_have.source != each.source || e_have.destination != each.destination {
                    continue;
                }

                if each.protocol == e_have.protocol {
                    if !has_protocol_options(each) && has_protocol_options(e_have) {
                        debug!("ACL {}: dropping protocol options from current entry", name);
                        e_have.protocol_options = None;
                        break;
                    }
                } else if each.protocol_options == e_have.protocol_options
                    && !has_protocol(each)
                    && has_protocol(e_have)
                {
                    debug!("ACL {}: dropping protocol from current entry", name);
                    e_have.protocol = None;
                    break;
                }
            }
        }
    }
}

//! Desired-over-current state merging.

use sonic_acl_types::AclEntity;
use tracing::debug;

use crate::index::AclMap;

/// Merges desired ACL state on top of current ACL state.
///
/// Rules:
/// 1. ACLs present only in current state are kept as-is
/// 2. ACLs present only in desired state are added
/// 3. For ACLs in both, desired scalar fields override current ones and
///    desired entries are appended after the current entries, skipping any
///    entry already present in current state
///
/// # Returns
/// Merged state, current ACLs first in their original order
pub fn merge_state(haved: &AclMap, wantd: &AclMap) -> AclMap {
    let mut merged = AclMap::with_capacity(haved.len() + wantd.len());

    for (name, have) in haved {
        match wantd.get(name) {
            Some(want) => {
                merged.insert(name.clone(), merge_acl(have, want));
            }
            None => {
                merged.insert(name.clone(), have.clone());
            }
        }
    }

    for (name, want) in wantd {
        if !haved.contains_key(name) {
            debug!("Adding desired-only ACL {}", name);
            merged.insert(name.clone(), want.clone());
        }
    }

    merged
}

/// Merges one desired ACL on top of its current counterpart.
fn merge_acl(have: &AclEntity, want: &AclEntity) -> AclEntity {
    let mut aces = have.aces.clone();
    let before = aces.len();
    for ace in &want.aces {
        if !aces.contains(ace) {
            aces.push(ace.clone());
        }
    }

    debug!(
        "Merged ACL {}: {} current entries + {} new desired entries",
        have.name,
        before,
        aces.len() - before
    );

    AclEntity {
        name: if want.name.is_empty() {
            have.name.clone()
        } else {
            want.name.clone()
        },
        acl_type: want.acl_type.or(have.acl_type),
        rename: want.rename.clone().or_else(|| have.rename.clone()),
        aces,
    }
}

//! Mode-specific adjustment of desired and current state.
//!
//! Each reconciliation mode reshapes the name-indexed state before the
//! per-ACL comparison runs:
//!
//! | Mode | want | have |
//! |------|------|------|
//! | merged | current lines carried over, then merged over have | unchanged |
//! | replaced | unchanged | unchanged |
//! | overridden | unchanged | unchanged |
//! | deleted | emptied | narrowed to named ACLs (all if none named) |
//! | rendered | unchanged | emptied |

use sonic_acl_types::ReconcileMode;
use tracing::debug;

use crate::index::AclMap;
use crate::merge::merge_state;

/// Desired and current state after mode-specific adjustment.
#[derive(Debug, Clone, Default)]
pub struct ResolvedState {
    pub wantd: AclMap,
    pub haved: AclMap,
}

/// Applies the transform for `mode` to owned copies of the state.
pub fn resolve(mode: ReconcileMode, mut wantd: AclMap, haved: AclMap) -> ResolvedState {
    match mode {
        ReconcileMode::Merged => {
            carry_over_lines(&mut wantd, &haved);
            let wantd = merge_state(&haved, &wantd);
            ResolvedState { wantd, haved }
        }
        ReconcileMode::Deleted => {
            let haved = narrow_to_named(haved, &wantd);
            ResolvedState {
                wantd: AclMap::new(),
                haved,
            }
        }
        ReconcileMode::Rendered => ResolvedState {
            wantd,
            haved: AclMap::new(),
        },
        ReconcileMode::Replaced | ReconcileMode::Overridden => ResolvedState { wantd, haved },
    }
}

/// Copies current line numbers onto desired entries that omit one.
///
/// A desired entry without `line` takes the line of the first current entry
/// of the same ACL whose content, ignoring line, is identical. A current
/// entry can lend its line only once.
pub fn carry_over_lines(wantd: &mut AclMap, haved: &AclMap) {
    for (name, want) in wantd.iter_mut() {
        let Some(have) = haved.get(name) else {
            continue;
        };

        // Lines still available for matching, one slot per current entry.
        let mut available: Vec<Option<u32>> = have.aces.iter().map(|ace| ace.line).collect();

        for each in want.aces.iter_mut().filter(|ace| ace.line.is_none()) {
            let found = have
                .aces
                .iter()
                .zip(available.iter_mut())
                .find(|(have_ace, slot)| slot.is_some() && each.same_content(have_ace));

            if let Some((_, slot)) = found {
                each.line = slot.take();
                debug!("ACL {}: carried line {:?} onto desired entry", name, each.line);
            }
        }
    }
}

/// Keeps only current ACLs that the desired state names.
///
/// An empty desired state names nothing and means "every ACL".
fn narrow_to_named(haved: AclMap, wantd: &AclMap) -> AclMap {
    if wantd.is_empty() {
        return haved;
    }
    haved
        .into_iter()
        .filter(|(name, _)| wantd.contains_key(name))
        .collect()
}

//! Deployment ordering of the generated command list.

use sonic_acl_types::ReconcileMode;

use crate::compare::NO_PREFIX;

/// Reorders `commands` for deployment.
///
/// In replaced, overridden and deleted modes every removal runs before any
/// addition, and removals run in reverse order so that deleting a line near
/// the top of an ACL does not shift the recorded line of a removal still
/// pending further down. Merged and rendered output is returned unchanged.
pub fn sequence_commands(mode: ReconcileMode, commands: Vec<String>) -> Vec<String> {
    if !mode.recomputes_lines() {
        return commands;
    }

    let (mut removals, others): (Vec<String>, Vec<String>) = commands
        .into_iter()
        .partition(|cmd| cmd.starts_with(NO_PREFIX));
    removals.reverse();
    removals.extend(others);
    removals
}

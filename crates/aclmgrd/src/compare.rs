//! Line-aware comparison of one ACL.
//!
//! Both sides of an ACL are rendered to command text and diffed line by
//! line. Removals and additions are then numbered in two separate passes:
//! removals against the current (old) ordering and additions against the
//! desired (new) ordering. The two frames of reference differ, so each
//! pass keeps its own counter.

use similar::{capture_diff_slices, Algorithm, ChangeTag};
use sonic_acl_types::{AclEntity, ReconcileMode};
use tracing::debug;

use crate::error::AclResult;
use crate::render::CommandRenderer;

/// Prefix of removal commands.
pub const NO_PREFIX: &str = "no ";

/// One line of a have/want diff.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiffLine<'a> {
    Unchanged(&'a str),
    Removed(&'a str),
    Added(&'a str),
}

/// Compares ACL entries and appends the resulting commands.
pub struct AclComparator<'r, R: CommandRenderer + ?Sized> {
    renderer: &'r R,
    mode: ReconcileMode,
}

impl<'r, R: CommandRenderer + ?Sized> AclComparator<'r, R> {
    pub fn new(renderer: &'r R, mode: ReconcileMode) -> Self {
        Self { renderer, mode }
    }

    /// Renders every entry of `acl` in order.
    ///
    /// In modes that recompute positions, explicit lines are dropped first.
    pub fn render_entries(&self, acl: &AclEntity) -> AclResult<Vec<String>> {
        acl.aces
            .iter()
            .map(|ace| {
                if self.mode.recomputes_lines() && ace.line.is_some() {
                    let mut ace = ace.clone();
                    ace.line = None;
                    self.renderer.render(acl, &ace)
                } else {
                    self.renderer.render(acl, ace)
                }
            })
            .collect()
    }

    /// Compares `want` against `have` and appends commands to `commands`.
    ///
    /// Either side may be an empty entity, which yields pure additions or
    /// pure removals.
    pub fn compare(
        &self,
        want: &AclEntity,
        have: &AclEntity,
        commands: &mut Vec<String>,
    ) -> AclResult<()> {
        let want_cmds = self.render_entries(want)?;
        let have_cmds = self.render_entries(have)?;
        let diff = diff_lines(&have_cmds, &want_cmds);

        let before = commands.len();
        self.push_removals(&diff, commands);
        self.push_additions(&diff, commands);

        debug!(
            "Compared ACL {}: {} current, {} desired, {} commands",
            if want.name.is_empty() { &have.name } else { &want.name },
            have_cmds.len(),
            want_cmds.len(),
            commands.len() - before
        );
        Ok(())
    }

    fn push_removals(&self, diff: &[DiffLine<'_>], commands: &mut Vec<String>) {
        let mut line_no = 1;
        for line in diff {
            match line {
                DiffLine::Removed(text) => {
                    if self.renderer.has_line_clause(text) {
                        commands.push(format!("{NO_PREFIX}{text}"));
                    } else {
                        commands.push(format!("{NO_PREFIX}{}", self.renderer.with_line(text, line_no)));
                    }
                    line_no += 1;
                }
                DiffLine::Unchanged(_) => line_no += 1,
                DiffLine::Added(_) => {}
            }
        }
    }

    fn push_additions(&self, diff: &[DiffLine<'_>], commands: &mut Vec<String>) {
        let mut line_no = 1;
        for line in diff {
            match line {
                DiffLine::Added(text) => {
                    if self.renderer.has_line_clause(text) {
                        commands.push((*text).to_string());
                    } else {
                        commands.push(self.renderer.with_line(text, line_no));
                    }
                    line_no += 1;
                }
                DiffLine::Unchanged(_) => line_no += 1,
                DiffLine::Removed(_) => {}
            }
        }
    }
}

/// Computes a line diff from `old` to `new`.
pub fn diff_lines<'a>(old: &'a [String], new: &'a [String]) -> Vec<DiffLine<'a>> {
    let old: Vec<&'a str> = old.iter().map(String::as_str).collect();
    let new: Vec<&'a str> = new.iter().map(String::as_str).collect();

    let mut lines = Vec::with_capacity(old.len().max(new.len()));
    for op in capture_diff_slices(Algorithm::Myers, &old, &new) {
        for change in op.iter_changes(&old, &new) {
            let text: &'a str = change.value();
            lines.push(match change.tag() {
                ChangeTag::Equal => DiffLine::Unchanged(text),
                ChangeTag::Delete => DiffLine::Removed(text),
                ChangeTag::Insert => DiffLine::Added(text),
            });
        }
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::AsaRenderer;
    use pretty_assertions::assert_eq;
    use sonic_acl_types::{AceEntity, AclType, Endpoint, Grant};

    fn ace(host: &str) -> AceEntity {
        AceEntity::new(Grant::Permit, "ip", Endpoint::host(host), Endpoint::any())
    }

    fn acl(hosts: &[&str]) -> AclEntity {
        hosts
            .iter()
            .fold(AclEntity::new("test_acl", AclType::Extended), |acl, h| acl.with_ace(ace(h)))
    }

    fn run(mode: ReconcileMode, want: &AclEntity, have: &AclEntity) -> Vec<String> {
        let mut commands = Vec::new();
        AclComparator::new(&AsaRenderer, mode)
            .compare(want, have, &mut commands)
            .unwrap();
        commands
    }

    #[test]
    fn test_identical_yields_nothing() {
        let a = acl(&["192.0.2.1", "192.0.2.2"]);
        assert!(run(ReconcileMode::Replaced, &a, &a).is_empty());
        assert!(run(ReconcileMode::Merged, &a, &a).is_empty());
    }

    #[test]
    fn test_pure_additions_numbered_by_position() {
        let want = acl(&["192.0.2.1", "192.0.2.2"]);
        assert_eq!(
            run(ReconcileMode::Replaced, &want, &AclEntity::default()),
            vec![
                "access-list test_acl line 1 extended permit ip host 192.0.2.1 any",
                "access-list test_acl line 2 extended permit ip host 192.0.2.2 any",
            ]
        );
    }

    #[test]
    fn test_pure_removals_numbered_by_position() {
        let have = acl(&["192.0.2.1", "192.0.2.2"]);
        assert_eq!(
            run(ReconcileMode::Overridden, &AclEntity::default(), &have),
            vec![
                "no access-list test_acl line 1 extended permit ip host 192.0.2.1 any",
                "no access-list test_acl line 2 extended permit ip host 192.0.2.2 any",
            ]
        );
    }

    #[test]
    fn test_insert_in_middle_uses_new_position() {
        let have = acl(&["192.0.2.1", "192.0.2.3"]);
        let want = acl(&["192.0.2.1", "192.0.2.2", "192.0.2.3"]);
        assert_eq!(
            run(ReconcileMode::Replaced, &want, &have),
            vec!["access-list test_acl line 2 extended permit ip host 192.0.2.2 any"]
        );
    }

    #[test]
    fn test_replace_numbers_each_side_independently() {
        let have = acl(&["192.0.2.1", "192.0.2.2", "192.0.2.3"]);
        let want = acl(&["192.0.2.1", "192.0.2.9", "192.0.2.3", "192.0.2.4"]);
        assert_eq!(
            run(ReconcileMode::Replaced, &want, &have),
            vec![
                "no access-list test_acl line 2 extended permit ip host 192.0.2.2 any",
                "access-list test_acl line 2 extended permit ip host 192.0.2.9 any",
                "access-list test_acl line 4 extended permit ip host 192.0.2.4 any",
            ]
        );
    }

    #[test]
    fn test_explicit_line_kept_verbatim_in_merged() {
        let have = AclEntity::new("test_acl", AclType::Extended).with_ace(ace("192.0.2.1").at_line(1));
        let want = have.clone().with_ace(ace("192.0.2.5").at_line(1));
        assert_eq!(
            run(ReconcileMode::Merged, &want, &have),
            vec!["access-list test_acl line 1 extended permit ip host 192.0.2.5 any"]
        );
    }

    #[test]
    fn test_numbered_removal_kept_verbatim_in_merged() {
        let have = AclEntity::new("test_acl", AclType::Extended).with_ace(ace("192.0.2.1").at_line(3));
        assert_eq!(
            run(ReconcileMode::Merged, &AclEntity::default(), &have),
            vec!["no access-list test_acl line 3 extended permit ip host 192.0.2.1 any"]
        );
    }

    #[test]
    fn test_explicit_lines_stripped_in_replaced() {
        let have = AclEntity::new("test_acl", AclType::Extended).with_ace(ace("192.0.2.1").at_line(7));
        let want = AclEntity::new("test_acl", AclType::Extended).with_ace(ace("192.0.2.1"));
        assert!(run(ReconcileMode::Replaced, &want, &have).is_empty());
    }

    #[test]
    fn test_render_failure_propagates() {
        let bad = AclEntity::new("test_acl", AclType::Extended).with_ace(AceEntity::default());
        let mut commands = Vec::new();
        let result = AclComparator::new(&AsaRenderer, ReconcileMode::Merged).compare(
            &bad,
            &AclEntity::default(),
            &mut commands,
        );
        assert!(result.is_err());
        assert!(commands.is_empty());
    }

    #[test]
    fn test_diff_lines_tags() {
        let old = vec!["a".to_string(), "b".to_string()];
        let new = vec!["b".to_string(), "c".to_string()];
        assert_eq!(
            diff_lines(&old, &new),
            vec![
                DiffLine::Removed("a"),
                DiffLine::Unchanged("b"),
                DiffLine::Added("c"),
            ]
        );
    }
}

//! AclReconciler - computes the command plan for one invocation.
//!
//! The reconciler owns the command buffer and both name-indexed state maps
//! for the duration of a single call:
//!
//! ```text
//! want ──┐                 ┌─> resolve ─> compare (per ACL) ─> sequence
//!        ├─> index ─> normalize
//! have ──┘
//! ```
//!
//! Nothing survives across calls; every invocation indexes fresh copies of
//! its inputs.

use serde::Serialize;
use sonic_acl_types::{AclEntity, ReconcileMode};
use std::collections::HashSet;
use tracing::{debug, info};

use crate::compare::AclComparator;
use crate::error::AclResult;
use crate::facts::FactsProvider;
use crate::index::index_by_name;
use crate::normalize::normalize_protocols;
use crate::render::{AsaRenderer, CommandRenderer};
use crate::resolve::resolve;
use crate::sequence::sequence_commands;

/// Outcome of one reconciliation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReconcileResult {
    /// Mode the plan was computed for.
    pub mode: ReconcileMode,
    /// True when at least one command was generated.
    pub changed: bool,
    /// Ordered device commands.
    pub commands: Vec<String>,
    /// Current state as gathered, before any change.
    pub before: Vec<AclEntity>,
}

/// Statistics for reconciler invocations.
#[derive(Debug, Clone, Default)]
pub struct ReconcilerStats {
    /// Number of invocations completed.
    pub runs: u64,
    /// Number of commands generated across all runs.
    pub commands_generated: u64,
    /// Number of invocations that failed.
    pub failures: u64,
}

/// Reconciles desired ACL state against current ACL state.
#[derive(Debug)]
pub struct AclReconciler<R: CommandRenderer = AsaRenderer> {
    renderer: R,
    stats: ReconcilerStats,
}

impl Default for AclReconciler<AsaRenderer> {
    fn default() -> Self {
        Self::new(AsaRenderer)
    }
}

impl<R: CommandRenderer> AclReconciler<R> {
    /// Creates a reconciler that renders entries with `renderer`.
    pub fn new(renderer: R) -> Self {
        Self {
            renderer,
            stats: ReconcilerStats::default(),
        }
    }

    /// Returns statistics.
    pub fn stats(&self) -> &ReconcilerStats {
        &self.stats
    }

    /// Computes the command plan with current state from `facts`.
    pub fn reconcile_with_facts(
        &mut self,
        mode: ReconcileMode,
        want: Vec<AclEntity>,
        facts: &dyn FactsProvider,
    ) -> AclResult<ReconcileResult> {
        debug!("Gathering ACL facts from {}", facts.source_name());
        let have = facts.acls()?;
        self.reconcile(mode, want, have)
    }

    /// Computes the command plan that turns `have` into `want`.
    ///
    /// Any rendering failure aborts the whole invocation; no partial
    /// command list is returned.
    pub fn reconcile(
        &mut self,
        mode: ReconcileMode,
        want: Vec<AclEntity>,
        have: Vec<AclEntity>,
    ) -> AclResult<ReconcileResult> {
        let before = have.clone();
        match self.generate(mode, want, have) {
            Ok(commands) => {
                self.stats.runs += 1;
                self.stats.commands_generated += commands.len() as u64;
                info!("Reconciled ACLs in {} mode: {} commands", mode, commands.len());
                Ok(ReconcileResult {
                    mode,
                    changed: !commands.is_empty(),
                    commands,
                    before,
                })
            }
            Err(e) => {
                self.stats.failures += 1;
                Err(e)
            }
        }
    }

    fn generate(
        &self,
        mode: ReconcileMode,
        want: Vec<AclEntity>,
        have: Vec<AclEntity>,
    ) -> AclResult<Vec<String>> {
        let wantd = index_by_name(want);
        let mut haved = index_by_name(have);
        debug!("Desired ACLs: {}, current ACLs: {}", wantd.len(), haved.len());

        normalize_protocols(&wantd, &mut haved);

        let resolved = resolve(mode, wantd, haved);
        let wantd = resolved.wantd;
        let mut haved = resolved.haved;

        let comparator = AclComparator::new(&self.renderer, mode);
        let mut commands = Vec::new();
        let absent = AclEntity::default();

        if mode.removes_unlisted() {
            for (name, have) in &haved {
                if !wantd.contains_key(name) {
                    debug!("Removing ACL {} absent from desired state", name);
                    comparator.compare(&absent, have, &mut commands)?;
                }
            }
        }

        let mut renamed: HashSet<&str> = HashSet::new();
        for (name, want) in &wantd {
            if let Some(target) = want.rename_target() {
                if renamed.insert(target) {
                    commands.push(format!("access-list {} rename {}", want.name, target));
                }
            }
            let have = haved.shift_remove(name).unwrap_or_default();
            comparator.compare(want, &have, &mut commands)?;
        }

        Ok(sequence_commands(mode, commands))
    }
}

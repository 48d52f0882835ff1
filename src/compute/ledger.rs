//! ledger.rs
//! Per-output lifecycle: Stale -> Computing -> Fresh, plus trigger sequencing.

use crate::chart::ChartSpec;
use crate::graph::RuleId;
use serde::Serialize;
use std::sync::Arc;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ComputeError {
    #[error("input '{control}' is missing from the snapshot")]
    MissingInput { control: String },
    #[error("input '{control}' is not a {expected}")]
    TypeMismatch { control: String, expected: &'static str },
    #[error("compute function panicked: {0}")]
    Panicked(String),
    #[error("{0}")]
    Failed(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum NodeState {
    Stale,
    Computing,
    Fresh,
}

/// Outcome of handing a finished computation back to the ledger.
#[derive(Debug, Clone, PartialEq)]
pub enum Commit {
    /// The output is now Fresh and shows this spec.
    Published(Arc<ChartSpec>),
    /// The output reverted to Stale; the previously displayed spec (if any) stays.
    Failed(ComputeError),
    /// A newer trigger owns the output, or the output was deactivated. Dropped.
    Superseded,
}

#[derive(Debug, Clone)]
struct Slot {
    active: bool,
    state: NodeState,
    /// Sequence number of the latest trigger that started a computation here.
    sequence: u64,
    displayed: Option<Arc<ChartSpec>>,
}

impl Default for Slot {
    fn default() -> Self {
        Self { active: false, state: NodeState::Stale, sequence: 0, displayed: None }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Ledger {
    // Dense storage indexed by RuleId
    slots: Vec<Slot>,
}

impl Ledger {
    pub fn new() -> Self { Self::default() }

    pub fn with_capacity(size: usize) -> Self {
        Self { slots: vec![Slot::default(); size] }
    }

    fn slot_mut(&mut self, id: RuleId) -> &mut Slot {
        let idx = id.index();
        if idx >= self.slots.len() {
            self.slots.resize(idx + 1, Slot::default());
        }
        &mut self.slots[idx]
    }

    pub fn is_active(&self, id: RuleId) -> bool {
        self.slots.get(id.index()).is_some_and(|s| s.active)
    }

    pub fn state(&self, id: RuleId) -> NodeState {
        self.slots.get(id.index()).map_or(NodeState::Stale, |s| s.state)
    }

    pub fn displayed(&self, id: RuleId) -> Option<&Arc<ChartSpec>> {
        self.slots.get(id.index())?.displayed.as_ref()
    }

    pub fn sequence(&self, id: RuleId) -> u64 {
        self.slots.get(id.index()).map_or(0, |s| s.sequence)
    }

    /// Makes the output live. It starts Stale with nothing displayed.
    pub fn activate(&mut self, id: RuleId) {
        let slot = self.slot_mut(id);
        slot.active = true;
        slot.state = NodeState::Stale;
        slot.displayed = None;
    }

    /// Stops the output and drops its displayed spec. The sequence number is
    /// kept so late completions of earlier triggers are still recognised as stale.
    pub fn deactivate(&mut self, id: RuleId) {
        let slot = self.slot_mut(id);
        slot.active = false;
        slot.state = NodeState::Stale;
        slot.displayed = None;
    }

    /// Stale/Fresh -> Computing for trigger `sequence`.
    /// Returns false (and changes nothing) for inactive outputs or outdated triggers.
    pub fn begin(&mut self, id: RuleId, sequence: u64) -> bool {
        let slot = self.slot_mut(id);
        if !slot.active || sequence < slot.sequence {
            return false;
        }
        slot.sequence = sequence;
        slot.state = NodeState::Computing;
        true
    }

    /// Computing -> Fresh on success, Computing -> Stale on failure.
    /// Completions older than the output's current trigger are discarded,
    /// whatever order they finish in.
    pub fn commit(&mut self, id: RuleId, sequence: u64, result: Result<ChartSpec, ComputeError>) -> Commit {
        let slot = self.slot_mut(id);
        if !slot.active || sequence < slot.sequence {
            return Commit::Superseded;
        }
        match result {
            Ok(spec) => {
                let spec = Arc::new(spec);
                slot.state = NodeState::Fresh;
                slot.displayed = Some(spec.clone());
                Commit::Published(spec)
            }
            Err(e) => {
                slot.state = NodeState::Stale;
                Commit::Failed(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::{ChartData, ChartKind, DisplayOptions};

    fn spec(title: &str) -> ChartSpec {
        ChartSpec {
            kind: ChartKind::Bar,
            title: title.into(),
            data: ChartData::Series { categories: vec!["A".into()], values: vec![1.0] },
            options: DisplayOptions::default(),
        }
    }

    #[test]
    fn test_lifecycle_stale_computing_fresh() {
        let r = RuleId(0);
        let mut ledger = Ledger::with_capacity(1);
        assert!(!ledger.begin(r, 1), "inactive outputs never compute");

        ledger.activate(r);
        assert_eq!(ledger.state(r), NodeState::Stale);
        assert!(ledger.begin(r, 1));
        assert_eq!(ledger.state(r), NodeState::Computing);

        assert!(matches!(ledger.commit(r, 1, Ok(spec("one"))), Commit::Published(_)));
        assert_eq!(ledger.state(r), NodeState::Fresh);
        assert_eq!(ledger.displayed(r).unwrap().title, "one");
    }

    #[test]
    fn test_failure_reverts_to_stale_and_keeps_previous_spec() {
        let r = RuleId(2);
        let mut ledger = Ledger::new();
        ledger.activate(r);
        ledger.begin(r, 1);
        ledger.commit(r, 1, Ok(spec("good")));

        ledger.begin(r, 2);
        let outcome = ledger.commit(r, 2, Err(ComputeError::Failed("boom".into())));
        assert_eq!(outcome, Commit::Failed(ComputeError::Failed("boom".into())));
        assert_eq!(ledger.state(r), NodeState::Stale);
        assert_eq!(ledger.displayed(r).unwrap().title, "good");
    }

    #[test]
    fn test_stale_completion_is_discarded_regardless_of_finish_order() {
        let r = RuleId(0);
        let mut ledger = Ledger::new();
        ledger.activate(r);
        assert!(ledger.begin(r, 5));
        assert!(ledger.begin(r, 6));

        // The newer trigger finishes first.
        assert!(matches!(ledger.commit(r, 6, Ok(spec("newer"))), Commit::Published(_)));
        assert_eq!(ledger.commit(r, 5, Ok(spec("older"))), Commit::Superseded);
        assert_eq!(ledger.displayed(r).unwrap().title, "newer");

        // An outdated trigger cannot even start.
        assert!(!ledger.begin(r, 4));
        assert_eq!(ledger.sequence(r), 6);
    }

    #[test]
    fn test_deactivation_drops_spec_and_late_results() {
        let r = RuleId(0);
        let mut ledger = Ledger::new();
        ledger.activate(r);
        ledger.begin(r, 1);
        ledger.deactivate(r);

        assert_eq!(ledger.commit(r, 1, Ok(spec("late"))), Commit::Superseded);
        assert!(ledger.displayed(r).is_none());
        assert_eq!(ledger.state(r), NodeState::Stale);
        assert!(!ledger.is_active(r));
    }
}

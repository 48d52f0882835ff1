//! dag.rs
//! Wraps the low-level RuleStorage with the lookups the dispatcher needs.
//! The graph is bipartite (controls -> rules) and fixed after startup.

use super::node::{ComputeFn, RuleId};
use super::storage::RuleStorage;
use crate::store::ControlId;
use std::collections::{BTreeSet, HashMap};

#[derive(Clone, Default)]
pub struct DependencyGraph {
    pub(crate) store: RuleStorage,
    by_output: HashMap<String, RuleId>,
}

impl DependencyGraph {
    pub fn new() -> Self { Self::default() }

    /// Adds a rule. Callers validate output uniqueness and inputs beforehand.
    pub fn add_rule(&mut self, output: &str, inputs: &[ControlId], compute: ComputeFn) -> RuleId {
        let id = self.store.push_rule(output.to_string(), inputs, compute);
        self.by_output.insert(output.to_string(), id);
        id
    }

    pub fn rule_count(&self) -> usize { self.store.count() }

    pub fn rules(&self) -> impl Iterator<Item = RuleId> {
        (0..self.store.count()).map(RuleId::new)
    }

    pub fn rule_for_output(&self, output: &str) -> Option<RuleId> {
        self.by_output.get(output).copied()
    }

    /// Rules reading `control` directly.
    pub fn dependents_of(&self, control: ControlId) -> impl Iterator<Item = RuleId> + '_ {
        self.store.dependents(control)
    }

    /// Every rule reading at least one of `changed`, each listed once, in declaration order.
    ///
    /// A rule reading several changed controls appears once, so a composite
    /// update recomputes it a single time.
    pub fn affected_by(&self, changed: &[ControlId]) -> BTreeSet<RuleId> {
        changed.iter().flat_map(|&c| self.store.dependents(c)).collect()
    }

    // --- Accessors ---
    pub fn get_inputs(&self, id: RuleId) -> &[ControlId] { self.store.get_inputs(id) }
    pub fn output_key(&self, id: RuleId) -> &str { &self.store.outputs[id.index()] }
    pub fn compute_fn(&self, id: RuleId) -> &ComputeFn { &self.store.computes[id.index()] }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::{ChartData, ChartKind, ChartSpec, DisplayOptions};
    use crate::graph::node::compute_fn;

    fn noop() -> ComputeFn {
        compute_fn(|_| {
            Ok(ChartSpec {
                kind: ChartKind::Bar,
                title: String::new(),
                data: ChartData::Series { categories: vec![], values: vec![] },
                options: DisplayOptions::default(),
            })
        })
    }

    fn c(i: usize) -> ControlId { ControlId::new(i) }

    #[test]
    fn test_dependents_follow_inputs() {
        // Shape: c0 -> r0, c0+c1 -> r1, c2 -> r2
        let mut g = DependencyGraph::new();
        let r0 = g.add_rule("a", &[c(0)], noop());
        let r1 = g.add_rule("b", &[c(0), c(1)], noop());
        let r2 = g.add_rule("c", &[c(2)], noop());

        let mut from_c0: Vec<_> = g.dependents_of(c(0)).collect();
        from_c0.sort();
        assert_eq!(from_c0, vec![r0, r1]);
        assert_eq!(g.dependents_of(c(1)).collect::<Vec<_>>(), vec![r1]);
        assert_eq!(g.dependents_of(c(2)).collect::<Vec<_>>(), vec![r2]);
        assert_eq!(g.dependents_of(c(9)).count(), 0);

        assert_eq!(g.get_inputs(r1), &[c(0), c(1)]);
        assert_eq!(g.output_key(r2), "c");
        assert_eq!(g.rule_for_output("b"), Some(r1));
    }

    #[test]
    fn test_composite_change_lists_each_rule_once() {
        let mut g = DependencyGraph::new();
        let r0 = g.add_rule("a", &[c(0), c(1)], noop());
        let r1 = g.add_rule("b", &[c(2)], noop());

        let affected = g.affected_by(&[c(1), c(0)]);
        assert_eq!(affected.into_iter().collect::<Vec<_>>(), vec![r0]);

        let affected = g.affected_by(&[c(2), c(0)]);
        assert_eq!(affected.into_iter().collect::<Vec<_>>(), vec![r0, r1]);
    }
}

//! storage.rs
//! Dense columnar rule storage.
//! Inputs of each rule are stored CSR-style; dependents of each control are
//! kept as an intrusive linked list so a value change walks only the rules
//! that read it.

use super::node::{ComputeFn, RuleId};
use crate::store::ControlId;

const NONE: u32 = u32::MAX;

#[derive(Clone, Default)]
pub struct RuleStorage {
    pub outputs: Vec<String>,
    pub computes: Vec<ComputeFn>,

    // Rule -> Controls (CSR)
    pub inputs_flat: Vec<ControlId>,
    pub inputs_ranges: Vec<(u32, u32)>,

    // Control -> Rules (linked list per control)
    pub first_dependent: Vec<u32>,
    pub dependent_targets: Vec<RuleId>,
    pub next_dependent: Vec<u32>,
}

impl RuleStorage {
    pub fn new() -> Self { Self::default() }
    pub fn count(&self) -> usize { self.outputs.len() }

    /// Ensures the per-control list heads exist for `control`.
    fn reserve_control(&mut self, control: ControlId) {
        if control.index() >= self.first_dependent.len() {
            self.first_dependent.resize(control.index() + 1, NONE);
        }
    }

    pub fn push_rule(&mut self, output: String, inputs: &[ControlId], compute: ComputeFn) -> RuleId {
        let id = RuleId::new(self.outputs.len());

        // 1. Dependents (linked list prepend)
        for &control in inputs {
            self.reserve_control(control);
            let c_idx = control.index();
            let head = self.first_dependent[c_idx];
            let new_edge = self.dependent_targets.len() as u32;
            self.dependent_targets.push(id);
            self.next_dependent.push(head);
            self.first_dependent[c_idx] = new_edge;
        }

        // 2. Inputs (CSR append)
        let start = self.inputs_flat.len() as u32;
        let count = inputs.len() as u32;
        self.inputs_flat.extend_from_slice(inputs);
        self.inputs_ranges.push((start, count));

        // 3. Payload
        self.outputs.push(output);
        self.computes.push(compute);

        id
    }

    #[inline(always)]
    pub fn get_inputs(&self, id: RuleId) -> &[ControlId] {
        let (start, count) = self.inputs_ranges[id.index()];
        &self.inputs_flat[start as usize..(start + count) as usize]
    }

    pub fn dependents(&self, control: ControlId) -> Dependents<'_> {
        let head = self.first_dependent.get(control.index()).copied().unwrap_or(NONE);
        Dependents { storage: self, edge: head }
    }
}

/// Rules reading one control, most recently declared first.
pub struct Dependents<'a> {
    storage: &'a RuleStorage,
    edge: u32,
}

impl Iterator for Dependents<'_> {
    type Item = RuleId;

    fn next(&mut self) -> Option<RuleId> {
        if self.edge == NONE {
            return None;
        }
        let idx = self.edge as usize;
        self.edge = self.storage.next_dependent[idx];
        Some(self.storage.dependent_targets[idx])
    }
}

//! Tab definitions and their resolved, id-based form.

use crate::store::ControlId;
use std::collections::HashMap;

/// A tab as declared: controls and outputs by name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TabDef {
    pub id: String,
    pub label: String,
    pub controls: Vec<String>,
    pub outputs: Vec<String>,
}

impl TabDef {
    pub fn new(id: &str, label: &str) -> Self {
        Self { id: id.to_string(), label: label.to_string(), controls: Vec::new(), outputs: Vec::new() }
    }

    pub fn control(mut self, name: &str) -> Self {
        self.controls.push(name.to_string());
        self
    }

    pub fn output(mut self, key: &str) -> Self {
        self.outputs.push(key.to_string());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tab {
    pub id: String,
    pub label: String,
    pub controls: Vec<ControlId>,
    pub outputs: Vec<String>,
}

/// All tabs in display order, with reverse lookups for ownership.
#[derive(Debug, Clone, Default)]
pub struct TabSet {
    pub tabs: Vec<Tab>,
    by_id: HashMap<String, usize>,
    control_owner: HashMap<ControlId, usize>,
}

impl TabSet {
    pub fn new(tabs: Vec<Tab>) -> Self {
        let by_id = tabs.iter().enumerate().map(|(i, t)| (t.id.clone(), i)).collect();
        let control_owner = tabs
            .iter()
            .enumerate()
            .flat_map(|(i, t)| t.controls.iter().map(move |&c| (c, i)))
            .collect();
        Self { tabs, by_id, control_owner }
    }

    pub fn len(&self) -> usize { self.tabs.len() }
    pub fn is_empty(&self) -> bool { self.tabs.is_empty() }

    pub fn position(&self, id: &str) -> Option<usize> { self.by_id.get(id).copied() }
    pub fn get(&self, index: usize) -> &Tab { &self.tabs[index] }

    /// The tab owning `control`, if any.
    pub fn owner_of(&self, control: ControlId) -> Option<usize> {
        self.control_owner.get(&control).copied()
    }
}

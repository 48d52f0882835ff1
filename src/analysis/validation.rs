//! Static checks over the whole dashboard definition, run once before the
//! dashboard starts. Every defect is collected rather than stopping at the first.

use super::error::ConfigurationError;
use crate::content::{Tab, TabDef, TabSet};
use crate::graph::RuleDef;
use crate::store::{ControlId, ControlRegistry};
use std::collections::{HashMap, HashSet};

/// The definition with every name resolved to an id.
#[derive(Debug, Clone)]
pub struct Resolved {
    /// Input ids per rule, parallel to the declared rules.
    pub rule_inputs: Vec<Vec<ControlId>>,
    pub tabs: TabSet,
}

pub fn validate(
    controls: &ControlRegistry,
    rules: &[RuleDef],
    tabs: &[TabDef],
    static_outputs: &[String],
) -> Result<Resolved, Vec<ConfigurationError>> {
    let mut errors = Vec::new();

    // 1. Rules: inputs declared, outputs unique.
    let mut outputs: HashSet<&str> = HashSet::new();
    let mut rule_inputs = Vec::with_capacity(rules.len());
    for rule in rules {
        if rule.inputs.is_empty() {
            errors.push(ConfigurationError::NoInputs { output: rule.output.clone() });
        }
        if !outputs.insert(&rule.output) {
            errors.push(ConfigurationError::DuplicateOutput { output: rule.output.clone() });
        }
        let mut ids = Vec::with_capacity(rule.inputs.len());
        for name in &rule.inputs {
            match controls.lookup(name) {
                Some(id) => ids.push(id),
                None => errors.push(ConfigurationError::UndeclaredControl {
                    output: rule.output.clone(),
                    control: name.clone(),
                }),
            }
        }
        rule_inputs.push(ids);
    }
    for key in static_outputs {
        if !outputs.insert(key) {
            errors.push(ConfigurationError::DuplicateOutput { output: key.clone() });
        }
    }

    // 2. Tabs: unique ids, exclusive ownership of controls and outputs.
    let mut tab_ids: HashSet<&str> = HashSet::new();
    let mut control_owner: HashMap<ControlId, &str> = HashMap::new();
    let mut output_owner: HashMap<&str, &str> = HashMap::new();
    let mut resolved_tabs = Vec::with_capacity(tabs.len());
    for tab in tabs {
        if !tab_ids.insert(&tab.id) {
            errors.push(ConfigurationError::DuplicateTab { tab: tab.id.clone() });
        }
        let mut ids = Vec::with_capacity(tab.controls.len());
        for name in &tab.controls {
            let Some(id) = controls.lookup(name) else {
                errors.push(ConfigurationError::UnknownTabControl { tab: tab.id.clone(), control: name.clone() });
                continue;
            };
            if let Some(first) = control_owner.insert(id, &tab.id) {
                errors.push(ConfigurationError::SharedControl {
                    control: name.clone(),
                    first: first.to_string(),
                    second: tab.id.clone(),
                });
            }
            ids.push(id);
        }
        for output in &tab.outputs {
            if !outputs.contains(output.as_str()) {
                errors.push(ConfigurationError::UnknownTabOutput { tab: tab.id.clone(), output: output.clone() });
            } else if let Some(first) = output_owner.insert(output, &tab.id) {
                errors.push(ConfigurationError::SharedOutput {
                    output: output.clone(),
                    first: first.to_string(),
                    second: tab.id.clone(),
                });
            }
        }
        resolved_tabs.push(Tab {
            id: tab.id.clone(),
            label: tab.label.clone(),
            controls: ids,
            outputs: tab.outputs.clone(),
        });
    }

    // 3. Every output lives on a tab; a rule reads only its own tab's controls.
    for (rule, inputs) in rules.iter().zip(&rule_inputs) {
        let Some(&tab) = output_owner.get(rule.output.as_str()) else {
            errors.push(ConfigurationError::UnplacedOutput { output: rule.output.clone() });
            continue;
        };
        for &input in inputs {
            if control_owner.get(&input) != Some(&tab) {
                errors.push(ConfigurationError::ForeignInput {
                    output: rule.output.clone(),
                    tab: tab.to_string(),
                    control: controls.name(input).to_string(),
                });
            }
        }
    }
    for key in static_outputs {
        if !output_owner.contains_key(key.as_str()) {
            errors.push(ConfigurationError::UnplacedOutput { output: key.clone() });
        }
    }

    if errors.is_empty() {
        Ok(Resolved { rule_inputs, tabs: TabSet::new(resolved_tabs) })
    } else {
        Err(errors)
    }
}

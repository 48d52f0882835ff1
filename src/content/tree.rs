//! tree.rs
//! Builds the declared content of a tab. Pure: reads definitions and current
//! control values, triggers nothing.

use super::tab::TabSet;
use crate::store::{ControlRegistry, Value};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "node", rename_all = "snake_case")]
pub enum ContentNode {
    Label { text: String },
    Dropdown { id: String, options: Vec<Value>, value: Value, clearable: bool },
    /// Placeholder the renderer fills with the output's current chart.
    Graph { id: String },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TabContent {
    pub tab: String,
    pub label: String,
    pub nodes: Vec<ContentNode>,
}

impl TabContent {
    pub fn dropdown_ids(&self) -> impl Iterator<Item = &str> {
        self.nodes.iter().filter_map(|n| match n {
            ContentNode::Dropdown { id, .. } => Some(id.as_str()),
            _ => None,
        })
    }

    pub fn graph_ids(&self) -> impl Iterator<Item = &str> {
        self.nodes.iter().filter_map(|n| match n {
            ContentNode::Graph { id } => Some(id.as_str()),
            _ => None,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TabHeader {
    pub id: String,
    pub label: String,
    pub selected: bool,
}

/// The whole page: title, tab strip, and only the active tab's content.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Layout {
    pub title: String,
    pub vertical: bool,
    pub tabs: Vec<TabHeader>,
    pub content: Option<TabContent>,
}

/// Content of the tab at `index`: a label and a dropdown per owned control,
/// then one placeholder per output.
pub fn build_tab(tabs: &TabSet, controls: &ControlRegistry, index: usize) -> TabContent {
    let tab = tabs.get(index);
    let mut nodes = Vec::with_capacity(tab.controls.len() * 2 + tab.outputs.len());

    for &control in &tab.controls {
        nodes.push(ContentNode::Label { text: controls.label(control).to_string() });
        nodes.push(ContentNode::Dropdown {
            id: controls.name(control).to_string(),
            options: controls.domain(control).to_vec(),
            value: controls.value(control).clone(),
            clearable: false,
        });
    }
    for output in &tab.outputs {
        nodes.push(ContentNode::Graph { id: output.clone() });
    }

    TabContent { tab: tab.id.clone(), label: tab.label.clone(), nodes }
}

pub fn build_layout(title: &str, tabs: &TabSet, controls: &ControlRegistry, active: Option<usize>) -> Layout {
    let headers = tabs
        .tabs
        .iter()
        .enumerate()
        .map(|(i, t)| TabHeader { id: t.id.clone(), label: t.label.clone(), selected: Some(i) == active })
        .collect();

    Layout {
        title: title.to_string(),
        vertical: true,
        tabs: headers,
        content: active.map(|i| build_tab(tabs, controls, i)),
    }
}

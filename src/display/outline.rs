use crate::compute::NodeState;
use crate::content::{ContentNode, Layout};
use crate::dashboard::Dashboard;
use crate::store::Value;
use std::fmt::Write;

/// Renders the page structure as an indented text tree.
pub fn format_layout(layout: &Layout) -> String {
    let mut outline = Outliner::new();
    let _ = writeln!(outline.output, "LAYOUT '{}'{}", layout.title, if layout.vertical { " (vertical tabs)" } else { "" });
    let _ = writeln!(outline.output, "--------------------------------------------------");

    for (i, tab) in layout.tabs.iter().enumerate() {
        let branch = connector(i, layout.tabs.len());
        let marker = if tab.selected { "*" } else { " " };
        let _ = writeln!(outline.output, "{}{} {} ({})", branch, marker, tab.label, tab.id);

        if !tab.selected {
            continue;
        }
        let Some(content) = &layout.content else { continue };
        let stem = outline.child_stem(branch);
        for (j, node) in content.nodes.iter().enumerate() {
            let line = format_node(node);
            let _ = writeln!(outline.output, "{}{} {}", stem, connector(j, content.nodes.len()), line);
        }
    }
    outline.output
}

/// Lists every output with its inputs and lifecycle state, grouped by tab.
/// Live outputs belong to the active tab.
pub fn format_graph(dashboard: &Dashboard) -> String {
    let mut outline = Outliner::new();
    let graph = dashboard.graph();
    let controls = dashboard.controls();
    let active = dashboard.active_tab();

    let _ = writeln!(outline.output, "DEPENDENCY GRAPH ({} rules):", graph.rule_count());
    let _ = writeln!(outline.output, "--------------------------------------------------");

    let tabs = &dashboard.tabs().tabs;
    for (i, tab) in tabs.iter().enumerate() {
        let branch = connector(i, tabs.len());
        let live = if active == Some(tab.id.as_str()) { "live" } else { "idle" };
        let _ = writeln!(outline.output, "{}{} [{}]", branch, tab.id, live);

        let stem = outline.child_stem(branch);
        for (j, output) in tab.outputs.iter().enumerate() {
            let state = dashboard.state(output).map(format_state).unwrap_or("?");
            let inputs = match graph.rule_for_output(output) {
                Some(rule) => graph
                    .get_inputs(rule)
                    .iter()
                    .map(|&c| format!("{}={}", controls.name(c), controls.value(c)))
                    .collect::<Vec<_>>()
                    .join(", "),
                None => "(static)".to_string(),
            };
            let _ = writeln!(
                outline.output,
                "{}{} {} <- {} [{}]",
                stem,
                connector(j, tab.outputs.len()),
                output,
                inputs,
                state
            );
        }
    }
    outline.output
}

struct Outliner {
    output: String,
}

impl Outliner {
    fn new() -> Self {
        Self { output: String::new() }
    }

    fn child_stem(&self, connector: &str) -> String {
        connector.replace("`--", "   ").replace("|--", "|  ")
    }
}

fn connector(i: usize, len: usize) -> &'static str {
    if i + 1 == len { "`--" } else { "|--" }
}

fn format_node(node: &ContentNode) -> String {
    match node {
        ContentNode::Label { text } => format!("Label \"{}\"", text),
        ContentNode::Dropdown { id, options, value, .. } => {
            format!("Dropdown {} = {} ({} options{})", id, value, options.len(), format_range(options))
        }
        ContentNode::Graph { id } => format!("Graph {}", id),
    }
}

fn format_range(options: &[Value]) -> String {
    match (options.first(), options.last()) {
        (Some(first), Some(last)) if options.len() > 1 => format!(": {} .. {}", first, last),
        _ => String::new(),
    }
}

fn format_state(state: NodeState) -> &'static str {
    match state {
        NodeState::Stale => "Stale",
        NodeState::Computing => "Computing",
        NodeState::Fresh => "Fresh",
    }
}

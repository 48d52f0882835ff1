//! The assembled dashboard: definition, live state and the inbound event surface.
//!
//! Events are processed one at a time. Each logical action (tab switch, value
//! change, composite update) gets one trigger sequence number; the rules it
//! affects are snapshotted against the final control values, run as one batch,
//! and their results are published as they complete.

use crate::analysis::{self, ConfigurationError};
use crate::chart::ChartSpec;
use crate::compute::{Commit, Completion, ComputeError, Engine, Job, Ledger, NodeState};
use crate::content::{self, Layout, TabContent, TabDef, TabSet};
use crate::graph::{ComputeFn, DependencyGraph, Inputs, RuleDef, RuleId};
use crate::store::{ControlId, ControlRegistry, DatasetStore, DomainSource, SelectionError, Value};
use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DashboardError {
    #[error("dashboard definition has {} configuration error(s): {}", .errors.len(), summarize(.errors))]
    Configuration { errors: Vec<ConfigurationError> },
    #[error("value '{value}' is not selectable for control '{control}'")]
    InvalidSelection { control: String, value: Value },
    #[error("unknown control '{0}'")]
    UnknownControl(String),
    #[error("unknown tab '{0}'")]
    UnknownTab(String),
    #[error("failed to start compute workers: {0}")]
    Workers(#[from] rayon::ThreadPoolBuildError),
}

fn summarize(errors: &[ConfigurationError]) -> String {
    errors.iter().map(|e| e.to_string()).collect::<Vec<_>>().join("; ")
}

impl From<SelectionError> for DashboardError {
    fn from(e: SelectionError) -> Self {
        match e {
            SelectionError::UnknownControl(c) => DashboardError::UnknownControl(c),
            SelectionError::InvalidSelection { control, value } => DashboardError::InvalidSelection { control, value },
        }
    }
}

/// An output reaching Fresh, as seen by the rendering layer.
#[derive(Debug, Clone, PartialEq)]
pub struct Publication {
    pub output: String,
    pub spec: Arc<ChartSpec>,
}

/// Receives publications as outputs become Fresh.
pub trait OutputSink {
    fn publish(&mut self, output: &str, spec: Arc<ChartSpec>);
}

impl OutputSink for Vec<Publication> {
    fn publish(&mut self, output: &str, spec: Arc<ChartSpec>) {
        self.push(Publication { output: output.to_string(), spec });
    }
}

/// A compute failure, kept for the UI layer to surface.
#[derive(Debug, Clone, PartialEq)]
pub struct Diagnostic {
    pub output: String,
    pub sequence: u64,
    pub error: ComputeError,
}

#[derive(Debug, Clone, PartialEq)]
pub struct OutputView {
    pub state: NodeState,
    pub spec: Option<Arc<ChartSpec>>,
}

pub struct DashboardBuilder {
    store: DatasetStore,
    title: String,
    controls: ControlRegistry,
    rules: Vec<RuleDef>,
    tabs: Vec<TabDef>,
    statics: Vec<(String, ChartSpec)>,
    errors: Vec<ConfigurationError>,
}

impl DashboardBuilder {
    pub fn new(store: DatasetStore) -> Self {
        Self {
            store,
            title: String::new(),
            controls: ControlRegistry::new(),
            rules: Vec::new(),
            tabs: Vec::new(),
            statics: Vec::new(),
            errors: Vec::new(),
        }
    }

    pub fn store(&self) -> &DatasetStore { &self.store }

    pub fn title(mut self, title: &str) -> Self {
        self.title = title.to_string();
        self
    }

    /// Declares a control. Registration defects are reported by `build`.
    pub fn control(mut self, name: &str, label: &str, source: DomainSource, default: impl Into<Value>) -> Self {
        if let Err(e) = self.controls.register(name, label, &source, default.into(), &self.store) {
            self.errors.push(e);
        }
        self
    }

    pub fn rule(mut self, output: &str, inputs: &[&str], compute: ComputeFn) -> Self {
        self.rules.push(RuleDef {
            output: output.to_string(),
            inputs: inputs.iter().map(|s| s.to_string()).collect(),
            compute,
        });
        self
    }

    pub fn tab(mut self, tab: TabDef) -> Self {
        self.tabs.push(tab);
        self
    }

    /// An output with fixed content: no rule, never recomputed, published on
    /// every activation of its tab.
    pub fn static_output(mut self, key: &str, spec: ChartSpec) -> Self {
        self.statics.push((key.to_string(), spec));
        self
    }

    pub fn build(self, engine: Engine) -> Result<Dashboard, DashboardError> {
        let mut errors = self.errors;
        let static_keys: Vec<String> = self.statics.iter().map(|(k, _)| k.clone()).collect();

        let resolved = match analysis::validate(&self.controls, &self.rules, &self.tabs, &static_keys) {
            Ok(resolved) if errors.is_empty() => resolved,
            Ok(_) => return Err(DashboardError::Configuration { errors }),
            Err(more) => {
                errors.extend(more);
                return Err(DashboardError::Configuration { errors });
            }
        };

        let mut graph = DependencyGraph::new();
        for (rule, inputs) in self.rules.into_iter().zip(&resolved.rule_inputs) {
            graph.add_rule(&rule.output, inputs, rule.compute);
        }

        tracing::info!(
            controls = self.controls.count(),
            rules = graph.rule_count(),
            tabs = resolved.tabs.len(),
            "Built dashboard"
        );

        Ok(Dashboard {
            title: self.title,
            store: self.store,
            ledger: Ledger::with_capacity(graph.rule_count()),
            controls: self.controls,
            graph,
            tabs: resolved.tabs,
            statics: self.statics.into_iter().map(|(k, s)| (k, Arc::new(s))).collect(),
            engine,
            active: None,
            sequence: 0,
            diagnostics: Vec::new(),
        })
    }
}

pub struct Dashboard {
    title: String,
    store: DatasetStore,
    controls: ControlRegistry,
    graph: DependencyGraph,
    tabs: TabSet,
    statics: HashMap<String, Arc<ChartSpec>>,
    ledger: Ledger,
    engine: Engine,
    active: Option<usize>,
    sequence: u64,
    diagnostics: Vec<Diagnostic>,
}

impl Dashboard {
    pub fn builder(store: DatasetStore) -> DashboardBuilder { DashboardBuilder::new(store) }

    // --- Accessors ---
    pub fn title(&self) -> &str { &self.title }
    pub fn store(&self) -> &DatasetStore { &self.store }
    pub fn controls(&self) -> &ControlRegistry { &self.controls }
    pub fn graph(&self) -> &DependencyGraph { &self.graph }
    pub fn ledger(&self) -> &Ledger { &self.ledger }
    pub fn tabs(&self) -> &TabSet { &self.tabs }
    pub fn diagnostics(&self) -> &[Diagnostic] { &self.diagnostics }

    pub fn take_diagnostics(&mut self) -> Vec<Diagnostic> { std::mem::take(&mut self.diagnostics) }

    pub fn active_tab(&self) -> Option<&str> {
        self.active.map(|i| self.tabs.get(i).id.as_str())
    }

    pub fn value(&self, control: &str) -> Option<&Value> {
        self.controls.lookup(control).map(|id| self.controls.value(id))
    }

    pub fn output(&self, key: &str) -> Option<OutputView> {
        if let Some(rule) = self.graph.rule_for_output(key) {
            return Some(OutputView {
                state: self.ledger.state(rule),
                spec: self.ledger.displayed(rule).cloned(),
            });
        }
        let spec = self.statics.get(key)?;
        let shown = self.active.is_some_and(|i| self.tabs.get(i).outputs.iter().any(|o| o == key));
        Some(if shown {
            OutputView { state: NodeState::Fresh, spec: Some(spec.clone()) }
        } else {
            OutputView { state: NodeState::Stale, spec: None }
        })
    }

    pub fn state(&self, key: &str) -> Option<NodeState> {
        self.output(key).map(|v| v.state)
    }

    /// Declared content of a tab. Pure; does not activate anything.
    pub fn build_tab(&self, tab: &str) -> Result<TabContent, DashboardError> {
        let index = self.tabs.position(tab).ok_or_else(|| DashboardError::UnknownTab(tab.to_string()))?;
        Ok(content::build_tab(&self.tabs, &self.controls, index))
    }

    pub fn layout(&self) -> Layout {
        content::build_layout(&self.title, &self.tabs, &self.controls, self.active)
    }

    // --- Inbound events ---

    pub fn select_tab(&mut self, tab: &str) -> Result<Vec<Publication>, DashboardError> {
        let mut published = Vec::new();
        self.select_tab_with(tab, &mut published)?;
        Ok(published)
    }

    /// Makes `tab` the only live tab and computes its outputs from current values.
    pub fn select_tab_with(&mut self, tab: &str, sink: &mut dyn OutputSink) -> Result<(), DashboardError> {
        let index = self.tabs.position(tab).ok_or_else(|| DashboardError::UnknownTab(tab.to_string()))?;
        if self.active == Some(index) {
            return Ok(());
        }

        if let Some(previous) = self.active.take() {
            for rule in self.rules_of_tab(previous) {
                self.ledger.deactivate(rule);
            }
            tracing::debug!(tab = %self.tabs.get(previous).id, "Deactivated tab");
        }

        self.active = Some(index);
        let rules = self.rules_of_tab(index);
        for &rule in &rules {
            self.ledger.activate(rule);
        }
        tracing::info!(tab, rules = rules.len(), "Activated tab");

        for output in &self.tabs.get(index).outputs {
            if let Some(spec) = self.statics.get(output) {
                sink.publish(output, spec.clone());
            }
        }
        self.dispatch(rules, sink);
        Ok(())
    }

    pub fn set_value(&mut self, control: &str, value: Value) -> Result<Vec<Publication>, DashboardError> {
        let mut published = Vec::new();
        self.set_value_with(control, value, &mut published)?;
        Ok(published)
    }

    /// Applies one user selection. A rejected value changes nothing.
    pub fn set_value_with(&mut self, control: &str, value: Value, sink: &mut dyn OutputSink) -> Result<(), DashboardError> {
        let (id, changed) = self.controls.set_value(control, &value).map_err(|e| {
            tracing::warn!(control, value = %value, error = %e, "Rejected selection");
            DashboardError::from(e)
        })?;
        if !changed {
            tracing::debug!(control, "Selection unchanged");
            return Ok(());
        }
        self.recompute(&[id], sink);
        Ok(())
    }

    pub fn apply(&mut self, changes: &[(&str, Value)]) -> Result<Vec<Publication>, DashboardError> {
        let mut published = Vec::new();
        self.apply_with(changes, &mut published)?;
        Ok(published)
    }

    /// Applies several selections as one action. Either all are applied or none;
    /// each affected rule recomputes once, against the final values.
    pub fn apply_with(&mut self, changes: &[(&str, Value)], sink: &mut dyn OutputSink) -> Result<(), DashboardError> {
        for (control, value) in changes {
            if let Err(e) = self.controls.check(control, value) {
                tracing::warn!(control, value = %value, error = %e, "Rejected composite update");
                return Err(e.into());
            }
        }

        let mut changed = Vec::with_capacity(changes.len());
        for (control, value) in changes {
            let (id, did_change) = self.controls.set_value(control, value)?;
            if did_change {
                changed.push(id);
            }
        }
        if !changed.is_empty() {
            self.recompute(&changed, sink);
        }
        Ok(())
    }

    // --- Internals ---

    fn rules_of_tab(&self, index: usize) -> Vec<RuleId> {
        self.tabs
            .get(index)
            .outputs
            .iter()
            .filter_map(|o| self.graph.rule_for_output(o))
            .collect()
    }

    fn next_sequence(&mut self) -> u64 {
        self.sequence += 1;
        self.sequence
    }

    fn recompute(&mut self, changed: &[ControlId], sink: &mut dyn OutputSink) {
        let live: Vec<RuleId> = self
            .graph
            .affected_by(changed)
            .into_iter()
            .filter(|&r| self.ledger.is_active(r))
            .collect();
        if live.is_empty() {
            tracing::debug!(controls = changed.len(), "No live rule reads the changed controls");
            return;
        }
        self.dispatch(live, sink);
    }

    fn snapshot(&self, rule: RuleId) -> Inputs {
        self.graph
            .get_inputs(rule)
            .iter()
            .map(|&c| (self.controls.name(c).to_string(), self.controls.value(c).clone()))
            .collect()
    }

    /// Snapshots every rule's inputs, then runs them as one batch under a fresh
    /// trigger sequence number.
    fn dispatch(&mut self, rules: Vec<RuleId>, sink: &mut dyn OutputSink) {
        if rules.is_empty() {
            return;
        }
        let sequence = self.next_sequence();
        let mut jobs = Vec::with_capacity(rules.len());
        for rule in rules {
            if self.ledger.begin(rule, sequence) {
                jobs.push(Job {
                    rule,
                    sequence,
                    inputs: self.snapshot(rule),
                    compute: self.graph.compute_fn(rule).clone(),
                });
            }
        }
        tracing::debug!(sequence, rules = jobs.len(), "Dispatching recomputation");

        let ledger = &mut self.ledger;
        let graph = &self.graph;
        let diagnostics = &mut self.diagnostics;
        self.engine.run(jobs, |done| complete(ledger, graph, diagnostics, done, sink));
    }
}

fn complete(
    ledger: &mut Ledger,
    graph: &DependencyGraph,
    diagnostics: &mut Vec<Diagnostic>,
    done: Completion,
    sink: &mut dyn OutputSink,
) {
    let output = graph.output_key(done.rule);
    match ledger.commit(done.rule, done.sequence, done.result) {
        Commit::Published(spec) => {
            tracing::debug!(output, sequence = done.sequence, rows = spec.len(), "Output fresh");
            sink.publish(output, spec);
        }
        Commit::Failed(error) => {
            tracing::warn!(output, sequence = done.sequence, error = %error, "Recomputation failed");
            diagnostics.push(Diagnostic { output: output.to_string(), sequence: done.sequence, error });
        }
        Commit::Superseded => {
            tracing::debug!(output, sequence = done.sequence, "Discarded superseded result");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::{ChartData, ChartKind, DisplayOptions};
    use crate::compute::kernel;
    use crate::graph::compute_fn;
    use crate::store::dataset::fixtures::small_store;
    use crate::store::{Field, Metric};
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn init_tracing() {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    }

    /// A rule that counts its invocations and echoes its inputs in the title.
    fn counting(counter: &Arc<AtomicUsize>) -> ComputeFn {
        let counter = counter.clone();
        compute_fn(move |inputs| {
            counter.fetch_add(1, Ordering::SeqCst);
            let title = inputs.iter().map(|(_, v)| v.to_string()).collect::<Vec<_>>().join("/");
            Ok(ChartSpec {
                kind: ChartKind::Bar,
                title,
                data: ChartData::Series { categories: vec![], values: vec![] },
                options: DisplayOptions::default(),
            })
        })
    }

    struct Fixture {
        dash: Dashboard,
        a: Arc<AtomicUsize>,
        b: Arc<AtomicUsize>,
        c: Arc<AtomicUsize>,
    }

    /// Tab "one": controls x, y, z; outputs a(x, y) and b(z).
    /// Tab "two": control w; output c(w).
    fn fixture(engine: Engine) -> Fixture {
        init_tracing();
        let (a, b, c): (Arc<AtomicUsize>, Arc<AtomicUsize>, Arc<AtomicUsize>) = Default::default();
        let dash = Dashboard::builder(small_store())
            .title("Test")
            .control("x", "X", DomainSource::Field(Field::Continent), "Asia")
            .control("y", "Y", DomainSource::Field(Field::Year), 1952)
            .control("z", "Z", DomainSource::Field(Field::Year), 1952)
            .control("w", "W", DomainSource::Fixed(Metric::ALL.iter().map(|&m| m.into()).collect()), Metric::Population)
            .rule("a", &["x", "y"], counting(&a))
            .rule("b", &["z"], counting(&b))
            .rule("c", &["w"], counting(&c))
            .tab(TabDef::new("one", "One").control("x").control("y").control("z").output("a").output("b"))
            .tab(TabDef::new("two", "Two").control("w").output("c"))
            .build(engine)
            .unwrap();
        Fixture { dash, a, b, c }
    }

    fn count(counter: &Arc<AtomicUsize>) -> usize { counter.load(Ordering::SeqCst) }

    fn keys(published: &[Publication]) -> Vec<&str> {
        let mut keys: Vec<&str> = published.iter().map(|p| p.output.as_str()).collect();
        keys.sort();
        keys
    }

    #[test]
    fn test_outputs_start_stale_until_tab_selected() {
        let f = fixture(Engine::new());
        assert_eq!(f.dash.state("a"), Some(NodeState::Stale));
        assert_eq!(f.dash.active_tab(), None);
        assert_eq!(count(&f.a), 0);
    }

    #[test]
    fn test_activation_computes_every_output_of_the_tab() {
        let mut f = fixture(Engine::with_workers(2).unwrap());
        let published = f.dash.select_tab("one").unwrap();
        assert_eq!(keys(&published), vec!["a", "b"]);
        assert_eq!(f.dash.state("a"), Some(NodeState::Fresh));
        assert_eq!(f.dash.output("a").unwrap().spec.unwrap().title, "Asia/1952");
        assert_eq!((count(&f.a), count(&f.b), count(&f.c)), (1, 1, 0));

        // Re-selecting the active tab is not a change.
        assert!(f.dash.select_tab("one").unwrap().is_empty());
        assert_eq!(count(&f.a), 1);
    }

    #[test]
    fn test_change_recomputes_only_dependents() {
        let mut f = fixture(Engine::new());
        f.dash.select_tab("one").unwrap();
        let b_before = f.dash.output("b").unwrap();

        let published = f.dash.set_value("y", Value::Year(1957)).unwrap();
        assert_eq!(keys(&published), vec!["a"]);
        assert_eq!((count(&f.a), count(&f.b)), (2, 1));
        assert_eq!(f.dash.output("b").unwrap(), b_before);
        assert_eq!(f.dash.output("a").unwrap().spec.unwrap().title, "Asia/1957");
    }

    #[test]
    fn test_composite_update_recomputes_once_with_final_values() {
        let mut f = fixture(Engine::new());
        f.dash.select_tab("one").unwrap();

        let published = f
            .dash
            .apply(&[("x", Value::text("Europe")), ("y", Value::Year(1957))])
            .unwrap();
        assert_eq!(published.len(), 1);
        assert_eq!(published[0].spec.title, "Europe/1957");
        assert_eq!(count(&f.a), 2);
    }

    #[test]
    fn test_composite_update_is_all_or_nothing() {
        let mut f = fixture(Engine::new());
        f.dash.select_tab("one").unwrap();

        let err = f
            .dash
            .apply(&[("x", Value::text("Europe")), ("y", Value::Year(1800))])
            .unwrap_err();
        assert!(matches!(err, DashboardError::InvalidSelection { .. }));
        assert_eq!(f.dash.value("x"), Some(&Value::text("Asia")));
        assert_eq!(count(&f.a), 1);
    }

    #[test]
    fn test_invalid_selection_is_rejected_without_recompute() {
        let mut f = fixture(Engine::new());
        f.dash.select_tab("one").unwrap();

        let err = f.dash.set_value("x", Value::text("Atlantis")).unwrap_err();
        assert!(matches!(err, DashboardError::InvalidSelection { ref control, .. } if control == "x"));
        assert_eq!(f.dash.value("x"), Some(&Value::text("Asia")));
        assert_eq!(count(&f.a), 1);

        assert!(matches!(f.dash.set_value("nope", Value::Year(1952)), Err(DashboardError::UnknownControl(_))));
        assert!(matches!(f.dash.select_tab("nope"), Err(DashboardError::UnknownTab(_))));
    }

    #[test]
    fn test_same_value_is_not_a_change() {
        let mut f = fixture(Engine::new());
        f.dash.select_tab("one").unwrap();
        assert!(f.dash.set_value("y", Value::Year(1952)).unwrap().is_empty());
        assert_eq!(count(&f.a), 1);
    }

    #[test]
    fn test_inactive_tab_controls_never_fire() {
        let mut f = fixture(Engine::new());
        f.dash.select_tab("one").unwrap();

        let published = f.dash.set_value("w", Value::Metric(Metric::GdpPerCapita)).unwrap();
        assert!(published.is_empty());
        assert_eq!(count(&f.c), 0);
        assert_eq!(f.dash.state("c"), Some(NodeState::Stale));

        // The new value is used once the tab becomes active.
        let published = f.dash.select_tab("two").unwrap();
        assert_eq!(published[0].spec.title, "GDP per Capita");
    }

    #[test]
    fn test_switching_tabs_deactivates_previous_outputs() {
        let mut f = fixture(Engine::new());
        f.dash.select_tab("one").unwrap();
        f.dash.select_tab("two").unwrap();

        assert_eq!(f.dash.output("a").unwrap(), OutputView { state: NodeState::Stale, spec: None });
        assert!(f.dash.set_value("y", Value::Year(1957)).unwrap().is_empty());
        assert_eq!(count(&f.a), 1);
        assert_eq!(f.dash.active_tab(), Some("two"));
    }

    #[test]
    fn test_compute_failure_keeps_previous_spec_and_other_outputs() {
        init_tracing();
        let store = small_store();
        let rows = store.load();
        let other = Arc::new(AtomicUsize::new(0));
        let mut dash = Dashboard::builder(store)
            .control("year", "Year", DomainSource::Field(Field::Year), 1952)
            .control("other", "Other", DomainSource::Field(Field::Year), 1952)
            .rule(
                "map",
                &["year"],
                compute_fn(move |inputs| {
                    let year = inputs.year("year")?;
                    if year == 1957 {
                        return Err(ComputeError::Failed("no geometry for 1957".into()));
                    }
                    Ok(kernel::aggregate_by_year(&rows, year, Metric::Population))
                }),
            )
            .rule("other", &["other"], counting(&other))
            .tab(TabDef::new("t", "T").control("year").control("other").output("map").output("other"))
            .build(Engine::new())
            .unwrap();

        dash.select_tab("t").unwrap();
        let before = dash.output("map").unwrap().spec.unwrap();

        let published = dash.set_value("year", Value::Year(1957)).unwrap();
        assert!(published.is_empty());
        let view = dash.output("map").unwrap();
        assert_eq!(view.state, NodeState::Stale);
        assert_eq!(view.spec.unwrap(), before);
        assert_eq!(dash.state("other"), Some(NodeState::Fresh));

        let diagnostics = dash.take_diagnostics();
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].output, "map");
        assert!(dash.diagnostics().is_empty());

        // Recovers on the next good value.
        dash.set_value("year", Value::Year(1952)).unwrap();
        assert_eq!(dash.state("map"), Some(NodeState::Fresh));
    }

    #[test]
    fn test_static_output_published_on_activation() {
        init_tracing();
        let store = small_store();
        let table = kernel::table_view(&store.load(), &Default::default(), 700);
        let mut dash = Dashboard::builder(store)
            .control("y", "Y", DomainSource::Field(Field::Year), 1952)
            .rule("r", &["y"], counting(&Default::default()))
            .static_output("table", table.clone())
            .tab(TabDef::new("data", "Dataset").output("table"))
            .tab(TabDef::new("r", "R").control("y").output("r"))
            .build(Engine::new())
            .unwrap();

        assert_eq!(dash.state("table"), Some(NodeState::Stale));
        let published = dash.select_tab("data").unwrap();
        assert_eq!(published.len(), 1);
        assert_eq!(*published[0].spec, table);
        assert_eq!(dash.state("table"), Some(NodeState::Fresh));

        dash.select_tab("r").unwrap();
        assert_eq!(dash.output("table").unwrap().spec, None);
        assert_eq!(dash.select_tab("data").unwrap().len(), 1);
    }

    #[test]
    fn test_build_reports_all_configuration_errors() {
        let err = Dashboard::builder(small_store())
            .control("y", "Y", DomainSource::Field(Field::Year), 2100)
            .rule("r", &["ghost"], counting(&Default::default()))
            .tab(TabDef::new("t", "T").output("r"))
            .build(Engine::new())
            .err()
            .unwrap();

        match err {
            DashboardError::Configuration { errors } => {
                assert!(errors.iter().any(|e| matches!(e, ConfigurationError::DefaultOutsideDomain { .. })));
                assert!(errors.iter().any(|e| matches!(e, ConfigurationError::UndeclaredControl { .. })));
            }
            other => panic!("unexpected error {:?}", other),
        }
    }

    #[test]
    fn test_layout_and_build_tab() {
        let mut f = fixture(Engine::new());
        assert!(f.dash.layout().content.is_none());
        f.dash.select_tab("two").unwrap();

        let layout = f.dash.layout();
        assert_eq!(layout.title, "Test");
        assert_eq!(layout.content.unwrap().tab, "two");
        let one = f.dash.build_tab("one").unwrap();
        assert_eq!(one.graph_ids().collect::<Vec<_>>(), vec!["a", "b"]);
        // Building content does not activate anything.
        assert_eq!(f.dash.state("a"), Some(NodeState::Stale));
        assert!(matches!(f.dash.build_tab("zzz"), Err(DashboardError::UnknownTab(_))));
    }
}

//! Defines the rule record and the input snapshot a rule computes from.

use crate::chart::ChartSpec;
use crate::compute::ledger::ComputeError;
use crate::store::{Metric, Value};
use smallvec::SmallVec;
use std::sync::Arc;

/// A unique, stable identifier for a rule. One rule produces exactly one output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct RuleId(pub u32);

impl RuleId {
    #[inline(always)]
    pub fn index(&self) -> usize { self.0 as usize }
    pub fn new(idx: usize) -> Self { Self(idx as u32) }
}

/// The pure function behind a rule. Shared across worker threads.
pub type ComputeFn = Arc<dyn Fn(&Inputs) -> Result<ChartSpec, ComputeError> + Send + Sync>;

/// Wraps a closure as a `ComputeFn`.
pub fn compute_fn<F>(f: F) -> ComputeFn
where
    F: Fn(&Inputs) -> Result<ChartSpec, ComputeError> + Send + Sync + 'static,
{
    Arc::new(f)
}

/// An owned snapshot of a rule's input values, in the rule's declared input order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Inputs {
    entries: SmallVec<[(String, Value); 4]>,
}

impl Inputs {
    pub fn new() -> Self { Self::default() }

    pub fn push(&mut self, control: impl Into<String>, value: Value) {
        self.entries.push((control.into(), value));
    }

    pub fn len(&self) -> usize { self.entries.len() }
    pub fn is_empty(&self) -> bool { self.entries.is_empty() }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn get(&self, control: &str) -> Option<&Value> {
        self.entries.iter().find(|(k, _)| k == control).map(|(_, v)| v)
    }

    fn require(&self, control: &str) -> Result<&Value, ComputeError> {
        self.get(control).ok_or_else(|| ComputeError::MissingInput { control: control.to_string() })
    }

    pub fn text(&self, control: &str) -> Result<&str, ComputeError> {
        self.require(control)?
            .as_text()
            .ok_or_else(|| ComputeError::TypeMismatch { control: control.to_string(), expected: "text" })
    }

    pub fn year(&self, control: &str) -> Result<i32, ComputeError> {
        self.require(control)?
            .as_year()
            .ok_or_else(|| ComputeError::TypeMismatch { control: control.to_string(), expected: "year" })
    }

    pub fn metric(&self, control: &str) -> Result<Metric, ComputeError> {
        self.require(control)?
            .as_metric()
            .ok_or_else(|| ComputeError::TypeMismatch { control: control.to_string(), expected: "metric" })
    }
}

impl FromIterator<(String, Value)> for Inputs {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Self { entries: iter.into_iter().collect() }
    }
}

/// Declarative form of a rule, before its inputs are resolved to control ids.
#[derive(Clone)]
pub struct RuleDef {
    pub output: String,
    pub inputs: Vec<String>,
    pub compute: ComputeFn,
}

impl std::fmt::Debug for RuleDef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RuleDef")
            .field("output", &self.output)
            .field("inputs", &self.inputs)
            .finish_non_exhaustive()
    }
}

//! Defines the reactive dependency graph between controls and outputs.
pub mod dag;
pub mod node;
pub mod storage;

// Re-export key types for convenient access
pub use dag::DependencyGraph;
pub use node::{compute_fn, ComputeFn, Inputs, RuleDef, RuleId};

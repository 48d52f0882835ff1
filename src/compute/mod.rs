//! Aggregation kernels and the recomputation machinery.
pub mod engine;
pub mod kernel;
pub mod ledger;

pub use engine::{Completion, Engine, Job};
pub use kernel::{aggregate, aggregate_by_year, DEFAULT_TOP_N};
pub use ledger::{Commit, ComputeError, Ledger, NodeState};

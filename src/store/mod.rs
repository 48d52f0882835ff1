//! The dataset store and the control registry.
pub mod dataset;
pub mod registry;
pub mod types;

pub use dataset::{DatasetError, DatasetStore, RowSet};
pub use registry::{ControlRegistry, SelectionError};
pub use types::{ControlId, DomainSource, Field, Metric, Row, Value};

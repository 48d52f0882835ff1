// Reactive core of the Gapminder dashboard.
// Controls feed rules, rules produce chart specifications, and only the
// active tab's outputs are ever computed.

pub mod analysis;
pub mod chart;
pub mod compute;
pub mod config;
pub mod content;
pub mod dashboard;
pub mod display;
pub mod gapminder;
pub mod graph;
pub mod store;

// --- Public surface ---
pub use chart::{ChartData, ChartKind, ChartSpec, ChartStyle, ChartVariant};
pub use compute::{ComputeError, Engine, NodeState};
pub use config::{ConfigError, DashboardConfig};
pub use dashboard::{Dashboard, DashboardBuilder, DashboardError, Diagnostic, OutputSink, OutputView, Publication};
pub use gapminder::standard_dashboard;
pub use store::{DatasetStore, Metric, Row, Value};

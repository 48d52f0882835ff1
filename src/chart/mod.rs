//! Chart specifications handed to the rendering layer.
pub mod spec;
pub mod style;

pub use spec::{ChartData, ChartKind, ChartSpec, DisplayOptions};
pub use style::{ChartStyle, ChartVariant};

//! Renderer-agnostic chart descriptions.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartKind {
    Bar,
    Pie,
    Choropleth,
    Table,
}

/// The data carried by a chart. The layout depends on the chart kind.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "layout", rename_all = "snake_case")]
pub enum ChartData {
    /// Parallel category/value arrays (bar and pie charts).
    Series { categories: Vec<String>, values: Vec<f64> },
    /// One entry per ISO-3 location; `names` are carried for hover text.
    Geo { locations: Vec<String>, names: Vec<String>, values: Vec<f64> },
    Table { header: Vec<String>, cells: Vec<Vec<String>> },
}

impl ChartData {
    pub fn len(&self) -> usize {
        match self {
            ChartData::Series { values, .. } | ChartData::Geo { values, .. } => values.len(),
            ChartData::Table { cells, .. } => cells.len(),
        }
    }

    pub fn is_empty(&self) -> bool { self.len() == 0 }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DisplayOptions {
    pub height: u32,
    pub background: String,
    /// Named discrete palette. `None` colors by category.
    pub palette: Option<String>,
    /// Named continuous color scale (choropleth only).
    pub color_scale: Option<String>,
    pub hover_fields: Vec<String>,
    pub show_values: bool,
    pub draggable: bool,
}

impl Default for DisplayOptions {
    fn default() -> Self {
        Self {
            height: 600,
            background: "#e5ecf6".to_string(),
            palette: None,
            color_scale: None,
            hover_fields: Vec::new(),
            show_values: false,
            draggable: true,
        }
    }
}

/// An immutable snapshot of one chart. Holds no reference back to the dataset.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSpec {
    pub kind: ChartKind,
    pub title: String,
    pub data: ChartData,
    pub options: DisplayOptions,
}

impl ChartSpec {
    /// True when no rows matched; the renderer shows its "no data" state.
    pub fn is_empty(&self) -> bool { self.data.is_empty() }

    pub fn len(&self) -> usize { self.data.len() }

    /// Category labels of a series chart, or location names of a map.
    pub fn categories(&self) -> &[String] {
        match &self.data {
            ChartData::Series { categories, .. } => categories,
            ChartData::Geo { names, .. } => names,
            ChartData::Table { .. } => &[],
        }
    }

    pub fn values(&self) -> &[f64] {
        match &self.data {
            ChartData::Series { values, .. } | ChartData::Geo { values, .. } => values,
            ChartData::Table { .. } => &[],
        }
    }
}

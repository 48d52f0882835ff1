//! Presentation choices for the ranking and map charts.
//!
//! The two dashboard variants share one dependency graph and differ only in
//! chart kind, palette and title wording.

use super::spec::{ChartKind, DisplayOptions};
use crate::store::Metric;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartVariant {
    #[default]
    Bar,
    Pie,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChartStyle {
    pub variant: ChartVariant,
    pub height: u32,
}

impl Default for ChartStyle {
    fn default() -> Self {
        Self { variant: ChartVariant::Bar, height: 600 }
    }
}

impl ChartStyle {
    pub fn new(variant: ChartVariant, height: u32) -> Self {
        Self { variant, height }
    }

    pub fn ranking_kind(&self) -> ChartKind {
        match self.variant {
            ChartVariant::Bar => ChartKind::Bar,
            ChartVariant::Pie => ChartKind::Pie,
        }
    }

    pub fn ranking_title(&self, metric: Metric, continent: &str, year: i32) -> String {
        match self.variant {
            ChartVariant::Bar => format!("Country {} for {} Continent in {}", metric.label(), continent, year),
            ChartVariant::Pie => format!("{} Share - {} in {}", metric.label(), continent, year),
        }
    }

    pub fn map_title(&self, metric: Metric, year: i32) -> String {
        format!("{} Choropleth Map [{}]", metric.label(), year)
    }

    pub fn background(&self) -> &'static str {
        match self.variant {
            ChartVariant::Bar => "#e5ecf6",
            ChartVariant::Pie => "#f4f6fa",
        }
    }

    pub fn ranking_options(&self, metric: Metric) -> DisplayOptions {
        let palette = match self.variant {
            ChartVariant::Bar => None,
            ChartVariant::Pie => Some(match metric {
                Metric::Population => "Bold",
                Metric::GdpPerCapita => "Vivid",
                Metric::LifeExpectancy => "Pastel1",
            }),
        };
        DisplayOptions {
            height: self.height,
            background: self.background().to_string(),
            palette: palette.map(str::to_string),
            color_scale: None,
            hover_fields: Vec::new(),
            show_values: self.variant == ChartVariant::Bar,
            draggable: true,
        }
    }

    pub fn map_options(&self, metric: Metric) -> DisplayOptions {
        let scale = match self.variant {
            ChartVariant::Bar => "RdYlBu",
            ChartVariant::Pie => "Turbo",
        };
        DisplayOptions {
            height: self.height,
            background: self.background().to_string(),
            palette: None,
            color_scale: Some(scale.to_string()),
            hover_fields: vec!["Country".to_string(), metric.label().to_string()],
            show_values: false,
            draggable: false,
        }
    }

    pub fn table_options(&self, height: u32) -> DisplayOptions {
        DisplayOptions {
            height,
            background: self.background().to_string(),
            ..DisplayOptions::default()
        }
    }
}

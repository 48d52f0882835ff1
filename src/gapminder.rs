//! gapminder.rs
//! The standard Gapminder dashboard: a dataset tab, three ranking tabs and a
//! choropleth map tab.

use crate::chart::ChartStyle;
use crate::compute::{kernel, Engine};
use crate::config::DashboardConfig;
use crate::content::TabDef;
use crate::dashboard::{Dashboard, DashboardError};
use crate::graph::{compute_fn, ComputeFn};
use crate::store::{DatasetStore, DomainSource, Field, Metric, RowSet, Value};

pub const TITLE: &str = "Gapminder Dataset Analysis";
pub const DATASET_OUTPUT: &str = "dataset";

/// (tab id, tab label, output key, continent control, year control, metric)
const RANKING_TABS: [(&str, &str, &str, &str, &str, Metric); 3] = [
    ("population", "Population", "population", "cont_pop", "year_pop", Metric::Population),
    ("gdp", "GDP Per Capita", "gdp", "cont_gdp", "year_gdp", Metric::GdpPerCapita),
    ("life_expectancy", "Life Expectancy", "life_expectancy", "cont_life_exp", "year_life_exp", Metric::LifeExpectancy),
];

fn ranking_rule(rows: RowSet, continent: &'static str, year: &'static str, metric: Metric, top_n: usize, style: ChartStyle) -> ComputeFn {
    compute_fn(move |inputs| {
        let c = inputs.text(continent)?;
        let y = inputs.year(year)?;
        Ok(kernel::aggregate_styled(&rows, c, y, metric, top_n, &style))
    })
}

fn map_rule(rows: RowSet, style: ChartStyle) -> ComputeFn {
    compute_fn(move |inputs| {
        let metric = inputs.metric("var_map")?;
        let year = inputs.year("year_map")?;
        Ok(kernel::aggregate_by_year_styled(&rows, year, metric, &style))
    })
}

/// Declares every control, rule and tab of the standard dashboard and validates
/// the result.
pub fn standard_dashboard(store: DatasetStore, config: &DashboardConfig) -> Result<Dashboard, DashboardError> {
    let style = config.chart_style();
    let rows = store.load();
    let table = kernel::table_view(&rows, &style, config.table_height);

    let mut builder = Dashboard::builder(store)
        .title(TITLE)
        .static_output(DATASET_OUTPUT, table)
        .tab(TabDef::new("dataset", "Dataset").output(DATASET_OUTPUT));

    for (tab, label, output, cont, year, metric) in RANKING_TABS {
        builder = builder
            .control(cont, "Continent", DomainSource::Field(Field::Continent), config.default_continent.as_str())
            .control(year, "Year", DomainSource::Field(Field::Year), config.default_year)
            .rule(output, &[cont, year], ranking_rule(rows.clone(), cont, year, metric, config.top_n, style.clone()))
            .tab(TabDef::new(tab, label).control(cont).control(year).output(output));
    }

    let metrics: Vec<Value> = Metric::ALL.iter().map(|&m| m.into()).collect();
    builder = builder
        .control("var_map", "Variable", DomainSource::Fixed(metrics), config.default_map_metric)
        .control("year_map", "Year", DomainSource::Field(Field::Year), config.default_year)
        .rule("choropleth_map", &["var_map", "year_map"], map_rule(rows, style))
        .tab(TabDef::new("map", "Choropleth Map").control("var_map").control("year_map").output("choropleth_map"));

    let engine = match config.workers {
        Some(n) => Engine::with_workers(n)?,
        None => Engine::new(),
    };
    builder.build(engine)
}

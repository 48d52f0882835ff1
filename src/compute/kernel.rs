//! kernel.rs
//! Pure aggregation kernels: rows in, chart spec out. No state, no side effects.

use crate::chart::{ChartData, ChartKind, ChartSpec, ChartStyle};
use crate::store::{Metric, Row, RowSet};
use std::cmp::Ordering;

pub const DEFAULT_TOP_N: usize = 15;

/// Column names of the full table view, in schema order.
pub const TABLE_HEADER: [&str; 7] = [
    "Country",
    "Continent",
    "Year",
    "Population",
    "GDP per Capita",
    "Life Expectancy",
    "ISO Alpha Country Code",
];

/// Descending by value, NaN last. Equal values compare `Equal` so a stable
/// sort keeps original row order for ties.
#[inline]
fn descending(a: f64, b: f64) -> Ordering {
    match (a.is_nan(), b.is_nan()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => b.partial_cmp(&a).unwrap_or(Ordering::Equal),
    }
}

/// Steps 1-3 of the ranking: filter on continent and year, stable sort by
/// `metric` descending, keep the first `top_n`.
pub fn rank<'a>(rows: &'a [Row], continent: &str, year: i32, metric: Metric, top_n: usize) -> Vec<&'a Row> {
    let mut matched: Vec<&Row> = rows
        .iter()
        .filter(|r| r.continent == continent && r.year == year)
        .collect();
    // `sort_by` is stable.
    matched.sort_by(|a, b| descending(metric.value(a), metric.value(b)));
    matched.truncate(top_n);
    matched
}

/// Top-N ranking chart with the default (bar) style.
pub fn aggregate(rows: &RowSet, continent: &str, year: i32, metric: Metric, top_n: usize) -> ChartSpec {
    aggregate_styled(rows, continent, year, metric, top_n, &ChartStyle::default())
}

pub fn aggregate_styled(
    rows: &RowSet,
    continent: &str,
    year: i32,
    metric: Metric,
    top_n: usize,
    style: &ChartStyle,
) -> ChartSpec {
    let ranked = rank(rows.rows(), continent, year, metric, top_n);
    let (categories, values): (Vec<String>, Vec<f64>) = ranked
        .iter()
        .map(|r| (r.country.clone(), metric.value(r)))
        .unzip();

    ChartSpec {
        kind: style.ranking_kind(),
        title: style.ranking_title(metric, continent, year),
        data: ChartData::Series { categories, values },
        options: style.ranking_options(metric),
    }
}

/// Map chart over every row of `year`. No continent filter and no truncation.
pub fn aggregate_by_year(rows: &RowSet, year: i32, metric: Metric) -> ChartSpec {
    aggregate_by_year_styled(rows, year, metric, &ChartStyle::default())
}

pub fn aggregate_by_year_styled(rows: &RowSet, year: i32, metric: Metric, style: &ChartStyle) -> ChartSpec {
    let mut locations = Vec::new();
    let mut names = Vec::new();
    let mut values = Vec::new();
    for row in rows.iter().filter(|r| r.year == year) {
        locations.push(row.iso_code.clone());
        names.push(row.country.clone());
        values.push(metric.value(row));
    }

    ChartSpec {
        kind: ChartKind::Choropleth,
        title: style.map_title(metric, year),
        data: ChartData::Geo { locations, names, values },
        options: style.map_options(metric),
    }
}

/// The whole dataset as a table, unfiltered, in original order.
pub fn table_view(rows: &RowSet, style: &ChartStyle, height: u32) -> ChartSpec {
    let cells = rows
        .iter()
        .map(|r| {
            vec![
                r.country.clone(),
                r.continent.clone(),
                r.year.to_string(),
                r.population.to_string(),
                r.gdp_per_capita.to_string(),
                r.life_expectancy.to_string(),
                r.iso_code.clone(),
            ]
        })
        .collect();

    ChartSpec {
        kind: ChartKind::Table,
        title: String::new(),
        data: ChartData::Table {
            header: TABLE_HEADER.iter().map(|h| h.to_string()).collect(),
            cells,
        },
        options: style.table_options(height),
    }
}

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub struct ControlId(pub u32);

impl ControlId {
    #[inline(always)]
    pub fn index(&self) -> usize { self.0 as usize }
    pub fn new(idx: usize) -> Self { Self(idx as u32) }
}

/// One (country, year) observation. Immutable once loaded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Row {
    pub country: String,
    pub continent: String,
    pub year: i32,
    pub population: f64,
    pub gdp_per_capita: f64,
    pub life_expectancy: f64,
    pub iso_code: String,
}

impl Row {
    pub fn field(&self, field: Field) -> Value {
        match field {
            Field::Country => Value::Text(self.country.clone()),
            Field::Continent => Value::Text(self.continent.clone()),
            Field::Year => Value::Year(self.year),
            Field::IsoCode => Value::Text(self.iso_code.clone()),
        }
    }
}

/// Row fields that can seed a control domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Field {
    Country,
    Continent,
    Year,
    IsoCode,
}

/// Numeric indicators a chart can rank or color by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Metric {
    #[serde(rename = "Population")]
    Population,
    #[serde(rename = "GDP per Capita")]
    GdpPerCapita,
    #[serde(rename = "Life Expectancy")]
    LifeExpectancy,
}

impl Metric {
    pub const ALL: [Metric; 3] = [Metric::Population, Metric::GdpPerCapita, Metric::LifeExpectancy];

    pub fn label(&self) -> &'static str {
        match self {
            Metric::Population => "Population",
            Metric::GdpPerCapita => "GDP per Capita",
            Metric::LifeExpectancy => "Life Expectancy",
        }
    }

    #[inline(always)]
    pub fn value(&self, row: &Row) -> f64 {
        match self {
            Metric::Population => row.population,
            Metric::GdpPerCapita => row.gdp_per_capita,
            Metric::LifeExpectancy => row.life_expectancy,
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|m| m.label() == label)
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A selectable control value.
///
/// Untagged on the wire so dropdown options serialize as plain numbers and strings.
/// Variant order matters for deserialization: metric labels must be tried before
/// free text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Year(i32),
    Metric(Metric),
    Text(String),
}

impl Value {
    pub fn text(s: impl Into<String>) -> Self { Value::Text(s.into()) }

    pub fn as_text(&self) -> Option<&str> {
        match self { Value::Text(s) => Some(s), _ => None }
    }

    pub fn as_year(&self) -> Option<i32> {
        match self { Value::Year(y) => Some(*y), _ => None }
    }

    pub fn as_metric(&self) -> Option<Metric> {
        match self { Value::Metric(m) => Some(*m), _ => None }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Year(y) => write!(f, "{}", y),
            Value::Metric(m) => f.write_str(m.label()),
            Value::Text(s) => f.write_str(s),
        }
    }
}

impl From<i32> for Value {
    fn from(year: i32) -> Self { Value::Year(year) }
}

impl From<Metric> for Value {
    fn from(metric: Metric) -> Self { Value::Metric(metric) }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self { Value::Text(s.to_string()) }
}

/// Where a control's domain comes from.
#[derive(Debug, Clone, PartialEq)]
pub enum DomainSource {
    /// Distinct values of a row field, in first-appearance order.
    Field(Field),
    Fixed(Vec<Value>),
}

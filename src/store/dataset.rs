//! dataset.rs
//! The read-only row store. Built once at startup, shared by reference afterwards.

use super::types::{Field, Row, Value};
use std::collections::HashSet;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use std::sync::Arc;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DatasetError {
    #[error("failed to read dataset: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse dataset rows: {0}")]
    Parse(#[from] serde_json::Error),
}

/// An immutable, cheaply clonable view over a sequence of rows.
#[derive(Debug, Clone, PartialEq)]
pub struct RowSet {
    rows: Arc<[Row]>,
}

impl Default for RowSet {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl RowSet {
    pub fn new(rows: Vec<Row>) -> Self {
        Self { rows: rows.into() }
    }

    pub fn len(&self) -> usize { self.rows.len() }
    pub fn is_empty(&self) -> bool { self.rows.is_empty() }
    pub fn rows(&self) -> &[Row] { &self.rows }
    pub fn iter(&self) -> std::slice::Iter<'_, Row> { self.rows.iter() }

    /// Returns a new set holding copies of the matching rows, in original order.
    pub fn filter(&self, predicate: impl Fn(&Row) -> bool) -> RowSet {
        RowSet::new(self.rows.iter().filter(|r| predicate(r)).cloned().collect())
    }
}

impl<'a> IntoIterator for &'a RowSet {
    type Item = &'a Row;
    type IntoIter = std::slice::Iter<'a, Row>;
    fn into_iter(self) -> Self::IntoIter { self.rows.iter() }
}

#[derive(Debug, Clone, Default)]
pub struct DatasetStore {
    rows: RowSet,
}

impl DatasetStore {
    pub fn new(rows: Vec<Row>) -> Self {
        tracing::info!(rows = rows.len(), "Loaded dataset");
        Self { rows: RowSet::new(rows) }
    }

    /// Reads a JSON array of rows.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, DatasetError> {
        let rows: Vec<Row> = serde_json::from_reader(reader)?;
        Ok(Self::new(rows))
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, DatasetError> {
        let file = File::open(path.as_ref())?;
        tracing::debug!(path = %path.as_ref().display(), "Reading dataset file");
        Self::from_reader(BufReader::new(file))
    }

    /// The full row set. Every call returns a view over the same rows.
    pub fn load(&self) -> RowSet { self.rows.clone() }

    pub fn len(&self) -> usize { self.rows.len() }
    pub fn is_empty(&self) -> bool { self.rows.is_empty() }

    /// Distinct values of `field` in first-appearance order.
    pub fn distinct_values(&self, field: Field) -> Vec<Value> {
        let mut seen = HashSet::new();
        let mut out = Vec::new();
        for row in self.rows.iter() {
            let v = row.field(field);
            if seen.insert(v.clone()) {
                out.push(v);
            }
        }
        out
    }

    pub fn filter(&self, predicate: impl Fn(&Row) -> bool) -> RowSet {
        self.rows.filter(predicate)
    }
}

//! In-memory tabular results.

use chrono::{DateTime, Utc};
use serde_json::Value;

use crate::driver::Row;

/// Materialized rows from a single statement, in result-set order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResultTable {
    columns: Vec<String>,
    rows: Vec<Row>,
}

impl ResultTable {
    pub fn new(columns: Vec<String>, rows: Vec<Row>) -> Self {
        Self { columns, rows }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn into_rows(self) -> Vec<Row> {
        self.rows
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|candidate| candidate == name)
    }

    /// The raw cell at (row, named column).
    pub fn value_at(&self, row: usize, column: &str) -> Option<&Value> {
        let index = self.column_index(column)?;
        self.rows.get(row)?.get(index)
    }

    pub fn bool_at(&self, row: usize, column: &str) -> Option<bool> {
        self.value_at(row, column)?.as_bool()
    }

    pub fn i64_at(&self, row: usize, column: &str) -> Option<i64> {
        self.value_at(row, column)?.as_i64()
    }

    pub fn f64_at(&self, row: usize, column: &str) -> Option<f64> {
        self.value_at(row, column)?.as_f64()
    }

    pub fn str_at(&self, row: usize, column: &str) -> Option<&str> {
        self.value_at(row, column)?.as_str()
    }

    /// Timestamp cells arrive from the driver as RFC 3339 strings; parsed
    /// on access.
    pub fn timestamp_at(&self, row: usize, column: &str) -> Option<DateTime<Utc>> {
        let raw = self.str_at(row, column)?;
        DateTime::parse_from_rfc3339(raw)
            .ok()
            .map(|ts| ts.with_timezone(&Utc))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Row> {
        self.rows.iter()
    }
}

// src/data.rs
//
// The one table shape every scraper returns.
//
// - Value:   a cleaned cell (text, number, date, flag or nothing).
// - DataSet: named columns + rows of Values, always rectangular.

use std::fmt;

use chrono::NaiveDate;

use crate::error::{Result, ScrapeError};

#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    Null,
    Text(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    Date(NaiveDate),
}

impl Value {
    pub fn text(s: impl Into<String>) -> Self { Value::Text(s.into()) }

    /// Text, or Null for an empty string.
    pub fn text_or_null(s: impl Into<String>) -> Self {
        let s = s.into();
        if s.is_empty() { Value::Null } else { Value::Text(s) }
    }
}

impl From<Option<i64>> for Value {
    fn from(v: Option<i64>) -> Self { v.map_or(Value::Null, Value::Int) }
}

impl From<Option<f64>> for Value {
    fn from(v: Option<f64>) -> Self { v.map_or(Value::Null, Value::Float) }
}

impl From<Option<NaiveDate>> for Value {
    fn from(v: Option<NaiveDate>) -> Self { v.map_or(Value::Null, Value::Date) }
}

impl From<Option<String>> for Value {
    fn from(v: Option<String>) -> Self { v.map_or(Value::Null, Value::Text) }
}

/// CSV rendering: Null is empty, dates are ISO.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => Ok(()),
            Value::Text(s) => f.write_str(s),
            Value::Int(v) => write!(f, "{v}"),
            Value::Float(v) => write!(f, "{v}"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Date(d) => write!(f, "{}", d.format("%Y-%m-%d")),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct DataSet {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<Value>>,
}

impl DataSet {
    pub fn new(headers: Vec<String>) -> Self { Self { headers, rows: Vec::new() } }

    /// A table with the documented columns and no rows.
    pub fn empty(headers: &[&str]) -> Self {
        Self::new(headers.iter().map(|h| s!(*h)).collect())
    }

    pub fn len(&self) -> usize { self.rows.len() }
    pub fn is_empty(&self) -> bool { self.rows.is_empty() }
    pub fn width(&self) -> usize { self.headers.len() }

    pub fn push_row(&mut self, row: Vec<Value>) -> Result<()> {
        if row.len() != self.headers.len() {
            return Err(ScrapeError::Shape(format!(
                "row has {} cells, table has {} columns",
                row.len(),
                self.headers.len()
            )));
        }
        self.rows.push(row);
        Ok(())
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    pub fn get(&self, row: usize, name: &str) -> Option<&Value> {
        let ix = self.column_index(name)?;
        self.rows.get(row)?.get(ix)
    }

    /// All cells of one column, top to bottom.
    pub fn column<'a>(&'a self, name: &str) -> impl Iterator<Item = &'a Value> + 'a {
        let ix = self.column_index(name);
        self.rows.iter().filter_map(move |r| ix.and_then(|i| r.get(i)))
    }

    /// Stack another table with the same columns underneath.
    pub fn append(&mut self, mut other: DataSet) -> Result<()> {
        if self.headers != other.headers {
            return Err(ScrapeError::Shape(format!(
                "cannot append table with columns {:?} to {:?}",
                other.headers, self.headers
            )));
        }
        self.rows.append(&mut other.rows);
        Ok(())
    }

    /// Add a column holding the same value on every row.
    pub fn with_column(mut self, name: &str, value: Value) -> Self {
        self.headers.push(s!(name));
        for r in &mut self.rows {
            r.push(value.clone());
        }
        self
    }

    /// Rows rendered as strings (for CSV/TSV output).
    pub fn to_string_rows(&self) -> Vec<Vec<String>> {
        self.rows
            .iter()
            .map(|r| r.iter().map(|v| v.to_string()).collect())
            .collect()
    }
}

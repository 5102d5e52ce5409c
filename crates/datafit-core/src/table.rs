use std::collections::BTreeSet;

use crate::error::{Error, Result};

/// A single scalar cell value.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    /// Value already known to be numeric.
    Number(f64),
    /// Raw text; may still parse as a number during type inference.
    Text(String),
    /// Empty string, explicit null marker, or undecodable bytes.
    Missing,
}

impl Cell {
    pub fn is_missing(&self) -> bool {
        matches!(self, Cell::Missing)
    }
}

impl From<&str> for Cell {
    fn from(value: &str) -> Self {
        Cell::Text(value.to_string())
    }
}

impl From<f64> for Cell {
    fn from(value: f64) -> Self {
        Cell::Number(value)
    }
}

impl<T: Into<Cell>> From<Option<T>> for Cell {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(Cell::Missing)
    }
}

/// Named, ordered column of cells.
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub name: String,
    pub cells: Vec<Cell>,
}

impl Column {
    pub fn new(name: impl Into<String>, cells: Vec<Cell>) -> Self {
        Self {
            name: name.into(),
            cells,
        }
    }
}

/// In-memory table: ordered named columns of equal length.
///
/// Construction checks that column names are unique and that every column
/// has the same number of cells, so a `Table` value is always rectangular.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    columns: Vec<Column>,
    n_rows: usize,
}

impl Table {
    pub fn new(columns: Vec<Column>) -> Result<Self> {
        let mut names = BTreeSet::new();
        for column in &columns {
            if !names.insert(column.name.as_str()) {
                return Err(Error::MalformedInput(format!(
                    "duplicate column name: {}",
                    column.name
                )));
            }
        }

        let n_rows = columns.first().map(|col| col.cells.len()).unwrap_or(0);
        if let Some(ragged) = columns.iter().find(|col| col.cells.len() != n_rows) {
            return Err(Error::MalformedInput(format!(
                "column '{}' has {} row(s), expected {}",
                ragged.name,
                ragged.cells.len(),
                n_rows
            )));
        }

        Ok(Self { columns, n_rows })
    }

    pub fn n_rows(&self) -> usize {
        self.n_rows
    }

    pub fn n_cols(&self) -> usize {
        self.columns.len()
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|col| col.name == name)
    }
}

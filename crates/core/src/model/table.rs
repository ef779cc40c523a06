use std::collections::HashSet;
use std::fmt;

use serde::Serialize;
use thiserror::Error;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum TableError {
    #[error("duplicate column name: {0}")]
    DuplicateColumn(String),

    #[error("row {row} has {found} cells, expected {expected}")]
    RowWidth {
        row: usize,
        expected: usize,
        found: usize,
    },
}

//
// ─── CELLS ─────────────────────────────────────────────────────────────────────
//

/// A single scalar read from a spreadsheet cell.
///
/// Serializes untagged so a row can be shown as plain JSON; `Missing`
/// becomes `null`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum CellValue {
    Text(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    Missing,
}

impl CellValue {
    /// True for `Missing` and for NaN floats.
    #[must_use]
    pub fn is_missing(&self) -> bool {
        match self {
            CellValue::Missing => true,
            CellValue::Float(value) => value.is_nan(),
            _ => false,
        }
    }

    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            CellValue::Text(text) => Some(text),
            _ => None,
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Text(text) => f.write_str(text),
            CellValue::Int(value) => write!(f, "{value}"),
            CellValue::Float(value) => write!(f, "{value}"),
            CellValue::Bool(value) => write!(f, "{value}"),
            CellValue::Missing => Ok(()),
        }
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        CellValue::Text(value.to_owned())
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        CellValue::Text(value)
    }
}

impl From<i64> for CellValue {
    fn from(value: i64) -> Self {
        CellValue::Int(value)
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        CellValue::Float(value)
    }
}

impl From<bool> for CellValue {
    fn from(value: bool) -> Self {
        CellValue::Bool(value)
    }
}

impl<T: Into<CellValue>> From<Option<T>> for CellValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(CellValue::Missing, Into::into)
    }
}

//
// ─── TABLE ─────────────────────────────────────────────────────────────────────
//

/// One spreadsheet row; holds exactly one cell per table column.
#[derive(Debug, Clone, PartialEq)]
pub struct Row(Vec<CellValue>);

impl Row {
    #[must_use]
    pub fn cells(&self) -> &[CellValue] {
        &self.0
    }

    #[must_use]
    pub fn get(&self, position: usize) -> Option<&CellValue> {
        self.0.get(position)
    }
}

/// Named columns plus rows, in the order they appeared in the source.
///
/// Random access by index relies on that order, so a `Table` is never
/// reordered or mutated once built.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<Row>,
}

impl Table {
    /// Build a table, checking that column names are unique and that every
    /// row is as wide as the header.
    ///
    /// # Errors
    ///
    /// Returns `TableError::DuplicateColumn` or `TableError::RowWidth`.
    pub fn new(columns: Vec<String>, rows: Vec<Vec<CellValue>>) -> Result<Self, TableError> {
        let mut names = HashSet::with_capacity(columns.len());
        for column in &columns {
            if !names.insert(column.as_str()) {
                return Err(TableError::DuplicateColumn(column.clone()));
            }
        }

        let expected = columns.len();
        let rows = rows
            .into_iter()
            .enumerate()
            .map(|(row, cells)| {
                if cells.len() == expected {
                    Ok(Row(cells))
                } else {
                    Err(TableError::RowWidth {
                        row,
                        expected,
                        found: cells.len(),
                    })
                }
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { columns, rows })
    }

    #[must_use]
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    #[must_use]
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    #[must_use]
    pub fn row(&self, index: usize) -> Option<&Row> {
        self.rows.get(index)
    }

    #[must_use]
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    #[must_use]
    pub fn column_position(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|column| column == name)
    }

    /// Cell at `(index, column)`, or `None` if either is out of range.
    #[must_use]
    pub fn value(&self, index: usize, column: &str) -> Option<&CellValue> {
        let position = self.column_position(column)?;
        self.row(index)?.get(position)
    }
}

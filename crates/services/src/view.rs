use practice_core::fields::{SizeHint, render_fields};
use practice_core::model::{CellValue, Table};
use practice_core::CoverageState;
use serde::Serialize;
use serde_json::{Map, Value};
use storage::LoadedTable;

/// One non-blank field of the drawn row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldView {
    pub column: String,
    pub value: String,
    pub size: SizeHint,
}

/// The drawn row, ready for a display sink.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PracticeCard {
    pub index: usize,
    pub total: usize,
    pub fields: Vec<FieldView>,
    /// Every cell of the row keyed by column, blanks included.
    pub raw: Value,
}

impl PracticeCard {
    /// Build the card for row `index`, or `None` if it is out of range.
    #[must_use]
    pub fn from_table(table: &Table, index: usize) -> Option<Self> {
        let row = table.row(index)?;
        let fields = render_fields(table.columns(), row)
            .map(|field| FieldView {
                column: field.column.to_string(),
                value: field.value.to_string(),
                size: field.size,
            })
            .collect();

        let raw = table
            .columns()
            .iter()
            .zip(row.cells())
            .map(|(column, cell)| (column.clone(), raw_value(cell)))
            .collect::<Map<String, Value>>();

        Some(Self {
            index,
            total: table.row_count(),
            fields,
            raw: Value::Object(raw),
        })
    }

    /// One-based row number as shown to the user.
    #[must_use]
    pub fn row_number(&self) -> usize {
        self.index + 1
    }

    #[must_use]
    pub fn position_label(&self) -> String {
        format!("Row #{} of {}", self.row_number(), self.total)
    }

    /// The raw row as pretty-printed JSON.
    #[must_use]
    pub fn raw_json(&self) -> String {
        serde_json::to_string_pretty(&self.raw).unwrap_or_else(|_| self.raw.to_string())
    }
}

fn raw_value(cell: &CellValue) -> Value {
    serde_json::to_value(cell).unwrap_or(Value::Null)
}

/// Session counters relative to the current table.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PracticeStats {
    pub practice_count: u32,
    pub seen: usize,
    pub total: usize,
    pub coverage: f64,
}

impl PracticeStats {
    #[must_use]
    pub fn new(coverage: &CoverageState, total: usize) -> Self {
        Self {
            practice_count: coverage.practice_count(),
            seen: coverage.seen_count(),
            total,
            coverage: coverage.coverage(total),
        }
    }

    #[must_use]
    pub fn coverage_percent(&self) -> f64 {
        self.coverage * 100.0
    }
}

/// What the file information panel shows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableInfo {
    pub source: String,
    pub total_rows: usize,
    pub columns: Vec<String>,
}

impl TableInfo {
    #[must_use]
    pub fn new(loaded: &LoadedTable) -> Self {
        Self {
            source: loaded.label(),
            total_rows: loaded.table.row_count(),
            columns: loaded.table.columns().to_vec(),
        }
    }

    #[must_use]
    pub fn columns_label(&self) -> String {
        self.columns.join(", ")
    }
}

use std::collections::{HashMap, HashSet};
use std::io::{Cursor, Read, Seek};
use std::path::PathBuf;

use calamine::{Data, Range, Reader, Sheets, open_workbook_auto, open_workbook_auto_from_rs};
use practice_core::model::{CellValue, Table};
use thiserror::Error;

use crate::source::{SourceKey, TableSource};

/// Errors surfaced while turning a source into a `Table`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum LoadError {
    #[error("file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("{0}")]
    Decode(String),
}

impl From<calamine::Error> for LoadError {
    fn from(err: calamine::Error) -> Self {
        LoadError::Decode(err.to_string())
    }
}

/// Contract for anything that can produce a practice table.
pub trait TableLoader: Send + Sync {
    /// Identity the loaded table is cached under.
    ///
    /// # Errors
    ///
    /// Returns `LoadError::NotFound` for a missing file.
    fn key(&self, source: &TableSource) -> Result<SourceKey, LoadError> {
        source.key()
    }

    /// Read and decode the source.
    ///
    /// # Errors
    ///
    /// Returns `LoadError::NotFound` for a missing file and
    /// `LoadError::Decode` for anything that is not a readable spreadsheet.
    fn load(&self, source: &TableSource) -> Result<Table, LoadError>;
}

//
// ─── SPREADSHEETS ──────────────────────────────────────────────────────────────
//

/// Reads the first worksheet of an xlsx/xlsm/xls/xlsb/ods workbook.
///
/// The first row is the header. Blank headers become `Unnamed: {n}` and
/// repeated ones get a `.{n}` suffix so every column has a unique name.
#[derive(Debug, Clone, Copy, Default)]
pub struct SpreadsheetLoader;

impl TableLoader for SpreadsheetLoader {
    fn load(&self, source: &TableSource) -> Result<Table, LoadError> {
        match source {
            TableSource::Path(path) => {
                if !path.exists() {
                    return Err(LoadError::NotFound(path.clone()));
                }
                let workbook = open_workbook_auto(path)?;
                read_first_sheet(workbook)
            }
            TableSource::Upload { bytes, .. } => {
                let workbook = open_workbook_auto_from_rs(Cursor::new(bytes.to_vec()))?;
                read_first_sheet(workbook)
            }
        }
    }
}

fn read_first_sheet<RS: Read + Seek>(mut workbook: Sheets<RS>) -> Result<Table, LoadError> {
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| LoadError::Decode("workbook has no worksheets".to_string()))??;
    table_from_range(&range)
}

/// Convert a worksheet range into a `Table`, header first.
///
/// # Errors
///
/// Returns `LoadError::Decode` if the rows cannot form a valid table.
pub fn table_from_range(range: &Range<Data>) -> Result<Table, LoadError> {
    let mut rows = range.rows();
    let Some(header) = rows.next() else {
        return Ok(Table::default());
    };
    let columns = column_names(header);
    let width = columns.len();

    let body = rows
        .map(|row| {
            let mut cells: Vec<CellValue> = row.iter().map(cell_value).collect();
            cells.resize(width, CellValue::Missing);
            cells
        })
        .collect();

    Table::new(columns, body).map_err(|err| LoadError::Decode(err.to_string()))
}

fn column_names(header: &[Data]) -> Vec<String> {
    let mut used = HashSet::with_capacity(header.len());
    let mut repeats: HashMap<String, usize> = HashMap::new();
    let mut names = Vec::with_capacity(header.len());

    for (position, cell) in header.iter().enumerate() {
        let label = header_label(cell);
        let base = if label.trim().is_empty() {
            format!("Unnamed: {position}")
        } else {
            label
        };

        let mut name = base.clone();
        while used.contains(&name) {
            let count = repeats.entry(base.clone()).or_insert(0);
            *count += 1;
            name = format!("{base}.{count}");
        }
        used.insert(name.clone());
        names.push(name);
    }
    names
}

fn header_label(cell: &Data) -> String {
    match cell {
        Data::String(text) => text.clone(),
        Data::Empty | Data::Error(_) => String::new(),
        Data::Float(value) if value.fract() == 0.0 && value.is_finite() => {
            format!("{value:.0}")
        }
        other => other.to_string(),
    }
}

fn cell_value(cell: &Data) -> CellValue {
    match cell {
        Data::Int(value) => CellValue::Int(*value),
        Data::Float(value) if value.is_nan() => CellValue::Missing,
        Data::Float(value) => CellValue::Float(*value),
        Data::String(text) => CellValue::Text(text.clone()),
        Data::Bool(value) => CellValue::Bool(*value),
        Data::DateTime(value) => value.as_datetime().map_or_else(
            || CellValue::Float(value.as_f64()),
            |at| CellValue::Text(at.format("%Y-%m-%d %H:%M:%S").to_string()),
        ),
        Data::DateTimeIso(text) | Data::DurationIso(text) => CellValue::Text(text.clone()),
        Data::Error(_) | Data::Empty => CellValue::Missing,
    }
}

//
// ─── STATIC ────────────────────────────────────────────────────────────────────
//

/// Serves pre-built tables by path or upload name, for tests and prototyping.
#[derive(Debug, Clone, Default)]
pub struct StaticTableLoader {
    tables: HashMap<String, Table>,
}

impl StaticTableLoader {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `table` under a path or upload name.
    #[must_use]
    pub fn with_table(mut self, label: impl Into<String>, table: Table) -> Self {
        self.tables.insert(label.into(), table);
        self
    }

    fn lookup(&self, source: &TableSource) -> Result<&Table, LoadError> {
        let label = source.label();
        self.tables.get(&label).ok_or_else(|| match source {
            TableSource::Path(path) => LoadError::NotFound(path.clone()),
            TableSource::Upload { name, .. } => {
                LoadError::Decode(format!("unsupported upload: {name}"))
            }
        })
    }
}

impl TableLoader for StaticTableLoader {
    fn key(&self, source: &TableSource) -> Result<SourceKey, LoadError> {
        self.lookup(source)?;
        match source {
            TableSource::Path(path) => Ok(SourceKey::Path {
                path: path.clone(),
                modified: None,
            }),
            TableSource::Upload { .. } => source.key(),
        }
    }

    fn load(&self, source: &TableSource) -> Result<Table, LoadError> {
        self.lookup(source).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use calamine::{ExcelDateTime, ExcelDateTimeType};

    fn range(rows: Vec<Vec<Data>>) -> Range<Data> {
        let height = u32::try_from(rows.len()).unwrap();
        let width = u32::try_from(rows.iter().map(Vec::len).max().unwrap_or(0)).unwrap();
        let mut range = Range::new((0, 0), (height.saturating_sub(1), width.saturating_sub(1)));
        for (r, row) in rows.into_iter().enumerate() {
            for (c, cell) in row.into_iter().enumerate() {
                range.set_value((u32::try_from(r).unwrap(), u32::try_from(c).unwrap()), cell);
            }
        }
        range
    }

    fn text(value: &str) -> Data {
        Data::String(value.to_string())
    }

    #[test]
    fn first_row_becomes_header_and_order_is_kept() {
        let range = range(vec![
            vec![text("Chinese"), text("Pinyin"), text("English")],
            vec![text("你好"), text("nǐ hǎo"), text("Hello")],
            vec![text("谢谢"), Data::Empty, Data::Float(2.5)],
        ]);
        let table = table_from_range(&range).unwrap();

        assert_eq!(table.columns(), ["Chinese", "Pinyin", "English"]);
        assert_eq!(table.row_count(), 2);
        assert_eq!(table.value(0, "Pinyin"), Some(&CellValue::from("nǐ hǎo")));
        assert_eq!(table.value(1, "Pinyin"), Some(&CellValue::Missing));
        assert_eq!(table.value(1, "English"), Some(&CellValue::Float(2.5)));
    }

    #[test]
    fn blank_and_repeated_headers_get_unique_names() {
        let names = column_names(&[
            text("Word"),
            Data::Empty,
            text("Word"),
            text("Word"),
            Data::Float(3.0),
        ]);
        assert_eq!(names, vec!["Word", "Unnamed: 1", "Word.1", "Word.2", "3"]);
    }

    #[test]
    fn empty_range_is_an_empty_table() {
        let table = table_from_range(&Range::empty()).unwrap();
        assert_eq!(table.row_count(), 0);
        assert_eq!(table.column_count(), 0);
    }

    #[test]
    fn error_cells_are_missing() {
        assert_eq!(
            cell_value(&Data::Error(calamine::CellErrorType::NA)),
            CellValue::Missing
        );
        assert_eq!(cell_value(&Data::Int(7)), CellValue::Int(7));
        assert_eq!(cell_value(&Data::Bool(true)), CellValue::Bool(true));
    }

    #[test]
    fn date_cells_render_as_text() {
        let noon = ExcelDateTime::new(45780.5, ExcelDateTimeType::DateTime, false);
        assert_eq!(
            cell_value(&Data::DateTime(noon)),
            CellValue::from("2025-05-03 12:00:00")
        );
        assert_eq!(
            cell_value(&Data::DateTimeIso("2025-05-03T08:30:00".into())),
            CellValue::from("2025-05-03T08:30:00")
        );
    }

    #[test]
    fn integral_floats_stay_floats() {
        assert_eq!(cell_value(&Data::Float(1.0)), CellValue::Float(1.0));
        assert_eq!(cell_value(&Data::Float(f64::NAN)), CellValue::Missing);
        assert_eq!(CellValue::Float(1.0).to_string(), "1");
    }

    #[test]
    fn header_only_sheet_has_columns_and_no_rows() {
        let table = table_from_range(&range(vec![vec![text("Chinese"), text("English")]])).unwrap();
        assert_eq!(table.columns(), ["Chinese", "English"]);
        assert_eq!(table.row_count(), 0);
        assert!(table.is_empty());
    }

    #[test]
    fn static_loader_serves_registered_tables() {
        let table = Table::new(vec!["A".into()], vec![vec!["x".into()]]).unwrap();
        let loader = StaticTableLoader::new().with_table("practice.xlsx", table.clone());

        let source = TableSource::path("practice.xlsx");
        assert_eq!(loader.load(&source).unwrap(), table);
        assert!(matches!(
            loader.key(&source).unwrap(),
            SourceKey::Path { modified: None, .. }
        ));
        assert_eq!(
            loader.load(&TableSource::path("other.xlsx")).unwrap_err(),
            LoadError::NotFound(PathBuf::from("other.xlsx"))
        );
    }
}

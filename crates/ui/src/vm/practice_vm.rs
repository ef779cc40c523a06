use practice_core::SizeHint;
use services::{FieldView, LoadedTable, PracticeCard, TableInfo};

use crate::vm::time_fmt::format_datetime;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FieldVm {
    pub label: String,
    pub value: String,
    pub value_class: &'static str,
}

impl From<&FieldView> for FieldVm {
    fn from(field: &FieldView) -> Self {
        Self {
            label: field.column.clone(),
            value: field.value.clone(),
            value_class: value_class(field.size),
        }
    }
}

/// CSS class for a value; the stylesheet maps these to 24px and 18px.
#[must_use]
pub fn value_class(size: SizeHint) -> &'static str {
    match size {
        SizeHint::Large => "field-value field-value--large",
        SizeHint::Default => "field-value field-value--default",
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SentenceCardVm {
    pub fields: Vec<FieldVm>,
    pub position: String,
    pub raw_json: String,
}

impl From<&PracticeCard> for SentenceCardVm {
    fn from(card: &PracticeCard) -> Self {
        Self {
            fields: card.fields.iter().map(FieldVm::from).collect(),
            position: card.position_label(),
            raw_json: card.raw_json(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TableInfoVm {
    pub source: String,
    pub total_rows: usize,
    pub columns: String,
    pub modified_str: Option<String>,
}

impl TableInfoVm {
    #[must_use]
    pub fn new(info: &TableInfo, loaded: &LoadedTable) -> Self {
        Self {
            source: info.source.clone(),
            total_rows: info.total_rows,
            columns: info.columns_label(),
            modified_str: loaded.key.modified().map(format_datetime),
        }
    }

    #[must_use]
    pub fn has_rows(&self) -> bool {
        self.total_rows > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use practice_core::model::{CellValue, Table};

    #[test]
    fn card_maps_size_hints_to_classes() {
        let table = Table::new(
            vec!["Chinese".into(), "English".into(), "Pinyin".into()],
            vec![vec!["你好".into(), "Hello".into(), CellValue::Missing]],
        )
        .unwrap();
        let card = PracticeCard::from_table(&table, 0).unwrap();
        let vm = SentenceCardVm::from(&card);

        assert_eq!(vm.fields.len(), 2);
        assert_eq!(vm.fields[0].label, "Chinese");
        assert_eq!(vm.fields[0].value_class, "field-value field-value--large");
        assert_eq!(vm.fields[1].value_class, "field-value field-value--default");
        assert_eq!(vm.position, "Row #1 of 1");
        assert!(vm.raw_json.contains("\"Pinyin\": null"));
    }
}

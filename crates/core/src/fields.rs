//! Turns a table row into the fields worth showing.
//!
//! Values pass through untouched; escaping is the display layer's job.

use serde::Serialize;

use crate::model::{CellValue, Row};

/// First and last code point of the CJK Unified Ideographs block.
pub const CJK_IDEOGRAPHS: (char, char) = ('\u{4e00}', '\u{9fff}');

/// How large a value should be drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SizeHint {
    Default,
    /// Text containing CJK ideographs.
    Large,
}

/// A non-blank field ready for display.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderedField<'a> {
    pub column: &'a str,
    pub value: &'a CellValue,
    pub size: SizeHint,
}

/// True if the value should be skipped: missing, NaN, or whitespace-only text.
#[must_use]
pub fn is_blank(value: &CellValue) -> bool {
    if value.is_missing() {
        return true;
    }
    value.as_text().is_some_and(|text| text.trim().is_empty())
}

#[must_use]
pub fn contains_cjk(text: &str) -> bool {
    let (first, last) = CJK_IDEOGRAPHS;
    text.chars().any(|ch| (first..=last).contains(&ch))
}

#[must_use]
pub fn size_hint(value: &CellValue) -> SizeHint {
    match value.as_text() {
        Some(text) if contains_cjk(text) => SizeHint::Large,
        _ => SizeHint::Default,
    }
}

/// Walk `columns` in order and yield each non-blank value of `row`.
///
/// `row` is expected to come from the same table as `columns`; cells past
/// the end of a shorter row are treated as missing.
pub fn render_fields<'a>(
    columns: &'a [String],
    row: &'a Row,
) -> impl Iterator<Item = RenderedField<'a>> + 'a {
    columns
        .iter()
        .enumerate()
        .filter_map(move |(position, column)| {
            let value = row.get(position)?;
            if is_blank(value) {
                return None;
            }
            Some(RenderedField {
                column,
                value,
                size: size_hint(value),
            })
        })
}

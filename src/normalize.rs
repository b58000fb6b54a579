//! Mapping raw rows into product records.

use crate::model::{CellValue, ColumnRef, DatasetVariant, ProductRecord, RawRow, RawTable};
use unicode_normalization::UnicodeNormalization;

/// Clean a text field for display: NFC-normalize, turn whitespace control
/// characters into spaces, drop other control characters, and trim.
pub fn clean_field(value: &str) -> String {
    value
        .nfc()
        .filter_map(|c| match c {
            c if c.is_whitespace() && c.is_control() => Some(' '),
            c if c.is_control() => None,
            c => Some(c),
        })
        .collect::<String>()
        .trim()
        .to_string()
}

/// Format a purity cell.
///
/// Numeric fractions become whole percentages (`0.97` → `"97%"`); text that
/// already contains `%` is trimmed and kept; anything else is passed through
/// as text, with missing values giving the empty string.
pub fn format_purity(value: &CellValue) -> String {
    match value {
        CellValue::Number(n) if n.is_finite() => {
            let percent = (n * 100.0).round();
            // -0.0 would print as "-0"
            let percent = if percent == 0.0 { 0.0 } else { percent };
            format!("{}%", percent)
        }
        CellValue::Text(s) if s.contains('%') => s.trim().to_string(),
        other => other.as_text(),
    }
}

/// Column references resolved to positions for one table.
struct ResolvedMapping {
    name: Option<usize>,
    category: Option<usize>,
    detail: [Option<usize>; 2],
}

impl ResolvedMapping {
    fn new(table: &RawTable, variant: DatasetVariant) -> Self {
        let mapping = variant.mapping();
        let resolve = |column: ColumnRef| match column {
            ColumnRef::Header(name) => table.column_index(name),
            ColumnRef::Index(index) => Some(index),
        };

        Self {
            name: resolve(mapping.name),
            category: resolve(mapping.category),
            detail: [resolve(mapping.detail[0]), resolve(mapping.detail[1])],
        }
    }
}

fn cell(row: &RawRow, column: Option<usize>) -> &CellValue {
    static MISSING: CellValue = CellValue::Empty;
    column.map_or(&MISSING, |index| row.get(index))
}

fn text(row: &RawRow, column: Option<usize>) -> String {
    clean_field(&cell(row, column).as_text())
}

fn normalize_row(row: &RawRow, mapping: &ResolvedMapping, variant: DatasetVariant) -> ProductRecord {
    let name = text(row, mapping.name);
    let category = text(row, mapping.category);

    match variant {
        DatasetVariant::Chemical => {
            let cas = text(row, mapping.detail[0]);
            let purity = clean_field(&format_purity(cell(row, mapping.detail[1])));
            ProductRecord::chemical(name, cas, category, purity)
        }
        DatasetVariant::Catalog => {
            let description = text(row, mapping.detail[0]);
            let price = text(row, mapping.detail[1]);
            ProductRecord::catalog(name, category, description, price)
        }
    }
}

/// Normalize every non-blank row of a table into records of `variant`.
///
/// Columns the mapping names but the table lacks read as empty strings.
pub fn normalize_table(table: &RawTable, variant: DatasetVariant) -> Vec<ProductRecord> {
    let mapping = ResolvedMapping::new(table, variant);

    if let ColumnRef::Header(_) = variant.mapping().name {
        if mapping.name.is_none() {
            tracing::warn!(variant = %variant, "dataset has no product name column");
        }
    }

    table
        .rows
        .iter()
        .filter(|row| !row.is_blank())
        .map(|row| normalize_row(row, &mapping, variant))
        .collect()
}

//! Raw tabular data as read from a dataset, before normalization.

use serde::{Deserialize, Serialize};

/// A single source cell, keeping the type the source gave it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "lowercase")]
pub enum CellValue {
    /// Absent or blank cell
    #[default]
    Empty,
    /// String cell
    Text(String),
    /// Numeric cell
    Number(f64),
    /// Boolean cell
    Bool(bool),
}

static EMPTY_CELL: CellValue = CellValue::Empty;

impl CellValue {
    /// Build a text cell, mapping the empty string to [`CellValue::Empty`].
    pub fn text(s: impl Into<String>) -> Self {
        let s = s.into();
        if s.is_empty() {
            CellValue::Empty
        } else {
            CellValue::Text(s)
        }
    }

    /// Check if this cell carries no value.
    pub fn is_empty(&self) -> bool {
        match self {
            CellValue::Empty => true,
            CellValue::Text(s) => s.is_empty(),
            _ => false,
        }
    }

    /// Display form of the value; empty cells become the empty string.
    pub fn as_text(&self) -> String {
        match self {
            CellValue::Empty => String::new(),
            CellValue::Text(s) => s.clone(),
            CellValue::Number(n) => n.to_string(),
            CellValue::Bool(true) => "TRUE".to_string(),
            CellValue::Bool(false) => "FALSE".to_string(),
        }
    }
}

/// One data row. Cells are positional and line up with [`RawTable::headers`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawRow {
    /// Cells in column order
    #[serde(default)]
    pub cells: Vec<CellValue>,
}

impl RawRow {
    /// Create a row from cells.
    pub fn new(cells: Vec<CellValue>) -> Self {
        Self { cells }
    }

    /// Get the cell at a column index; missing columns read as empty.
    pub fn get(&self, index: usize) -> &CellValue {
        self.cells.get(index).unwrap_or(&EMPTY_CELL)
    }

    /// Check if every cell in the row is empty.
    pub fn is_blank(&self) -> bool {
        self.cells.iter().all(CellValue::is_empty)
    }
}

/// A header row plus data rows.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawTable {
    /// Column names from the first row
    pub headers: Vec<String>,
    /// Data rows
    #[serde(default)]
    pub rows: Vec<RawRow>,
}

impl RawTable {
    /// Create an empty table with the given headers.
    pub fn new(headers: Vec<String>) -> Self {
        Self {
            headers,
            rows: Vec::new(),
        }
    }

    /// Add a data row.
    pub fn add_row(&mut self, row: RawRow) {
        self.rows.push(row);
    }

    /// Index of the first column whose header equals `name`.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    /// Get the number of data rows.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Check if the table has no data rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_text() {
        assert_eq!(CellValue::text(""), CellValue::Empty);
        assert_eq!(CellValue::text("x"), CellValue::Text("x".to_string()));
        assert!(CellValue::Text(String::new()).is_empty());
        assert!(!CellValue::Number(0.0).is_empty());
    }

    #[test]
    fn test_cell_as_text() {
        assert_eq!(CellValue::Empty.as_text(), "");
        assert_eq!(CellValue::Number(67.0).as_text(), "67");
        assert_eq!(CellValue::Number(0.99).as_text(), "0.99");
        assert_eq!(CellValue::Bool(true).as_text(), "TRUE");
    }

    #[test]
    fn test_row_missing_column() {
        let row = RawRow::new(vec![CellValue::text("a")]);
        assert_eq!(row.get(0), &CellValue::text("a"));
        assert_eq!(row.get(5), &CellValue::Empty);
        assert!(!row.is_blank());
        assert!(RawRow::new(vec![CellValue::Empty, CellValue::text("")]).is_blank());
    }

    #[test]
    fn test_column_index_first_match() {
        let table = RawTable::new(vec![
            "Category".to_string(),
            "Purity".to_string(),
            "Category".to_string(),
        ]);
        assert_eq!(table.column_index("Category"), Some(0));
        assert_eq!(table.column_index("Purity"), Some(1));
        assert_eq!(table.column_index("CAS No."), None);
        assert!(table.is_empty());
    }
}

//! Delimited text reader.
//!
//! The format is deliberately simple: a header line followed by one record
//! per line, fields split on a single delimiter character. There is no
//! quoting or escaping, so a delimiter inside a value splits the value.

use crate::error::{Error, Result};
use crate::model::{CellValue, RawRow, RawTable};

/// Default field delimiter.
pub const DEFAULT_DELIMITER: char = ',';

/// Parse delimited text into a table.
///
/// The whole input is trimmed first, so leading blank lines and a trailing
/// newline do not produce rows. A `\r` before each line break is dropped.
/// Every field is a text cell; fields missing at the end of a short line
/// read as empty.
pub fn parse_delimited(content: &str, delimiter: char) -> Result<RawTable> {
    if delimiter == '\n' || delimiter == '\r' {
        return Err(Error::InvalidData(format!(
            "line break {:?} cannot be a field delimiter",
            delimiter
        )));
    }

    let content = content.strip_prefix('\u{FEFF}').unwrap_or(content).trim();
    if content.is_empty() {
        return Err(Error::EmptyDataset);
    }

    let mut lines = content
        .split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line));

    let header = lines.next().ok_or(Error::EmptyDataset)?;
    let mut table = RawTable::new(header.split(delimiter).map(str::to_string).collect());

    for line in lines {
        let cells = line.split(delimiter).map(CellValue::text).collect();
        table.add_row(RawRow::new(cells));
    }

    Ok(table)
}

/// Parse delimited bytes, rejecting input that is not UTF-8.
pub fn parse_delimited_bytes(data: &[u8], delimiter: char) -> Result<RawTable> {
    let content = std::str::from_utf8(data).map_err(|e| Error::Encoding(e.to_string()))?;
    parse_delimited(content, delimiter)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_and_rows() {
        let table = parse_delimited(
            "Name,Category,Description,Price\nBeaker,Glassware,250 ml,4.50\nFunnel,Glassware,,2\n",
            ',',
        )
        .unwrap();

        assert_eq!(table.headers, vec!["Name", "Category", "Description", "Price"]);
        assert_eq!(table.row_count(), 2);
        assert_eq!(table.rows[0].get(3), &CellValue::text("4.50"));
        assert_eq!(table.rows[1].get(2), &CellValue::Empty);
    }

    #[test]
    fn test_short_lines_and_crlf() {
        let table = parse_delimited("a;b;c\r\nx;y\r\n", ';').unwrap();
        assert_eq!(table.headers, vec!["a", "b", "c"]);
        assert_eq!(table.rows[0].get(1), &CellValue::text("y"));
        assert_eq!(table.rows[0].get(2), &CellValue::Empty);
    }

    #[test]
    fn test_no_quote_handling() {
        let table = parse_delimited("n,c\n\"Flask, round\",Glass", ',').unwrap();
        assert_eq!(table.rows[0].get(0), &CellValue::text("\"Flask"));
        assert_eq!(table.rows[0].get(1), &CellValue::text(" round\""));
    }

    #[test]
    fn test_header_only() {
        let table = parse_delimited("Name,Category\n", ',').unwrap();
        assert!(table.is_empty());
    }

    #[test]
    fn test_line_break_delimiter() {
        assert!(matches!(parse_delimited("a\nb", '\n'), Err(Error::InvalidData(_))));
    }

    #[test]
    fn test_empty_input() {
        assert!(matches!(parse_delimited("  \n ", ','), Err(Error::EmptyDataset)));
        assert!(matches!(
            parse_delimited_bytes(&[0xFF, 0xFE, 0x00], ','),
            Err(Error::Encoding(_))
        ));
    }
}

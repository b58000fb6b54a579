//! XLSX (Excel) dataset reader.
//!
//! Only the first sheet of a workbook is read. Its first non-empty row
//! supplies the column headers; every following non-empty row becomes a
//! [`RawRow`](crate::model::RawRow) with cells typed as text, number or
//! boolean.
//!
//! # Example
//!
//! ```no_run
//! use prodtable::xlsx::XlsxParser;
//!
//! let parser = XlsxParser::open("pro.xlsx")?;
//! let table = parser.read_first_sheet()?;
//! println!("Columns: {:?}", table.headers);
//! # Ok::<(), prodtable::Error>(())
//! ```

mod parser;
mod shared_strings;

pub use parser::XlsxParser;

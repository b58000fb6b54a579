//! XLSX workbook reader.

use crate::container::ZipContainer;
use crate::error::{Error, Result};
use crate::model::{CellValue, RawRow, RawTable};
use std::collections::HashMap;
use std::path::Path;

use super::shared_strings::SharedStrings;

const WORKBOOK_PATH: &str = "xl/workbook.xml";
const SHARED_STRINGS_PATH: &str = "xl/sharedStrings.xml";

/// Sheet entry from workbook.xml.
#[derive(Debug, Clone)]
struct SheetInfo {
    name: String,
    rel_id: String,
}

/// Parser for XLSX workbooks.
pub struct XlsxParser {
    container: ZipContainer,
    shared_strings: SharedStrings,
    sheets: Vec<SheetInfo>,
    relationships: HashMap<String, String>,
}

impl XlsxParser {
    /// Open an XLSX file for parsing.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let container = ZipContainer::open(path)?;
        Self::from_container(container)
    }

    /// Create a parser from bytes.
    pub fn from_bytes(data: Vec<u8>) -> Result<Self> {
        let container = ZipContainer::from_bytes(data)?;
        Self::from_container(container)
    }

    fn from_container(container: ZipContainer) -> Result<Self> {
        let shared_strings = if container.exists(SHARED_STRINGS_PATH) {
            SharedStrings::parse(&container.read_xml(SHARED_STRINGS_PATH)?)?
        } else {
            SharedStrings::default()
        };

        let relationships = Self::parse_workbook_rels(&container)?;

        let workbook = container.read_xml(WORKBOOK_PATH)?;
        let sheets = Self::parse_workbook(&workbook)?;

        tracing::debug!(
            sheets = sheets.len(),
            shared_strings = shared_strings.len(),
            "workbook opened"
        );

        Ok(Self {
            container,
            shared_strings,
            sheets,
            relationships,
        })
    }

    /// Parse workbook relationships into an id → target map.
    fn parse_workbook_rels(container: &ZipContainer) -> Result<HashMap<String, String>> {
        let mut rels = HashMap::new();

        let xml = match container.read_xml("xl/_rels/workbook.xml.rels") {
            Ok(xml) => xml,
            Err(Error::MissingComponent(_)) => return Ok(rels),
            Err(e) => return Err(e),
        };

        let mut reader = quick_xml::Reader::from_str(&xml);
        let mut buf = Vec::new();

        loop {
            match reader.read_event_into(&mut buf) {
                Ok(quick_xml::events::Event::Empty(e)) | Ok(quick_xml::events::Event::Start(e)) => {
                    if e.name().as_ref() == b"Relationship" {
                        let mut id = String::new();
                        let mut target = String::new();

                        for attr in e.attributes().flatten() {
                            match attr.key.as_ref() {
                                b"Id" => id = String::from_utf8_lossy(&attr.value).to_string(),
                                b"Target" => {
                                    target = String::from_utf8_lossy(&attr.value).to_string()
                                }
                                _ => {}
                            }
                        }

                        if !id.is_empty() && !target.is_empty() {
                            rels.insert(id, target);
                        }
                    }
                }
                Ok(quick_xml::events::Event::Eof) => break,
                Err(e) => return Err(Error::XmlParse(e.to_string())),
                _ => {}
            }
            buf.clear();
        }

        Ok(rels)
    }

    /// Parse workbook.xml for the sheet list, in workbook order.
    fn parse_workbook(xml: &str) -> Result<Vec<SheetInfo>> {
        let mut sheets = Vec::new();
        let mut reader = quick_xml::Reader::from_str(xml);
        let mut buf = Vec::new();

        loop {
            match reader.read_event_into(&mut buf) {
                Ok(quick_xml::events::Event::Empty(e)) | Ok(quick_xml::events::Event::Start(e)) => {
                    if e.name().as_ref() == b"sheet" {
                        let mut name = String::new();
                        let mut rel_id = String::new();

                        for attr in e.attributes().flatten() {
                            match attr.key.as_ref() {
                                b"name" => {
                                    name = String::from_utf8_lossy(&attr.value).to_string()
                                }
                                b"r:id" => {
                                    rel_id = String::from_utf8_lossy(&attr.value).to_string()
                                }
                                _ => {}
                            }
                        }

                        if !name.is_empty() {
                            sheets.push(SheetInfo { name, rel_id });
                        }
                    }
                }
                Ok(quick_xml::events::Event::Eof) => break,
                Err(e) => return Err(Error::XmlParse(e.to_string())),
                _ => {}
            }
            buf.clear();
        }

        Ok(sheets)
    }

    /// Read the first sheet as a table: first non-empty row is the header.
    pub fn read_first_sheet(&self) -> Result<RawTable> {
        let sheet = self
            .sheets
            .first()
            .ok_or_else(|| Error::MissingComponent("worksheet".to_string()))?;

        let sheet_path = match self.relationships.get(&sheet.rel_id) {
            Some(target) => ZipContainer::resolve_path(WORKBOOK_PATH, target),
            // Workbooks without relationships keep the conventional part name
            None => "xl/worksheets/sheet1.xml".to_string(),
        };

        let xml = self.container.read_xml(&sheet_path)?;
        self.parse_sheet(&xml)
    }

    /// Parse a worksheet into a header row plus data rows.
    fn parse_sheet(&self, xml: &str) -> Result<RawTable> {
        let mut reader = quick_xml::Reader::from_str(xml);
        let mut buf = Vec::new();

        let mut rows: Vec<Vec<CellValue>> = Vec::new();
        let mut current_row: Option<Vec<CellValue>> = None;
        let mut in_value = false;
        let mut phonetic_depth = 0usize;
        let mut cell_column: usize = 0;
        let mut cell_type: Option<String> = None;
        let mut cell_text = String::new();

        loop {
            match reader.read_event_into(&mut buf) {
                Ok(quick_xml::events::Event::Start(ref e)) => match e.name().as_ref() {
                    b"row" => current_row = Some(Vec::new()),
                    b"c" => {
                        let next = current_row.as_ref().map_or(0, Vec::len);
                        cell_column = next;
                        cell_type = None;
                        cell_text.clear();

                        for attr in e.attributes().flatten() {
                            match attr.key.as_ref() {
                                b"r" => {
                                    let reference = String::from_utf8_lossy(&attr.value);
                                    cell_column = column_index(&reference)?.unwrap_or(next);
                                }
                                b"t" => {
                                    cell_type =
                                        Some(String::from_utf8_lossy(&attr.value).to_string())
                                }
                                _ => {}
                            }
                        }
                    }
                    // Phonetic hints inside inline strings are not cell text
                    b"rPh" => phonetic_depth += 1,
                    b"v" | b"t" => in_value = phonetic_depth == 0,
                    _ => {}
                },
                Ok(quick_xml::events::Event::Text(ref e)) => {
                    if in_value {
                        let text = e.unescape().map_err(|e| Error::XmlParse(e.to_string()))?;
                        cell_text.push_str(&text);
                    }
                }
                Ok(quick_xml::events::Event::End(ref e)) => match e.name().as_ref() {
                    b"row" => {
                        if let Some(row) = current_row.take() {
                            rows.push(row);
                        }
                    }
                    b"c" => {
                        let value = self.resolve_cell_value(&cell_text, cell_type.as_deref());
                        if let Some(ref mut row) = current_row {
                            place_cell(row, cell_column, value);
                        }
                    }
                    b"rPh" => phonetic_depth = phonetic_depth.saturating_sub(1),
                    b"v" | b"t" => in_value = false,
                    _ => {}
                },
                Ok(quick_xml::events::Event::Eof) => break,
                Err(e) => return Err(Error::XmlParse(e.to_string())),
                _ => {}
            }
            buf.clear();
        }

        let mut rows = rows
            .into_iter()
            .map(RawRow::new)
            .filter(|row| !row.is_blank());

        let header = rows.next().ok_or(Error::EmptyDataset)?;
        let mut table = RawTable::new(header.cells.iter().map(CellValue::as_text).collect());
        for row in rows {
            table.add_row(row);
        }

        Ok(table)
    }

    /// Resolve a cell value based on its type attribute.
    fn resolve_cell_value(&self, value: &str, cell_type: Option<&str>) -> CellValue {
        match cell_type {
            Some("s") => match value.trim().parse::<usize>() {
                Ok(idx) => CellValue::text(self.shared_strings.get(idx).unwrap_or("")),
                Err(_) => CellValue::text(value),
            },
            Some("b") => CellValue::Bool(value.trim() == "1"),
            Some("str") | Some("inlineStr") | Some("e") | Some("d") => CellValue::text(value),
            _ => {
                if value.is_empty() {
                    CellValue::Empty
                } else {
                    value
                        .trim()
                        .parse::<f64>()
                        .map(CellValue::Number)
                        .unwrap_or_else(|_| CellValue::text(value))
                }
            }
        }
    }

    /// Get the number of sheets.
    pub fn sheet_count(&self) -> usize {
        self.sheets.len()
    }

    /// Get sheet names in workbook order.
    pub fn sheet_names(&self) -> Vec<&str> {
        self.sheets.iter().map(|s| s.name.as_str()).collect()
    }
}

/// Put a cell at its column, padding skipped columns with empty cells.
fn place_cell(row: &mut Vec<CellValue>, column: usize, value: CellValue) {
    if column >= row.len() {
        row.resize(column + 1, CellValue::Empty);
    }
    row[column] = value;
}

/// Last column a worksheet can address (`XFD`).
const MAX_COLUMN_INDEX: usize = 16_383;

/// Zero-based column index of an A1-style reference (`"C7"` → 2).
///
/// A reference without column letters gives `None`; one past `XFD` is
/// invalid data.
fn column_index(reference: &str) -> Result<Option<usize>> {
    let letters = reference
        .bytes()
        .take_while(|b| b.is_ascii_alphabetic())
        .map(|b| b.to_ascii_uppercase());

    let mut number = 0usize;
    for letter in letters {
        number = number
            .checked_mul(26)
            .and_then(|n| n.checked_add((letter - b'A' + 1) as usize))
            .filter(|n| *n <= MAX_COLUMN_INDEX + 1)
            .ok_or_else(|| {
                Error::InvalidData(format!("cell reference {:?} is out of range", reference))
            })?;
    }

    Ok(number.checked_sub(1))
}

//! Shared string table (`xl/sharedStrings.xml`).
//!
//! Text cells with `t="s"` store an index into this table instead of the
//! text itself.

use crate::error::{Error, Result};
use quick_xml::events::Event;

/// Shared strings in table order.
#[derive(Debug, Clone, Default)]
pub struct SharedStrings {
    strings: Vec<String>,
}

impl SharedStrings {
    /// Parse the shared string table.
    ///
    /// Rich text runs inside one `<si>` are concatenated. Phonetic hints
    /// (`<rPh>`) are skipped so they do not leak into product names.
    /// Whitespace inside `<t>` is kept as written.
    pub fn parse(xml: &str) -> Result<Self> {
        let mut reader = quick_xml::Reader::from_str(xml);
        let mut buf = Vec::new();

        let mut strings = Vec::new();
        // Text of the <si> being read, if any
        let mut entry: Option<String> = None;
        let mut in_text = false;
        let mut phonetic_depth = 0usize;

        loop {
            match reader.read_event_into(&mut buf) {
                Ok(Event::Start(e)) => match e.name().as_ref() {
                    b"si" => entry = Some(String::new()),
                    b"rPh" => phonetic_depth += 1,
                    b"t" => in_text = entry.is_some() && phonetic_depth == 0,
                    _ => {}
                },
                // <si/> still occupies an index
                Ok(Event::Empty(e)) if e.name().as_ref() == b"si" => strings.push(String::new()),
                Ok(Event::Text(e)) if in_text => {
                    let text = e.unescape().map_err(|e| Error::XmlParse(e.to_string()))?;
                    if let Some(entry) = entry.as_mut() {
                        entry.push_str(&text);
                    }
                }
                Ok(Event::End(e)) => match e.name().as_ref() {
                    b"si" => strings.extend(entry.take()),
                    b"rPh" => phonetic_depth = phonetic_depth.saturating_sub(1),
                    b"t" => in_text = false,
                    _ => {}
                },
                Ok(Event::Eof) => break,
                Err(e) => return Err(Error::XmlParse(e.to_string())),
                _ => {}
            }
            buf.clear();
        }

        Ok(Self { strings })
    }

    /// Get a string by index.
    pub fn get(&self, index: usize) -> Option<&str> {
        self.strings.get(index).map(|s| s.as_str())
    }

    /// Number of strings in the table.
    pub fn len(&self) -> usize {
        self.strings.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_shared_strings() {
        let xml = r#"<?xml version="1.0" encoding="UTF-8"?>
<sst xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" count="3" uniqueCount="3">
    <si><t>ProductName</t></si>
    <si><t>Acetone</t></si>
    <si><t>Solvent &amp; Cleaner</t></si>
</sst>"#;

        let ss = SharedStrings::parse(xml).unwrap();
        assert_eq!(ss.len(), 3);
        assert_eq!(ss.get(0), Some("ProductName"));
        assert_eq!(ss.get(1), Some("Acetone"));
        assert_eq!(ss.get(2), Some("Solvent & Cleaner"));
        assert_eq!(ss.get(3), None);
    }

    #[test]
    fn test_rich_text_and_phonetic() {
        let xml = r#"<sst>
    <si>
        <r><t>Sodium </t></r>
        <r><t>Chloride</t></r>
        <rPh sb="0" eb="1"><t>hint</t></rPh>
    </si>
    <si/>
    <si><t>Last</t></si>
</sst>"#;

        let ss = SharedStrings::parse(xml).unwrap();
        assert_eq!(ss.len(), 3);
        assert_eq!(ss.get(0), Some("Sodium Chloride"));
        assert_eq!(ss.get(1), Some(""));
        assert_eq!(ss.get(2), Some("Last"));
    }
}

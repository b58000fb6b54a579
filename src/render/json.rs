//! JSON renderer implementation.

use crate::error::Result;
use crate::model::ProductRecord;

/// JSON output format options.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum JsonFormat {
    /// Compact single-line JSON
    Compact,
    /// Pretty-printed with 2-space indentation
    #[default]
    Pretty,
}

/// Convert records to a JSON array.
pub fn to_json(records: &[&ProductRecord], format: JsonFormat) -> Result<String> {
    let json = match format {
        JsonFormat::Compact => serde_json::to_string(records)?,
        JsonFormat::Pretty => serde_json::to_string_pretty(records)?,
    };
    Ok(json)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_json_pretty() {
        let records = [ProductRecord::catalog("Beaker", "Glassware", "250 ml", "4.50")];
        let refs: Vec<&ProductRecord> = records.iter().collect();

        let json = to_json(&refs, JsonFormat::Pretty).unwrap();
        assert!(json.contains("\"name\": \"Beaker\""));
        assert!(json.contains("\"variant\": \"catalog\""));
    }

    #[test]
    fn test_to_json_compact() {
        let records = [ProductRecord::chemical("Acetone", "67-64-1", "Solvent", "99%")];
        let refs: Vec<&ProductRecord> = records.iter().collect();

        let json = to_json(&refs, JsonFormat::Compact).unwrap();
        assert!(!json.contains('\n'));

        let parsed: Vec<ProductRecord> = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, records);
    }

    #[test]
    fn test_empty_list() {
        assert_eq!(to_json(&[], JsonFormat::Compact).unwrap(), "[]");
    }
}
